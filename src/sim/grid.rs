//! Tile grid projected from player + entity sets
//!
//! The grid owns no state of its own: `project` rebuilds every cell.

use serde::Serialize;

use super::state::{BoardSize, Entities, Position, Tile};

/// Row-major tile grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Tile>,
}

impl Grid {
    pub fn new(board: BoardSize) -> Self {
        Self {
            width: board.width,
            height: board.height,
            cells: vec![Tile::Empty; board.cell_count()],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.x >= self.width || pos.y < 0 || pos.y >= self.height {
            return None;
        }
        Some((pos.y * self.width + pos.x) as usize)
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|i| self.cells[i])
    }

    fn set(&mut self, pos: Position, tile: Tile) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = tile;
        }
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.width as usize)
    }

    /// Rebuild every cell. Later layers win: player, treasures, traps,
    /// enemies, potions.
    pub fn project(&mut self, board: BoardSize, player: Position, entities: &Entities) {
        if self.width != board.width || self.height != board.height {
            *self = Self::new(board);
        } else {
            self.cells.fill(Tile::Empty);
        }

        self.set(player, Tile::Player);
        let layers = [
            (&entities.treasures, Tile::Treasure),
            (&entities.traps, Tile::Trap),
            (&entities.enemies, Tile::Enemy),
            (&entities.potions, Tile::Potion),
        ];
        for (positions, tile) in layers {
            for &pos in positions {
                self.set(pos, tile);
            }
        }
    }

    /// Number of cells holding `tile`
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_marks_each_category() {
        let board = BoardSize::new(20, 10);
        let entities = Entities {
            treasures: vec![Position::new(1, 1)],
            traps: vec![Position::new(2, 1)],
            enemies: vec![Position::new(3, 1)],
            potions: vec![Position::new(4, 1)],
        };
        let mut grid = Grid::new(board);
        grid.project(board, Position::new(0, 0), &entities);

        assert_eq!(grid.get(Position::new(0, 0)), Some(Tile::Player));
        assert_eq!(grid.get(Position::new(1, 1)), Some(Tile::Treasure));
        assert_eq!(grid.get(Position::new(2, 1)), Some(Tile::Trap));
        assert_eq!(grid.get(Position::new(3, 1)), Some(Tile::Enemy));
        assert_eq!(grid.get(Position::new(4, 1)), Some(Tile::Potion));
        assert_eq!(grid.count(Tile::Empty), 200 - 5);
    }

    #[test]
    fn test_projection_clears_stale_cells() {
        let board = BoardSize::new(20, 10);
        let mut entities = Entities {
            traps: vec![Position::new(5, 5)],
            ..Default::default()
        };
        let mut grid = Grid::new(board);
        grid.project(board, Position::new(0, 0), &entities);
        entities.traps[0] = Position::new(6, 5);
        grid.project(board, Position::new(1, 0), &entities);

        assert_eq!(grid.get(Position::new(5, 5)), Some(Tile::Empty));
        assert_eq!(grid.get(Position::new(0, 0)), Some(Tile::Empty));
        assert_eq!(grid.count(Tile::Trap), 1);
    }

    #[test]
    fn test_projection_follows_board_size() {
        let mut grid = Grid::new(BoardSize::new(20, 10));
        let bigger = BoardSize::new(30, 15);
        grid.project(bigger, Position::new(29, 14), &Entities::default());
        assert_eq!((grid.width(), grid.height()), (30, 15));
        assert_eq!(grid.rows().count(), 15);
        assert!(grid.rows().all(|row| row.len() == 30));
        assert_eq!(grid.get(Position::new(29, 14)), Some(Tile::Player));
        assert_eq!(grid.get(Position::new(30, 0)), None);
    }
}
