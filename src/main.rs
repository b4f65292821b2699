//! Dungeon Dash entry point
//!
//! Terminal front-end: turns key presses, viewport changes and a fixed timer
//! into engine events, and redraws the snapshot after each one.

use std::fs::File;
use std::io::{self, Stdout, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};

use dungeon_dash::Settings;
use dungeon_dash::sim::{
    Action, Direction, Event, Flow, GamePhase, GameState, Snapshot, Tile, handle_event,
};

/// Log output goes to a file so it never lands on the game screen
const LOG_FILE: &str = "dungeon-dash.log";

/// Terminal columns/rows not available to the board (border + status lines)
const CHROME_COLS: u16 = 2;
const CHROME_ROWS: u16 = 5;

fn main() -> ExitCode {
    init_logging();
    log::info!("Dungeon Dash starting...");

    match run() {
        Ok(()) => {
            log::info!("Bye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Fatal: {e:#}");
            eprintln!("dungeon-dash: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let Ok(file) = File::create(LOG_FILE) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn run() -> Result<()> {
    let settings = Settings::load(&Settings::default_path());
    let mut state = GameState::from_settings(&settings);
    log::info!("Seed {}", state.seed);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("enabling raw mode")?;
    stdout
        .execute(EnterAlternateScreen)
        .and_then(|out| out.execute(Hide))
        .context("entering alternate screen")?;

    let result = event_loop(&mut stdout, &mut state, settings.tick());

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// Merge keys, resizes and timer wake-ups into one ordered event stream
fn event_loop(out: &mut Stdout, state: &mut GameState, period: Duration) -> Result<()> {
    let start = Instant::now();
    let (cols, rows) = terminal::size().context("reading terminal size")?;
    handle_event(state, viewport_event(cols, rows))?;

    let mut next_tick = start;
    loop {
        draw(out, &state.snapshot()).context("drawing frame")?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        let engine_event = if event::poll(timeout)? {
            match event::read()? {
                TermEvent::Key(key) => key_action(key).map(Event::Input),
                TermEvent::Resize(cols, rows) => Some(viewport_event(cols, rows)),
                _ => None,
            }
        } else {
            next_tick = Instant::now() + period;
            Some(Event::Tick(start.elapsed()))
        };

        let Some(engine_event) = engine_event else {
            continue;
        };
        let flow = handle_event(state, engine_event)?;
        for game_event in state.drain_events() {
            log::debug!("{game_event:?}");
        }
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

/// Board size that fits a terminal of `cols` x `rows`
fn viewport_event(cols: u16, rows: u16) -> Event {
    Event::Resize {
        width: i32::from(cols.saturating_sub(CHROME_COLS)),
        height: i32::from(rows.saturating_sub(CHROME_ROWS)),
    }
}

fn key_action(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Action::Move(Direction::Up)),
        KeyCode::Char('s') | KeyCode::Down => Some(Action::Move(Direction::Down)),
        KeyCode::Char('a') | KeyCode::Left => Some(Action::Move(Direction::Left)),
        KeyCode::Char('d') | KeyCode::Right => Some(Action::Move(Direction::Right)),
        KeyCode::Char('p') => Some(Action::TogglePause),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Confirm),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

fn glyph(tile: Tile) -> char {
    match tile {
        Tile::Empty => '.',
        Tile::Player => '@',
        Tile::Treasure => '$',
        Tile::Trap => '^',
        Tile::Enemy => 'E',
        Tile::Potion => '+',
    }
}

/// Screen lines for a snapshot
fn frame(snapshot: &Snapshot<'_>) -> Vec<String> {
    match snapshot.phase {
        GamePhase::Menu => vec![
            "DUNGEON DASH".to_string(),
            String::new(),
            "Use WASD or arrow keys to move".to_string(),
            "Collect every $ per level, avoid ^ traps and E enemies".to_string(),
            "+ potions heal | Levels get harder!".to_string(),
            String::new(),
            "Press ENTER to start or Q to quit".to_string(),
        ],
        GamePhase::Paused => vec![
            "PAUSED".to_string(),
            String::new(),
            "Press P to resume or Q to quit".to_string(),
        ],
        GamePhase::Playing | GamePhase::GameOver => board_frame(snapshot),
    }
}

fn board_frame(snapshot: &Snapshot<'_>) -> Vec<String> {
    let grid = snapshot.grid;
    let horizontal = format!("+{}+", "-".repeat(grid.width() as usize));

    let mut rows: Vec<Vec<char>> = grid
        .rows()
        .map(|row| row.iter().map(|&t| glyph(t)).collect())
        .collect();

    if let Some(n) = snapshot.countdown {
        let label = if n == 0 {
            " GO! ".to_string()
        } else {
            format!(" {n} ")
        };
        let row = &mut rows[grid.height() as usize / 2];
        let start = row.len().saturating_sub(label.len()) / 2;
        for (cell, ch) in row.iter_mut().skip(start).zip(label.chars()) {
            *cell = ch;
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 5);
    lines.push(horizontal.clone());
    lines.extend(rows.into_iter().map(|row| format!("|{}|", String::from_iter(row))));
    lines.push(horizontal);
    lines.push(format!(
        "Score: {} | HP: {}/{} | Level: {} | Treasures Left: {}",
        snapshot.score, snapshot.hp, snapshot.max_hp, snapshot.level, snapshot.treasures_left
    ));
    lines.push(match (snapshot.phase, snapshot.countdown) {
        (GamePhase::GameOver, _) => "GAME OVER! Press R to restart or Q to quit".to_string(),
        (_, Some(_)) => "Get ready to move!".to_string(),
        _ => "Controls: WASD/Arrows: Move | P: Pause | Q: Quit".to_string(),
    });
    lines
}

fn draw(out: &mut Stdout, snapshot: &Snapshot<'_>) -> io::Result<()> {
    out.queue(Clear(ClearType::All))?;
    for (y, line) in frame(snapshot).iter().enumerate() {
        out.queue(MoveTo(0, y as u16))?.queue(Print(line))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_dash::sim::BoardSize;

    #[test]
    fn test_key_mapping() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            key_action(press(KeyCode::Char('w'))),
            Some(Action::Move(Direction::Up))
        );
        assert_eq!(
            key_action(press(KeyCode::Left)),
            Some(Action::Move(Direction::Left))
        );
        assert_eq!(key_action(press(KeyCode::Enter)), Some(Action::Confirm));
        assert_eq!(key_action(press(KeyCode::Char('x'))), None);
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_viewport_leaves_room_for_chrome() {
        assert_eq!(
            viewport_event(82, 30),
            Event::Resize {
                width: 80,
                height: 25
            }
        );
        assert_eq!(viewport_event(1, 1), Event::Resize { width: 0, height: 0 });
    }

    #[test]
    fn test_board_frame_shows_countdown() {
        let mut state = GameState::new(1, Duration::from_millis(100), BoardSize::new(20, 10));
        handle_event(&mut state, Event::Input(Action::Confirm)).unwrap();
        let lines = frame(&state.snapshot());

        // border + 10 rows + border + status + footer
        assert_eq!(lines.len(), 14);
        assert!(lines[..12].iter().all(|l| l.chars().count() == 22));
        assert!(lines[6].contains(" 3 "));
        assert!(lines[12].starts_with("Score: 0 | HP: 5/10 | Level: 1"));
        assert_eq!(lines[13], "Get ready to move!");
    }
}
