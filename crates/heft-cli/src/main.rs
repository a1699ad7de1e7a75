//! `heft`, a terminal UI for tracking BMI over time.
//!
//! # Usage
//!
//! ```
//! heft
//! heft --db ~/bmi_data.db
//! heft --config ~/.config/heft/config.toml
//! ```

mod app;
mod settings;
mod ui;

use std::{
  fs::OpenOptions,
  io,
  path::PathBuf,
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use heft_core::tracker::Tracker;
use heft_store_sqlite::SqliteStore;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "heft", version, about = "Terminal BMI calculator and tracker")]
struct Args {
  /// Path to a TOML config file (db_path, log_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite database holding the measurements.
  #[arg(long, value_name = "PATH")]
  db: Option<PathBuf>,

  /// File that receives the log output.
  #[arg(long, value_name = "PATH")]
  log_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Config file < HEFT_* environment < CLI flags.
  let settings = Settings::load(args.config.as_deref())
    .context("loading configuration")?
    .with_overrides(args.db, args.log_file);

  init_tracing(&settings)?;

  let store = SqliteStore::open(&settings.db_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.db_path))?;
  let mut app = App::new(Tracker::new(Arc::new(store)));

  // Load users before touching the terminal so a broken database is
  // reported on a normal screen.
  app.load_users().await.context("loading users")?;

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  tracing::info!("exiting");
  run_result
}

/// Log to a file; the terminal belongs to the UI.
fn init_tracing(settings: &Settings) -> Result<()> {
  if let Some(dir) = settings.log_file.parent()
    && !dir.as_os_str().is_empty()
  {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("creating log directory {}", dir.display()))?;
  }
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&settings.log_file)
    .with_context(|| format!("opening log file {}", settings.log_file.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();

  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key).await? {
          break;
        }
      }
      // Terminal will redraw on next iteration.
      _ => {}
    }
  }

  Ok(())
}
