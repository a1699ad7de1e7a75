//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use heft_core::{
  bmi::Reading,
  measurement::{Measurement, TrendPoint, normalize_user},
  tracker::{Tracker, TrackerError},
};
use heft_store_sqlite::SqliteStore;

pub const INVALID_INPUT_MSG: &str = "Weight and Height must be greater than 0.";
pub const NOT_A_NUMBER_MSG: &str = "Weight and Height must be numbers.";
pub const NO_USER_MSG: &str = "Create a user first.";

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// User selector plus the weight/height form.
  Form,
  /// Prompt for a new user name.
  NewUser,
  /// Table of past measurements for the current user.
  History,
  /// BMI-over-time chart for the current user.
  Trend,
}

/// Which form input receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Weight,
  Height,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  /// Users known to the store, refreshed after every save.
  pub users: Vec<String>,

  /// The selected user. May name a user with no measurements yet.
  pub current_user: Option<String>,

  /// Current fuzzy-filter string for the user selector.
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  pub weight_input: String,
  pub height_input: String,
  pub focus: Field,

  /// Text typed into the new-user prompt.
  pub new_user_input: String,

  /// The most recent successful calculation.
  pub last_reading: Option<Reading>,

  pub history: Vec<Measurement>,
  pub history_cursor: usize,

  pub trend: Vec<TrendPoint>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub tracker: Tracker<SqliteStore>,
}

impl App {
  pub fn new(tracker: Tracker<SqliteStore>) -> Self {
    Self {
      screen: Screen::Form,
      users: Vec::new(),
      current_user: None,
      filter: String::new(),
      filter_active: false,
      weight_input: String::new(),
      height_input: String::new(),
      focus: Field::Weight,
      new_user_input: String::new(),
      last_reading: None,
      history: Vec::new(),
      history_cursor: 0,
      trend: Vec::new(),
      status_msg: String::new(),
      tracker,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Re-read the user directory and fix up the selection. Opens the new-user
  /// prompt when there is nobody to select.
  pub async fn load_users(&mut self) -> anyhow::Result<()> {
    let directory = self.tracker.directory();
    self.current_user = directory
      .select_default(self.current_user.as_deref())
      .await?;
    self.users = directory.list().await?;
    if self.current_user.is_none() {
      self.open_new_user();
    }
    Ok(())
  }

  async fn load_history(&mut self, user: &str) {
    match self.tracker.history(user).await {
      Ok(rows) => {
        self.history = rows;
        self.history_cursor = 0;
        self.status_msg.clear();
        self.screen = Screen::History;
      }
      Err(e) => {
        tracing::error!(user, "loading history failed: {e}");
        self.status_msg = format!("Could not load history: {e}");
      }
    }
  }

  async fn load_trend(&mut self, user: &str) {
    match self.tracker.trend(user).await {
      Ok(points) => {
        self.trend = points;
        self.status_msg.clear();
        self.screen = Screen::Trend;
      }
      Err(e) => {
        tracing::error!(user, "loading trend failed: {e}");
        self.status_msg = format!("Could not load trend: {e}");
      }
    }
  }

  // ── User selector ─────────────────────────────────────────────────────────

  /// Users matching the current filter query.
  pub fn filtered_users(&self) -> Vec<&str> {
    if self.filter.is_empty() {
      return self.users.iter().map(String::as_str).collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .users
      .iter()
      .map(String::as_str)
      .filter(|u| matcher.fuzzy_match(u, &self.filter).is_some())
      .collect()
  }

  /// Move the selection `step` places through the known users, wrapping.
  /// A transient (not yet saved) user sorts before the first known user.
  fn cycle_user(&mut self, step: isize) {
    if self.users.is_empty() {
      return;
    }
    let len = self.users.len() as isize;
    let pos = self
      .current_user
      .as_ref()
      .and_then(|c| self.users.iter().position(|u| u == c))
      .map(|p| p as isize)
      .unwrap_or(if step > 0 { -1 } else { 0 });
    let next = (pos + step).rem_euclid(len) as usize;
    self.current_user = Some(self.users[next].clone());
  }

  fn open_new_user(&mut self) {
    self.new_user_input.clear();
    self.screen = Screen::NewUser;
  }

  // ── Calculation ───────────────────────────────────────────────────────────

  /// Parse the form, compute the BMI, and save it for the current user.
  pub async fn calculate(&mut self) {
    let Some(user) = self.current_user.clone() else {
      self.status_msg = NO_USER_MSG.into();
      self.open_new_user();
      return;
    };

    let (Ok(weight_kg), Ok(height_cm)) = (
      self.weight_input.trim().parse::<f64>(),
      self.height_input.trim().parse::<f64>(),
    ) else {
      self.status_msg = NOT_A_NUMBER_MSG.into();
      return;
    };

    match self.tracker.measure(&user, weight_kg, height_cm).await {
      Ok((reading, _)) => {
        self.last_reading = Some(reading);
        self.status_msg = format!("Saved for {user}.");
        if let Err(e) = self.load_users().await {
          self.status_msg = format!("Saved, but could not refresh users: {e}");
        }
      }
      Err(TrackerError::Core(heft_core::Error::InvalidInput { .. })) => {
        self.status_msg = INVALID_INPUT_MSG.into();
      }
      Err(TrackerError::Core(e)) => {
        self.status_msg = e.to_string();
      }
      Err(TrackerError::Store(e)) => {
        tracing::error!(%user, "saving measurement failed: {e}");
        self.status_msg = format!("Could not save measurement: {e}");
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    match self.screen {
      Screen::Form => self.handle_form_key(key).await,
      Screen::NewUser => Ok(self.handle_new_user_key(key)),
      Screen::History => Ok(self.handle_history_key(key)),
      Screen::Trend => Ok(self.handle_trend_key(key)),
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
      }
      KeyCode::Enter => {
        self.filter_active = false;
        if let Some(first) = self.filtered_users().first() {
          self.current_user = Some((*first).to_owned());
        }
        self.filter.clear();
      }
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => {}
    }
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => return Ok(false),

      // Numeric entry into the focused field.
      KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
        self.focused_input().push(c);
      }
      KeyCode::Backspace => {
        self.focused_input().pop();
      }

      KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
        self.focus = match self.focus {
          Field::Weight => Field::Height,
          Field::Height => Field::Weight,
        };
      }

      KeyCode::Left | KeyCode::Char('[') => self.cycle_user(-1),
      KeyCode::Right | KeyCode::Char(']') => self.cycle_user(1),

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
      }
      KeyCode::Char('n') => self.open_new_user(),

      KeyCode::Enter => self.calculate().await,

      KeyCode::Char('h') => match self.current_user.clone() {
        Some(user) => self.load_history(&user).await,
        None => self.status_msg = NO_USER_MSG.into(),
      },
      KeyCode::Char('t') => match self.current_user.clone() {
        Some(user) => self.load_trend(&user).await,
        None => self.status_msg = NO_USER_MSG.into(),
      },

      _ => {}
    }
    Ok(true)
  }

  fn focused_input(&mut self) -> &mut String {
    match self.focus {
      Field::Weight => &mut self.weight_input,
      Field::Height => &mut self.height_input,
    }
  }

  fn handle_new_user_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.new_user_input.clear();
        self.screen = Screen::Form;
      }
      KeyCode::Enter => match normalize_user(&self.new_user_input) {
        // Lives only in the selection until a measurement is saved.
        Ok(name) => {
          self.status_msg = format!("New user {name}; save a measurement to keep them.");
          self.current_user = Some(name);
          self.new_user_input.clear();
          self.screen = Screen::Form;
        }
        Err(e) => self.status_msg = e.to_string(),
      },
      KeyCode::Backspace => {
        self.new_user_input.pop();
      }
      KeyCode::Char(c) => self.new_user_input.push(c),
      _ => {}
    }
    true
  }

  fn handle_history_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::Form;
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.history_cursor + 1 < self.history.len() {
          self.history_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.history_cursor = self.history_cursor.saturating_sub(1);
      }
      _ => {}
    }
    true
  }

  fn handle_trend_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('t') => {
        self.screen = Screen::Form;
      }
      _ => {}
    }
    true
  }
}
