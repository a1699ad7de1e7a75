//! TUI rendering for all panes.

pub mod form;
pub mod history;
pub mod trend;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Form => form::draw(f, rows[1], app),
    Screen::NewUser => {
      form::draw(f, rows[1], app);
      draw_new_user_prompt(f, rows[1], app);
    }
    Screen::History => history::draw(f, rows[1], app),
    Screen::Trend => trend::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let user = app.current_user.as_deref().unwrap_or("no user");

  let left = Span::styled(
    format!(" BMI CALCULATOR  ·  {user}"),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── New-user prompt ──────────────────────────────────────────────────────────

fn draw_new_user_prompt(f: &mut Frame, area: Rect, app: &App) {
  let popup = centered(area, 40, 3);
  let block = Block::default()
    .title(" New User ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));
  let inner = block.inner(popup);

  f.render_widget(Clear, popup);
  f.render_widget(block, popup);
  f.render_widget(
    Paragraph::new(Line::from(vec![
      Span::styled("Name: ", Style::default().fg(Color::DarkGray)),
      Span::raw(format!("{}_", app.new_user_input)),
    ])),
    inner,
  );
}

/// A `width` x `height` rectangle centred in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.screen {
    Screen::Form if app.filter_active => (
      "USER",
      "Type to filter  Esc cancel  Enter select",
    ),
    Screen::Form => (
      "FORM",
      "Tab field  ←→ user  / find  n new user  Enter calculate  h history  t trend  q quit",
    ),
    Screen::NewUser => ("NEW USER", "Type a name  Enter confirm  Esc cancel"),
    Screen::History => ("HISTORY", "↑↓/jk scroll  Esc back  q quit"),
    Screen::Trend => ("TREND", "Esc back  q quit"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
