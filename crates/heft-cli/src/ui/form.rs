//! Entry form: user selector on the left, weight/height inputs and the last
//! reading on the right.

use heft_core::bmi::Category;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, Field};

/// Render the form screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
    .split(area);

  draw_users(f, cols[0], app);
  draw_inputs(f, cols[1], app);
}

// ─── User selector ────────────────────────────────────────────────────────────

fn draw_users(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_users();

  let title = if app.filter_active {
    format!(" Users ({}/{}) ", filtered.len(), app.users.len())
  } else {
    format!(" Users ({}) ", app.users.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let current = app.current_user.as_deref();

  let mut names: Vec<&str> = filtered;
  // A new user has no rows yet, so the directory does not list them.
  if let Some(c) = current
    && !app.filter_active
    && !names.contains(&c)
  {
    names.insert(0, c);
  }

  let items: Vec<ListItem> = names
    .iter()
    .map(|name| {
      let unsaved = !app.users.iter().any(|u| u == name);
      let mut spans = vec![Span::raw(name.to_string())];
      if unsaved {
        spans.push(Span::styled(" (new)", Style::default().fg(Color::DarkGray)));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if app.filter_active && inner_area.height > 1 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);
    f.render_widget(
      Paragraph::new(format!("/{}_", app.filter)).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let mut state = ListState::default();
  state.select(
    current
      .and_then(|c| names.iter().position(|n| *n == c))
      .or(if app.filter_active && !names.is_empty() { Some(0) } else { None }),
  );

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}

// ─── Inputs and result ────────────────────────────────────────────────────────

fn draw_inputs(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Measurement ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = vec![
    input_line("Weight (kg):", &app.weight_input, app.focus == Field::Weight),
    input_line("Height (cm):", &app.height_input, app.focus == Field::Height),
    Line::from(""),
  ];

  match &app.last_reading {
    Some(reading) => {
      lines.push(Line::from(Span::styled(
        reading.bmi_text(),
        Style::default().add_modifier(Modifier::BOLD),
      )));
      lines.push(Line::from(Span::styled(
        reading.category_text(),
        Style::default().fg(category_color(reading.category)),
      )));
    }
    None => lines.push(Line::from(Span::styled(
      "Enter weight and height, then press Enter.",
      Style::default().fg(Color::DarkGray),
    ))),
  }

  f.render_widget(Paragraph::new(lines), inner);
}

fn input_line(label: &str, value: &str, focused: bool) -> Line<'static> {
  let label_style = if focused {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Cyan)
  };
  let cursor = if focused { "_" } else { "" };
  Line::from(vec![
    Span::styled(format!("{label:<14}"), label_style),
    Span::raw(format!("{value}{cursor}")),
  ])
}

pub fn category_color(category: Category) -> Color {
  match category {
    Category::Underweight => Color::Yellow,
    Category::NormalWeight => Color::Green,
    Category::Overweight => Color::LightRed,
    Category::Obesity => Color::Red,
  }
}
