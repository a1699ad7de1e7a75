//! History table: every measurement for the current user, newest first.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::Span,
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::{app::App, ui::form::category_color};

/// Render the history table into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let user = app.current_user.as_deref().unwrap_or("(none)");
  let block = Block::default()
    .title(format!(" BMI History · {user} ({}) ", app.history.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.history.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No measurements yet.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let rows: Vec<Row> = app
    .history
    .iter()
    .map(|m| {
      let category = heft_core::bmi::Category::classify(m.bmi);
      Row::new(vec![
        Cell::from(m.date.format("%Y-%m-%d").to_string()),
        Cell::from(format!("{:.1}", m.weight_kg)),
        Cell::from(format!("{:.1}", m.height_cm)),
        Cell::from(Span::styled(
          format!("{:.2}", m.bmi),
          Style::default().fg(category_color(category)),
        )),
      ])
    })
    .collect();

  let widths = [
    Constraint::Length(12),
    Constraint::Length(13),
    Constraint::Length(13),
    Constraint::Min(6),
  ];

  let table = Table::new(rows, widths)
    .header(
      Row::new(vec!["Date", "Weight (kg)", "Height (cm)", "BMI"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    );

  let mut state = TableState::default().with_selected(Some(app.history_cursor));
  f.render_stateful_widget(table, area, &mut state);
}
