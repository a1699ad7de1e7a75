//! Trend chart of BMI over time for the current user.

use chrono::NaiveDate;
use heft_core::measurement::TrendPoint;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  symbols::Marker,
  widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::app::App;

pub const NO_DATA_MSG: &str = "No data available for trend analysis.";

/// Render the trend chart into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" BMI Trend Over Time ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let Some(data) = ChartData::from_points(&app.trend) else {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new(NO_DATA_MSG).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let datasets = vec![
    Dataset::default()
      .name("BMI")
      .marker(Marker::Braille)
      .graph_type(GraphType::Line)
      .style(Style::default().fg(Color::Cyan))
      .data(&data.points),
    Dataset::default()
      .marker(Marker::Dot)
      .graph_type(GraphType::Scatter)
      .style(Style::default().fg(Color::White))
      .data(&data.points),
  ];

  let chart = Chart::new(datasets)
    .block(block)
    .x_axis(
      Axis::default()
        .title("Date")
        .style(Style::default().fg(Color::DarkGray))
        .bounds(data.x_bounds)
        .labels(data.x_labels.clone()),
    )
    .y_axis(
      Axis::default()
        .title("BMI")
        .style(Style::default().fg(Color::DarkGray))
        .bounds(data.y_bounds)
        .labels(data.y_labels.clone()),
    );

  f.render_widget(chart, area);
}

// ─── Chart geometry ───────────────────────────────────────────────────────────

/// Points and axes for a trend. `x` is days since the first measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
  pub points:   Vec<(f64, f64)>,
  pub x_bounds: [f64; 2],
  pub y_bounds: [f64; 2],
  pub x_labels: Vec<String>,
  pub y_labels: Vec<String>,
}

impl ChartData {
  /// `None` when there is nothing to plot.
  pub fn from_points(trend: &[TrendPoint]) -> Option<Self> {
    let first = trend.first()?.date;
    let last = trend.last()?.date;

    let points: Vec<(f64, f64)> = trend
      .iter()
      .map(|p| (days_between(first, p.date), p.bmi))
      .collect();

    // A single day still needs a non-empty x range.
    let span = days_between(first, last).max(1.0);

    let (lo, hi) = points
      .iter()
      .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
        (lo.min(y), hi.max(y))
      });
    let y_bounds = [(lo - 1.0).floor().max(0.0), (hi + 1.0).ceil()];

    Some(Self {
      points,
      x_bounds: [0.0, span],
      y_bounds,
      x_labels: vec![
        first.format("%Y-%m-%d").to_string(),
        last.format("%Y-%m-%d").to_string(),
      ],
      y_labels: vec![
        format!("{:.0}", y_bounds[0]),
        format!("{:.0}", (y_bounds[0] + y_bounds[1]) / 2.0),
        format!("{:.0}", y_bounds[1]),
      ],
    })
  }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
  (to - from).num_days() as f64
}

#[cfg(test)]
mod tests {
  use super::*;

  fn point(y: i32, m: u32, d: u32, bmi: f64) -> TrendPoint {
    TrendPoint { date: NaiveDate::from_ymd_opt(y, m, d).unwrap(), bmi }
  }

  #[test]
  fn empty_trend_has_nothing_to_plot() {
    assert_eq!(ChartData::from_points(&[]), None);
  }

  #[test]
  fn x_is_days_since_first_point() {
    let data = ChartData::from_points(&[
      point(2024, 1, 1, 23.0),
      point(2024, 1, 11, 22.5),
      point(2024, 2, 1, 22.0),
    ])
    .unwrap();

    assert_eq!(data.points, vec![(0.0, 23.0), (10.0, 22.5), (31.0, 22.0)]);
    assert_eq!(data.x_bounds, [0.0, 31.0]);
    assert_eq!(data.x_labels, vec!["2024-01-01", "2024-02-01"]);
    assert_eq!(data.y_bounds, [21.0, 24.0]);
  }

  #[test]
  fn single_point_gets_a_usable_range() {
    let data = ChartData::from_points(&[point(2024, 6, 1, 22.86)]).unwrap();
    assert_eq!(data.x_bounds, [0.0, 1.0]);
    assert!(data.y_bounds[0] < 22.86 && data.y_bounds[1] > 22.86);
  }
}
