use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::model::{LatencySummary, PlotStyle};
use crate::plot::{self, AxisScale};

/// Everything needed to draw one frame of the latency chart.
pub struct ChartView<'a> {
    /// Points already projected into axis space.
    pub points: &'a [(f64, f64)],
    pub style: PlotStyle,
    pub scale: AxisScale,
    pub x_bounds: (f64, f64),
    pub y_bounds: (f64, f64),
    pub summary: Option<&'a LatencySummary>,
}

/// Render the latency chart with a metrics line inside the same bordered box.
pub fn draw_latency_chart(f: &mut Frame, area: Rect, view: &ChartView) {
    // Get inner area (accounting for borders)
    let inner = if area.width > 2 && area.height > 2 {
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    } else {
        area
    };

    let chart_metrics = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(inner);

    let (graph_type, marker) = match view.style {
        PlotStyle::Line => (GraphType::Line, symbols::Marker::Braille),
        PlotStyle::Stem => (GraphType::Bar, symbols::Marker::Dot),
    };
    let dataset = Dataset::default()
        .name(plot::SERIES_LABEL)
        .graph_type(graph_type)
        .marker(marker)
        .style(Style::default().fg(Color::Cyan))
        .data(view.points);

    let (x_lo, x_hi) = view.x_bounds;
    let (y_lo, y_hi) = view.y_bounds;
    let y_mid = (y_lo + y_hi) / 2.0;
    let x_axis = Axis::default()
        .title(plot::X_LABEL)
        .style(Style::default().fg(Color::Gray))
        .bounds([x_lo, x_hi])
        .labels(vec![
            Span::raw(format!("{:.0}", x_lo)),
            Span::raw(format!("{:.0}", (x_lo + x_hi) / 2.0)),
            Span::raw(format!("{:.0}", x_hi)),
        ]);
    let y_axis = Axis::default()
        .title(plot::Y_LABEL)
        .style(Style::default().fg(Color::Gray))
        .bounds([y_lo, y_hi])
        .labels(vec![
            Span::raw(view.scale.format_tick(y_lo)),
            Span::raw(view.scale.format_tick(y_mid)),
            Span::raw(view.scale.format_tick(y_hi)),
        ]);

    let chart = Chart::new(vec![dataset]).x_axis(x_axis).y_axis(y_axis);
    f.render_widget(chart, chart_metrics[0]);

    if let Some(summary) = view.summary {
        f.render_widget(
            Paragraph::new(render_metrics_text(summary)).alignment(Alignment::Center),
            chart_metrics[1],
        );
    }

    let scale_note = match view.scale {
        AxisScale::Linear => "",
        AxisScale::Log => " [log]",
    };
    let title = Line::from(vec![
        Span::raw(format!(" {}{} ", plot::TITLE, scale_note)),
        Span::styled("q", Style::default().fg(Color::Magenta)),
        Span::raw(": quit "),
    ]);
    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(block, area);
}

fn render_metrics_text<'a>(summary: &LatencySummary) -> Line<'a> {
    let value = |v: f64| Span::styled(format!(" {:.0}", v), Style::default().fg(Color::Cyan));
    let label = |l: &'static str| Span::styled(l, Style::default().fg(Color::Gray));
    Line::from(vec![
        label("n"),
        value(summary.count as f64),
        Span::raw(" "),
        label("min"),
        value(summary.min),
        Span::raw(" "),
        label("med"),
        value(summary.median),
        Span::raw(" "),
        label("avg"),
        value(summary.mean),
        Span::raw(" "),
        label("p99"),
        value(summary.p99),
        Span::raw(" "),
        label("max"),
        value(summary.max),
    ])
}
