//! Interactive terminal display of latency samples.
//!
//! Blocks until the user quits with `q`, `Esc` or `Ctrl-C`.

mod charts;

use crate::metrics::{self, PercentileMethod};
use crate::model::PlotStyle;
use crate::plot::{self, AxisScale};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};

/// Show `samples` (x = sample index) in the terminal until the user quits.
pub fn show(samples: &[f64], style: PlotStyle, scale: AxisScale) -> Result<()> {
    if samples.is_empty() {
        return Err(crate::error::RenderError::Empty.into());
    }

    let points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, scale.project(v)))
        .collect();
    let summary = metrics::compute_latency_summary(samples, PercentileMethod::Linear);
    let view = charts::ChartView {
        points: &points,
        style,
        scale,
        x_bounds: plot::x_bounds(samples.len()),
        y_bounds: plot::y_bounds(samples, scale),
        summary: summary.as_ref(),
    };

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        log::debug!("failed to enter alternate screen: {e}");
    }

    let backend = CrosstermBackend::new(stdout);
    let res = match Terminal::new(backend).context("create terminal") {
        Ok(mut terminal) => {
            terminal.clear().ok();
            event_loop(&mut terminal, &view)
        }
        Err(e) => Err(e),
    };

    if let Err(e) = disable_raw_mode() {
        log::debug!("failed to disable raw mode: {e}");
    }
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, LeaveAlternateScreen) {
        log::debug!("failed to leave alternate screen: {e}");
    }
    res
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &charts::ChartView,
) -> Result<()> {
    // Redraw only on input or resize; the data never changes.
    let mut dirty = true;
    loop {
        if dirty {
            terminal
                .draw(|f| {
                    let area = f.area();
                    charts::draw_latency_chart(f, area, view)
                })
                .context("draw frame")?;
            dirty = false;
        }

        if !event::poll(Duration::from_millis(250)).context("poll terminal events")? {
            continue;
        }
        match event::read().context("read terminal event")? {
            Event::Key(k) if k.kind == KeyEventKind::Press => match (k.modifiers, k.code) {
                (_, KeyCode::Char('q'))
                | (_, KeyCode::Esc)
                | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),
                _ => {}
            },
            Event::Resize(_, _) => dirty = true,
            _ => {}
        }
    }
}
