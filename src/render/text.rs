// Terminal renderer

use std::fmt::Write;

use crate::charts::ChartSpec;
use crate::views::{RecordingSummary, Screen, ScreenBody, StatusLine};

const BAR_WIDTH: usize = 32;

/// Render a screen as plain text
pub fn render(screen: &Screen) -> String {
    let mut out = String::new();

    let nav: Vec<String> = screen
        .nav
        .iter()
        .map(|link| {
            if link.active {
                format!("[{}]", link.label)
            } else {
                link.label.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", nav.join(" | "));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", screen.heading);
    let _ = writeln!(out, "{}", "=".repeat(screen.heading.chars().count()));

    match &screen.body {
        ScreenBody::Text { text } | ScreenBody::Loading { text } => {
            let _ = writeln!(out, "{}", text);
        }
        ScreenBody::Error { text } => {
            let _ = writeln!(out, "error: {}", text);
        }
        ScreenBody::UploadForm {
            accept,
            selected,
            submitting,
            status,
        } => {
            let _ = writeln!(
                out,
                "file ({}): {}",
                accept,
                selected.as_deref().unwrap_or("<none selected>")
            );
            if *submitting {
                let _ = writeln!(out, "uploading...");
            }
            match status {
                Some(StatusLine::Info(text)) => {
                    let _ = writeln!(out, "{}", text);
                }
                Some(StatusLine::Error(text)) => {
                    let _ = writeln!(out, "error: {}", text);
                }
                None => {}
            }
        }
        ScreenBody::ChartGrid {
            summary, charts, ..
        } => {
            let _ = writeln!(out, "{}", summary_line(summary));
            for chart in charts {
                let _ = writeln!(out);
                out.push_str(&render_chart(chart));
            }
        }
    }

    out
}

/// One-line description of the recording
pub fn summary_line(summary: &RecordingSummary) -> String {
    let shape = summary
        .shape
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(" x ");
    match summary.sampling_rate {
        Some(rate) => format!(
            "{}: {} channels, shape {}, {} Hz",
            summary.filename, summary.channels, shape, rate
        ),
        None => format!(
            "{}: {} channels, shape {}",
            summary.filename, summary.channels, shape
        ),
    }
}

/// Horizontal bar chart, one row per channel, scaled to the largest |value|
pub fn render_chart(chart: &ChartSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", chart.layout.title, chart.unit);

    let label_width = chart
        .series
        .x
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    let peak = chart
        .series
        .y
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(0.0_f64, |acc, value| acc.max(value.abs()));

    let bar_width = BAR_WIDTH;
    for (name, value) in chart.series.x.iter().zip(&chart.series.y) {
        let filled = if peak > 0.0 && value.is_finite() {
            ((value.abs() / peak) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let glyph = if *value < 0.0 { "-" } else { "#" };
        let _ = writeln!(
            out,
            "  {:<label_width$}  {:<bar_width$}  {}",
            name,
            glyph.repeat(filled),
            format_value(*value),
        );
    }

    out
}

fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-3..1e6).contains(&magnitude) {
        format!("{:.3e}", value)
    } else {
        format!("{:.3}", value)
    }
}
