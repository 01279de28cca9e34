// HTML renderer: a standalone page with one plotly chart per grid cell

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use log::info;
use plotly::common::Title;
use plotly::layout::{Axis, Margin};
use plotly::{Bar, Layout, Plot};

use super::text::summary_line;
use crate::charts::ChartSpec;
use crate::config::RenderConfig;
use crate::views::{Screen, ScreenBody, StatusLine};

/// Build the plotly figure for one chart
pub fn chart_plot(chart: &ChartSpec) -> Plot {
    let trace = Bar::new(chart.series.x.clone(), chart.series.y.clone())
        .name(chart.series.name.as_str());

    let mut x_axis = Axis::new().title(Title::from(chart.layout.x_axis.title.as_str()));
    if let Some(angle) = chart.layout.x_axis.tick_angle {
        x_axis = x_axis.tick_angle(angle);
    }
    let mut y_axis = Axis::new().title(Title::from(chart.layout.y_axis.title.as_str()));
    if let Some(angle) = chart.layout.y_axis.tick_angle {
        y_axis = y_axis.tick_angle(angle);
    }

    let layout = Layout::new()
        .title(Title::from(chart.layout.title.as_str()))
        .x_axis(x_axis)
        .y_axis(y_axis)
        .height(chart.layout.height)
        .margin(Margin::new().bottom(chart.layout.margin.bottom));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// DOM id of the div holding a chart
pub fn chart_div_id(chart: &ChartSpec, index: usize) -> String {
    let dimension = serde_json::to_value(chart.dimension)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_else(|| index.to_string());
    format!("chart-{}", dimension)
}

/// Render a screen as a complete HTML document
pub fn render(screen: &Screen, config: &RenderConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html>");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape(&screen.heading));
    let _ = writeln!(
        out,
        "<script src=\"{}\"></script>",
        escape(&config.plotly_js_url)
    );
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");

    let _ = writeln!(out, "<nav>");
    for link in &screen.nav {
        if link.active {
            let _ = writeln!(
                out,
                "  <a href=\"{}\" class=\"active\"><b>{}</b></a>",
                link.path, link.label
            );
        } else {
            let _ = writeln!(out, "  <a href=\"{}\">{}</a>", link.path, link.label);
        }
    }
    let _ = writeln!(out, "</nav>");
    let _ = writeln!(out, "<h1>{}</h1>", escape(&screen.heading));

    match &screen.body {
        ScreenBody::Text { text } | ScreenBody::Loading { text } => {
            let _ = writeln!(out, "<p>{}</p>", escape(text));
        }
        ScreenBody::Error { text } => {
            let _ = writeln!(out, "<p style=\"color: red\">{}</p>", escape(text));
        }
        ScreenBody::UploadForm {
            accept,
            selected,
            submitting,
            status,
        } => {
            let _ = writeln!(out, "<form>");
            let _ = writeln!(
                out,
                "  <input type=\"file\" accept=\"{}\">",
                escape(accept)
            );
            if let Some(name) = selected {
                let _ = writeln!(out, "  <span>{}</span>", escape(name));
            }
            let disabled = if *submitting { " disabled" } else { "" };
            let _ = writeln!(out, "  <button type=\"submit\"{}>Upload</button>", disabled);
            let _ = writeln!(out, "</form>");
            match status {
                Some(StatusLine::Info(text)) => {
                    let _ = writeln!(out, "<p>{}</p>", escape(text));
                }
                Some(StatusLine::Error(text)) => {
                    let _ = writeln!(out, "<p style=\"color: red\">{}</p>", escape(text));
                }
                None => {}
            }
        }
        ScreenBody::ChartGrid {
            columns,
            summary,
            charts,
        } => {
            let _ = writeln!(out, "<p>{}</p>", escape(&summary_line(summary)));
            let _ = writeln!(
                out,
                "<div style=\"display: grid; grid-template-columns: repeat({}, 1fr); gap: {}px\">",
                columns, config.grid_gap_px
            );
            for (index, chart) in charts.iter().enumerate() {
                let div_id = chart_div_id(chart, index);
                let _ = writeln!(out, "<div>");
                out.push_str(&chart_plot(chart).to_inline_html(Some(&div_id)));
                let _ = writeln!(out);
                let _ = writeln!(out, "</div>");
            }
            let _ = writeln!(out, "</div>");
        }
    }

    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

/// Render and write the page to `path`
pub fn write_html(path: &Path, screen: &Screen, config: &RenderConfig) -> io::Result<()> {
    fs::write(path, render(screen, config))?;
    info!("[Render] wrote {} ({})", path.display(), screen.route);
    Ok(())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
