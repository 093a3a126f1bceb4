use std::io::Write;
use tracing::warn;

use crate::db::{Chart, ChartError, ChartKind, ChartRenderer, QueryResult};
use crate::ui::result_table::{describe_columns, render_table};

const BAR_WIDTH: usize = 40;

/// Draws charts as plain text on a writer (stdout by default).
pub struct TextChartRenderer<W: Write> {
    out: W,
}

impl TextChartRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TextChartRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TextChartRenderer<W> {
    fn render(&mut self, chart: &Chart) -> Result<(), ChartError> {
        let text = draw(chart)?;
        writeln!(self.out, "{}", text).map_err(|err| ChartError(err.to_string()))
    }

    fn view(&mut self, table: &QueryResult) {
        let written = writeln!(
            self.out,
            "{}\n{}",
            describe_columns(table),
            render_table(table, None)
        );
        if let Err(err) = written {
            warn!(error = %err, "could not write result viewer output");
        }
    }
}

pub fn draw(chart: &Chart) -> Result<String, ChartError> {
    if chart.values.is_empty() {
        return Err(ChartError("The query returned no rows to plot".to_string()));
    }

    let label_width = chart
        .labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    let title = if chart.x_label.is_empty() {
        chart.y_label.clone()
    } else {
        format!("{} by {}", chart.y_label, chart.x_label)
    };
    output.push_str(&title);
    output.push('\n');

    match chart.kind {
        ChartKind::Bar => {
            let max = chart.values.iter().cloned().fold(0.0_f64, |a, v| a.max(v.abs()));
            for (label, value) in chart.labels.iter().zip(&chart.values) {
                let len = scaled(value.abs(), max, BAR_WIDTH);
                output.push_str(&format!(
                    "{:<lw$} | {} {}\n",
                    label,
                    "#".repeat(len),
                    value,
                    lw = label_width
                ));
            }
        }
        ChartKind::Line => {
            let min = chart.values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = chart.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            for (label, value) in chart.labels.iter().zip(&chart.values) {
                let pos = scaled(value - min, max - min, BAR_WIDTH);
                output.push_str(&format!(
                    "{:<lw$} | {}* {}\n",
                    label,
                    " ".repeat(pos),
                    value,
                    lw = label_width
                ));
            }
        }
        ChartKind::Pie => {
            let total: f64 = chart.values.iter().sum();
            if total <= 0.0 {
                return Err(ChartError(
                    "A pie chart needs a positive total".to_string(),
                ));
            }
            for (label, value) in chart.labels.iter().zip(&chart.values) {
                let share = value / total * 100.0;
                output.push_str(&format!(
                    "{:<lw$} | {:>6.2}% {}\n",
                    label,
                    share,
                    "o".repeat(scaled(share, 100.0, BAR_WIDTH)),
                    lw = label_width
                ));
            }
        }
    }

    Ok(output.trim_end().to_string())
}

fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}
