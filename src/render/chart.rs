//! Horizontal bar chart: one labelled row per process, one bar per metric.

use crate::collectors::ProcessRecord;
use crate::display::DisplaySettings;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use std::io::{self, Write};

pub const KEY_HELP: &str =
    "s/Ctrl+M: toggle CPU/Memory sort | v/Ctrl+N: toggle children/parents | q/Ctrl+C: exit";

/// Bars drawn per process, one line each.
pub const SERIES: [&str; 2] = ["Memory", "Cpu"];

/// Title, blank, blank, footer.
pub const CHROME_LINES: u16 = 4;

/// Label + value matrix handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub labels: Vec<String>,
    /// One row per label, one value per series
    pub values: Vec<Vec<f64>>,
    pub series: Vec<String>,
    pub colors: Vec<Color>,
    pub width: u16,
    pub footer: Option<String>,
}

impl Chart {
    /// Memory and CPU bars for already-ranked processes.
    pub fn from_processes(rows: &[ProcessRecord], settings: DisplaySettings, width: u16) -> Self {
        Self {
            title: format!(
                "Top {} processes (Sort: {}, View: {})",
                rows.len(),
                settings.sort,
                settings.view
            ),
            labels: rows.iter().map(|p| format!("{} ({})", p.name, p.pid)).collect(),
            values: rows
                .iter()
                .map(|p| vec![f64::from(p.memory_percent), f64::from(p.cpu_percent)])
                .collect(),
            series: SERIES.iter().map(|s| s.to_string()).collect(),
            colors: vec![Color::Green, Color::Blue],
            width,
            footer: Some(KEY_HELP.to_string()),
        }
    }

    fn max_value(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Draws a chart; failures are the caller's to log.
pub trait ChartRenderer: Send + Sync {
    fn draw(&self, chart: &Chart) -> io::Result<()>;
}

/// Renders to stdout. Lines end in `\r\n` because the session runs in raw mode.
#[derive(Debug, Default)]
pub struct TerminalChart;

impl TerminalChart {
    pub fn write_to(chart: &Chart, out: &mut impl Write) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        queue!(out, Print(&chart.title), Print("\r\n\r\n"))?;

        let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let series_width = chart.series.iter().map(|s| s.len()).max().unwrap_or(0);
        // label, series name, value column and separators
        let used = label_width + series_width + 14;
        let bar_width = usize::from(chart.width).saturating_sub(used).max(1);
        let max = chart.max_value();

        for (label, row) in chart.labels.iter().zip(&chart.values) {
            for (i, value) in row.iter().enumerate() {
                let shown_label = if i == 0 { label.as_str() } else { "" };
                let series = chart.series.get(i).map(String::as_str).unwrap_or("");
                let color = chart.colors.get(i).copied().unwrap_or(Color::Reset);
                let len = if max > 0.0 && value.is_finite() {
                    ((value / max) * bar_width as f64).round() as usize
                } else {
                    0
                };
                queue!(
                    out,
                    Print(format!("{shown_label:<label_width$} {series:<series_width$} ")),
                    SetForegroundColor(color),
                    Print("█".repeat(len.min(bar_width))),
                    ResetColor,
                    Print(format!(" {value:.1}\r\n")),
                )?;
            }
        }

        if let Some(footer) = &chart.footer {
            // no trailing newline: the bottom line must not scroll the screen
            let footer: String = footer.chars().take(usize::from(chart.width)).collect();
            queue!(out, Print("\r\n"), Print(footer))?;
        }
        out.flush()
    }
}

impl ChartRenderer for TerminalChart {
    fn draw(&self, chart: &Chart) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        Self::write_to(chart, &mut lock)
    }
}
