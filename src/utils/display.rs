//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::minesweeper::{CellState, Grid};
use crate::solve::{SolveReport, Verdict};
use anyhow::{Context, Result};
use std::path::Path;

/// Format grids and solve reports for display
pub struct GridFormatter;

impl GridFormatter {
    fn symbol(cell: CellState) -> String {
        match cell {
            CellState::Unopened => "■".to_string(),
            CellState::Flagged => "⚐".to_string(),
            CellState::Revealed(0) => " ".to_string(),
            CellState::Revealed(count) => count.to_string(),
        }
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::new();
        for row in 0..grid.height {
            for col in 0..grid.width {
                output.push_str(&Self::symbol(grid.cells[grid.index(row, col)]));
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.width {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.height {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.width {
                output.push_str(&format!(" {}", Self::symbol(grid.cells[grid.index(row, col)])));
            }
            output.push('\n');
        }

        output
    }

    /// Summary of verdict counts, timing and warnings
    pub fn format_report_summary(report: &SolveReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("Strategy: {}\n", report.strategy));
        output.push_str(&format!("Candidate cells: {}\n", report.verdicts.len()));
        output.push_str(&format!("  Mines:     {}\n", report.count(Verdict::Mine)));
        output.push_str(&format!("  Safe:      {}\n", report.count(Verdict::Safe)));
        output.push_str(&format!("  Unknown:   {}\n", report.count(Verdict::Unknown)));
        output.push_str(&format!("  Timed out: {}\n", report.count(Verdict::TimedOut)));
        output.push_str(&format!("Nodes explored: {}\n", report.nodes_explored));
        output.push_str(&format!("Solve time: {:.3}s\n", report.elapsed.as_secs_f64()));

        if !report.warnings.is_empty() {
            output.push_str("Warnings:\n");
            for warning in &report.warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
        }

        output
    }

    /// Full text rendering: solved grid, proven safe cells and the summary
    pub fn format_report(report: &SolveReport) -> String {
        let mut output = String::new();

        output.push_str("Solved Grid:\n");
        output.push_str(&Self::format_grid_with_coords(&report.grid));
        output.push('\n');

        let safe = report.safe_cells();
        if !safe.is_empty() {
            let cells: Vec<String> = safe.iter().map(|(row, col)| format!("({}, {})", row, col)).collect();
            output.push_str(&format!("Provably safe: {}\n\n", cells.join(" ")));
        }

        output.push_str(&Self::format_report_summary(report));
        output
    }

    /// Render `report` in `format`
    pub fn render(report: &SolveReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(Self::format_report(report)),
            OutputFormat::Json => report.to_json().context("Failed to serialize solve report"),
        }
    }

    /// Save a rendered report to `path`
    pub fn save_report<P: AsRef<Path>>(report: &SolveReport, path: P, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let content = Self::render(report, format)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
