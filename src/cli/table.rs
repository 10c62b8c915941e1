//! Table formatting utilities for CLI output
//!
//! A small unified table system so the catalog, scales and report
//! commands share one column/row model instead of hand-rolled
//! println blocks per command.

use console::style;

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;
use crate::entities::risk::RiskBand;

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Plain text, truncated to the column width
    Text(String),
    /// Risk band with color coding
    Band(RiskBand),
    /// Numeric value, right aligned
    Number(i64),
    /// Percentage, right aligned with a % suffix
    Pct(usize),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for aligned terminal output (with colors)
    pub fn format_text(&self, width: usize) -> String {
        match self {
            CellValue::Text(s) => {
                format!(
                    "{:<width$}",
                    truncate_str(s, width.saturating_sub(2)),
                    width = width
                )
            }
            CellValue::Band(band) => {
                let s = band.label_fr();
                let styled = match band {
                    RiskBand::Low => style(s).green(),
                    RiskBand::Medium => style(s).yellow(),
                    RiskBand::High => style(s).color256(208),
                    RiskBand::Critical => style(s).red().bold(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Pct(p) => format!("{:>width$}", format!("{}%", p), width = width),
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Band(band) => band.label_fr().to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Pct(p) => format!("{}%", p),
            CellValue::Empty => "-".to_string(),
        };
        raw.replace('|', "\\|")
    }

    /// Display width of the content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Text(s) => s.chars().count(),
            CellValue::Band(band) => band.label_fr().chars().count(),
            CellValue::Number(n) => n.to_string().len(),
            CellValue::Pct(p) => format!("{}%", p).len(),
            CellValue::Empty => 1,
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(header: &'static str, width: usize) -> Self {
        Self { header, width }
    }
}

/// A row of cell values, one per column
pub struct TableRow {
    pub cells: Vec<CellValue>,
}

impl TableRow {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn cell(mut self, value: CellValue) -> Self {
        self.cells.push(value);
        self
    }
}

impl Default for TableRow {
    fn default() -> Self {
        Self::new()
    }
}

/// Table formatter that renders rows as aligned text or Markdown
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef]) -> Self {
        Self { columns }
    }

    pub fn output(&self, rows: &[TableRow], format: OutputFormat) {
        match format {
            OutputFormat::Md => self.output_md(rows),
            _ => self.output_text(rows),
        }
    }

    /// Column widths sized to content, capped at the defined width
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.cells.get(i))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                col.header
                    .chars()
                    .count()
                    .max(max_content.saturating_add(2))
                    .min(col.width)
            })
            .collect()
    }

    fn output_text(&self, rows: &[TableRow]) {
        let widths = self.calculate_widths(rows);

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = w))
            .collect();
        println!("{}", header.join(" "));

        let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        println!("{}", "-".repeat(total));

        for row in rows {
            let parts: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| match row.cells.get(i) {
                    Some(value) => value.format_text(*w),
                    None => format!("{:<width$}", "-", width = w),
                })
                .collect();
            println!("{}", parts.join(" "));
        }
    }

    fn output_md(&self, rows: &[TableRow]) {
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.to_string()).collect();
        println!("| {} |", headers.join(" | "));

        let separators: Vec<&str> = self.columns.iter().map(|_| "---").collect();
        println!("|{}|", separators.join("|"));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    row.cells
                        .get(i)
                        .map(|v| v.format_md())
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            println!("| {} |", values.join(" | "));
        }
    }
}
