//! Table formatting for record list output
//!
//! Rows are built from a record's schema, so every kind shares the same
//! formatter. Output is rendered to a string first; `list` prints it and
//! `report table` writes it to a file without colors.
//!
//! # Text Wrapping
//!
//! - Use `TableConfig::with_wrap(width)` to enable word-wrapped multi-line rows
//! - CSV and ID formats remain single-line for pipability

use console::{style, StyledObject};
use std::fmt::Write as _;

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;
use crate::core::fields::{flatten, FieldSpec, FieldValue};
use crate::core::record::Record;
use crate::core::shortid::ShortIdIndex;

/// Widest a column grows before its text is truncated
const MAX_COLUMN_WIDTH: usize = 32;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Maximum width for text columns before wrapping (None = truncate instead)
    pub wrap_width: Option<usize>,
    /// Show summary line after table (e.g., "5 waste record(s) found")
    pub show_summary: bool,
    /// Emit ANSI styling when the terminal supports it
    pub color: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            wrap_width: None,
            show_summary: true,
            color: true,
        }
    }
}

impl TableConfig {
    /// Create config with text wrapping enabled at the specified width
    pub fn with_wrap(width: usize) -> Self {
        Self {
            wrap_width: Some(width),
            ..Self::default()
        }
    }

    /// Plain text for files: no colors, no summary
    pub fn for_file() -> Self {
        Self {
            wrap_width: None,
            show_summary: false,
            color: false,
        }
    }
}

/// Wrap text to fit within a maximum width, breaking at word boundaries
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.chars().count() <= max_width || max_width < 5 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let current_len = current_line.chars().count();
        if current_line.is_empty() {
            current_line = break_long_word(word, max_width, &mut lines);
        } else if current_len + 1 + word.chars().count() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = break_long_word(word, max_width, &mut lines);
        }
    }

    if !current_line.is_empty() || lines.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Push full-width chunks of `word` to `lines`, returning the remainder
fn break_long_word(word: &str, max_width: usize, lines: &mut Vec<String>) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut chunks = chars.chunks(max_width).peekable();
    let mut last = String::new();
    while let Some(chunk) = chunks.next() {
        let piece: String = chunk.iter().collect();
        if chunks.peek().is_some() {
            lines.push(piece);
        } else {
            last = piece;
        }
    }
    last
}

/// A typed cell value
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record ID (cyan)
    Id(String),
    /// Plain text
    Text(String),
    /// Multi-valued field, shown flattened
    List(Vec<String>),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Cell for a stored field value
    pub fn from_field(value: Option<&FieldValue>) -> Self {
        match value {
            None => CellValue::Empty,
            Some(v) if v.is_blank() => CellValue::Empty,
            Some(FieldValue::Text(s)) => CellValue::Text(s.trim().to_string()),
            Some(list @ FieldValue::List(_)) => CellValue::List(list.to_list()),
        }
    }

    /// Format for aligned table output
    pub fn format_tsv(&self, width: usize, color: bool) -> String {
        match self {
            CellValue::Id(id) => {
                format!("{:<width$}", paint(style(id).cyan(), color), width = width)
            }
            CellValue::Text(_) | CellValue::List(_) => {
                let truncated = truncate_str(&self.raw(), width);
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Empty => {
                format!("{:<width$}", paint(style("-").dim(), color), width = width)
            }
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        escape_csv(&self.raw())
    }

    /// Format for Markdown output (escaped pipes)
    pub fn format_md(&self) -> String {
        match self {
            CellValue::Empty => "-".to_string(),
            _ => self.raw().replace('|', "\\|"),
        }
    }

    /// Unformatted value
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(s) | CellValue::Text(s) => s.clone(),
            CellValue::List(items) => flatten(items),
            CellValue::Empty => String::new(),
        }
    }

    /// Display width of this cell's content, in characters
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Empty => 1,
            _ => self.raw().chars().count(),
        }
    }
}

fn paint<D>(styled: StyledObject<D>, color: bool) -> StyledObject<D> {
    if color {
        styled
    } else {
        styled.force_styling(false)
    }
}

/// Column definition with header label and width cap
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }

    /// One column per schema field, headed by its form label
    pub fn for_schema(schema: &[FieldSpec]) -> Vec<ColumnDef> {
        schema
            .iter()
            .map(|spec| ColumnDef::new(spec.name, spec.label, MAX_COLUMN_WIDTH))
            .collect()
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub short_id: String,
    pub full_id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(full_id: String, short_ids: &ShortIdIndex) -> Self {
        let short_id = short_ids.get_short_id(&full_id).unwrap_or_default();
        Self {
            short_id,
            full_id,
            cells: Vec::new(),
        }
    }

    /// Row holding every schema field of `record`
    pub fn for_record<R: Record>(record: &R, short_ids: &ShortIdIndex) -> Self {
        let fields = record.to_fields();
        R::SCHEMA.iter().fold(
            TableRow::new(record.id().to_string(), short_ids),
            |row, spec| row.cell(spec.name, CellValue::from_field(fields.get(spec.name))),
        )
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that renders rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    record_name: &'static str,
    config: TableConfig,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], record_name: &'static str) -> Self {
        Self {
            columns,
            record_name,
            config: TableConfig::default(),
        }
    }

    /// Configure the formatter with custom settings
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Print rows in the specified format
    pub fn output(&self, rows: &[TableRow], format: OutputFormat) {
        print!("{}", self.render(rows, format));
    }

    /// Render rows in the specified format
    pub fn render(&self, rows: &[TableRow], format: OutputFormat) -> String {
        let mut out = String::new();
        match format {
            OutputFormat::Csv => self.render_csv(rows, &mut out),
            OutputFormat::Md => self.render_md(rows, &mut out),
            OutputFormat::Id => {
                for row in rows {
                    let _ = writeln!(out, "{}", row.full_id);
                }
            }
            _ => self.render_tsv(rows, &mut out),
        }
        out
    }

    /// Calculate column widths from actual content
    ///
    /// The first two entries are the short ID and ID columns.
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        let short_width = rows
            .iter()
            .map(|r| r.short_id.len())
            .max()
            .unwrap_or(0)
            .max("SHORT".len());
        let id_width = rows
            .iter()
            .map(|r| r.full_id.chars().count())
            .max()
            .unwrap_or(0)
            .max("ID".len());

        let mut widths = vec![short_width, id_width];
        for col in self.columns {
            let max_content = rows
                .iter()
                .filter_map(|r| r.get(col.key))
                .map(CellValue::display_width)
                .max()
                .unwrap_or(0);
            let natural = col.header.chars().count().max(max_content);
            widths.push(natural.min(col.width));
        }
        widths
    }

    fn render_tsv(&self, rows: &[TableRow], out: &mut String) {
        let color = self.config.color;
        let widths = self.calculate_widths(rows);

        let mut header_parts = vec![
            format!("{:<w$}", paint(style("SHORT").bold().dim(), color), w = widths[0]),
            format!("{:<w$}", paint(style("ID").bold(), color), w = widths[1]),
        ];
        for (col, width) in self.columns.iter().zip(&widths[2..]) {
            header_parts.push(format!(
                "{:<w$}",
                paint(style(col.header).bold(), color),
                w = *width
            ));
        }
        let _ = writeln!(out, "{}", header_parts.join(" ").trim_end());

        let total_width: usize = widths.iter().sum::<usize>() + widths.len() - 1;
        let _ = writeln!(out, "{}", "-".repeat(total_width));

        for row in rows {
            match self.config.wrap_width {
                Some(wrap_width) => self.render_row_wrapped(row, &widths, wrap_width, out),
                None => self.render_row_truncated(row, &widths, out),
            }
        }

        if self.config.show_summary {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{} {} record(s) found. Use {} to reference by short ID.",
                paint(style(rows.len()).cyan(), color),
                self.record_name,
                paint(style("@N").cyan(), color)
            );
        }
    }

    fn render_row_truncated(&self, row: &TableRow, widths: &[usize], out: &mut String) {
        let color = self.config.color;
        let mut parts = vec![
            format!("{:<w$}", paint(style(&row.short_id).cyan(), color), w = widths[0]),
            CellValue::Id(row.full_id.clone()).format_tsv(widths[1], color),
        ];
        for (col, width) in self.columns.iter().zip(&widths[2..]) {
            let cell = row.get(col.key).cloned().unwrap_or(CellValue::Empty);
            parts.push(cell.format_tsv(*width, color));
        }
        let _ = writeln!(out, "{}", parts.join(" ").trim_end());
    }

    fn render_row_wrapped(
        &self,
        row: &TableRow,
        widths: &[usize],
        wrap_width: usize,
        out: &mut String,
    ) {
        let mut wrapped_cells: Vec<Vec<String>> =
            vec![vec![row.short_id.clone()], vec![row.full_id.clone()]];

        for col in self.columns {
            let lines = match row.get(col.key) {
                Some(value @ (CellValue::Text(_) | CellValue::List(_))) => {
                    wrap_text(&value.raw(), wrap_width)
                }
                Some(value) => vec![value.raw()],
                None => vec!["-".to_string()],
            };
            wrapped_cells.push(lines);
        }

        let max_lines = wrapped_cells.iter().map(Vec::len).max().unwrap_or(1);

        for line_idx in 0..max_lines {
            let parts: Vec<String> = wrapped_cells
                .iter()
                .enumerate()
                .map(|(col_idx, lines)| {
                    let width = if col_idx < 2 {
                        widths[col_idx]
                    } else {
                        widths[col_idx].max(wrap_width)
                    };
                    let content = lines.get(line_idx).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", content, width = width)
                })
                .collect();
            let _ = writeln!(out, "{}", parts.join(" ").trim_end());
        }

        if max_lines > 1 {
            let _ = writeln!(out);
        }
    }

    fn render_csv(&self, rows: &[TableRow], out: &mut String) {
        let mut headers = vec!["short_id".to_string(), "id".to_string()];
        headers.extend(self.columns.iter().map(|c| c.key.to_string()));
        let _ = writeln!(out, "{}", headers.join(","));

        for row in rows {
            let mut values = vec![escape_csv(&row.short_id), escape_csv(&row.full_id)];
            for col in self.columns {
                values.push(row.get(col.key).map(CellValue::format_csv).unwrap_or_default());
            }
            let _ = writeln!(out, "{}", values.join(","));
        }
    }

    fn render_md(&self, rows: &[TableRow], out: &mut String) {
        let mut headers = vec!["Short".to_string(), "ID".to_string()];
        headers.extend(self.columns.iter().map(|c| c.header.to_string()));
        let _ = writeln!(out, "| {} |", headers.join(" | "));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        let _ = writeln!(out, "|{}|", separators.join("|"));

        for row in rows {
            let mut values = vec![row.short_id.clone(), row.full_id.clone()];
            for col in self.columns {
                values.push(
                    row.get(col.key)
                        .map(CellValue::format_md)
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            let _ = writeln!(out, "| {} |", values.join(" | "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::FieldSet;
    use crate::core::identity::RecordId;
    use crate::entities::WasteEntry;

    fn entry(id: &str, city: &str, categories: Vec<&str>) -> WasteEntry {
        WasteEntry::from_fields(
            RecordId::parse(id).unwrap(),
            &FieldSet::new()
                .with("City", city)
                .with("Category", categories)
                .with("Quantity", "12"),
        )
    }

    fn rows(entries: &[WasteEntry]) -> Vec<TableRow> {
        let mut index = ShortIdIndex::new();
        index.rebuild(entries.iter().map(|e| &e.id));
        entries.iter().map(|e| TableRow::for_record(e, &index)).collect()
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("short", 20), vec!["short"]);
        assert_eq!(
            wrap_text("Recyclables, Organic Waste, Glass Waste", 16),
            vec!["Recyclables,", "Organic Waste,", "Glass Waste"]
        );
        assert_eq!(wrap_text("abcdefghijkl", 5), vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_cell_from_field() {
        assert!(matches!(CellValue::from_field(None), CellValue::Empty));
        assert!(matches!(
            CellValue::from_field(Some(&FieldValue::from("  "))),
            CellValue::Empty
        ));
        let list = CellValue::from_field(Some(&FieldValue::from(vec!["a", "b"])));
        assert_eq!(list.raw(), "a, b");
    }

    #[test]
    fn test_plain_table_flattens_lists() {
        let entries = vec![entry("4821", "Metro", vec!["Recyclables", "Organic Waste"])];
        let columns = ColumnDef::for_schema(WasteEntry::SCHEMA);
        let text = TableFormatter::new(&columns, "waste")
            .with_config(TableConfig::for_file())
            .render(&rows(&entries), OutputFormat::Tsv);

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("SHORT ID"));
        assert!(lines[0].contains("City/Town/Barangay"));
        assert!(lines[2].starts_with("@1"));
        assert!(lines[2].contains("Recyclables, Organic Waste"));
        assert!(!text.contains('\u{1b}'));
        assert!(!text.contains("found"));
    }

    #[test]
    fn test_csv_quotes_flattened_lists() {
        let entries = vec![entry("4821", "Metro", vec!["Recyclables", "Glass Waste"])];
        let columns = ColumnDef::for_schema(WasteEntry::SCHEMA);
        let text = TableFormatter::new(&columns, "waste").render(&rows(&entries), OutputFormat::Csv);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "short_id,id,City,Category,Quantity,Notes");
        assert_eq!(lines[1], "@1,4821,Metro,\"Recyclables, Glass Waste\",12,");
    }

    #[test]
    fn test_id_format() {
        let entries = vec![entry("a1", "Metro", vec!["Recyclables"]), entry("b2", "Bay", vec!["Recyclables"])];
        let columns = ColumnDef::for_schema(WasteEntry::SCHEMA);
        let text = TableFormatter::new(&columns, "waste").render(&rows(&entries), OutputFormat::Id);
        assert_eq!(text, "a1\nb2\n");
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        assert_eq!(CellValue::Text("a|b".to_string()).format_md(), "a\\|b");
        assert_eq!(CellValue::Empty.format_md(), "-");
    }
}
