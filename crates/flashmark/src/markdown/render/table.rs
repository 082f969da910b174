//! GFM tables rendered from structure
//!
//! Columns are padded to a common width (at least 3) and aligned per the
//! table's alignment. With extended tables an all-empty header row is
//! omitted, producing a table that starts at its delimiter row.

use super::inline::Scope;
use super::{MarkdownRenderer, RenderError};
use crate::config::TableStyle;
use markdown::mdast::{AlignKind, Node, Table};

const MIN_WIDTH: usize = 3;

impl MarkdownRenderer {
    pub(super) fn table(&self, table: &Table) -> Result<Vec<String>, RenderError> {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(table.children.len());
        for row in &table.children {
            let Node::TableRow(row) = row else {
                continue;
            };
            let mut cells = Vec::with_capacity(row.children.len());
            for cell in &row.children {
                let content = match cell {
                    Node::TableCell(cell) => self.inline(&cell.children, Scope::CELL)?,
                    other => self.inline(std::slice::from_ref(other), Scope::CELL)?,
                };
                cells.push(content);
            }
            rows.push(cells);
        }
        if rows.is_empty() {
            return Err(RenderError::InvalidTable("table has no rows".to_string()));
        }

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for row in &mut rows {
            row.resize(columns, String::new());
        }
        let align: Vec<AlignKind> = (0..columns)
            .map(|column| table.align.get(column).copied().unwrap_or(AlignKind::None))
            .collect();
        let widths: Vec<usize> = (0..columns)
            .map(|column| {
                rows.iter()
                    .map(|row| row[column].chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(MIN_WIDTH)
            })
            .collect();

        let headerless = self.options.table_style == TableStyle::Extended
            && rows.len() > 1
            && rows[0].iter().all(String::is_empty);

        let mut lines = Vec::with_capacity(rows.len() + 1);
        if !headerless {
            lines.push(format_row(&rows[0], &widths, &align));
        }
        lines.push(format_delimiter(&widths, &align));
        lines.extend(rows[1..].iter().map(|row| format_row(row, &widths, &align)));
        Ok(lines)
    }
}

fn format_row(cells: &[String], widths: &[usize], align: &[AlignKind]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter().zip(align))
        .map(|(cell, (width, align))| pad(cell, *width, *align))
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn format_delimiter(widths: &[usize], align: &[AlignKind]) -> String {
    let cells: Vec<String> = widths
        .iter()
        .zip(align)
        .map(|(width, align)| match align {
            AlignKind::Left => format!(":{}", "-".repeat(width - 1)),
            AlignKind::Right => format!("{}:", "-".repeat(width - 1)),
            AlignKind::Center => format!(":{}:", "-".repeat(width - 2)),
            AlignKind::None => "-".repeat(*width),
        })
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn pad(cell: &str, width: usize, align: AlignKind) -> String {
    let size = width.saturating_sub(cell.chars().count());
    let (before, after) = match align {
        AlignKind::Right => (size, 0),
        AlignKind::Center => (size.div_ceil(2), size / 2),
        AlignKind::Left | AlignKind::None => (0, size),
    };
    format!("{}{cell}{}", " ".repeat(before), " ".repeat(after))
}
