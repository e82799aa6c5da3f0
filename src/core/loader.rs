//! Reads the first (or a named) sheet of a workbook, or a CSV file, into a [`Table`].
//!
//! The header row is matched exactly against the configured column names; every
//! following row becomes a [`Row`] holding just those two cells.

use crate::domain::model::{Row, Table};
use crate::utils::error::{EtlError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    pub const EXTENSIONS: [&'static str; 6] = ["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

    pub fn from_path(path: &str) -> Result<Self> {
        let extension = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(SourceFormat::Workbook),
            _ => Err(EtlError::SourceFormatError {
                path: path.to_string(),
                format: "tabular data".to_string(),
                message: format!(
                    "unsupported file extension, expected one of: {}",
                    Self::EXTENSIONS.join(", ")
                ),
            }),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            SourceFormat::Csv => "CSV",
            SourceFormat::Workbook => "spreadsheet",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Columns<'a> {
    pub lab: &'a str,
    pub product: &'a str,
}

pub fn load_table(
    path: &str,
    bytes: Vec<u8>,
    format: SourceFormat,
    sheet: Option<&str>,
    columns: Columns<'_>,
) -> Result<Table> {
    tracing::debug!(
        "Parsing {} ({} bytes) as {}",
        path,
        bytes.len(),
        format.describe()
    );

    let cells = match format {
        SourceFormat::Csv => read_csv(path, &bytes)?,
        SourceFormat::Workbook => read_workbook(path, bytes, sheet)?,
    };

    build_table(path, cells, columns)
}

/// Header line number plus the raw cell grid, header first.
struct CellGrid {
    first_line: usize,
    rows: Vec<(usize, Vec<Option<String>>)>,
}

fn read_workbook(path: &str, bytes: Vec<u8>, sheet: Option<&str>) -> Result<CellGrid> {
    let format_error = |e: calamine::Error| EtlError::SourceFormatError {
        path: path.to_string(),
        format: SourceFormat::Workbook.describe().to_string(),
        message: e.to_string(),
    };

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(format_error)?;

    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(EtlError::SheetNotFoundError {
                    path: path.to_string(),
                    sheet: name.to_string(),
                });
            }
            workbook.worksheet_range(name).map_err(format_error)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| EtlError::SheetNotFoundError {
                path: path.to_string(),
                sheet: "<first sheet>".to_string(),
            })?
            .map_err(format_error)?,
    };

    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let rows = range
        .rows()
        .enumerate()
        .map(|(offset, row)| (first_line + offset, row.iter().map(cell_text).collect()))
        .collect();

    Ok(CellGrid { first_line, rows })
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn read_csv(path: &str, bytes: &[u8]) -> Result<CellGrid> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| EtlError::SourceFormatError {
            path: path.to_string(),
            format: SourceFormat::Csv.describe().to_string(),
            message: e.to_string(),
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 1);
        let cells = record
            .iter()
            .map(|field| (!field.is_empty()).then(|| field.to_string()))
            .collect();
        rows.push((line, cells));
    }

    Ok(CellGrid { first_line: 1, rows })
}

fn build_table(path: &str, grid: CellGrid, columns: Columns<'_>) -> Result<Table> {
    let mut rows = grid.rows.into_iter();
    let header = rows.next().map(|(_, cells)| cells).unwrap_or_default();

    let lab_index = column_index(path, &header, columns.lab)?;
    let product_index = column_index(path, &header, columns.product)?;

    let mut table = Table {
        lab_column: columns.lab.to_string(),
        product_column: columns.product.to_string(),
        rows: Vec::new(),
    };

    for (line, cells) in rows {
        if cells.iter().all(Option::is_none) {
            tracing::debug!("Ignoring blank line {}", line);
            continue;
        }
        let cell = |index: usize| cells.get(index).cloned().flatten();
        table.rows.push(Row {
            line,
            lab: cell(lab_index),
            product: cell(product_index),
        });
    }

    tracing::debug!(
        "Header on line {}, {} data rows in {}",
        grid.first_line,
        table.len(),
        path
    );
    Ok(table)
}

fn column_index(path: &str, header: &[Option<String>], column: &str) -> Result<usize> {
    header
        .iter()
        .position(|name| name.as_deref() == Some(column))
        .ok_or_else(|| EtlError::MissingColumnError {
            path: path.to_string(),
            column: column.to_string(),
            available: header
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        })
}
