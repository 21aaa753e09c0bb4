use crate::error::FacadeError;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "Export";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellType {
    #[default]
    String,
    Number,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableColumn {
    pub header: String,
    pub export_property: Option<String>,
    pub export_label: Option<String>,
    pub export_type: Option<CellType>,
}

impl TableColumn {
    pub fn exported(header: &str, property: &str, cell_type: CellType) -> Self {
        Self {
            header: header.to_string(),
            export_property: Some(property.to_string()),
            export_label: None,
            export_type: Some(cell_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSource {
    pub id: String,
    pub columns: Vec<TableColumn>,
    pub rows: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportColumn {
    pub label: String,
    pub property: String,
    pub cell_type: CellType,
}

/// Label falls back to the column header, then to the property name.
pub fn export_columns(table: &TableSource) -> Vec<ExportColumn> {
    table
        .columns
        .iter()
        .filter_map(|column| {
            let property = column
                .export_property
                .as_deref()
                .filter(|property| !property.is_empty())?;
            let label = column
                .export_label
                .clone()
                .or_else(|| (!column.header.is_empty()).then(|| column.header.clone()))
                .unwrap_or_else(|| property.to_string());
            Some(ExportColumn {
                label,
                property: property.to_string(),
                cell_type: column.export_type.unwrap_or_default(),
            })
        })
        .collect()
}

pub trait SpreadsheetWriter {
    fn write(
        &self,
        file_name: &str,
        columns: &[ExportColumn],
        rows: &[Value],
    ) -> Result<PathBuf, FacadeError>;
}

#[derive(Debug, Clone)]
pub struct XlsxWriter {
    directory: PathBuf,
}

impl XlsxWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn target(&self, file_name: &str) -> PathBuf {
        let stem = file_name.trim();
        let stem = if stem.is_empty() { DEFAULT_FILE_NAME } else { stem };
        if stem.to_ascii_lowercase().ends_with(".xlsx") {
            self.directory.join(stem)
        } else {
            self.directory.join(format!("{stem}.xlsx"))
        }
    }
}

impl SpreadsheetWriter for XlsxWriter {
    fn write(
        &self,
        file_name: &str,
        columns: &[ExportColumn],
        rows: &[Value],
    ) -> Result<PathBuf, FacadeError> {
        let path = self.target(file_name);
        build_workbook(columns, rows)
            .and_then(|mut workbook| workbook.save(&path))
            .map_err(|error| FacadeError::Export(format!("{}: {error}", path.display())))?;
        tracing::info!(path = %path.display(), rows = rows.len(), "spreadsheet written");
        Ok(path)
    }
}

fn build_workbook(columns: &[ExportColumn], rows: &[Value]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    let header = Format::new().set_bold();

    for (col, column) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, &column.label, &header)?;
        worksheet.set_column_width(col, column.label.chars().count().max(12) as f64)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_number = index as u32 + 1;
        for (col, column) in columns.iter().enumerate() {
            let col = col as u16;
            let Some(value) = row.get(&column.property) else {
                continue;
            };
            match (column.cell_type, value) {
                (_, Value::Null) => {}
                (CellType::Number, Value::Number(number)) => {
                    if let Some(number) = number.as_f64() {
                        worksheet.write_number(row_number, col, number)?;
                    }
                }
                (CellType::Number, Value::String(text)) => match text.trim().parse::<f64>() {
                    Ok(number) => {
                        worksheet.write_number(row_number, col, number)?;
                    }
                    Err(_) => {
                        worksheet.write_string(row_number, col, text)?;
                    }
                },
                (CellType::Boolean, Value::Bool(flag)) => {
                    worksheet.write_boolean(row_number, col, *flag)?;
                }
                (_, Value::String(text)) => {
                    worksheet.write_string(row_number, col, text)?;
                }
                (_, other) => {
                    worksheet.write_string(row_number, col, other.to_string())?;
                }
            }
        }
    }

    workbook.push_worksheet(worksheet);
    Ok(workbook)
}

pub fn export_table(
    writer: &dyn SpreadsheetWriter,
    table: &TableSource,
    file_name: Option<&str>,
) -> Result<PathBuf, FacadeError> {
    let Some(rows) = table.rows.as_deref() else {
        tracing::warn!(table = %table.id, "table has no bound rows, nothing to export");
        return Err(FacadeError::MissingDataSource(table.id.clone()));
    };
    let columns = export_columns(table);
    writer.write(file_name.unwrap_or(DEFAULT_FILE_NAME), &columns, rows)
}
