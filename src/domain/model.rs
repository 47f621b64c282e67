use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One decoded spreadsheet cell, independent of the file format it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Spreadsheet error cells such as `#N/A` or `#DIV/0!`.
    Error(String),
}

impl CellValue {
    /// Header cells are matched by their textual rendering.
    pub fn header_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::Error(s) => s.trim().to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt.to_string(),
        }
    }
}

/// The first worksheet of the input, split into its header row and data rows.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, header: Vec<CellValue>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }
}

/// A customer row after projection. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    pub external_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub cif: Option<String>,
    pub subscription_plan: Option<String>,
    pub max_users: Option<i64>,
    pub billing_mode: Option<String>,
    pub rate: Option<f64>,
    pub registration_date: NaiveDate,
}

/// A row that did not make it into the output.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    /// 1-based row number in the sheet, counting the header as row 1.
    pub row_number: usize,
    pub date_cell: CellValue,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<CustomerRecord>,
    pub rows_read: usize,
    pub dropped: Vec<DroppedRow>,
}
