use crate::domain::model::{CellValue, Sheet};
use crate::utils::error::{EtlError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Cursor;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes `bytes` into a header row plus data rows. `source` is only used to
/// pick the format (by extension) and for error messages.
pub fn read_sheet(bytes: Vec<u8>, source: &str, sheet_name: Option<&str>) -> Result<Sheet> {
    let is_csv = Path::new(source)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let sheet = if is_csv {
        read_csv(&bytes, source)?
    } else {
        read_workbook(bytes, source, sheet_name)?
    };

    tracing::debug!(
        "Read sheet '{}' from {}: {} header cells, {} data rows",
        sheet.name,
        source,
        sheet.header.len(),
        sheet.rows.len()
    );
    Ok(sheet)
}

pub fn read_workbook(bytes: Vec<u8>, source: &str, sheet_name: Option<&str>) -> Result<Sheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| EtlError::input(source, format!("not a readable spreadsheet ({})", e)))?;

    let names = workbook.sheet_names();
    let name = match sheet_name {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| {
                EtlError::input(
                    source,
                    format!("sheet '{}' not found (available: {})", wanted, names.join(", ")),
                )
            })?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| EtlError::input(source, "workbook contains no sheets"))?,
    };

    let range = workbook.worksheet_range(&name)?;
    sheet_from_range(&name, &range, source)
}

/// First row of the used range is the header.
pub fn sheet_from_range(name: &str, range: &Range<Data>, source: &str) -> Result<Sheet> {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect::<Vec<_>>());

    let header = rows
        .next()
        .ok_or_else(|| EtlError::input(source, format!("sheet '{}' is empty", name)))?;

    Ok(Sheet::new(name, header, rows.collect()))
}

pub fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_datetime() => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Float(dt.as_f64())),
        // 持續時間不是日期，保留原始數值
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn read_csv(bytes: &[u8], source: &str) -> Result<Sheet> {
    let data = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?
            .iter()
            .map(|field| CellValue::Text(field.to_string()))
            .collect(),
        None => return Err(EtlError::input(source, "CSV file is empty")),
    };

    let mut rows = Vec::new();
    for record in records {
        rows.push(record?.iter().map(infer_csv_cell).collect());
    }

    let name = Path::new(source)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(source);
    Ok(Sheet::new(name, header, rows))
}

/// Numeric-looking fields become numbers; identifiers with leading zeros stay text.
fn infer_csv_cell(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }

    let numeric_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    let unsigned = trimmed.trim_start_matches(['-', '+']);
    let leading_zero = unsigned.len() > 1
        && unsigned.starts_with('0')
        && !unsigned.starts_with("0.");

    if numeric_chars && !leading_zero {
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }
    }

    CellValue::Text(field.to_string())
}
