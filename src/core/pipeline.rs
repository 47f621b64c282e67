use crate::adapters::spreadsheet;
use crate::core::normalize::{self, Coercion};
use crate::core::projection::{ColumnIndex, Field};
use crate::core::{dates, ConfigProvider, Pipeline, Sheet, Storage, TransformResult};
use crate::domain::model::{CellValue, CustomerRecord, DroppedRow};
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

pub struct CustomerPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CustomerPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for CustomerPipeline<S, C> {
    fn extract(&self) -> Result<Sheet> {
        let input = self.config.input_path();
        tracing::debug!("Reading customer spreadsheet: {}", input);

        let bytes = self.storage.read_file(input).map_err(|e| match e {
            EtlError::IoError(io) => EtlError::input(input, io.to_string()),
            other => other,
        })?;

        spreadsheet::read_sheet(bytes, input, self.config.sheet_name())
    }

    fn transform(&self, sheet: Sheet) -> Result<TransformResult> {
        let index = ColumnIndex::resolve(&sheet.header)?;
        let rows_read = sheet.rows.len();

        let mut records = Vec::with_capacity(rows_read);
        let mut dropped = Vec::new();

        for (offset, row) in sheet.rows.iter().enumerate() {
            // 表頭是第 1 行
            let row_number = offset + 2;
            let date_cell = index.cell(row, Field::RegistrationDate);

            let Some(registration_date) = dates::parse_date(date_cell) else {
                tracing::debug!(
                    "Skipping row {}: no valid registration date in {:?}",
                    row_number,
                    date_cell
                );
                dropped.push(DroppedRow {
                    row_number,
                    date_cell: date_cell.clone(),
                });
                continue;
            };

            records.push(build_record(&index, row, row_number, registration_date));
        }

        if !dropped.is_empty() {
            tracing::info!(
                "Excluded {} row(s) without a valid registration date",
                dropped.len()
            );
        }

        Ok(TransformResult {
            records,
            rows_read,
            dropped,
        })
    }

    fn load(&self, result: &TransformResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        let json = to_json(&result.records, self.config.indent_width())?;

        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            result.records.len(),
            json.len(),
            output_path
        );
        self.storage.write_file(&output_path, &json)?;

        Ok(output_path)
    }

    fn output_path(&self) -> &str {
        self.config.output_path()
    }
}

fn build_record(
    index: &ColumnIndex,
    row: &[CellValue],
    row_number: usize,
    registration_date: chrono::NaiveDate,
) -> CustomerRecord {
    let text = |field: Field| normalize::to_text(index.cell(row, field)).into_option();

    CustomerRecord {
        external_id: text(Field::ExternalId),
        email: text(Field::Email),
        name: text(Field::Name),
        cif: text(Field::Cif),
        subscription_plan: text(Field::SubscriptionPlan),
        max_users: checked(
            normalize::to_integer(index.cell(row, Field::MaxUsers)),
            Field::MaxUsers,
            index.cell(row, Field::MaxUsers),
            row_number,
        ),
        billing_mode: text(Field::BillingMode),
        rate: checked(
            normalize::to_number(index.cell(row, Field::Rate)),
            Field::Rate,
            index.cell(row, Field::Rate),
            row_number,
        ),
        registration_date,
    }
}

fn checked<T>(value: Coercion<T>, field: Field, cell: &CellValue, row_number: usize) -> Option<T> {
    if value.is_invalid() {
        tracing::warn!(
            "Row {}: {:?} is not a valid {} value, writing null",
            row_number,
            cell,
            field.output_name()
        );
    }
    value.into_option()
}

/// Pretty-prints the records as a JSON array. Non-ASCII text is written as-is.
pub fn to_json(records: &[CustomerRecord], indent_width: usize) -> Result<Vec<u8>> {
    let indent = vec![b' '; indent_width];
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    records.serialize(&mut serializer)?;
    Ok(buf)
}
