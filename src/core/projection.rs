use crate::domain::model::CellValue;
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;

/// Output fields in JSON key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ExternalId,
    Email,
    Name,
    Cif,
    SubscriptionPlan,
    MaxUsers,
    BillingMode,
    Rate,
    RegistrationDate,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::ExternalId,
        Field::Email,
        Field::Name,
        Field::Cif,
        Field::SubscriptionPlan,
        Field::MaxUsers,
        Field::BillingMode,
        Field::Rate,
        Field::RegistrationDate,
    ];

    /// Column header in the customers workbook.
    pub fn source_column(self) -> &'static str {
        match self {
            Field::ExternalId => "UID",
            Field::Email => "Email",
            Field::Name => "Nombre",
            Field::Cif => "CIF",
            Field::SubscriptionPlan => "Suscripción",
            Field::MaxUsers => "UMax",
            Field::BillingMode => "Modo Cobro",
            Field::Rate => "Tarifa",
            Field::RegistrationDate => "Alta",
        }
    }

    pub fn output_name(self) -> &'static str {
        match self {
            Field::ExternalId => "external_id",
            Field::Email => "email",
            Field::Name => "name",
            Field::Cif => "cif",
            Field::SubscriptionPlan => "subscription_plan",
            Field::MaxUsers => "max_users",
            Field::BillingMode => "billing_mode",
            Field::Rate => "rate",
            Field::RegistrationDate => "registration_date",
        }
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// Position of each mapped source column in the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: [usize; 9],
}

impl ColumnIndex {
    /// Locates all nine source columns. Extra columns are ignored; when a name
    /// repeats, the leftmost column wins.
    pub fn resolve(header: &[CellValue]) -> Result<Self> {
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (idx, cell) in header.iter().enumerate() {
            by_name.entry(cell.header_text()).or_insert(idx);
        }

        let mut positions = [0usize; 9];
        let mut missing = Vec::new();
        for (slot, field) in Field::ALL.iter().enumerate() {
            match by_name.get(field.source_column()) {
                Some(&idx) => positions[slot] = idx,
                None => missing.push(field.source_column().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(EtlError::SchemaError { missing });
        }

        tracing::debug!(
            "Resolved {} mapped columns, ignoring {} other column(s)",
            Field::ALL.len(),
            header.len().saturating_sub(Field::ALL.len())
        );

        Ok(Self { positions })
    }

    pub fn position(&self, field: Field) -> usize {
        self.positions[field as usize]
    }

    /// Cell for `field` in `row`; short rows read as empty.
    pub fn cell<'a>(&self, row: &'a [CellValue], field: Field) -> &'a CellValue {
        row.get(self.position(field)).unwrap_or(&EMPTY)
    }
}
