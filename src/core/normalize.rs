use crate::domain::model::CellValue;

/// Text values read as missing, matching the NA markers spreadsheet exports
/// commonly contain.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Outcome of coercing a cell to a typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion<T> {
    Value(T),
    Missing,
    /// Present, but not representable as the field type.
    Invalid,
}

impl<T> Coercion<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Coercion::Value(v) => Some(v),
            Coercion::Missing | Coercion::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Coercion::Invalid)
    }
}

pub fn is_missing(cell: &CellValue) -> bool {
    match cell {
        CellValue::Empty | CellValue::Error(_) => true,
        CellValue::Float(f) => f.is_nan(),
        CellValue::Text(s) => is_na_text(s),
        CellValue::Int(_) | CellValue::Bool(_) | CellValue::DateTime(_) => false,
    }
}

fn is_na_text(text: &str) -> bool {
    NA_TOKENS.contains(&text.trim())
}

pub fn to_text(cell: &CellValue) -> Coercion<String> {
    if is_missing(cell) {
        return Coercion::Missing;
    }

    let text = match cell {
        CellValue::Text(s) => s.trim().to_string(),
        CellValue::Int(i) => i.to_string(),
        CellValue::Float(f) => format_number(*f),
        CellValue::Bool(b) => b.to_string(),
        CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        CellValue::Empty | CellValue::Error(_) => return Coercion::Missing,
    };
    Coercion::Value(text)
}

pub fn to_integer(cell: &CellValue) -> Coercion<i64> {
    if is_missing(cell) {
        return Coercion::Missing;
    }

    match cell {
        CellValue::Int(i) => Coercion::Value(*i),
        CellValue::Float(f) => integral(*f),
        CellValue::Text(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Coercion::Value(i),
                Err(_) => parse_decimal(s).map_or(Coercion::Invalid, integral),
            }
        }
        _ => Coercion::Invalid,
    }
}

pub fn to_number(cell: &CellValue) -> Coercion<f64> {
    if is_missing(cell) {
        return Coercion::Missing;
    }

    let value = match cell {
        CellValue::Int(i) => Some(*i as f64),
        CellValue::Float(f) => Some(*f),
        CellValue::Text(s) => parse_decimal(s.trim()),
        _ => None,
    };

    match value {
        Some(v) if v.is_finite() => Coercion::Value(v),
        _ => Coercion::Invalid,
    }
}

/// Accepts `19.99` as well as the decimal comma form `19,99`.
fn parse_decimal(text: &str) -> Option<f64> {
    let parsed = text.parse::<f64>().ok().or_else(|| {
        if text.matches(',').count() == 1 && !text.contains('.') {
            text.replace(',', ".").parse::<f64>().ok()
        } else {
            None
        }
    })?;
    parsed.is_finite().then_some(parsed)
}

fn integral(value: f64) -> Coercion<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Coercion::Value(value as i64)
    } else {
        Coercion::Invalid
    }
}

/// Integral floats lose the `.0` Excel adds to numeric identifiers.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
