//! Cell value representation for tabular sources

use calamine::Data;
use serde::{Deserialize, Serialize};

/// Largest magnitude at which every integer is exactly representable in an f64
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// A single spreadsheet cell, as seen by the substitution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    /// Empty cell, error cell, or a column the row does not reach
    #[default]
    Blank,
    /// Text value
    Text(String),
    /// Numeric value (Excel stores every number as a double). Integer cells
    /// too large for an f64 to hold exactly are carried as `Text` instead.
    Number(f64),
    /// Boolean value
    Bool(bool),
}

impl CellValue {
    /// Check if this value counts as missing for command generation.
    ///
    /// Text made only of whitespace is treated as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the value the way it is substituted into a command
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Convert a calamine cell into a value
    pub fn from_cell(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Blank,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::from(*i),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => {
                    if naive.time() == chrono::NaiveTime::MIN {
                        CellValue::Text(naive.date().format("%Y-%m-%d").to_string())
                    } else {
                        CellValue::Text(naive.format("%Y-%m-%dT%H:%M:%S").to_string())
                    }
                }
                None => CellValue::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
        }
    }
}

/// Format a number without float artifacts for whole values (`1001`, not `1001.0`)
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT {
        // -0.0 renders as 0
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Blank => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        if n.unsigned_abs() > MAX_EXACT_INT as u64 {
            CellValue::Text(n.to_string())
        } else {
            CellValue::Number(n as f64)
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
