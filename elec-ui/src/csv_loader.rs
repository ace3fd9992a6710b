//! CSV loader for batch form entries.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter. Select
//! columns take the wire ids the interactive commands accept; an empty cell
//! leaves that field unset.
//!
//! | Column                  | Required | Notes                                           |
//! |-------------------------|----------|-------------------------------------------------|
//! | `postal_code_first`     | yes      | 3 digits, kept as text so leading zeros survive |
//! | `postal_code_second`    | yes      | 4 digits                                        |
//! | `power_company`         | no       | `tokyo-electric`, `kansai-electric`, `other`    |
//! | `plan`                  | no       | e.g. `tokyo-juryou-b`                           |
//! | `contract_capacity`     | no       | e.g. `30A`, `6kVA`                              |
//! | `current_electric_bill` | no       | yen; `12,000` and `12000円` are accepted        |
//! | `email`                 | no       |                                                 |
//!
//! ### Example
//!
//! ```csv
//! postal_code_first,postal_code_second,power_company,plan,contract_capacity,current_electric_bill,email
//! 123,4567,tokyo-electric,tokyo-juryou-b,30A,"12,000",test@example.com
//! 567,8901,kansai-electric,kansai-juryou-a,,8000,kansai@example.jp
//! ```

use std::path::Path;

use elec_core::{ContractCapacity, ParseValueError, Plan, PowerCompany};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::{ParseDecimalError, parse_amount};

#[derive(Debug, Deserialize)]
struct CsvRow {
    postal_code_first: String,
    postal_code_second: String,
    #[serde(default)]
    power_company: String,
    #[serde(default)]
    plan: String,
    #[serde(default)]
    contract_capacity: String,
    #[serde(default)]
    current_electric_bill: String,
    #[serde(default)]
    email: String,
}

/// One form entry, replayed field by field through the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormEntry {
    pub postal_code_first: String,
    pub postal_code_second: String,
    pub power_company: Option<PowerCompany>,
    pub plan: Option<Plan>,
    pub contract_capacity: Option<ContractCapacity>,
    pub current_electric_bill: Option<Decimal>,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural problem: bad quoting, missing required column, ragged row.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based (header = row 0).
    #[error("{source} on row {row}")]
    InvalidValue {
        row: usize,
        #[source]
        source: ParseValueError,
    },

    #[error("{source} on row {row}")]
    InvalidBill {
        row: usize,
        #[source]
        source: ParseDecimalError,
    },
}

fn optional<T>(
    cell: &str,
    row: usize,
    parse: impl FnOnce(&str) -> Result<T, ParseValueError>,
) -> Result<Option<T>, CsvLoadError> {
    if cell.is_empty() {
        return Ok(None);
    }
    parse(cell)
        .map(Some)
        .map_err(|source| CsvLoadError::InvalidValue { row, source })
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<FormEntry, CsvLoadError> {
    Ok(FormEntry {
        postal_code_first: row.postal_code_first,
        postal_code_second: row.postal_code_second,
        power_company: optional(&row.power_company, row_number, str::parse)?,
        plan: optional(&row.plan, row_number, str::parse)?,
        contract_capacity: optional(&row.contract_capacity, row_number, str::parse)?,
        current_electric_bill: parse_amount(&row.current_electric_bill).map_err(|source| {
            CsvLoadError::InvalidBill {
                row: row_number,
                source,
            }
        })?,
        email: row.email,
    })
}

/// Parses CSV text into entries, in file order.
pub fn load_from_str(input: &str) -> Result<Vec<FormEntry>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

pub fn load_from_file(path: &Path) -> Result<Vec<FormEntry>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
