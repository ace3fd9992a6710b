mod contract_capacity;
mod field;
mod form_values;
mod plan;
mod postal_code;
mod power_company;
mod service_area;

use thiserror::Error;

pub use contract_capacity::{AMPERE_STEPS, ContractCapacity, KVA_MAX, KVA_MIN};
pub use field::Field;
pub use form_values::FormValues;
pub use plan::Plan;
pub use postal_code::PostalCode;
pub use power_company::PowerCompany;
pub use service_area::ServiceArea;

/// Error returned when a wire identifier does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised {kind} '{value}'")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub(crate) fn new(
        kind: &'static str,
        value: &str,
    ) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
