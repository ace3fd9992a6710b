use rust_decimal::Decimal;

use super::{ContractCapacity, Plan, PostalCode, PowerCompany};

/// Snapshot of every field value on the simulation form.
///
/// Select fields use `None` for the empty choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub postal_code: PostalCode,
    pub power_company: Option<PowerCompany>,
    pub plan: Option<Plan>,
    pub contract_capacity: Option<ContractCapacity>,
    pub current_electric_bill: Option<Decimal>,
    pub email: String,
}
