use crate::models::Field;

/// Events that invalidate downstream fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// The resolved service area differs from the previous one.
    AreaChanged,
    /// The postal code resolved outside the service area.
    AreaOutOfService,
    /// A company the simulation does not cover was selected.
    CompanyOutOfScope,
    /// The plan selection changed, whatever the new value.
    PlanChanged,
}

impl FormEvent {
    /// Fields cleared, together with their errors, when the event fires.
    pub fn resets(self) -> &'static [Field] {
        match self {
            Self::AreaChanged | Self::AreaOutOfService => {
                &[Field::PowerCompany, Field::Plan, Field::ContractCapacity]
            }
            Self::CompanyOutOfScope => &[Field::Plan, Field::ContractCapacity],
            Self::PlanChanged => &[Field::ContractCapacity],
        }
    }

    pub fn clears_company_error(self) -> bool {
        matches!(self, Self::AreaChanged)
    }
}
