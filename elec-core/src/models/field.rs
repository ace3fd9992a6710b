use std::fmt;

/// Every user-editable field of the simulation form, in disclosure order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PostalCodeFirst,
    PostalCodeSecond,
    PowerCompany,
    Plan,
    ContractCapacity,
    CurrentElectricBill,
    Email,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::PostalCodeFirst,
        Field::PostalCodeSecond,
        Field::PowerCompany,
        Field::Plan,
        Field::ContractCapacity,
        Field::CurrentElectricBill,
        Field::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostalCodeFirst => "postalCodeFirst",
            Self::PostalCodeSecond => "postalCodeSecond",
            Self::PowerCompany => "powerCompany",
            Self::Plan => "plan",
            Self::ContractCapacity => "contractCapacity",
            Self::CurrentElectricBill => "currentElectricBill",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
