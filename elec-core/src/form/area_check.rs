use crate::area::{AreaCheckError, AreaCheckResponse, AreaChecker};

/// An area check the form has asked for, tagged with the postal code it was
/// issued for and a per-form sequence number. The form only applies the
/// outcome of the most recently issued ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaCheckTicket {
    postal_code: String,
    sequence: u64,
}

impl AreaCheckTicket {
    pub(crate) fn new(
        postal_code: String,
        sequence: u64,
    ) -> Self {
        Self {
            postal_code,
            sequence,
        }
    }

    /// The hyphen-free 7-digit key the check runs against.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Issue order within the form that created the ticket.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Runs the check. The ticket travels with the result so completions can
    /// be applied in any order.
    pub async fn run(
        self,
        checker: &dyn AreaChecker,
    ) -> AreaCheckOutcome {
        let result = checker.check_area(&self.postal_code).await;
        AreaCheckOutcome {
            ticket: self,
            result,
        }
    }
}

/// A completed area check, ready for `ElectricForm::apply_area_check`.
#[derive(Debug)]
pub struct AreaCheckOutcome {
    pub ticket: AreaCheckTicket,
    pub result: Result<AreaCheckResponse, AreaCheckError>,
}
