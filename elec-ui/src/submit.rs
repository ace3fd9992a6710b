//! Submit handler: runs the guarded submission and turns the result into
//! text for the user.

use elec_core::{ElectricForm, SubmitError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The confirmation message.
    Confirmed(String),
    /// Submission was refused; one line per reason.
    Blocked(Vec<String>),
}

impl SubmitOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

/// Submits `form`. On refusal every field is marked touched so the view
/// shows all pending errors.
pub fn handle_submit(form: &mut ElectricForm) -> SubmitOutcome {
    match form.submit() {
        Ok(summary) => SubmitOutcome::Confirmed(summary.to_string()),
        Err(err) => {
            debug!(error = %err, "submission refused");
            form.touch_all();
            SubmitOutcome::Blocked(blocking_messages(form, &err))
        }
    }
}

fn blocking_messages(
    form: &ElectricForm,
    err: &SubmitError,
) -> Vec<String> {
    match err {
        SubmitError::Area(message) => vec![message.clone()],
        SubmitError::Company(message) => vec![message.to_string()],
        SubmitError::OutOfService => vec![form.messages().out_of_service_area.to_string()],
        SubmitError::Invalid(fields) => fields
            .iter()
            .filter_map(|&field| {
                form.state()
                    .errors
                    .get(field)
                    .map(|message| format!("{field}: {message}"))
            })
            .collect(),
        SubmitError::InProgress | SubmitError::AreaPending => vec![err.to_string()],
    }
}
