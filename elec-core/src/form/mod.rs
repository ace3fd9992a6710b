//! The form state coordinator and its collaborators.

mod area_check;
mod coordinator;
mod session;
mod summary;
mod transitions;

pub use area_check::{AreaCheckOutcome, AreaCheckTicket};
pub use coordinator::{ElectricForm, FormState, SubmitError};
pub use session::FormSession;
pub use summary::{SubmissionSummary, format_thousands};
pub use transitions::FormEvent;
