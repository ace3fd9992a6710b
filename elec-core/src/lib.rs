pub mod area;
pub mod catalog;
pub mod form;
pub mod messages;
pub mod models;
pub mod schema;

pub use area::{
    AreaCheckError, AreaCheckResponse, AreaChecker, CheckerConfig, CheckerFactory,
    CheckerRegistry, LocalAreaChecker, resolve,
};
pub use form::{
    AreaCheckOutcome, AreaCheckTicket, ElectricForm, FormSession, SubmissionSummary, SubmitError,
};
pub use messages::{Locale, Messages};
pub use models::*;
