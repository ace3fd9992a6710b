//! Postal code → service area classification and the checkers that run it.

mod checker;
mod factory;
mod resolver;

pub use checker::{AreaCheckError, AreaChecker, LocalAreaChecker};
pub use factory::{CheckerConfig, CheckerFactory, CheckerRegistry, LocalCheckerFactory};
pub use resolver::{AreaCheckResponse, resolve};
