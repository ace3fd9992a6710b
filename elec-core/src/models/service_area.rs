use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseValueError;

/// Utility territory a postal code belongs to.
///
/// The pre-lookup state is modelled as `Option<ServiceArea>::None` by the
/// form rather than as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceArea {
    Tokyo,
    Kansai,
    OutOfService,
}

impl ServiceArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tokyo => "tokyo",
            Self::Kansai => "kansai",
            Self::OutOfService => "out-of-service",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tokyo" => Some(Self::Tokyo),
            "kansai" => Some(Self::Kansai),
            "out-of-service" => Some(Self::OutOfService),
            _ => None,
        }
    }

    /// `true` for areas the simulation covers.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::OutOfService)
    }
}

impl fmt::Display for ServiceArea {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceArea {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseValueError::new("service area", s))
    }
}
