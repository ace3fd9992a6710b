use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseValueError;

/// Metered lighting plans offered by the supported companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    TokyoJuryouB,
    TokyoJuryouC,
    KansaiJuryouA,
    KansaiJuryouB,
}

impl Plan {
    pub const ALL: [Plan; 4] = [
        Plan::TokyoJuryouB,
        Plan::TokyoJuryouC,
        Plan::KansaiJuryouA,
        Plan::KansaiJuryouB,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokyoJuryouB => "tokyo-juryou-b",
            Self::TokyoJuryouC => "tokyo-juryou-c",
            Self::KansaiJuryouA => "kansai-juryou-a",
            Self::KansaiJuryouB => "kansai-juryou-b",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tokyo-juryou-b" => Some(Self::TokyoJuryouB),
            "tokyo-juryou-c" => Some(Self::TokyoJuryouC),
            "kansai-juryou-a" => Some(Self::KansaiJuryouA),
            "kansai-juryou-b" => Some(Self::KansaiJuryouB),
            _ => None,
        }
    }

    /// Kansai metered lighting A is billed per contract, not per capacity.
    pub fn is_capacity_exempt(&self) -> bool {
        matches!(self, Self::KansaiJuryouA)
    }
}

impl fmt::Display for Plan {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseValueError::new("plan", s))
    }
}
