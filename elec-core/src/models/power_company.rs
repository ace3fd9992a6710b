use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseValueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerCompany {
    TokyoElectric,
    KansaiElectric,
    /// Any company the simulation does not cover. Selecting it ends the flow.
    Other,
}

impl PowerCompany {
    pub const ALL: [PowerCompany; 3] = [
        PowerCompany::TokyoElectric,
        PowerCompany::KansaiElectric,
        PowerCompany::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokyoElectric => "tokyo-electric",
            Self::KansaiElectric => "kansai-electric",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tokyo-electric" => Some(Self::TokyoElectric),
            "kansai-electric" => Some(Self::KansaiElectric),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn is_out_of_scope(&self) -> bool {
        matches!(self, Self::Other)
    }
}

impl fmt::Display for PowerCompany {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerCompany {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseValueError::new("power company", s))
    }
}
