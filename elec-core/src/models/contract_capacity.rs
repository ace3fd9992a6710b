use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseValueError;

/// Ampere contract steps offered on Tokyo metered lighting B.
pub const AMPERE_STEPS: [u8; 7] = [10, 15, 20, 30, 40, 50, 60];

/// Smallest and largest kVA contract on the kVA-billed plans.
pub const KVA_MIN: u8 = 6;
pub const KVA_MAX: u8 = 49;

/// Contract capacity, either an ampere step (`"30A"`) or a kVA step (`"6kVA"`).
///
/// Constructors only admit the enumerated steps, so any value of this type is
/// a member of the capacity catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContractCapacity {
    Ampere(u8),
    Kva(u8),
}

impl ContractCapacity {
    pub fn ampere(amps: u8) -> Option<Self> {
        AMPERE_STEPS.contains(&amps).then_some(Self::Ampere(amps))
    }

    pub fn kva(kva: u8) -> Option<Self> {
        (KVA_MIN..=KVA_MAX).contains(&kva).then_some(Self::Kva(kva))
    }

    /// Parses the wire form. The kVA suffix is matched before the bare `A`.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(n) = s.strip_suffix("kVA") {
            return digits(n).and_then(Self::kva);
        }
        s.strip_suffix('A').and_then(digits).and_then(Self::ampere)
    }
}

fn digits(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for ContractCapacity {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Ampere(n) => write!(f, "{n}A"),
            Self::Kva(n) => write!(f, "{n}kVA"),
        }
    }
}

impl FromStr for ContractCapacity {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseValueError::new("contract capacity", s))
    }
}

impl TryFrom<String> for ContractCapacity {
    type Error = ParseValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContractCapacity> for String {
    fn from(value: ContractCapacity) -> Self {
        value.to_string()
    }
}
