//! Entity trait - common interface for all session record types

use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::EntityId;

/// Common trait for all session records managed by an accumulator
pub trait Entity: Serialize + DeserializeOwned {
    /// The entity type prefix (e.g., "ASSET", "RISK")
    const PREFIX: &'static str;

    /// Get the record's unique ID
    fn id(&self) -> &EntityId;

    /// Get the record's display name
    fn name(&self) -> &str;
}

/// Four-level qualitative rating shared across entity types
/// (business value importance, security need level, objective impact)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Importance {
    /// All levels, lowest first
    pub fn all() -> &'static [Importance] {
        &[
            Importance::Low,
            Importance::Medium,
            Importance::High,
            Importance::Critical,
        ]
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Importance::Low => write!(f, "low"),
            Importance::Medium => write!(f, "medium"),
            Importance::High => write!(f, "high"),
            Importance::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Importance::Low),
            "medium" => Ok(Importance::Medium),
            "high" => Ok(Importance::High),
            "critical" => Ok(Importance::Critical),
            _ => Err(format!("Unknown importance: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_ordering() {
        assert!(Importance::Low < Importance::Medium);
        assert!(Importance::High < Importance::Critical);
    }

    #[test]
    fn test_importance_roundtrip() {
        for level in Importance::all() {
            let parsed: Importance = level.to_string().parse().unwrap();
            assert_eq!(*level, parsed);
        }
    }
}
