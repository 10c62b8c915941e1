//! Entity identity system using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Entity type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityPrefix {
    /// Stakeholder
    Stk,
    /// Business value (valeur métier)
    Bv,
    /// Security criterion
    Crit,
    /// Security need (business value x criterion)
    Need,
    /// Supporting asset (bien support)
    Asset,
    /// Threat catalog entry
    Thrt,
    /// Risk source
    Src,
    /// Targeted objective
    Obj,
    /// Source-objective pair
    Pair,
    /// Strategic scenario
    Scen,
    /// Operational scenario
    Ops,
    /// Evaluated risk
    Risk,
    /// Risk treatment
    Trt,
    /// Monitoring plan entry
    Plan,
    /// Security control
    Ctrl,
    /// Treatment measure
    Msr,
}

impl EntityPrefix {
    /// Get the string representation of the prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Stk => "STK",
            EntityPrefix::Bv => "BV",
            EntityPrefix::Crit => "CRIT",
            EntityPrefix::Need => "NEED",
            EntityPrefix::Asset => "ASSET",
            EntityPrefix::Thrt => "THRT",
            EntityPrefix::Src => "SRC",
            EntityPrefix::Obj => "OBJ",
            EntityPrefix::Pair => "PAIR",
            EntityPrefix::Scen => "SCEN",
            EntityPrefix::Ops => "OPS",
            EntityPrefix::Risk => "RISK",
            EntityPrefix::Trt => "TRT",
            EntityPrefix::Plan => "PLAN",
            EntityPrefix::Ctrl => "CTRL",
            EntityPrefix::Msr => "MSR",
        }
    }

    /// Get all valid prefixes
    pub fn all() -> &'static [EntityPrefix] {
        &[
            EntityPrefix::Stk,
            EntityPrefix::Bv,
            EntityPrefix::Crit,
            EntityPrefix::Need,
            EntityPrefix::Asset,
            EntityPrefix::Thrt,
            EntityPrefix::Src,
            EntityPrefix::Obj,
            EntityPrefix::Pair,
            EntityPrefix::Scen,
            EntityPrefix::Ops,
            EntityPrefix::Risk,
            EntityPrefix::Trt,
            EntityPrefix::Plan,
            EntityPrefix::Ctrl,
            EntityPrefix::Msr,
        ]
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STK" => Ok(EntityPrefix::Stk),
            "BV" => Ok(EntityPrefix::Bv),
            "CRIT" => Ok(EntityPrefix::Crit),
            "NEED" => Ok(EntityPrefix::Need),
            "ASSET" => Ok(EntityPrefix::Asset),
            "THRT" => Ok(EntityPrefix::Thrt),
            "SRC" => Ok(EntityPrefix::Src),
            "OBJ" => Ok(EntityPrefix::Obj),
            "PAIR" => Ok(EntityPrefix::Pair),
            "SCEN" => Ok(EntityPrefix::Scen),
            "OPS" => Ok(EntityPrefix::Ops),
            "RISK" => Ok(EntityPrefix::Risk),
            "TRT" => Ok(EntityPrefix::Trt),
            "PLAN" => Ok(EntityPrefix::Plan),
            "CTRL" => Ok(EntityPrefix::Ctrl),
            "MSR" => Ok(EntityPrefix::Msr),
            _ => Err(IdParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// A unique entity identifier combining a type prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    prefix: EntityPrefix,
    ulid: Ulid,
}

impl EntityId {
    /// Create a new EntityId with the given prefix
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    /// Create an EntityId from a prefix and existing ULID
    pub fn from_parts(prefix: EntityPrefix, ulid: Ulid) -> Self {
        Self { prefix, ulid }
    }

    /// Get the entity prefix
    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse an EntityId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { prefix, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing entity IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid entity prefix: '{0}' (valid: STK, BV, CRIT, NEED, ASSET, THRT, SRC, OBJ, PAIR, SCEN, OPS, RISK, TRT, PLAN, CTRL, MSR)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in entity ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation() {
        let id = EntityId::new(EntityPrefix::Asset);
        assert!(id.to_string().starts_with("ASSET-"));
        assert_eq!(id.to_string().len(), 32); // ASSET- (6) + ULID (26) = 32
    }

    #[test]
    fn test_entity_id_parsing() {
        let original = EntityId::new(EntityPrefix::Scen);
        let id_str = original.to_string();
        let parsed = EntityId::parse(&id_str).unwrap();
        assert_eq!(parsed.prefix(), EntityPrefix::Scen);
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_entity_id_roundtrip() {
        let original = EntityId::new(EntityPrefix::Risk);
        let serialized = original.to_string();
        let parsed = EntityId::parse(&serialized).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_entity_id_invalid_prefix() {
        let err = EntityId::parse("XXX-01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_entity_id_missing_delimiter() {
        let err = EntityId::parse("RISK01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_entity_id_invalid_ulid() {
        let err = EntityId::parse("RISK-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_all_prefixes_parse() {
        for prefix in EntityPrefix::all() {
            let id = EntityId::new(*prefix);
            let parsed = EntityId::parse(&id.to_string()).unwrap();
            assert_eq!(parsed.prefix(), *prefix);
        }
    }
}
