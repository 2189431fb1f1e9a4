//! # Configuration Types — Single Source of Truth
//!
//! Defines the [`ConfigType`] enum. The variant selects both the schema
//! sub-definition (`definitions.<name>`) and the security rule set applied
//! to a document. Declaration order is the processing order of a run and
//! the grouping order of the summary report.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigTypeError;

/// A homelab configuration document type.
///
/// `Ord` follows declaration order, so `BTreeMap<ConfigType, _>` iterates
/// in the same order a run processes documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigType {
    /// Network ranges, VLANs and firewall inputs.
    Network,
    /// Outbound mail relay settings.
    Email,
    /// Public domains and their TLS posture.
    Domains,
    /// Single sign-on provider settings.
    Sso,
}

impl ConfigType {
    /// Return all configuration types in processing order.
    pub fn all() -> &'static [ConfigType] {
        &[Self::Network, Self::Email, Self::Domains, Self::Sso]
    }

    /// The total number of configuration types.
    pub const COUNT: usize = 4;

    /// The string key used in schema definitions and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Email => "email",
            Self::Domains => "domains",
            Self::Sso => "sso",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigType {
    type Err = ConfigTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConfigTypeError::Unknown(s.to_string()))
    }
}
