//! # Security Rules
//!
//! The rule table and the engine that evaluates it.
//!
//! Every [`ConfigType`] maps to a static slice of [`SecurityRule`]s through
//! an exhaustive `match`, so adding a configuration type does not compile
//! until it has a (possibly empty) rule set. Rules within a slice run in
//! table order and each one independently adds at most one warning.

use std::str::FromStr;

use labcfg_core::ConfigType;
use serde_json::Value;

use crate::field::{is_truthy, lookup, Absence};

/// Longest session lifetime, in seconds, that does not raise a warning.
pub const MAX_SESSION_LIFETIME_SECS: f64 = 86_400.0;

/// CIDR block that admits every IPv4 address.
pub const OPEN_CIDR: &str = "0.0.0.0/0";

/// What a rule looks for in a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// Some top-level value, rendered as text, contains `needle`. Documents
    /// that are not mappings never trigger.
    AnyTopLevelValueContains { needle: &'static str },
    /// The field is a string equal to `expected`. A missing field never
    /// triggers.
    Equals {
        field: &'static [&'static str],
        expected: &'static str,
    },
    /// The field is falsy. A missing field is handled per `absent`.
    NotEnabled {
        field: &'static [&'static str],
        absent: Absence,
    },
    /// The field is a number greater than `limit`. A missing field reads
    /// as `default`; a non-numeric value never triggers.
    Exceeds {
        field: &'static [&'static str],
        limit: f64,
        default: f64,
    },
}

impl Condition {
    /// Whether `document` meets this condition.
    pub fn holds(&self, document: &Value) -> bool {
        match *self {
            Self::AnyTopLevelValueContains { needle } => document
                .as_object()
                .is_some_and(|map| map.values().any(|v| render(v).contains(needle))),
            Self::Equals { field, expected } => {
                lookup(document, field).and_then(Value::as_str) == Some(expected)
            }
            Self::NotEnabled { field, absent } => match lookup(document, field) {
                Some(value) => !is_truthy(value),
                None => absent == Absence::Triggers,
            },
            Self::Exceeds {
                field,
                limit,
                default,
            } => match lookup(document, field) {
                Some(value) => value.as_f64().is_some_and(|n| n > limit),
                None => default > limit,
            },
        }
    }
}

/// Strings render bare; everything else renders as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One advisory check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecurityRule {
    /// Stable identifier, `<type>.<slug>`.
    pub id: &'static str,
    /// The configuration type the rule applies to.
    pub config_type: ConfigType,
    /// The trigger.
    pub condition: Condition,
    /// Warning text recorded on the result when the rule triggers.
    pub warning: &'static str,
}

impl SecurityRule {
    /// Whether this rule fires for `document`.
    pub fn is_triggered(&self, document: &Value) -> bool {
        self.condition.holds(document)
    }
}

static NETWORK_RULES: [SecurityRule; 1] = [SecurityRule {
    id: "network.open-cidr",
    config_type: ConfigType::Network,
    condition: Condition::AnyTopLevelValueContains { needle: OPEN_CIDR },
    warning: "Found overly permissive CIDR block (0.0.0.0/0)",
}];

static EMAIL_RULES: [SecurityRule; 1] = [SecurityRule {
    id: "email.smtp-unencrypted",
    config_type: ConfigType::Email,
    condition: Condition::Equals {
        field: &["smtp", "encryption"],
        expected: "none",
    },
    warning: "SMTP is configured without encryption",
}];

// Absent `ssl` settings are flagged exactly like explicitly disabled ones.
static DOMAINS_RULES: [SecurityRule; 2] = [
    SecurityRule {
        id: "domains.hsts-disabled",
        config_type: ConfigType::Domains,
        condition: Condition::NotEnabled {
            field: &["ssl", "hsts_enabled"],
            absent: Absence::Triggers,
        },
        warning: "HSTS is not enabled",
    },
    SecurityRule {
        id: "domains.ocsp-disabled",
        config_type: ConfigType::Domains,
        condition: Condition::NotEnabled {
            field: &["ssl", "ocsp_stapling"],
            absent: Absence::Triggers,
        },
        warning: "OCSP stapling is not enabled",
    },
];

static SSO_RULES: [SecurityRule; 2] = [
    SecurityRule {
        id: "sso.mfa-disabled",
        config_type: ConfigType::Sso,
        condition: Condition::NotEnabled {
            field: &["authentication", "mfa", "enabled"],
            absent: Absence::Triggers,
        },
        warning: "MFA is not enabled for SSO",
    },
    SecurityRule {
        id: "sso.session-too-long",
        config_type: ConfigType::Sso,
        condition: Condition::Exceeds {
            field: &["authentication", "session", "lifetime"],
            limit: MAX_SESSION_LIFETIME_SECS,
            default: 0.0,
        },
        warning: "Session lifetime exceeds 24 hours",
    },
];

/// Evaluates the rule table against configuration documents.
///
/// Stateless; rule order is table order, so results are deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityRuleEngine;

impl SecurityRuleEngine {
    /// Create an engine over the built-in rule table.
    pub fn new() -> Self {
        Self
    }

    /// The rules that apply to `config_type`, in evaluation order.
    pub fn rules_for(&self, config_type: ConfigType) -> &'static [SecurityRule] {
        match config_type {
            ConfigType::Network => &NETWORK_RULES,
            ConfigType::Email => &EMAIL_RULES,
            ConfigType::Domains => &DOMAINS_RULES,
            ConfigType::Sso => &SSO_RULES,
        }
    }

    /// The rules that fire for `document`, in evaluation order.
    pub fn evaluate(&self, config_type: ConfigType, document: &Value) -> Vec<&'static SecurityRule> {
        let triggered: Vec<&'static SecurityRule> = self
            .rules_for(config_type)
            .iter()
            .filter(|rule| rule.is_triggered(document))
            .collect();
        for rule in &triggered {
            tracing::debug!(%config_type, rule = rule.id, "security rule triggered");
        }
        triggered
    }

    /// Warning texts for `document`, in evaluation order.
    pub fn check(&self, config_type: ConfigType, document: &Value) -> Vec<String> {
        self.evaluate(config_type, document)
            .into_iter()
            .map(|rule| rule.warning.to_string())
            .collect()
    }

    /// Like [`check`](Self::check), keyed by type name. Unrecognised names
    /// have no rules and yield no warnings.
    pub fn check_named(&self, config_type: &str, document: &Value) -> Vec<String> {
        match ConfigType::from_str(config_type) {
            Ok(t) => self.check(t, document),
            Err(_) => Vec::new(),
        }
    }
}
