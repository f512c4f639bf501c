//! Core data model for encfacter
//!
//! The `Facts` record describes a host's group and environment as reported by
//! the external node classifier, plus the derived production flag.

pub mod enc;

pub use enc::{EncClient, EncError, FETCH_TIMEOUT};

use serde::{Deserialize, Serialize};

/// Environment name that marks a host as production.
///
/// The spelling matches what the classifier emits and must stay verbatim.
pub const PRODUCTION_ENVIRONMENT: &str = "prodution";

/// Hostgroup prefix shared by all production hostgroups
pub const PRODUCTION_HOSTGROUP_PREFIX: &str = "base/Produktion";

/// Facts about the current host
///
/// `hostgroup` and `environment` default to empty strings when absent so that
/// partial classifier responses still decode. `is_production` is never trusted
/// from the classifier; call [`Facts::enhance`] after fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facts {
    /// Infrastructure group the host belongs to (e.g. "base/Produktion/web1")
    #[serde(default)]
    pub hostgroup: String,
    /// Deployment environment name
    #[serde(default)]
    pub environment: String,
    /// Derived production flag
    #[serde(default)]
    pub is_production: bool,
}

impl Facts {
    /// Creates a new record with `is_production` unset
    #[cfg(test)]
    pub fn new(hostgroup: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            hostgroup: hostgroup.into(),
            environment: environment.into(),
            is_production: false,
        }
    }

    /// Derives `is_production` from `environment` and `hostgroup`.
    ///
    /// Any prior value is overwritten, so the flag always reflects the two
    /// string fields.
    pub fn enhance(&mut self) {
        self.is_production = self.environment == PRODUCTION_ENVIRONMENT
            && self.hostgroup.starts_with(PRODUCTION_HOSTGROUP_PREFIX);
    }
}

/// Serializes facts as JSON indented with tabs, without a trailing newline.
///
/// Both the cache file and stdout use this encoding.
pub fn to_tab_json(facts: &Facts) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    facts.serialize(&mut serializer)?;
    Ok(buf)
}
