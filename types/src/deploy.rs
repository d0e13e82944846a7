//! Deploy references and execution statuses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque reference to a submitted deploy.
///
/// Either a network-assigned hash or a locally synthesized placeholder
/// carrying [`DeployHash::DEMO_PREFIX`]. Placeholders are never sent to the
/// network; their status is resolved locally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployHash(String);

impl DeployHash {
    /// Marker prefix for placeholders that were never submitted.
    pub const DEMO_PREFIX: &'static str = "demo-";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build a placeholder reference: `demo-<unix millis>-<suffix>`.
    pub fn demo(unix_millis: u64, suffix: &str) -> Self {
        Self(format!("{}{unix_millis}-{suffix}", Self::DEMO_PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this reference is a locally generated placeholder.
    pub fn is_demo(&self) -> bool {
        self.0.starts_with(Self::DEMO_PREFIX)
    }
}

impl fmt::Display for DeployHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DeployHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DeployHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Execution status of a deploy as observed by polling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeployStatus {
    /// Not yet executed, or the status could not be determined.
    #[default]
    Pending,
    /// Executed successfully.
    Success,
    /// Executed and failed.
    Failed,
}

impl DeployStatus {
    /// Whether polling should stop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
