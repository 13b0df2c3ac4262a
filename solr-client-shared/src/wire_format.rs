//! Response wire formats.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The serialization the engine is asked to answer in (the `wt` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    #[default]
    Xml,
    Json,
}

impl WireFormat {
    /// Value of the `wt` request parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported wire format: {}", other)),
        }
    }
}
