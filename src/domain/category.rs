// src/domain/category.rs

use serde::Serialize;
use std::fmt;

/// Coarse bucket derived from a permit's free-text `application_type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationCategory {
    Building,
    Electrical,
    Mechanical,
    Plumbing,
    Other(String),
}

impl ApplicationCategory {
    /// "Building Permit" -> building, "Fire Alarm Permit" -> other("fire_alarm").
    pub fn from_application_type(application_type: &str) -> Self {
        let snake = application_type.to_lowercase().replace(' ', "_");
        let compressed = snake.strip_suffix("_permit").unwrap_or(&snake);

        match compressed {
            "building" => Self::Building,
            "electrical" => Self::Electrical,
            "mechanical" => Self::Mechanical,
            "plumbing" => Self::Plumbing,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Building => "building",
            Self::Electrical => "electrical",
            Self::Mechanical => "mechanical",
            Self::Plumbing => "plumbing",
            Self::Other(name) => name,
        }
    }

    /// Trades whose final inspection means the house is nearly done.
    pub fn is_trade(&self) -> bool {
        matches!(self, Self::Electrical | Self::Mechanical | Self::Plumbing)
    }
}

impl fmt::Display for ApplicationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
