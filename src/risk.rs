//! Risk level derivation from classifier text.
//!
//! The level is derived once when the record is inserted and stored as text;
//! it is never recomputed, so old records keep the level they were given even
//! if the token lists change.

use serde::{Deserialize, Serialize};

/// Coarse severity derived from the classifier's free-form reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

// The current prompt asks for English labels; older stored replies used the
// Spanish ones, so both are recognized.
const HIGH_TOKENS: &[&str] = &["High", "Alto"];
const MEDIUM_TOKENS: &[&str] = &["Medium", "Medio"];

/// Map classifier text to a risk level.
///
/// High tokens win over medium tokens regardless of position in the text;
/// anything else (including empty text) is Low. Total over any input.
pub fn derive_risk(text: &str) -> RiskLevel {
    if HIGH_TOKENS.iter().any(|t| text.contains(t)) {
        RiskLevel::High
    } else if MEDIUM_TOKENS.iter().any(|t| text.contains(t)) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Marker colour used by the map view (matches the inventory map legend).
    pub fn marker_color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "orange",
            RiskLevel::High => "red",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" | "Bajo" => Ok(RiskLevel::Low),
            "Medium" | "Medio" => Ok(RiskLevel::Medium),
            "High" | "Alto" => Ok(RiskLevel::High),
            _ => Err(format!("unknown risk level: {}", s)),
        }
    }
}
