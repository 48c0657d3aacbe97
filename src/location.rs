//! Device location handling.
//!
//! Location is an external, possibly-absent input. Capture never fails record
//! creation: an absent fix resolves to the sentinel text. Stored locations are
//! parsed back to numbers only for the map view, and anything unparseable is
//! simply excluded there.

/// Sentinel stored when no fix was available at capture time.
pub const SENTINEL: &str = "0.0, 0.0";

/// Outcome of a location capture attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geo {
    Fix { lat: f64, lon: f64 },
    Unavailable,
}

impl Geo {
    pub fn from_args(lat: Option<f64>, lon: Option<f64>) -> Self {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Geo::Fix { lat, lon },
            _ => Geo::Unavailable,
        }
    }

    /// Display string stored on the record.
    pub fn storage_text(&self) -> String {
        match self {
            Geo::Fix { lat, lon } => format!("{}, {}", lat, lon),
            Geo::Unavailable => SENTINEL.to_string(),
        }
    }
}

/// Parse a stored `"lat, lon"` string. Returns `None` for placeholder or
/// malformed text; callers exclude those records from spatial views.
pub fn parse_coords(text: &str) -> Option<(f64, f64)> {
    let (lat, lon) = text.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    Some((lat, lon))
}
