//! Map view data.
//!
//! The map itself is drawn by an external widget; this module only derives
//! the point set. Records whose stored location does not parse are left out,
//! never an error.

use crate::location;
use crate::store::InspectionRecord;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapPoint {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub risk: String,
    pub color: String,
}

/// Derive plottable points from the record set, skipping records with
/// placeholder or malformed locations.
pub fn map_points(records: &[InspectionRecord]) -> Vec<MapPoint> {
    records
        .iter()
        .filter_map(|r| {
            let (lat, lon) = location::parse_coords(&r.location)?;
            Some(MapPoint {
                id: r.id,
                lat,
                lon,
                risk: r.risk.to_string(),
                color: r.risk.marker_color().to_string(),
            })
        })
        .collect()
}
