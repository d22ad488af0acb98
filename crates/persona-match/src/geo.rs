//! Great-circle distances between workplace coordinates.

use persona_core::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::error::FeatureFault;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Reported for every aggregate when either side has no coordinates.
/// Distinguishes "unknown" from "co-located" (0 km).
pub const UNKNOWN_DISTANCE_KM: u32 = 99_999;

/// Haversine distance in kilometers.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = lat_b - lat_a;
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (lat_a.cos() * lat_b.cos()).mul_add(
        (d_lon / 2.0).sin().powi(2),
        (d_lat / 2.0).sin().powi(2),
    );
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Min / max / mean over all cross-list distances (each truncated to whole km).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DistanceSummary {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
}

impl DistanceSummary {
    pub const UNKNOWN: Self = Self {
        min: UNKNOWN_DISTANCE_KM,
        max: UNKNOWN_DISTANCE_KM,
        mean: UNKNOWN_DISTANCE_KM as f64,
    };
}

/// Compare every coordinate of `a` with every coordinate of `b`.
///
/// Non-finite coordinates are skipped.
///
/// # Errors
///
/// [`FeatureFault::EmptyField`] when either side has no usable coordinate;
/// callers report [`DistanceSummary::UNKNOWN`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn workplace_distances(a: &[GeoPoint], b: &[GeoPoint]) -> Result<DistanceSummary, FeatureFault> {
    let a: Vec<GeoPoint> = a.iter().copied().filter(GeoPoint::is_finite).collect();
    let b: Vec<GeoPoint> = b.iter().copied().filter(GeoPoint::is_finite).collect();
    if a.is_empty() || b.is_empty() {
        return Err(FeatureFault::EmptyField);
    }

    let mut min = u32::MAX;
    let mut max = 0u32;
    let mut total = 0u64;
    for &p in &a {
        for &q in &b {
            let km = haversine_km(p, q).trunc() as u32;
            min = min.min(km);
            max = max.max(km);
            total += u64::from(km);
        }
    }

    let count = (a.len() * b.len()) as f64;
    Ok(DistanceSummary {
        min,
        max,
        mean: total as f64 / count,
    })
}
