use log::info;
use serde_json::Value;

use crate::camera::{parse_entry, CameraRecord};
use crate::distance::Coordinate;

pub const DEFAULT_TOP_N: usize = 5;

/// The `top_n` cameras closest to `user`, nearest first.
///
/// Invalid entries are dropped. Cameras at equal distance keep their input
/// order.
pub fn rank(user: Coordinate, entries: &[Value], top_n: usize) -> Vec<CameraRecord> {
    let mut cameras: Vec<CameraRecord> = entries
        .iter()
        .filter_map(|entry| parse_entry(user, entry))
        .collect();
    info!("{} of {} entries usable", cameras.len(), entries.len());

    cameras.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    cameras.truncate(top_n);
    cameras
}
