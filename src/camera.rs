use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::distance::{haversine, Coordinate};

pub const UNKNOWN_LOCATION: &str = "Unknown";

/// A camera ready for ranking, with its distance to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    pub coordinate: Coordinate,
    pub image_url: String,
    pub distance_km: f64,
}

impl CameraRecord {
    pub fn without_id(self) -> CameraRecord {
        CameraRecord { id: None, ..self }
    }
}

impl fmt::Display for CameraRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = &self.id {
            write!(f, "{} -- ", id)?;
        }
        write!(f, "{}", self.description)?;
        match (&self.route, &self.direction) {
            (Some(route), Some(direction)) => write!(f, " ({} {})", route, direction)?,
            (Some(route), None) => write!(f, " ({})", route)?,
            (None, Some(direction)) => write!(f, " ({})", direction)?,
            (None, None) => {}
        }
        write!(f, " ({:.2} km): {}", self.distance_km, self.image_url)
    }
}

/// Number-or-string field; the status feed sends coordinates as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse().ok(),
        };
        value.filter(|v| v.is_finite())
    }

    fn into_text(self) -> Option<String> {
        let text = match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        };
        non_empty(Some(text))
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    cctv: RawCctv,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCctv {
    #[serde(default)]
    id: Option<Scalar>,
    #[serde(default)]
    location: Option<RawLocation>,
    #[serde(default)]
    image_data: Option<RawImageData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    #[serde(default)]
    latitude: Option<Scalar>,
    #[serde(default)]
    longitude: Option<Scalar>,
    #[serde(default)]
    location_name: Option<String>,
    #[serde(default)]
    route: Option<String>,
    #[serde(default)]
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawImageData {
    #[serde(default, rename = "static")]
    still: Option<RawStatic>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStatic {
    #[serde(default, rename = "currentImageURL")]
    current_image_url: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Builds a record from one status-feed entry.
///
/// Returns `None` when the entry does not match the feed layout or lacks a
/// latitude, longitude or image URL.
pub fn parse_entry(user: Coordinate, entry: &Value) -> Option<CameraRecord> {
    let raw: RawEntry = match RawEntry::deserialize(entry) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Skipping malformed camera entry: {}", e);
            return None;
        }
    };
    let cctv = raw.cctv;
    let location = cctv.location?;

    let lat = location.latitude.as_ref().and_then(Scalar::as_f64)?;
    let lon = location.longitude.as_ref().and_then(Scalar::as_f64)?;
    let image_url = non_empty(cctv.image_data?.still?.current_image_url)?;

    let coordinate = Coordinate::new(lat, lon);
    Some(CameraRecord {
        id: cctv.id.and_then(Scalar::into_text),
        description: non_empty(location.location_name)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        route: non_empty(location.route),
        direction: non_empty(location.direction),
        coordinate,
        image_url,
        distance_km: haversine(user, coordinate),
    })
}
