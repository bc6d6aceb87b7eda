use std::time::Duration;

use log::{info, warn};
use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;

use crate::distance::Coordinate;
use crate::{Error, Result};

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "caltrans_cam_finder";

/// Resolves free-text addresses through a Nominatim search endpoint.
pub struct Geocoder {
    client: Client,
    endpoint: String,
}

impl Geocoder {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Geocoder> {
        let mut headers = HeaderMap::new();
        // Nominatim rejects requests without an identifying agent
        let agent = HeaderValue::from_str(user_agent).unwrap_or_else(|e| {
            warn!(
                "Invalid user agent {:?} ({}), using {:?}",
                user_agent,
                e,
                DEFAULT_USER_AGENT
            );
            HeaderValue::from_static(DEFAULT_USER_AGENT)
        });
        headers.insert(USER_AGENT, agent);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Geocoder {
            client,
            endpoint: NOMINATIM_SEARCH_URL.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Geocoder {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn locate(&self, address: &str) -> Result<Coordinate> {
        let address = address.trim();
        if address.is_empty() {
            return Err(Error::EmptyAddress);
        }

        let response = self.request_api(address)?;
        let coordinate =
            json_to_coords(&response).ok_or_else(|| Error::AddressNotFound(address.to_string()))?;
        info!("Geocoded {:?} to {}", address, coordinate);
        Ok(coordinate)
    }

    fn request_api(&self, address: &str) -> Result<Value> {
        let params = [("q", address), ("format", "geojson"), ("limit", "1")];
        let res = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()?
            .error_for_status()?;
        Ok(res.json::<Value>()?)
    }
}

/// First feature's point; GeoJSON orders it `[lon, lat]`.
fn json_to_coords(json_response: &Value) -> Option<Coordinate> {
    let coords = &json_response["features"][0]["geometry"]["coordinates"];
    let lat = coords[1].as_f64()?;
    let lon = coords[0].as_f64()?;
    Some(Coordinate::new(lat, lon))
}
