use std::time::Duration;

use log::{info, warn};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::district::District;
use crate::Result;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Supplies the raw camera entries of one district.
pub trait StatusSource {
    fn fetch(&self, district: District) -> Result<Vec<Value>>;
}

/// Reads the public Caltrans CCTV status endpoints.
pub struct HttpStatusSource {
    client: Client,
}

impl HttpStatusSource {
    pub fn new(timeout: Duration) -> Result<HttpStatusSource> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpStatusSource { client })
    }
}

impl StatusSource for HttpStatusSource {
    fn fetch(&self, district: District) -> Result<Vec<Value>> {
        let url = district.status_url();
        info!("Fetching {}", url);
        let body: Value = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(data_entries(body))
    }
}

/// Entries under the top-level `data` key; anything else yields none.
pub fn data_entries(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Fetches every district in order and concatenates their entries.
///
/// A district that fails to load contributes nothing.
pub fn scan<S, I>(source: &S, districts: I) -> Vec<Value>
where
    S: StatusSource + ?Sized,
    I: IntoIterator<Item = District>,
{
    districts
        .into_iter()
        .fold(Vec::new(), |mut entries, district| {
            match source.fetch(district) {
                Ok(found) => {
                    info!("District {}: {} entries", district, found.len());
                    entries.extend(found);
                }
                Err(e) => warn!("Error fetching data for district {}: {}", district, e),
            }
            entries
        })
}
