use std::path::PathBuf;

use log::{info, warn};

pub use camera::CameraRecord;
pub use distance::{haversine, Coordinate};
pub use district::District;
pub use error::{Error, Result};
pub use input::{Mode, Query};
pub use settings::Settings;

pub mod aggregator;
pub mod camera;
pub mod collage;
pub mod distance;
pub mod district;
pub mod error;
pub mod fetcher;
pub mod geocode;
pub mod input;
pub mod settings;

use collage::{HttpImageFetcher, ImageFetcher};
use fetcher::{HttpStatusSource, StatusSource};
use geocode::Geocoder;

/// Finds the cameras nearest to a location and renders their snapshots.
pub struct CamFinder {
    settings: Settings,
    geocoder: Geocoder,
    status_source: Box<dyn StatusSource>,
    image_fetcher: Box<dyn ImageFetcher>,
}

impl CamFinder {
    pub fn new(settings: Settings) -> Result<CamFinder> {
        let status_source = HttpStatusSource::new(settings.fetch_timeout)?;
        let image_fetcher = HttpImageFetcher::new(settings.image_timeout)?;
        CamFinder::with_sources(settings, Box::new(status_source), Box::new(image_fetcher))
    }

    pub fn with_sources(
        settings: Settings,
        status_source: Box<dyn StatusSource>,
        image_fetcher: Box<dyn ImageFetcher>,
    ) -> Result<CamFinder> {
        let geocoder = Geocoder::new(&settings.geocoder_user_agent, settings.fetch_timeout)?;
        Ok(CamFinder {
            settings,
            geocoder,
            status_source,
            image_fetcher,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn locate(&self, query: &Query) -> Result<Coordinate> {
        match query {
            Query::Address(address) => self.geocoder.locate(address),
            Query::Coordinates(coordinate) => Ok(*coordinate),
        }
    }

    /// Scans every district and keeps the closest `top_n` cameras.
    pub fn closest_cameras(&self, user: Coordinate) -> Vec<CameraRecord> {
        let entries = fetcher::scan(self.status_source.as_ref(), District::all());
        let cameras = aggregator::rank(user, &entries, self.settings.top_n);
        if self.settings.include_id {
            cameras
        } else {
            cameras.into_iter().map(CameraRecord::without_id).collect()
        }
    }

    pub fn print_result(&self, cameras: &[CameraRecord], as_json: bool) -> Result<()> {
        if as_json {
            println!("{}", serde_json::to_string_pretty(cameras)?);
            return Ok(());
        }

        if cameras.is_empty() {
            println!("No cameras found");
        }
        for camera in cameras {
            println!("{}", camera);
        }
        Ok(())
    }

    /// Writes the collage of the cameras' snapshots, returning its path.
    ///
    /// Returns `None` when no snapshot could be loaded.
    pub fn render_collage(&self, cameras: &[CameraRecord]) -> Result<Option<PathBuf>> {
        let urls: Vec<&str> = cameras.iter().map(|c| c.image_url.as_str()).collect();
        let images = collage::download_all(self.image_fetcher.as_ref(), &urls);

        let canvas = match collage::compose(&images, self.settings.layout) {
            Some(canvas) => canvas,
            None => {
                warn!("No camera images could be loaded");
                return Ok(None);
            }
        };

        let path = self.settings.output.clone();
        canvas.save(&path)?;
        info!("Saved collage to {}", path.display());

        if self.settings.display {
            if let Err(e) = collage::show(&path) {
                warn!("Could not open image viewer: {}", e);
            }
        }
        Ok(Some(path))
    }

    /// Locates the query, then prints and renders the closest cameras.
    pub fn run(&self, query: &Query, as_json: bool) -> Result<Vec<CameraRecord>> {
        let user = self.locate(query)?;
        info!("Searching for cameras near {}", user);

        let cameras = self.closest_cameras(user);
        self.print_result(&cameras, as_json)?;
        if let Some(path) = self.render_collage(&cameras)? {
            if !as_json {
                println!("Collage written to {}", path.display());
            }
        }
        Ok(cameras)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use image::{DynamicImage, Rgb, RgbImage};
    use serde_json::{json, Value};
    use tempfile::tempdir;

    use super::*;
    use crate::fetcher::tests::FakeSource;

    struct SolidFetcher;

    impl ImageFetcher for SolidFetcher {
        fn fetch(&self, url: &str) -> Result<DynamicImage> {
            if url.starts_with("broken") {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "truncated image",
                )));
            }
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
                100,
                75,
                Rgb([200, 100, 50]),
            )))
        }
    }

    fn camera(id: &str, lat: f64, lon: f64, url: &str) -> Value {
        json!({
            "cctv": {
                "id": id,
                "location": {
                    "latitude": lat.to_string(),
                    "longitude": lon.to_string(),
                    "locationName": format!("Camera {}", id),
                    "route": "I-80"
                },
                "imageData": { "static": { "currentImageURL": url } }
            }
        })
    }

    fn finder(settings: Settings) -> CamFinder {
        let source = FakeSource {
            bodies: HashMap::from([
                (
                    4,
                    json!({"data": [
                        camera("sf-1", 37.78, -122.41, "sf-1.jpg"),
                        camera("sf-2", 37.80, -122.45, "broken-sf-2.jpg"),
                        { "cctv": { "location": { "latitude": "37.77" } } },
                    ]}),
                ),
                (7, json!({"data": [camera("la-1", 34.05, -118.24, "la-1.jpg")]})),
                (11, json!({"data": [camera("sd-1", 32.72, -117.16, "sd-1.jpg")]})),
            ]),
        };
        CamFinder::with_sources(settings, Box::new(source), Box::new(SolidFetcher)).unwrap()
    }

    #[test]
    fn closest_cameras_across_districts() {
        let finder = finder(Settings {
            top_n: 3,
            include_id: true,
            ..Settings::default()
        });

        let cameras = finder.closest_cameras(Coordinate::new(37.7749, -122.4194));

        let ids: Vec<_> = cameras.iter().map(|c| c.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["sf-1", "sf-2", "la-1"]);
    }

    #[test]
    fn ids_dropped_unless_requested() {
        let finder = finder(Settings::default());

        let cameras = finder.closest_cameras(Coordinate::new(34.0, -118.2));

        assert_eq!(cameras.len(), 4);
        assert!(cameras.iter().all(|c| c.id.is_none()));
        assert_eq!(cameras[0].description, "Camera la-1");
    }

    #[test]
    fn run_with_coordinates() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("collage.png");
        let finder = finder(Settings {
            top_n: 5,
            output: output.clone(),
            display: false,
            ..Settings::default()
        });

        let cameras = finder
            .run(&Query::Coordinates(Coordinate::new(37.7749, -122.4194)), false)
            .unwrap();

        assert_eq!(cameras.len(), 4);
        // one snapshot fails, leaving three tiles in one row
        let collage = image::open(&output).unwrap();
        assert_eq!((collage.width(), collage.height()), (960, 240));
    }

    #[test]
    fn no_cameras_no_collage() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("collage.png");
        let settings = Settings {
            output: output.clone(),
            display: false,
            ..Settings::default()
        };
        let source = FakeSource {
            bodies: HashMap::new(),
        };
        let finder =
            CamFinder::with_sources(settings, Box::new(source), Box::new(SolidFetcher)).unwrap();

        let cameras = finder
            .run(&Query::Coordinates(Coordinate::new(0.0, 0.0)), true)
            .unwrap();

        assert!(cameras.is_empty());
        assert!(!output.exists());
    }
}
