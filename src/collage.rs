use std::{path::Path, process::Command, time::Duration};

use image::{imageops, DynamicImage, RgbImage};
use log::{info, warn};
use reqwest::blocking::Client;

use crate::Result;

pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Tile size and column limit of a collage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollageLayout {
    pub tile_width: u32,
    pub tile_height: u32,
    pub max_columns: u32,
}

impl Default for CollageLayout {
    fn default() -> CollageLayout {
        CollageLayout {
            tile_width: 320,
            tile_height: 240,
            max_columns: 3,
        }
    }
}

/// `(columns, rows)` for `count` tiles; `(0, 0)` when there are none.
pub fn grid_dimensions(count: u32, max_columns: u32) -> (u32, u32) {
    let columns = count.min(max_columns.max(1));
    if columns == 0 {
        return (0, 0);
    }
    (columns, count.div_ceil(columns))
}

pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> Result<DynamicImage>;
}

pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration) -> Result<HttpImageFetcher> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpImageFetcher { client })
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> Result<DynamicImage> {
        let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// Downloads each URL in order, leaving out the ones that fail.
pub fn download_all<F>(fetcher: &F, urls: &[&str]) -> Vec<DynamicImage>
where
    F: ImageFetcher + ?Sized,
{
    urls.iter()
        .filter_map(|url| match fetcher.fetch(url) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Failed to load image from {}: {}", url, e);
                None
            }
        })
        .collect()
}

/// Tiles the images left to right, top to bottom on a black canvas.
pub fn compose(images: &[DynamicImage], layout: CollageLayout) -> Option<RgbImage> {
    let (columns, rows) = grid_dimensions(images.len() as u32, layout.max_columns);
    if columns == 0 {
        return None;
    }

    let mut canvas = RgbImage::new(columns * layout.tile_width, rows * layout.tile_height);
    for (i, image) in images.iter().enumerate() {
        let i = i as u32;
        let tile = imageops::resize(
            &image.to_rgb8(),
            layout.tile_width,
            layout.tile_height,
            imageops::FilterType::Triangle,
        );
        let x = (i % columns) * layout.tile_width;
        let y = (i / columns) * layout.tile_height;
        imageops::replace(&mut canvas, &tile, x as i64, y as i64);
    }
    info!("Composed {} images into a {}x{} grid", images.len(), columns, rows);
    Some(canvas)
}

/// Opens the file in the platform's default image viewer.
pub fn show(path: &Path) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };
    command.arg(path).spawn()?;
    Ok(())
}
