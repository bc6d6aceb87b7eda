use std::{path::PathBuf, time::Duration};

use crate::aggregator::DEFAULT_TOP_N;
use crate::collage::{CollageLayout, DEFAULT_IMAGE_TIMEOUT};
use crate::fetcher::DEFAULT_FETCH_TIMEOUT;
use crate::geocode::DEFAULT_USER_AGENT;

/// Knobs for one camera search.
#[derive(Debug, Clone)]
pub struct Settings {
    /// How many of the closest cameras to keep.
    pub top_n: usize,
    /// Keep the camera id in the output records.
    pub include_id: bool,
    pub fetch_timeout: Duration,
    pub image_timeout: Duration,
    pub geocoder_user_agent: String,
    pub layout: CollageLayout,
    /// Where the collage is written.
    pub output: PathBuf,
    /// Open the collage in an image viewer after writing it.
    pub display: bool,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            top_n: DEFAULT_TOP_N,
            include_id: false,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            image_timeout: DEFAULT_IMAGE_TIMEOUT,
            geocoder_user_agent: DEFAULT_USER_AGENT.to_string(),
            layout: CollageLayout::default(),
            output: PathBuf::from("collage.png"),
            display: true,
        }
    }
}
