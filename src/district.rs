use std::fmt;

use crate::{Error, Result};

const STATUS_BASE_URL: &str = "https://cwwp2.dot.ca.gov/data";

pub const FIRST_DISTRICT: u8 = 1;
pub const LAST_DISTRICT: u8 = 12;

/// A Caltrans highway district, 1 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct District(u8);

impl District {
    pub fn new(number: u8) -> Result<District> {
        if !(FIRST_DISTRICT..=LAST_DISTRICT).contains(&number) {
            return Err(Error::InvalidDistrict(number));
        }
        Ok(District(number))
    }

    /// All districts in scan order.
    pub fn all() -> impl Iterator<Item = District> {
        (FIRST_DISTRICT..=LAST_DISTRICT).map(District)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Lowercase path fragment, e.g. `d4`.
    pub fn lower(&self) -> String {
        format!("d{}", self.0)
    }

    /// Zero-padded uppercase fragment, e.g. `D04`.
    pub fn upper(&self) -> String {
        format!("D{:02}", self.0)
    }

    pub fn status_url(&self) -> String {
        format!(
            "{}/{}/cctv/cctvStatus{}.json",
            STATUS_BASE_URL,
            self.lower(),
            self.upper()
        )
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_urls() {
        assert_eq!(
            District::new(1).unwrap().status_url(),
            "https://cwwp2.dot.ca.gov/data/d1/cctv/cctvStatusD01.json"
        );
        assert_eq!(
            District::new(12).unwrap().status_url(),
            "https://cwwp2.dot.ca.gov/data/d12/cctv/cctvStatusD12.json"
        );
    }

    #[test]
    fn out_of_range() {
        assert!(matches!(District::new(0), Err(Error::InvalidDistrict(0))));
        assert!(matches!(District::new(13), Err(Error::InvalidDistrict(13))));
    }

    #[test]
    fn all_in_order() {
        let numbers: Vec<u8> = District::all().map(|d| d.number()).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
    }
}
