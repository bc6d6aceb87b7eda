use crate::distance::Coordinate;
use crate::{Error, Result};

/// How the user describes their location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Address,
    Coordinates,
}

/// A resolved request for nearby cameras.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Address(String),
    Coordinates(Coordinate),
}

pub fn parse_mode(line: &str) -> Option<Mode> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "a" | "address" => Some(Mode::Address),
        "2" | "c" | "coords" | "coordinates" => Some(Mode::Coordinates),
        _ => None,
    }
}

/// Accepts a user-supplied pair only when both values are finite.
pub fn coordinate(lat: f64, lon: f64) -> Result<Coordinate> {
    if !(lat.is_finite() && lon.is_finite()) {
        return Err(Error::InvalidCoordinates(format!("{} {}", lat, lon)));
    }
    Ok(Coordinate::new(lat, lon))
}

/// Parses `"<latitude> <longitude>"`.
pub fn parse_coordinates(line: &str) -> Result<Coordinate> {
    let invalid = || Error::InvalidCoordinates(line.trim().to_string());
    let values = line
        .split_whitespace()
        .map(|token| token.parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<f64>>>()?;
    match values[..] {
        [lat, lon] => coordinate(lat, lon).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

impl Query {
    pub fn parse(mode: Mode, line: &str) -> Result<Query> {
        match mode {
            Mode::Address => {
                let address = line.trim();
                if address.is_empty() {
                    return Err(Error::EmptyAddress);
                }
                Ok(Query::Address(address.to_string()))
            }
            Mode::Coordinates => parse_coordinates(line).map(Query::Coordinates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes() {
        assert_eq!(parse_mode("1"), Some(Mode::Address));
        assert_eq!(parse_mode(" Address\n"), Some(Mode::Address));
        assert_eq!(parse_mode("2"), Some(Mode::Coordinates));
        assert_eq!(parse_mode("COORDS"), Some(Mode::Coordinates));
        assert_eq!(parse_mode("3"), None);
        assert_eq!(parse_mode(""), None);
    }

    #[test]
    fn coordinate_pair() {
        assert_eq!(
            parse_coordinates("37.7749 -122.4194").unwrap(),
            Coordinate::new(37.7749, -122.4194)
        );
        assert_eq!(
            parse_coordinates("  34\t-118.2 \n").unwrap(),
            Coordinate::new(34.0, -118.2)
        );
    }

    #[test]
    fn bad_coordinate_pairs() {
        for line in ["", "37.7", "37.7 -122.4 5", "north west", "37.7,-122.4", "NaN 1"] {
            assert!(
                matches!(parse_coordinates(line), Err(Error::InvalidCoordinates(_))),
                "{:?}",
                line
            );
        }
    }

    #[test]
    fn finite_pairs_only() {
        assert_eq!(coordinate(37.7, -122.4).unwrap(), Coordinate::new(37.7, -122.4));
        for (lat, lon) in [(f64::NAN, 0.0), (0.0, f64::INFINITY), (f64::NEG_INFINITY, 1.0)] {
            assert!(matches!(coordinate(lat, lon), Err(Error::InvalidCoordinates(_))));
        }
    }

    #[test]
    fn queries() {
        assert_eq!(
            Query::parse(Mode::Address, " 1 Dr Carlton B Goodlett Pl, San Francisco ").unwrap(),
            Query::Address("1 Dr Carlton B Goodlett Pl, San Francisco".to_string())
        );
        assert!(matches!(
            Query::parse(Mode::Address, "  "),
            Err(Error::EmptyAddress)
        ));
        assert_eq!(
            Query::parse(Mode::Coordinates, "1 2").unwrap(),
            Query::Coordinates(Coordinate::new(1.0, 2.0))
        );
    }
}
