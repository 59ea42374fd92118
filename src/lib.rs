//! # pluscodes-rs
//!
//! Encode WGS84 locations as plus codes, decode codes back into areas, and
//! shorten or recover codes relative to a nearby reference location.
//!
//! ### 1. Free functions - The Codec
//!
//! ```
//! use pluscodes_rs::{decode, encode, recover_nearest, shorten};
//!
//! # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
//! let code = encode(51.3701125, -1.217765, 11);
//! assert_eq!(code, "9C3W9QCJ+2VX");
//!
//! let area = decode(&code)?;
//! assert!(area.contains(51.3701125, -1.217765));
//!
//! let short = shorten(&code, 51.3708675, -1.217765)?;
//! assert_eq!(short, "CJ+2VX");
//! assert_eq!(recover_nearest(&short, 51.3708675, -1.217765)?, code);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `PlusCode` - Codes as Values
//!
//! ```
//! use pluscodes_rs::PlusCode;
//! use geo_types::point;
//!
//! # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
//! let pt = point! { x: 8.0000625, y: 47.0000625 };
//! let code = PlusCode::from_wgs84(&pt, 10)?;
//! println!("{}", code);
//! let polygon = code.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToPlusCodes` - CSV File Conversion
//!
//! Convert CSV files with geometry columns (WKT or GeoJSON) to coded CSVs:
//!
//! ```no_run
//! use pluscodes_rs::{CsvToPlusCodes, CsvCodeConfig, GeometryFormat};
//!
//! let config = CsvCodeConfig::new("geometry", 11)
//!     .exclude(vec!["Geo Point".into()])
//!     .with_area_geometry(GeometryFormat::Wkt);
//!
//! // Using trait method
//! "input.csv".to_plus_code_csv("output.csv", &config).unwrap();
//! ```
//!
//! Or use separate longitude/latitude columns:
//!
//! ```no_run
//! use pluscodes_rs::{CsvCodeConfig, csv_to_plus_code_csv};
//!
//! let config = CsvCodeConfig::from_coords("Longitude", "Latitude", 10);
//!
//! csv_to_plus_code_csv("bus_stops.csv", "output.csv", &config).unwrap();
//! ```
//!

pub mod api;
pub mod conformance;
pub mod core;
pub mod util;

pub use api::{
    CoordinateSource, CsvCodeConfig, CsvToPlusCodes, GeometryFormat, PlusCode,
    csv_to_plus_code_csv,
};
pub use core::{
    CODE_ALPHABET, CodeArea, DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH,
    PADDING_CHARACTER, SEPARATOR, SEPARATOR_POSITION, area_to_geojson, area_to_wkt, check,
    check_full, check_short, clip_latitude, decode, encode, encode_integers, is_full, is_padded,
    is_short, is_valid, latitude_precision, location_to_integers, normalize_longitude,
    recover_nearest, shorten,
};
pub use util::{Coordinate, PlusCodeError};

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), PlusCodeError> {
        let code = encode(-33.8567844, 151.2152967, 11);
        assert!(is_full(&code));
        assert!(!is_short(&code));

        let area = decode(&code)?;
        assert_eq!(area.code_length, 11);
        assert!(area.contains(-33.8567844, 151.2152967));

        let short = shorten(&code, -33.86, 151.21)?;
        assert!(is_short(&short));
        assert_eq!(recover_nearest(&short, -33.86, 151.21)?, code);
        Ok(())
    }

    #[test]
    fn test_using_geo_types_macros() -> Result<(), PlusCodeError> {
        let pt = point! { x: 2.775, y: 20.375 };
        let code = PlusCode::from_wgs84(&pt, 6)?;
        assert_eq!(code.code, "7FG49Q00+");
        assert!(is_padded(&code.code));
        assert!((code.center().x() - pt.x()).abs() < 1e-10);
        assert!((code.center().y() - pt.y()).abs() < 1e-10);
        Ok(())
    }

    #[test]
    fn test_integer_stage_matches_encode() {
        let (lat, lng) = (47.365590, 8.524997);
        let (lat_val, lng_val) = location_to_integers(lat, lng);
        for length in [4, 8, 10, 11, 15] {
            assert_eq!(
                encode_integers(lat_val, lng_val, length),
                encode(lat, lng, length as i32)
            );
        }
    }

    #[test]
    fn test_area_renderers() -> Result<(), PlusCodeError> {
        let area = decode("8FVC0000+")?;
        assert!(area_to_wkt(&area).starts_with("POLYGON"));
        assert!(area_to_geojson(&area).contains("coordinates"));
        assert_eq!(area.latitude_height(), 1.0);
        assert_eq!(area.longitude_width(), 1.0);
        Ok(())
    }

    #[test]
    fn test_validity_classification() {
        assert!(is_valid("9G8F+6W"));
        assert!(check_short("9G8F+6W").is_ok());
        assert_eq!(check_full("9G8F+6W"), Err(PlusCodeError::NotFull));
        assert!(check("9G8F+6W+").is_err_and(|e| e.is_invalid_code()));
    }

    #[test]
    fn test_decode_shorten_errors() {
        assert_eq!(decode("2345+G6"), Err(PlusCodeError::NotFull));
        assert_eq!(
            shorten("8FVC0000+", 47.5, 8.5),
            Err(PlusCodeError::CannotShortenPadded)
        );
    }
}
