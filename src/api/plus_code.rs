use crate::core::area::CodeArea;
use crate::core::decode::decode;
use crate::core::encode::encode;
use crate::core::shorten::{recover_nearest, shorten};
use crate::util::coord::Coordinate;
use crate::util::error::PlusCodeError;
use geo_types::{Point, Polygon};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A full plus code together with the area it decodes to.
///
/// # Example
///
/// ```
/// use pluscodes_rs::PlusCode;
///
/// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
/// // Create from a (longitude, latitude) pair
/// let code = PlusCode::from_wgs84(&(-1.217765, 51.3701125), 11)?;
/// println!("Code: {}", code);
/// println!("Center: ({}, {})", code.latitude(), code.longitude());
///
/// // Convert to polygon for GIS operations
/// let polygon = code.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlusCode {
    /// The code in uppercase
    pub code: String,
    /// Bounding box of the code
    pub area: CodeArea,
}

impl PlusCode {
    /// Encodes a WGS84 coordinate (x = longitude, y = latitude).
    ///
    /// The code length is adjusted the same way as [`encode`].
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::PlusCode;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
    /// // From tuple
    /// let code = PlusCode::from_wgs84(&(8.0000625, 47.0000625), 10)?;
    /// // From Point
    /// let same = PlusCode::from_wgs84(&Point::new(8.0000625, 47.0000625), 10)?;
    /// assert_eq!(code, same);
    /// assert_eq!(code.to_string(), "8FVC2222+22");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(coord: &impl Coordinate, code_length: i32) -> Result<Self, PlusCodeError> {
        let code = encode(coord.latitude(), coord.longitude(), code_length);
        let area = decode(&code)?;
        Ok(Self { code, area })
    }

    /// Parses a full code, in either case.
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::PlusCode;
    ///
    /// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
    /// let code = PlusCode::from_code("9c3w9qcj+2vx")?;
    /// assert_eq!(code.code, "9C3W9QCJ+2VX");
    /// assert_eq!(code.code_length(), 11);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_code(code: &str) -> Result<Self, PlusCodeError> {
        let area = decode(code)?;
        Ok(Self {
            code: code.to_ascii_uppercase(),
            area,
        })
    }

    /// Recovers a short code using a nearby reference coordinate.
    pub fn from_short(short_code: &str, reference: &impl Coordinate) -> Result<Self, PlusCodeError> {
        let code = recover_nearest(short_code, reference.latitude(), reference.longitude())?;
        Self::from_code(&code)
    }

    /// Latitude of the area center.
    pub fn latitude(&self) -> f64 {
        self.area.center_latitude()
    }

    /// Longitude of the area center.
    pub fn longitude(&self) -> f64 {
        self.area.center_longitude()
    }

    pub fn center(&self) -> Point<f64> {
        self.area.center_point()
    }

    /// Number of significant digits in the code.
    pub fn code_length(&self) -> usize {
        self.area.code_length
    }

    /// Converts the code area to a rectangular polygon.
    ///
    /// Returns a `geo_types::Polygon` with x = longitude and y = latitude,
    /// suitable for spatial operations or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.area.to_polygon()
    }

    /// Returns `true` if the coordinate falls inside the code area.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.area.contains(coord.latitude(), coord.longitude())
    }

    /// Shortens the code relative to a nearby reference coordinate.
    pub fn shorten(&self, reference: &impl Coordinate) -> Result<String, PlusCodeError> {
        shorten(&self.code, reference.latitude(), reference.longitude())
    }
}

impl fmt::Display for PlusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for PlusCode {
    type Err = PlusCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}
