use crate::core::constants::{LATITUDE_MAX, LONGITUDE_MAX};
use geo_types::{Point, Polygon, Rect, coord};
use serde::Serialize;

/// The rectangle of the Earth's surface a code represents.
///
/// Bounds are in WGS84 degrees. The low edges belong to the area, the high
/// edges belong to the neighbouring areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CodeArea {
    /// Latitude of the southern edge.
    pub lat_lo: f64,
    /// Longitude of the western edge.
    pub lng_lo: f64,
    /// Latitude of the northern edge, never above 90.
    pub lat_hi: f64,
    /// Longitude of the eastern edge.
    pub lng_hi: f64,
    /// Number of significant digits decoded.
    pub code_length: usize,
}

impl CodeArea {
    pub(crate) fn new(lat_lo: f64, lng_lo: f64, lat_hi: f64, lng_hi: f64, code_length: usize) -> Self {
        Self {
            lat_lo,
            lng_lo,
            lat_hi,
            lng_hi,
            code_length,
        }
    }

    /// Returns `(latitude, longitude)` of the center, clamped to the globe.
    pub fn center(&self) -> (f64, f64) {
        (self.center_latitude(), self.center_longitude())
    }

    pub fn center_latitude(&self) -> f64 {
        (self.lat_lo + (self.lat_hi - self.lat_lo) / 2.0).min(LATITUDE_MAX)
    }

    pub fn center_longitude(&self) -> f64 {
        (self.lng_lo + (self.lng_hi - self.lng_lo) / 2.0).min(LONGITUDE_MAX)
    }

    /// Returns the center as a `geo_types::Point` (x = longitude, y = latitude).
    pub fn center_point(&self) -> Point<f64> {
        Point::new(self.center_longitude(), self.center_latitude())
    }

    /// Height of the area in degrees of latitude.
    pub fn latitude_height(&self) -> f64 {
        self.lat_hi - self.lat_lo
    }

    /// Width of the area in degrees of longitude.
    pub fn longitude_width(&self) -> f64 {
        self.lng_hi - self.lng_lo
    }

    /// Returns `true` if the location lies inside the area (low edges inclusive).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.lat_lo <= latitude
            && latitude < self.lat_hi
            && self.lng_lo <= longitude
            && longitude < self.lng_hi
    }

    /// Returns `true` if `other` lies entirely within this area.
    pub fn encloses(&self, other: &CodeArea) -> bool {
        self.lat_lo <= other.lat_lo
            && other.lat_hi <= self.lat_hi
            && self.lng_lo <= other.lng_lo
            && other.lng_hi <= self.lng_hi
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.lng_lo, y: self.lat_lo },
            coord! { x: self.lng_hi, y: self.lat_hi },
        )
    }

    /// Converts the area to a closed polygon, suitable for WKT or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

/// Renders an area's polygon as Well-Known Text.
pub fn area_to_wkt(area: &CodeArea) -> String {
    use wkt::ToWkt;
    area.to_polygon().wkt_string()
}

/// Renders an area's polygon as a GeoJSON geometry.
pub fn area_to_geojson(area: &CodeArea) -> String {
    let geom = geojson::Geometry::from(&area.to_polygon());
    geom.to_string()
}
