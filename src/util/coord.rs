use geo_types::{Coord, Point};

/// A WGS84 location, with `x` as longitude and `y` as latitude.
pub trait Coordinate {
    fn x(&self) -> f64;
    fn y(&self) -> f64;

    fn longitude(&self) -> f64 {
        self.x()
    }

    fn latitude(&self) -> f64 {
        self.y()
    }
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 { self.0 }
    fn y(&self) -> f64 { self.1 }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 { Point::x(*self) }
    fn y(&self) -> f64 { Point::y(*self) }
}

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 { self.x }
    fn y(&self) -> f64 { self.y }
}
