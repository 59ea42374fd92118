use crate::api::plus_code::PlusCode;
use crate::core::area::{area_to_geojson, area_to_wkt};
use crate::core::constants::DEFAULT_CODE_LENGTH;
use crate::util::error::PlusCodeError;
use geo::Centroid;
use geo_types::Geometry;
use geojson::GeoJson;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};
use wkt::Wkt;

/// Name of the code column written first in every output row.
pub const PLUS_CODE_COLUMN: &str = "plus_code";

/// Name of the optional area geometry column.
pub const AREA_GEOMETRY_COLUMN: &str = "area_geometry";

/// For the type of location source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lng_idx: usize, lat_idx: usize },
}

/// Output format for code area geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lng_column: String,
        lat_column: String,
    },
}

/// Configuration for CSV to plus code conversion.
#[derive(Debug, Clone)]
pub struct CsvCodeConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub code_length: i32,
    pub include_area_geometry: Option<GeometryFormat>,
}

impl CsvCodeConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::CsvCodeConfig;
    ///
    /// let config = CsvCodeConfig::new("geometry", 11);
    /// ```
    pub fn new(geometry_column: impl Into<String>, code_length: i32) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            code_length,
            include_area_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::CsvCodeConfig;
    ///
    /// let config = CsvCodeConfig::from_coords("Longitude", "Latitude", 10);
    /// ```
    pub fn from_coords(
        lng_column: impl Into<String>,
        lat_column: impl Into<String>,
        code_length: i32,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lng_column: lng_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            code_length,
            include_area_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn code_length(mut self, code_length: i32) -> Self {
        self.code_length = code_length;
        self
    }

    /// Include the code area polygon in output.
    pub fn with_area_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_area_geometry = Some(format);
        self
    }
}

impl Default for CsvCodeConfig {
    fn default() -> Self {
        Self::from_coords("longitude", "latitude", DEFAULT_CODE_LENGTH as i32)
    }
}

pub trait CsvToPlusCodes {
    fn to_plus_code_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvCodeConfig,
    ) -> Result<usize, PlusCodeError>;
}

impl<P: AsRef<Path>> CsvToPlusCodes for P {
    fn to_plus_code_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvCodeConfig,
    ) -> Result<usize, PlusCodeError> {
        csv_to_plus_code_csv(self, output_path, config)
    }
}

fn parse_geometry(s: &str) -> Result<Geometry<f64>, PlusCodeError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

fn parse_geojson(s: &str) -> Result<Geometry<f64>, PlusCodeError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| PlusCodeError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => Geometry::try_from(geom)
            .map_err(|e| PlusCodeError::GeometryParseError(e.to_string())),
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| PlusCodeError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(|g| {
                Geometry::try_from(g).map_err(|e| PlusCodeError::GeometryParseError(e.to_string()))
            }),
        GeoJson::FeatureCollection(_) => Err(PlusCodeError::GeometryParseError(
            "FeatureCollection not supported, use individual geometries".to_string(),
        )),
    }
}

fn parse_wkt(s: &str) -> Result<Geometry<f64>, PlusCodeError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| PlusCodeError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        PlusCodeError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

/// Points and multi-points encode every point; anything else encodes its centroid.
fn geometry_to_plus_codes(
    geom: Geometry<f64>,
    code_length: i32,
) -> Result<Vec<PlusCode>, PlusCodeError> {
    match geom {
        Geometry::Point(pt) => Ok(vec![PlusCode::from_wgs84(&pt, code_length)?]),
        Geometry::MultiPoint(mp) => mp
            .0
            .iter()
            .map(|pt| PlusCode::from_wgs84(pt, code_length))
            .collect(),
        other => match other.centroid() {
            Some(centroid) => Ok(vec![PlusCode::from_wgs84(&centroid, code_length)?]),
            None => Ok(vec![]),
        },
    }
}

fn parse_coordinate(field: Option<&str>, name: &str) -> Result<f64, PlusCodeError> {
    let value = field
        .ok_or_else(|| PlusCodeError::CsvError(format!("Missing {name} column")))?
        .trim();
    value
        .parse()
        .map_err(|_| PlusCodeError::CsvError(format!("Invalid {name}: '{value}'")))
}

fn column_index(headers: &csv::StringRecord, column: &str, role: &str) -> Result<usize, PlusCodeError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| PlusCodeError::CsvError(format!("{role} column '{column}' not found")))
}

// ============================================================================
// CSV Conversion
// ============================================================================

/// Converts a CSV file with geometry or coordinate columns to a CSV file with plus codes.
///
/// Streams output row by row and returns the number of codes written.
///
/// # Example with geometry column (WKT or GeoJSON)
///
/// ```no_run
/// use pluscodes_rs::{csv_to_plus_code_csv, CsvCodeConfig, GeometryFormat};
///
/// let config = CsvCodeConfig::new("Geo Shape", 10)
///     .exclude(vec!["Geo Point".into()])
///     .with_area_geometry(GeometryFormat::Wkt);
///
/// csv_to_plus_code_csv("input.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example with coordinate columns
///
/// ```no_run
/// use pluscodes_rs::{csv_to_plus_code_csv, CsvCodeConfig};
///
/// let config = CsvCodeConfig::from_coords("Longitude", "Latitude", 11);
///
/// csv_to_plus_code_csv("bus_stops.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_plus_code_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvCodeConfig,
) -> Result<usize, PlusCodeError> {
    let file = File::open(csv_path)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    // Source columns never reach the output
    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lng_column,
            lat_column,
        } => {
            let lng_idx = column_index(&headers, lng_column, "Longitude")?;
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            (
                SourceIndices::Coordinates { lng_idx, lat_idx },
                HashSet::from([lng_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path)?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec![PLUS_CODE_COLUMN];
    if config.include_area_geometry.is_some() {
        header_row.push(AREA_GEOMETRY_COLUMN);
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer.write_record(&header_row)?;

    let mut written = 0;
    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let codes = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    PlusCodeError::CsvError(format!("Missing geometry column at index {idx}"))
                })?;
                geometry_to_plus_codes(parse_geometry(geom_str)?, config.code_length)?
            }
            SourceIndices::Coordinates { lng_idx, lat_idx } => {
                let lng = parse_coordinate(record.get(*lng_idx), "longitude")?;
                let lat = parse_coordinate(record.get(*lat_idx), "latitude")?;
                vec![PlusCode::from_wgs84(&(lng, lat), config.code_length)?]
            }
        };
        if codes.is_empty() {
            debug!(line, "Row has no location to encode");
        }

        for code in codes {
            let mut row: Vec<String> = vec![code.code.clone()];

            if let Some(format) = config.include_area_geometry {
                row.push(match format {
                    GeometryFormat::Wkt => area_to_wkt(&code.area),
                    GeometryFormat::GeoJson => area_to_geojson(&code.area),
                });
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer.write_record(&row)?;
            written += 1;
        }
    }

    writer.flush()?;
    info!(codes = written, "Wrote plus code CSV");
    Ok(written)
}
