pub mod code_csv;
pub mod plus_code;

pub use code_csv::{
    AREA_GEOMETRY_COLUMN, CoordinateSource, CsvCodeConfig, CsvToPlusCodes, GeometryFormat,
    PLUS_CODE_COLUMN, csv_to_plus_code_csv,
};
pub use plus_code::PlusCode;
