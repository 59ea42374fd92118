pub mod area;
pub mod constants;
pub mod decode;
pub mod encode;
pub mod shorten;
pub mod validate;

pub use area::{CodeArea, area_to_geojson, area_to_wkt};
pub use constants::{
    CODE_ALPHABET, DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH, PADDING_CHARACTER,
    SEPARATOR, SEPARATOR_POSITION,
};
pub use decode::decode;
pub use encode::{
    clip_latitude, encode, encode_integers, latitude_precision, location_to_integers,
    normalize_longitude,
};
pub use shorten::{recover_nearest, shorten};
pub use validate::{check, check_full, check_short, is_full, is_padded, is_short, is_valid};
