/// Separates the first eight digits from the rest of the code.
pub const SEPARATOR: char = '+';

/// Number of digits placed before the separator.
pub const SEPARATOR_POSITION: usize = 8;

/// Fills codes shorter than eight digits up to the separator.
pub const PADDING_CHARACTER: char = '0';

/// The 20 code digits in value order.
pub const CODE_ALPHABET: [u8; 20] = *b"23456789CFGHJMPQRVWX";

pub(crate) const ENCODING_BASE: i64 = CODE_ALPHABET.len() as i64;

pub const LATITUDE_MAX: f64 = 90.0;
pub const LONGITUDE_MAX: f64 = 180.0;

/// Shortest code that can be encoded or decoded.
pub const MIN_CODE_LENGTH: usize = 2;

/// Digits beyond this length are ignored.
pub const MAX_CODE_LENGTH: usize = 15;

/// Length produced when no usable length is requested (about 14x14 meters).
pub const DEFAULT_CODE_LENGTH: usize = 10;

/// Digits encoded as latitude/longitude pairs.
pub const PAIR_CODE_LENGTH: usize = 10;

/// Digits encoded with the 4x5 grid refinement.
pub const GRID_CODE_LENGTH: usize = MAX_CODE_LENGTH - PAIR_CODE_LENGTH;

pub(crate) const GRID_COLUMNS: i64 = 4;
pub(crate) const GRID_ROWS: i64 = 5;

/// Inverse of the pair section resolution, in 1/degrees.
pub(crate) const PAIR_PRECISION: i64 = 8000;

/// Latitude multiplier turning degrees into whole units of a 15-digit cell.
pub const FINAL_LAT_PRECISION: i64 = PAIR_PRECISION * GRID_ROWS.pow(GRID_CODE_LENGTH as u32);

/// Longitude multiplier turning degrees into whole units of a 15-digit cell.
pub const FINAL_LNG_PRECISION: i64 = PAIR_PRECISION * GRID_COLUMNS.pow(GRID_CODE_LENGTH as u32);

/// Place value of the first pair digit, in final precision units.
pub(crate) const LAT_MSP_VALUE: i64 = FINAL_LAT_PRECISION * ENCODING_BASE * ENCODING_BASE;
pub(crate) const LNG_MSP_VALUE: i64 = FINAL_LNG_PRECISION * ENCODING_BASE * ENCODING_BASE;

/// Full span of each axis, in final precision units.
pub(crate) const LAT_INTEGER_SPAN: i64 = 2 * 90 * FINAL_LAT_PRECISION;
pub(crate) const LNG_INTEGER_SPAN: i64 = 2 * 180 * FINAL_LNG_PRECISION;

/// Place value in degrees of each digit pair.
pub const PAIR_RESOLUTIONS: [f64; 5] = [20.0, 1.0, 0.05, 0.0025, 0.000125];

/// Codes with fewer digits cannot be shortened.
pub const MIN_TRIMMABLE_CODE_LENGTH: usize = 6;

const INVALID_DIGIT: u8 = u8::MAX;

const DIGIT_VALUES: [u8; 128] = {
    let mut table = [INVALID_DIGIT; 128];
    let mut i = 0;
    while i < CODE_ALPHABET.len() {
        let upper = CODE_ALPHABET[i];
        table[upper as usize] = i as u8;
        table[upper.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    table
};

/// Returns the value of a code digit, accepting either case.
pub(crate) fn digit_value(byte: u8) -> Option<usize> {
    match DIGIT_VALUES.get(byte as usize) {
        Some(&value) if value != INVALID_DIGIT => Some(value as usize),
        _ => None,
    }
}

/// Returns the digit for a value in `0..20`.
///
/// # Panics
///
/// Panics if `value` is not below the encoding base, which only happens if the
/// fixed-point arithmetic producing it is broken.
pub(crate) fn digit_char(value: i64) -> char {
    char::from(CODE_ALPHABET[usize::try_from(value).expect("digit value is non-negative")])
}
