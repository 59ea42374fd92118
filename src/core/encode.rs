use crate::core::constants::{
    DEFAULT_CODE_LENGTH, ENCODING_BASE, FINAL_LAT_PRECISION, FINAL_LNG_PRECISION,
    GRID_CODE_LENGTH, GRID_COLUMNS, GRID_ROWS, LAT_INTEGER_SPAN, LATITUDE_MAX, LNG_INTEGER_SPAN,
    LONGITUDE_MAX, MAX_CODE_LENGTH, MIN_CODE_LENGTH, PADDING_CHARACTER, PAIR_CODE_LENGTH,
    SEPARATOR, SEPARATOR_POSITION, digit_char,
};

/// Encodes a WGS84 location into a plus code of the requested length.
///
/// The latitude is clipped to `[-90, 90]` and the longitude normalized into
/// `[-180, 180)`. The length is adjusted to a legal value: `<= 0` selects the
/// default of 10 digits, odd lengths below 10 are rounded up, and lengths above
/// 15 are capped.
///
/// Inputs must be finite.
///
/// # Example
/// ```
/// use pluscodes_rs::encode;
///
/// assert_eq!(encode(47.0000625, 8.0000625, 10), "8FVC2222+22");
/// assert_eq!(encode(20.375, 2.775, 6), "7FG49Q00+");
/// ```
pub fn encode(latitude: f64, longitude: f64, code_length: i32) -> String {
    let code_length = clamp_code_length(code_length);
    let mut lat = clip_latitude(latitude);
    let lng = normalize_longitude(longitude);
    // A cell starting at 90 would extend past the pole.
    if lat == LATITUDE_MAX {
        lat -= latitude_precision(code_length);
    }
    let (lat_val, lng_val) = location_to_integers(lat, lng);
    encode_integers(lat_val, lng_val, code_length)
}

/// Maps a requested code length onto the nearest legal one.
pub(crate) fn clamp_code_length(code_length: i32) -> usize {
    let Ok(length) = usize::try_from(code_length) else {
        return DEFAULT_CODE_LENGTH;
    };
    match length {
        0 => DEFAULT_CODE_LENGTH,
        n if n < PAIR_CODE_LENGTH && n % 2 == 1 => n + 1,
        n => n.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
    }
}

/// Converts a location into non-negative integers counted in units of a
/// 15-digit cell.
///
/// The scaled value is rounded to six decimal places before truncation, which
/// absorbs the representation error of the multiplication without moving a
/// coordinate across a cell boundary.
pub fn location_to_integers(latitude: f64, longitude: f64) -> (i64, i64) {
    let lat = clip_latitude(latitude);
    let lng = normalize_longitude(longitude);
    let mut lat_val = to_fixed_point(lat + LATITUDE_MAX, FINAL_LAT_PRECISION);
    let mut lng_val = to_fixed_point(lng + LONGITUDE_MAX, FINAL_LNG_PRECISION);
    // Values a hair under 90/180 can still scale to the full span.
    if lat_val >= LAT_INTEGER_SPAN {
        lat_val = LAT_INTEGER_SPAN - 1;
    }
    if lng_val >= LNG_INTEGER_SPAN {
        lng_val = LNG_INTEGER_SPAN - 1;
    }
    (lat_val, lng_val)
}

fn to_fixed_point(degrees: f64, precision: i64) -> i64 {
    ((degrees * precision as f64 * 1e6).round() / 1e6).floor() as i64
}

/// Encodes integer coordinates from [`location_to_integers`] into a code.
///
/// `code_length` must already be legal (see [`encode`]).
pub fn encode_integers(mut lat_val: i64, mut lng_val: i64, code_length: usize) -> String {
    let mut digits = ['2'; MAX_CODE_LENGTH];

    if code_length > PAIR_CODE_LENGTH {
        for slot in digits[PAIR_CODE_LENGTH..].iter_mut().rev() {
            let lat_digit = lat_val % GRID_ROWS;
            let lng_digit = lng_val % GRID_COLUMNS;
            *slot = digit_char(lat_digit * GRID_COLUMNS + lng_digit);
            lat_val /= GRID_ROWS;
            lng_val /= GRID_COLUMNS;
        }
    } else {
        lat_val /= GRID_ROWS.pow(GRID_CODE_LENGTH as u32);
        lng_val /= GRID_COLUMNS.pow(GRID_CODE_LENGTH as u32);
    }

    for pair in digits[..PAIR_CODE_LENGTH].chunks_exact_mut(2).rev() {
        pair[1] = digit_char(lng_val % ENCODING_BASE);
        pair[0] = digit_char(lat_val % ENCODING_BASE);
        lat_val /= ENCODING_BASE;
        lng_val /= ENCODING_BASE;
    }

    let mut code = String::with_capacity(MAX_CODE_LENGTH + 1);
    if code_length >= SEPARATOR_POSITION {
        code.extend(&digits[..SEPARATOR_POSITION]);
        code.push(SEPARATOR);
        code.extend(&digits[SEPARATOR_POSITION..code_length]);
    } else {
        code.extend(&digits[..code_length]);
        code.extend(std::iter::repeat_n(
            PADDING_CHARACTER,
            SEPARATOR_POSITION - code_length,
        ));
        code.push(SEPARATOR);
    }
    code
}

/// Clips a latitude into `[-90, 90]`.
pub fn clip_latitude(latitude: f64) -> f64 {
    latitude.clamp(-LATITUDE_MAX, LATITUDE_MAX)
}

/// Normalizes a longitude into `[-180, 180)`.
pub fn normalize_longitude(longitude: f64) -> f64 {
    if (-LONGITUDE_MAX..LONGITUDE_MAX).contains(&longitude) {
        return longitude;
    }
    let wrapped = longitude.rem_euclid(2.0 * LONGITUDE_MAX);
    if wrapped >= LONGITUDE_MAX {
        wrapped - 2.0 * LONGITUDE_MAX
    } else {
        wrapped
    }
}

/// Height in degrees of the cell of a code with `code_length` digits.
///
/// Below 11 digits cells are square in degrees; grid digits divide the height
/// by 5 each.
pub fn latitude_precision(code_length: usize) -> f64 {
    if code_length <= PAIR_CODE_LENGTH {
        let exponent = 2 - i32::try_from(code_length / 2).unwrap_or(i32::MAX);
        return 20f64.powi(exponent);
    }
    let grid_digits = i32::try_from(code_length - PAIR_CODE_LENGTH).unwrap_or(i32::MAX);
    20f64.powi(-3) / 5f64.powi(grid_digits)
}
