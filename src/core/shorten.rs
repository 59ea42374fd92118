use crate::core::constants::{
    LATITUDE_MAX, MIN_TRIMMABLE_CODE_LENGTH, PADDING_CHARACTER, PAIR_RESOLUTIONS, SEPARATOR,
    SEPARATOR_POSITION,
};
use crate::core::decode::decode;
use crate::core::encode::{clip_latitude, encode, normalize_longitude};
use crate::core::validate::{check_full, check_short, is_full};
use crate::util::error::PlusCodeError;
use tracing::debug;

/// Fraction of a pair resolution the reference may lie from the code center
/// for that pair to be dropped.
const SHORTEN_SAFETY_FACTOR: f64 = 0.3;

/// Removes leading digits from a full code that a nearby reference location
/// can restore.
///
/// The more digits are removed, the closer the reference must be to the code
/// center. Codes that cannot be shortened are returned unchanged, uppercased.
///
/// # Errors
///
/// Returns the [`check_full`] error for anything but a full code,
/// [`PlusCodeError::CannotShortenPadded`] for padded codes, and
/// [`PlusCodeError::CodeTooShortToShorten`] for codes under six digits.
///
/// # Example
/// ```
/// use pluscodes_rs::shorten;
///
/// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
/// assert_eq!(shorten("9C3W9QCJ+2VX", 51.3701125, -1.217765)?, "+2VX");
/// assert_eq!(shorten("9C3W9QCJ+2VX", 51.3708675, -1.217765)?, "CJ+2VX");
/// # Ok(())
/// # }
/// ```
pub fn shorten(code: &str, latitude: f64, longitude: f64) -> Result<String, PlusCodeError> {
    check_full(code)?;
    if code.contains(PADDING_CHARACTER) {
        return Err(PlusCodeError::CannotShortenPadded);
    }
    let area = decode(code)?;
    if area.code_length < MIN_TRIMMABLE_CODE_LENGTH {
        return Err(PlusCodeError::CodeTooShortToShorten {
            min: MIN_TRIMMABLE_CODE_LENGTH,
        });
    }

    let code = code.to_ascii_uppercase();
    let (center_lat, center_lng) = area.center();
    let distance = f64::max(
        (center_lat - clip_latitude(latitude)).abs(),
        (center_lng - normalize_longitude(longitude)).abs(),
    );

    for i in (1..=PAIR_RESOLUTIONS.len() - 2).rev() {
        if distance < PAIR_RESOLUTIONS[i] * SHORTEN_SAFETY_FACTOR {
            let trimmed = (i + 1) * 2;
            debug!(code = %code, distance, trimmed, "Shortened code");
            return Ok(code[trimmed..].to_string());
        }
    }
    debug!(code = %code, distance, "Reference too far to shorten code");
    Ok(code)
}

/// Restores a short code to the full code nearest the reference location.
///
/// Full codes are returned uppercased without change.
///
/// # Errors
///
/// Returns the grammar error from [`check_short`], or
/// [`PlusCodeError::NotShort`] for a valid code that is neither short nor full.
///
/// # Example
/// ```
/// use pluscodes_rs::recover_nearest;
///
/// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
/// assert_eq!(recover_nearest("CJ+2VX", 51.3708675, -1.217765)?, "9C3W9QCJ+2VX");
/// assert_eq!(recover_nearest("8fvc2222+22", 0.0, 0.0)?, "8FVC2222+22");
/// # Ok(())
/// # }
/// ```
pub fn recover_nearest(
    short_code: &str,
    latitude: f64,
    longitude: f64,
) -> Result<String, PlusCodeError> {
    if is_full(short_code) {
        return Ok(short_code.to_ascii_uppercase());
    }
    check_short(short_code)?;

    let latitude = clip_latitude(latitude);
    let longitude = normalize_longitude(longitude);
    let short_code = short_code.to_ascii_uppercase();
    // check_short guarantees a separator before position eight.
    let separator = short_code
        .find(SEPARATOR)
        .ok_or(PlusCodeError::NotShort)?;
    let padding_length = SEPARATOR_POSITION - separator;
    let resolution = 20f64.powi(2 - (padding_length / 2) as i32);
    let half_resolution = resolution / 2.0;

    let prefix = encode(latitude, longitude, padding_length as i32);
    let candidate = format!("{}{}", &prefix[..padding_length], short_code);
    let area = decode(&candidate)?;
    let (mut center_lat, mut center_lng) = area.center();

    if latitude + half_resolution < center_lat && center_lat - resolution >= -LATITUDE_MAX {
        center_lat -= resolution;
    } else if latitude - half_resolution > center_lat && center_lat + resolution <= LATITUDE_MAX {
        center_lat += resolution;
    }
    if longitude + half_resolution < center_lng {
        center_lng -= resolution;
    } else if longitude - half_resolution > center_lng {
        center_lng += resolution;
    }

    let recovered = encode(center_lat, center_lng, area.code_length as i32);
    debug!(short_code = %short_code, candidate = %candidate, recovered = %recovered, "Recovered code");
    Ok(recovered)
}
