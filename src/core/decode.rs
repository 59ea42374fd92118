use crate::core::area::CodeArea;
use crate::core::constants::{
    ENCODING_BASE, FINAL_LAT_PRECISION, FINAL_LNG_PRECISION, GRID_COLUMNS, GRID_ROWS,
    LAT_MSP_VALUE, LATITUDE_MAX, LNG_MSP_VALUE, LONGITUDE_MAX, MAX_CODE_LENGTH, MIN_CODE_LENGTH,
    PAIR_CODE_LENGTH, digit_value,
};
use crate::core::validate::check_full;
use crate::util::error::PlusCodeError;

/// Decodes a full code into the area it represents.
///
/// Case is ignored, and digits after the fifteenth are ignored.
///
/// # Errors
///
/// Returns the [`check_full`] error if the code is not a valid full code, or
/// [`PlusCodeError::CodeTooShort`] if fewer than two digits remain.
///
/// # Example
/// ```
/// use pluscodes_rs::decode;
///
/// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
/// let area = decode("8FVC2222+22")?;
/// assert!((area.lat_lo - 47.0).abs() < 1e-10);
/// assert!((area.lng_hi - 8.000125).abs() < 1e-10);
/// assert_eq!(area.code_length, 10);
/// # Ok(())
/// # }
/// ```
pub fn decode(code: &str) -> Result<CodeArea, PlusCodeError> {
    check_full(code)?;
    // Separator and padding are the only non-digits a valid code can hold.
    let digits: Vec<i64> = code
        .bytes()
        .filter_map(digit_value)
        .take(MAX_CODE_LENGTH)
        .map(|d| d as i64)
        .collect();
    if digits.len() < MIN_CODE_LENGTH {
        return Err(PlusCodeError::CodeTooShort);
    }

    let mut lat_val = -(LATITUDE_MAX as i64) * FINAL_LAT_PRECISION;
    let mut lng_val = -(LONGITUDE_MAX as i64) * FINAL_LNG_PRECISION;
    let mut lat_place = LAT_MSP_VALUE;
    let mut lng_place = LNG_MSP_VALUE;

    let pair_digits = digits.len().min(PAIR_CODE_LENGTH);
    for pair in digits[..pair_digits].chunks_exact(2) {
        lat_place /= ENCODING_BASE;
        lng_place /= ENCODING_BASE;
        lat_val += pair[0] * lat_place;
        lng_val += pair[1] * lng_place;
    }
    for &digit in digits.iter().skip(PAIR_CODE_LENGTH) {
        lat_place /= GRID_ROWS;
        lng_place /= GRID_COLUMNS;
        lat_val += (digit / GRID_COLUMNS) * lat_place;
        lng_val += (digit % GRID_COLUMNS) * lng_place;
    }

    let lat_precision = FINAL_LAT_PRECISION as f64;
    let lng_precision = FINAL_LNG_PRECISION as f64;
    Ok(CodeArea::new(
        lat_val as f64 / lat_precision,
        lng_val as f64 / lng_precision,
        (lat_val + lat_place) as f64 / lat_precision,
        (lng_val + lng_place) as f64 / lng_precision,
        digits.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encode::encode;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-10,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_decode_default_length() -> Result<(), PlusCodeError> {
        let area = decode("8FVC2222+22")?;
        assert_close(area.lat_lo, 47.0);
        assert_close(area.lng_lo, 8.0);
        assert_close(area.lat_hi, 47.000125);
        assert_close(area.lng_hi, 8.000125);
        assert_eq!(area.code_length, 10);
        Ok(())
    }

    #[test]
    fn test_decode_padded() -> Result<(), PlusCodeError> {
        let area = decode("7FG49Q00+")?;
        assert_close(area.lat_lo, 20.35);
        assert_close(area.lng_lo, 2.75);
        assert_close(area.lat_hi, 20.4);
        assert_close(area.lng_hi, 2.8);
        assert_eq!(area.code_length, 6);
        Ok(())
    }

    #[test]
    fn test_decode_grid_digits() -> Result<(), PlusCodeError> {
        let area = decode("7FG49QCJ+2VXGJ")?;
        assert_close(area.lat_lo, 20.370113);
        assert_close(area.lng_lo, 2.782234375);
        assert_close(area.lat_hi, 20.370114);
        assert_close(area.lng_hi, 2.782236328125);
        assert_eq!(area.code_length, 13);
        Ok(())
    }

    #[test]
    fn test_decode_ignores_case() -> Result<(), PlusCodeError> {
        assert_eq!(decode("7fg49qcj+2vxgjx")?, decode("7FG49QCJ+2VXGJX")?);
        Ok(())
    }

    #[test]
    fn test_digits_beyond_fifteen_are_ignored() -> Result<(), PlusCodeError> {
        let fifteen = decode("6GFRP39C+5HG4QWR")?;
        let sixteen = decode("6GFRP39C+5HG4QWRV")?;
        assert_eq!(fifteen, sixteen);
        assert_eq!(sixteen.code_length, 15);
        Ok(())
    }

    #[test]
    fn test_decode_at_the_pole() -> Result<(), PlusCodeError> {
        let area = decode(&encode(90.0, 180.0, 10))?;
        assert!(area.lat_hi <= 90.0);
        assert_close(area.lat_hi, 90.0);
        assert_close(area.lng_lo, -180.0);

        let area = decode(&encode(-90.0, -180.0, 10))?;
        assert_close(area.lat_lo, -90.0);
        assert_close(area.lng_lo, -180.0);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_invalid_codes() {
        assert_eq!(decode("9G8F+6W"), Err(PlusCodeError::NotFull));
        assert!(matches!(
            decode("X2222222+"),
            Err(PlusCodeError::OutOfRange(_))
        ));
        assert_eq!(decode(""), Err(PlusCodeError::EmptyCode));
        assert!(decode("8FWC2_45+G6").is_err_and(|e| e.is_invalid_code()));
    }

    #[test]
    fn test_round_trip_containment() -> Result<(), PlusCodeError> {
        let points = [
            (0.0, 0.0),
            (47.365590, 8.524997),
            (-41.2730625, 174.7859375),
            (89.9999, -179.9999),
            (-89.9999, 179.9999),
            (37.539669125, -122.375069724),
            (-0.28207104, 36.07145996),
        ];
        for (lat, lng) in points {
            for length in 2..=15 {
                let code = encode(lat, lng, length);
                let area = decode(&code)?;
                assert!(
                    area.lat_lo - 1e-10 <= lat && lat <= area.lat_hi + 1e-10,
                    "{code} lat {lat} not in {area:?}"
                );
                assert!(
                    area.lng_lo - 1e-10 <= lng && lng <= area.lng_hi + 1e-10,
                    "{code} lng {lng} not in {area:?}"
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_hierarchical_nesting() -> Result<(), PlusCodeError> {
        let (lat, lng) = (-33.8567844, 151.2152967);
        let lengths = [2, 4, 6, 8, 10, 11, 12, 13, 14, 15];
        for pair in lengths.windows(2) {
            let outer = decode(&encode(lat, lng, pair[0]))?;
            let inner = decode(&encode(lat, lng, pair[1]))?;
            assert!(
                outer.encloses(&inner),
                "length {} does not enclose length {}",
                pair[0],
                pair[1]
            );
        }
        Ok(())
    }
}
