use crate::core::constants::{
    ENCODING_BASE, LATITUDE_MAX, LONGITUDE_MAX, PADDING_CHARACTER, SEPARATOR, SEPARATOR_POSITION,
    digit_value,
};
use crate::util::error::PlusCodeError;

/// Checks that a string follows the code grammar.
///
/// Accepts full codes (`8FVC9G8F+6W`), padded codes (`8FVC0000+`) and short
/// codes (`9G8F+6W`), in either case.
///
/// # Errors
///
/// Returns the first grammar violation found scanning left to right, or a
/// separator/padding error from the checks made after the scan.
///
/// # Example
/// ```
/// use pluscodes_rs::{check, PlusCodeError};
///
/// assert!(check("8FVC9G8F+6W").is_ok());
/// assert_eq!(check(""), Err(PlusCodeError::EmptyCode));
/// ```
pub fn check(code: &str) -> Result<(), PlusCodeError> {
    if code.is_empty() || code.len() == 1 && code.starts_with(SEPARATOR) {
        return Err(PlusCodeError::EmptyCode);
    }
    let n = code.len();
    let mut first_sep: Option<usize> = None;
    let mut first_pad: Option<usize> = None;

    for (i, c) in code.char_indices() {
        if first_pad.is_some() {
            // Only more padding, or a final separator, may follow padding.
            match c {
                PADDING_CHARACTER => continue,
                SEPARATOR => {
                    place_separator(&mut first_sep, i)?;
                    if i == n - 1 {
                        continue;
                    }
                }
                _ => {}
            }
            return Err(PlusCodeError::MisplacedPadding(format!(
                "{c:?} after padding at position {i}"
            )));
        }

        if c.is_ascii() && digit_value(c as u8).is_some() {
            continue;
        }
        match c {
            SEPARATOR => place_separator(&mut first_sep, i)?,
            PADDING_CHARACTER => {
                if i == 0 {
                    return Err(PlusCodeError::MisplacedPadding(
                        "code cannot start with padding".to_string(),
                    ));
                }
                first_pad = Some(i);
            }
            _ => {
                return Err(PlusCodeError::InvalidCharacter {
                    character: c,
                    position: i,
                });
            }
        }
    }

    let sep = first_sep
        .ok_or_else(|| PlusCodeError::MisplacedSeparator("missing separator".to_string()))?;
    if n - sep - 1 == 1 {
        return Err(PlusCodeError::MisplacedSeparator(
            "lone digit after separator".to_string(),
        ));
    }
    if let Some(pad) = first_pad {
        if pad > sep || sep != n - 1 {
            return Err(PlusCodeError::MisplacedPadding(
                "padding must end at the separator".to_string(),
            ));
        }
        if sep < SEPARATOR_POSITION {
            return Err(PlusCodeError::MisplacedPadding(
                "short codes cannot have padding".to_string(),
            ));
        }
        if pad % 2 == 1 {
            return Err(PlusCodeError::MisplacedPadding(
                "odd number of padding characters".to_string(),
            ));
        }
    }
    Ok(())
}

fn place_separator(first_sep: &mut Option<usize>, i: usize) -> Result<(), PlusCodeError> {
    if first_sep.is_some() {
        return Err(PlusCodeError::MisplacedSeparator(format!(
            "extra separator at position {i}"
        )));
    }
    if i > SEPARATOR_POSITION || i % 2 == 1 {
        return Err(PlusCodeError::MisplacedSeparator(format!(
            "separator in illegal position {i}"
        )));
    }
    *first_sep = Some(i);
    Ok(())
}

/// Checks that a string is a valid short code, with fewer than eight digits
/// before the separator.
///
/// # Errors
///
/// Returns the grammar error from [`check`], or [`PlusCodeError::NotShort`]
/// for a valid code whose separator is at position eight.
pub fn check_short(code: &str) -> Result<(), PlusCodeError> {
    check(code)?;
    match code.find(SEPARATOR) {
        Some(i) if i < SEPARATOR_POSITION => Ok(()),
        _ => Err(PlusCodeError::NotShort),
    }
}

/// Checks that a string is a valid full code whose leading digits lie on the globe.
///
/// # Errors
///
/// Returns the grammar error from [`check`], [`PlusCodeError::NotFull`] for a
/// short code, or [`PlusCodeError::OutOfRange`] when the first digit encodes a
/// latitude of 90 or more, or the second a longitude of 180 or more.
pub fn check_full(code: &str) -> Result<(), PlusCodeError> {
    match check_short(code) {
        Ok(()) => return Err(PlusCodeError::NotFull),
        Err(PlusCodeError::NotShort) => {}
        Err(e) => return Err(e),
    }
    let bytes = code.as_bytes();
    if let Some(first_lat) = digit_value(bytes[0]) {
        if first_lat as i64 * ENCODING_BASE >= 2 * LATITUDE_MAX as i64 {
            return Err(PlusCodeError::OutOfRange("latitude".to_string()));
        }
    }
    if let Some(first_lng) = bytes.get(1).and_then(|&b| digit_value(b)) {
        if first_lng as i64 * ENCODING_BASE >= 2 * LONGITUDE_MAX as i64 {
            return Err(PlusCodeError::OutOfRange("longitude".to_string()));
        }
    }
    Ok(())
}

/// Returns `true` if the code follows the code grammar.
pub fn is_valid(code: &str) -> bool {
    check(code).is_ok()
}

/// Returns `true` if the code is a valid short code.
pub fn is_short(code: &str) -> bool {
    check_short(code).is_ok()
}

/// Returns `true` if the code is a valid full code.
pub fn is_full(code: &str) -> bool {
    check_full(code).is_ok()
}

/// Returns `true` if the code is valid and contains padding.
pub fn is_padded(code: &str) -> bool {
    is_valid(code) && code.contains(PADDING_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_codes() {
        for code in ["8FWC2345+G6", "8FWC2345+G6G", "8fwc2345+", "8FWCX400+", "2345+G6", "+G6"] {
            assert!(check(code).is_ok(), "{code}");
        }
    }

    #[test]
    fn test_empty_code() {
        assert_eq!(check(""), Err(PlusCodeError::EmptyCode));
        assert_eq!(check("+"), Err(PlusCodeError::EmptyCode));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            check("8FWC2_45+G6"),
            Err(PlusCodeError::InvalidCharacter {
                character: '_',
                position: 5
            })
        );
        assert!(matches!(
            check("8FWC2η45+G6"),
            Err(PlusCodeError::InvalidCharacter { character: 'η', .. })
        ));
        assert!(matches!(
            check("8FWCA345+G6"),
            Err(PlusCodeError::InvalidCharacter { character: 'A', .. })
        ));
    }

    #[test]
    fn test_misplaced_separator() {
        for code in ["8FWC2345G6+", "8FWC2345+G6+", "8FW+C2345", "8FWC2345", "8FWC2345+G", "G+"] {
            assert!(
                matches!(check(code), Err(PlusCodeError::MisplacedSeparator(_))),
                "{code}"
            );
        }
    }

    #[test]
    fn test_misplaced_padding() {
        for code in ["0FVC2222+", "8FWC2300+G6", "WC2300+", "8F00+", "8FV00000+", "8F0+"] {
            let err = check(code).unwrap_err();
            assert!(
                matches!(
                    err,
                    PlusCodeError::MisplacedPadding(_) | PlusCodeError::MisplacedSeparator(_)
                ),
                "{code}: {err}"
            );
        }
        assert!(matches!(
            check("8FWC2300+G6"),
            Err(PlusCodeError::MisplacedPadding(_))
        ));
        assert!(matches!(
            check("8FV00000+"),
            Err(PlusCodeError::MisplacedPadding(_))
        ));
    }

    #[test]
    fn test_padding_after_separator() {
        for code in ["8FVC2222+2220", "8FVC2222+22200", "8FVC2222+22G00", "8FVC2222+00"] {
            assert!(
                matches!(check(code), Err(PlusCodeError::MisplacedPadding(_))),
                "{code}"
            );
            assert!(!is_full(code), "{code}");
        }
    }

    #[test]
    fn test_padding_must_end_at_separator_position() {
        assert!(check("8F000000+").is_ok());
        assert!(check("8F0000000+").is_err());
        assert!(check("8F00000+").is_err());
    }

    #[test]
    fn test_check_short() {
        assert!(check_short("9G8F+6W").is_ok());
        assert!(check_short("+2VX").is_ok());
        assert_eq!(check_short("8FVC9G8F+6W"), Err(PlusCodeError::NotShort));
        assert_eq!(check_short(""), Err(PlusCodeError::EmptyCode));
    }

    #[test]
    fn test_check_full() {
        assert!(check_full("8FVC9G8F+6W").is_ok());
        assert!(check_full("CFX22222+").is_ok());
        assert_eq!(check_full("9G8F+6W"), Err(PlusCodeError::NotFull));
        assert_eq!(
            check_full("X2222222+"),
            Err(PlusCodeError::OutOfRange("latitude".to_string()))
        );
        assert_eq!(
            check_full("FFVC2222+"),
            Err(PlusCodeError::OutOfRange("latitude".to_string()))
        );
        assert_eq!(
            check_full("CWVC2222+"),
            Err(PlusCodeError::OutOfRange("longitude".to_string()))
        );
        assert!(check_full("CVVC2222+").is_ok());
    }

    #[test]
    fn test_case_does_not_affect_acceptance() {
        for code in ["8FWC2345+G6", "WC2345+G6G", "8FWCX400+", "8FWC2_45+G6"] {
            let lower = code.to_lowercase();
            assert_eq!(is_valid(code), is_valid(&lower), "{code}");
            assert_eq!(is_short(code), is_short(&lower), "{code}");
            assert_eq!(is_full(code), is_full(&lower), "{code}");
        }
    }

    #[test]
    fn test_is_padded() {
        assert!(is_padded("8FWC0000+"));
        assert!(!is_padded("8FWC2345+G6"));
        assert!(!is_padded("8FWC00+"));
    }
}
