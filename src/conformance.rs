//! Fixture-driven conformance checks.
//!
//! Each fixture is a headerless CSV file with `#` comment lines. The four
//! fixture kinds are shared with other plus code implementations, so a
//! directory of them can be verified as a whole with [`verify_dir`].

use crate::core::decode::decode;
use crate::core::encode::encode;
use crate::core::shorten::{recover_nearest, shorten};
use crate::core::validate::{is_full, is_short, is_valid};
use crate::util::error::PlusCodeError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Bounds from a decoding fixture must match to this many degrees.
pub const DECODE_TOLERANCE: f64 = 1e-10;

/// A single fixture row that knows how to check itself.
pub trait ConformanceCase: DeserializeOwned + fmt::Debug {
    /// File name of the fixture inside a fixture directory.
    const FILE_NAME: &'static str;

    /// Runs the case, returning [`PlusCodeError::ConformanceMismatch`] on a wrong result.
    fn verify(&self) -> Result<(), PlusCodeError>;
}

/// `code,isValid,isShort,isFull`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidityCase {
    pub code: String,
    pub is_valid: bool,
    pub is_short: bool,
    pub is_full: bool,
}

/// `latitude,longitude,length,expected code`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EncodingCase {
    pub latitude: f64,
    pub longitude: f64,
    pub length: i32,
    pub expected: String,
}

/// `code,length,latLo,lngLo,latHi,lngHi`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecodingCase {
    pub code: String,
    pub length: usize,
    pub lat_lo: f64,
    pub lng_lo: f64,
    pub lat_hi: f64,
    pub lng_hi: f64,
}

/// Which direction a short code case exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TestType {
    #[serde(rename = "S")]
    Shorten,
    #[serde(rename = "R")]
    Recover,
    #[serde(rename = "B")]
    Both,
}

/// `full code,lat,lng,shortcode,test_type`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShortCodeCase {
    pub full_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub short_code: String,
    pub test_type: TestType,
}

fn mismatch(case: &impl fmt::Debug, detail: String) -> PlusCodeError {
    PlusCodeError::ConformanceMismatch(format!("{case:?}: {detail}"))
}

impl ConformanceCase for ValidityCase {
    const FILE_NAME: &'static str = "validityTests.csv";

    fn verify(&self) -> Result<(), PlusCodeError> {
        let actual = (
            is_valid(&self.code),
            is_short(&self.code),
            is_full(&self.code),
        );
        let expected = (self.is_valid, self.is_short, self.is_full);
        if actual != expected {
            return Err(mismatch(
                self,
                format!("(valid, short, full) was {actual:?}"),
            ));
        }
        Ok(())
    }
}

impl ConformanceCase for EncodingCase {
    const FILE_NAME: &'static str = "encoding.csv";

    fn verify(&self) -> Result<(), PlusCodeError> {
        let code = encode(self.latitude, self.longitude, self.length);
        if code != self.expected {
            return Err(mismatch(self, format!("encoded as {code}")));
        }
        Ok(())
    }
}

impl ConformanceCase for DecodingCase {
    const FILE_NAME: &'static str = "decoding.csv";

    fn verify(&self) -> Result<(), PlusCodeError> {
        let area = decode(&self.code).map_err(|e| mismatch(self, e.to_string()))?;
        let bounds_match = [
            (area.lat_lo, self.lat_lo),
            (area.lng_lo, self.lng_lo),
            (area.lat_hi, self.lat_hi),
            (area.lng_hi, self.lng_hi),
        ]
        .iter()
        .all(|(actual, expected)| (actual - expected).abs() < DECODE_TOLERANCE);
        if area.code_length != self.length || !bounds_match {
            return Err(mismatch(self, format!("decoded as {area:?}")));
        }
        Ok(())
    }
}

impl ConformanceCase for ShortCodeCase {
    const FILE_NAME: &'static str = "shortCodeTests.csv";

    fn verify(&self) -> Result<(), PlusCodeError> {
        if matches!(self.test_type, TestType::Shorten | TestType::Both) {
            let short = shorten(&self.full_code, self.latitude, self.longitude)
                .map_err(|e| mismatch(self, e.to_string()))?;
            if short != self.short_code {
                return Err(mismatch(self, format!("shortened to {short}")));
            }
        }
        if matches!(self.test_type, TestType::Recover | TestType::Both) {
            let full = recover_nearest(&self.short_code, self.latitude, self.longitude)
                .map_err(|e| mismatch(self, e.to_string()))?;
            if full != self.full_code.to_ascii_uppercase() {
                return Err(mismatch(self, format!("recovered as {full}")));
            }
        }
        Ok(())
    }
}

/// Reads every case from a fixture file.
pub fn read_cases<C: ConformanceCase>(path: impl AsRef<Path>) -> Result<Vec<C>, PlusCodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut cases = Vec::new();
    for record in reader.deserialize() {
        cases.push(record?);
    }
    Ok(cases)
}

/// Outcome of running one fixture file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConformanceSummary {
    pub fixture: String,
    pub passed: usize,
    pub failures: Vec<String>,
}

impl ConformanceSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for ConformanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{} passed", self.fixture, self.passed, self.total())
    }
}

/// Runs every case in a fixture file and collects the failures.
///
/// # Errors
///
/// Only fails if the file cannot be read or parsed; failing cases are
/// reported in the summary.
pub fn verify_file<C: ConformanceCase>(
    path: impl AsRef<Path>,
) -> Result<ConformanceSummary, PlusCodeError> {
    let path = path.as_ref();
    let cases: Vec<C> = read_cases(path)?;
    let mut summary = ConformanceSummary {
        fixture: path.display().to_string(),
        ..Default::default()
    };
    for case in &cases {
        match case.verify() {
            Ok(()) => summary.passed += 1,
            Err(e) => {
                warn!(fixture = %summary.fixture, error = %e, "Conformance case failed");
                summary.failures.push(e.to_string());
            }
        }
    }
    debug!(fixture = %summary.fixture, passed = summary.passed, total = summary.total(), "Verified fixture");
    Ok(summary)
}

/// Verifies the four standard fixtures found in `dir`.
pub fn verify_dir(dir: impl AsRef<Path>) -> Result<Vec<ConformanceSummary>, PlusCodeError> {
    let dir = dir.as_ref();
    Ok(vec![
        verify_file::<ValidityCase>(dir.join(ValidityCase::FILE_NAME))?,
        verify_file::<EncodingCase>(dir.join(EncodingCase::FILE_NAME))?,
        verify_file::<DecodingCase>(dir.join(DecodingCase::FILE_NAME))?,
        verify_file::<ShortCodeCase>(dir.join(ShortCodeCase::FILE_NAME))?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_cases_skips_comments() -> Result<(), PlusCodeError> {
        let dir = tempdir()?;
        let path = dir.path().join(ShortCodeCase::FILE_NAME);
        fs::write(
            &path,
            "# Format:\n#   full code,lat,lng,shortcode,test_type\n9C3W9QCJ+2VX,51.3701125,-1.217765,+2VX,B\n",
        )?;

        let cases: Vec<ShortCodeCase> = read_cases(&path)?;
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].test_type, TestType::Both);
        assert_eq!(cases[0].short_code, "+2VX");
        Ok(())
    }

    #[test]
    fn test_empty_code_row() -> Result<(), PlusCodeError> {
        let dir = tempdir()?;
        let path = dir.path().join(ValidityCase::FILE_NAME);
        fs::write(&path, ",false,false,false\n8FWC2345+G6,true,false,true\n")?;

        let cases: Vec<ValidityCase> = read_cases(&path)?;
        assert_eq!(cases[0].code, "");
        for case in &cases {
            case.verify()?;
        }
        Ok(())
    }

    #[test]
    fn test_mismatch_is_reported() {
        let case = EncodingCase {
            latitude: 47.0000625,
            longitude: 8.0000625,
            length: 10,
            expected: "8FVC2GGG+GG".to_string(),
        };
        let err = case.verify().unwrap_err();
        assert!(matches!(err, PlusCodeError::ConformanceMismatch(_)));
        assert!(err.to_string().contains("8FVC2222+22"));
    }

    #[test]
    fn test_decoding_case_checks_length() {
        let case = DecodingCase {
            code: "8FVC2222+22".to_string(),
            length: 11,
            lat_lo: 47.0,
            lng_lo: 8.0,
            lat_hi: 47.000125,
            lng_hi: 8.000125,
        };
        assert!(case.verify().is_err());
        assert!(DecodingCase { length: 10, ..case }.verify().is_ok());
    }

    #[test]
    fn test_verify_file_counts_failures() -> Result<(), PlusCodeError> {
        let dir = tempdir()?;
        let path = dir.path().join(EncodingCase::FILE_NAME);
        fs::write(&path, "47.0000625,8.0000625,10,8FVC2222+22\n20.375,2.775,6,7FG49Q22+\n")?;

        let summary = verify_file::<EncodingCase>(&path)?;
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failures.len(), 1);
        assert!(!summary.is_success());
        assert!(summary.to_string().ends_with("1/2 passed"));
        Ok(())
    }

    #[test]
    fn test_missing_fixture_is_an_error() -> Result<(), PlusCodeError> {
        let dir = tempdir()?;
        assert!(verify_dir(dir.path()).is_err());
        Ok(())
    }
}
