use serde::Serialize;

use crate::error::{MccMncError, Result};

/// One row of the E.212 table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Mobile Country Code as printed (leading zeros kept)
    pub mcc: String,
    /// Mobile Network Code, digits or a wildcard
    pub mnc: String,
    pub country: String,
    pub operator: String,
}

impl Assignment {
    pub fn new(mcc: &str, mnc: &str, country: &str, operator: &str) -> Self {
        Self {
            mcc: mcc.to_string(),
            mnc: mnc.to_string(),
            country: country.to_string(),
            operator: operator.to_string(),
        }
    }

    /// Build a record from a raw code line such as `208 01`
    pub fn from_code_line(code: &str, country: &str, operator: &str) -> Result<Self> {
        let (mcc, mnc) = split_code(code)?;
        Ok(Self::new(mcc, mnc, country, operator))
    }

    /// Numeric sort key (the MCC as an integer)
    pub fn sort_key(&self) -> Result<u32> {
        self.mcc
            .parse::<u32>()
            .map_err(|e| MccMncError::MalformedCode {
                code: format!("{} {}", self.mcc, self.mnc),
                reason: format!("MCC '{}' is not an integer ({})", self.mcc, e),
            })
    }

    /// Render the record as one output line, without the newline
    pub fn to_line(&self, delimiter: char) -> String {
        let sep = delimiter.to_string();
        [
            self.mcc.as_str(),
            self.mnc.as_str(),
            self.country.as_str(),
            self.operator.as_str(),
        ]
        .join(&sep)
    }
}

/// Split a code line into its MCC and MNC parts
///
/// The document separates the two with whitespace; anything other than
/// exactly two parts is rejected.
pub fn split_code(code: &str) -> Result<(&str, &str)> {
    let mut parts = code.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(mcc), Some(mnc), None) => Ok((mcc, mnc)),
        _ => Err(MccMncError::MalformedCode {
            code: code.to_string(),
            reason: "expected '<MCC> <MNC>'".to_string(),
        }),
    }
}
