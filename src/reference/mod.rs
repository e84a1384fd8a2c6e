// Operator Reference Lookup
//
// Loads a generated MCC/MNC table and resolves (MCC, MNC) pairs to operator
// names, the way mobile clients consume the table.
//
// Keys are numeric: `001;01` and `1;1` name the same network. Rows whose MNC
// is a wildcard cannot be keyed and are skipped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{IoContext, Result};

/// Result of an operator lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorName {
    /// Neither MCC nor MNC was available
    NoOperator,
    /// The pair is not in the table
    Unknown,
    Known(String),
}

impl fmt::Display for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorName::NoOperator => write!(f, "No operator"),
            OperatorName::Unknown => write!(f, "Unknown operator"),
            OperatorName::Known(name) => write!(f, "{}", name),
        }
    }
}

/// In-memory (MCC, MNC) -> operator table
#[derive(Debug, Default)]
pub struct OperatorTable {
    operators: HashMap<(u16, u16), String>,
    /// Resolved names, so repeated lookups skip the map walk
    cache: RefCell<HashMap<(u16, u16), OperatorName>>,
    skipped: usize,
}

impl OperatorTable {
    /// Load a table written by the generator
    pub fn load(path: &Path, delimiter: char) -> Result<Self> {
        log::info!("Loading operator table {}", path.display());

        let file = File::open(path).context(|| format!("Failed to open {}", path.display()))?;
        let mut table = Self::default();
        for line in BufReader::new(file).lines() {
            let line = line.context(|| format!("Failed to read {}", path.display()))?;
            table.insert_line(&line, delimiter);
        }

        log::info!(
            "Loaded {} operators ({} rows skipped)",
            table.len(),
            table.skipped
        );
        Ok(table)
    }

    /// Parse one table row; unusable rows are counted and skipped
    pub fn insert_line(&mut self, line: &str, delimiter: char) {
        if line.trim().is_empty() {
            return;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() < 4 {
            log::debug!("Skipping short row: {:?}", line);
            self.skipped += 1;
            return;
        }

        let (mcc, mnc) = match (
            fields[0].trim().parse::<u16>(),
            fields[1].trim().parse::<u16>(),
        ) {
            (Ok(mcc), Ok(mnc)) => (mcc, mnc),
            _ => {
                log::debug!("Skipping row without numeric MCC/MNC: {:?}", line);
                self.skipped += 1;
                return;
            }
        };

        // First occurrence wins
        self.operators
            .entry((mcc, mnc))
            .or_insert_with(|| fields[3].to_string());
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Number of rows that could not be keyed
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Resolve an operator name; `None` means the value is unavailable
    pub fn resolve(&self, mcc: Option<u16>, mnc: Option<u16>) -> OperatorName {
        let (mcc, mnc) = match (mcc, mnc) {
            (None, None) => return OperatorName::NoOperator,
            (Some(mcc), Some(mnc)) => (mcc, mnc),
            _ => return OperatorName::Unknown,
        };

        if let Some(hit) = self.cache.borrow().get(&(mcc, mnc)) {
            log::debug!("Operator cache hit for {} {}", mcc, mnc);
            return hit.clone();
        }

        let name = match self.operators.get(&(mcc, mnc)) {
            Some(op) if !op.is_empty() => OperatorName::Known(op.clone()),
            _ => OperatorName::Unknown,
        };
        self.cache.borrow_mut().insert((mcc, mnc), name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn table(rows: &[&str]) -> OperatorTable {
        let mut t = OperatorTable::default();
        for row in rows {
            t.insert_line(row, ';');
        }
        t
    }

    #[test]
    fn test_resolve_known() {
        let t = table(&["001;01;Test;Test Network", "208;01;France;Orange"]);
        assert_eq!(
            t.resolve(Some(208), Some(1)),
            OperatorName::Known("Orange".to_string())
        );
        assert_eq!(t.resolve(Some(1), Some(1)).to_string(), "Test Network");
    }

    #[test]
    fn test_no_operator_and_unknown() {
        let t = table(&["208;01;France;Orange"]);
        assert_eq!(t.resolve(None, None), OperatorName::NoOperator);
        assert_eq!(t.resolve(Some(208), None), OperatorName::Unknown);
        assert_eq!(t.resolve(Some(208), Some(2)), OperatorName::Unknown);
        assert_eq!(OperatorName::NoOperator.to_string(), "No operator");
        assert_eq!(OperatorName::Unknown.to_string(), "Unknown operator");
    }

    #[test]
    fn test_wildcard_and_short_rows_skipped() {
        let t = table(&["901;XX;International;Shared", "208;01", "", "310;260;USA;T-Mobile"]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.skipped(), 2);
    }

    #[test]
    fn test_first_row_wins() {
        let t = table(&["208;01;France;Orange", "208;1;France;Duplicate"]);
        assert_eq!(t.resolve(Some(208), Some(1)).to_string(), "Orange");
    }

    #[test]
    fn test_repeated_lookup_uses_cache() {
        let t = table(&["208;01;France;Orange"]);
        assert_eq!(t.resolve(Some(208), Some(1)).to_string(), "Orange");
        assert_eq!(t.cache.borrow().len(), 1);
        assert_eq!(t.resolve(Some(208), Some(1)).to_string(), "Orange");
        assert_eq!(t.cache.borrow().len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mnc.txt");
        fs::write(
            &path,
            "001;01;Test;Test Network\n262;01;Germany;Telekom\n262;02;Germany;Vodafone\n",
        )
        .unwrap();

        let t = OperatorTable::load(&path, ';').unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.resolve(Some(262), Some(2)).to_string(), "Vodafone");
    }
}
