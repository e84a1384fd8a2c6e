// =============================================================================
// E.212 Listing Parser - Line State Machine
// =============================================================================
//
// The flattened document has three regions. The main listing and the
// international listing both open with the same heading and close with a
// horizontal rule made of underscores:
//
// ```text
// Region:     NotStarted -> MainActive -> MainDone -> IntlActive -> Done
// Trigger:          heading        rule       heading        rule
// ```
//
// Inside the main listing, entries are positional:
//
// ```text
// Albania              <- country
// Vodafone Albania     <- operator
// 276 02               <- code (MCC MNC)
//                      <- blank: next operator of the same country
// Eagle Mobile
// 276 03
// Algeria              <- after a complete triplet: a new country
// ...
// ```
//
// The international listing is a plain alternation of operator and code
// lines, all filed under a fixed country label.

use std::io::BufRead;

use super::record::Assignment;
use crate::config::PipelineConfig;
use crate::error::{IoContext, Result};

/// Region of the document the parser is currently in
///
/// Discriminants follow the numbering of the region diagram above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Front matter, before the first heading
    NotStarted = 0,
    /// Inside the main country/operator listing
    MainActive = 1,
    /// Between the main listing and the international listing
    MainDone = 2,
    /// Inside the international operator listing
    IntlActive = 3,
    /// Past the international listing; the rest is ignored
    Done = 4,
}

impl Region {
    /// The next region in document order
    pub fn advance(self) -> Self {
        match self {
            Region::NotStarted => Region::MainActive,
            Region::MainActive => Region::MainDone,
            Region::MainDone => Region::IntlActive,
            Region::IntlActive | Region::Done => Region::Done,
        }
    }

    /// Regions that end on a heading line
    fn awaits_heading(self) -> bool {
        matches!(self, Region::NotStarted | Region::MainDone)
    }

    /// Regions that end on a rule line
    fn awaits_rule(self) -> bool {
        matches!(self, Region::MainActive | Region::IntlActive)
    }
}

/// Positional accumulator for the entry being read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    pub country: Option<String>,
    pub operator: Option<String>,
    /// Raw code line, e.g. `276 02`
    pub code: Option<String>,
}

impl Slots {
    /// Forget the operator/code pair, keeping the country
    fn clear_pair(&mut self) {
        self.operator = None;
        self.code = None;
    }
}

/// Records collected from one document
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<Assignment>,
    pub main_records: usize,
    pub international_records: usize,
    pub lines_read: usize,
}

/// Line-driven extractor for the E.212 listing
#[derive(Debug)]
pub struct Extractor {
    header_marker: String,
    rule_prefix: String,
    international_label: String,
    region: Region,
    slots: Slots,
    out: Extraction,
}

impl Extractor {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            header_marker: config.header_marker.clone(),
            rule_prefix: config.rule_prefix.clone(),
            international_label: config.international_label.clone(),
            region: Region::NotStarted,
            slots: Slots::default(),
            out: Extraction::default(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Feed one line of flattened text
    pub fn feed(&mut self, raw: &str) -> Result<()> {
        self.out.lines_read += 1;
        let line = raw.trim();

        if self.region.awaits_heading() && line.starts_with(self.header_marker.as_str()) {
            self.enter(self.region.advance());
        } else if self.region.awaits_rule() && line.starts_with(self.rule_prefix.as_str()) {
            self.enter(self.region.advance());
            if self.region == Region::MainDone {
                self.slots.clear_pair();
            }
        } else {
            match self.region {
                Region::MainActive => self.feed_main(line)?,
                Region::IntlActive => self.feed_international(line)?,
                Region::NotStarted | Region::MainDone | Region::Done => {}
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Extraction {
        if self.region != Region::Done {
            log::warn!("Document ended in region {:?}", self.region);
        }
        self.out
    }

    fn enter(&mut self, next: Region) {
        log::debug!(
            "Region {:?} -> {:?} at line {}",
            self.region,
            next,
            self.out.lines_read
        );
        self.region = next;
    }

    fn feed_main(&mut self, line: &str) -> Result<()> {
        let slots = &mut self.slots;
        let blank = line.is_empty();

        if slots.country.is_none() && !blank {
            slots.country = Some(line.to_string());
        } else if slots.operator.is_none() && !blank {
            slots.operator = Some(line.to_string());
        } else if slots.code.is_none() && !blank {
            slots.code = Some(line.to_string());
        } else if blank {
            slots.clear_pair();
        } else {
            // A fourth non-blank line: a new country starts here
            slots.country = Some(line.to_string());
            slots.clear_pair();
        }

        // Emission leaves the slots as they are; the next blank or country
        // line resets them.
        if let (Some(operator), Some(code)) = (&slots.operator, &slots.code) {
            let country = slots.country.as_deref().unwrap_or_default();
            let record = Assignment::from_code_line(code, country, operator)?;
            self.out.records.push(record);
            self.out.main_records += 1;
        }
        Ok(())
    }

    fn feed_international(&mut self, line: &str) -> Result<()> {
        match self.slots.operator.take() {
            // A blank line cannot name an operator
            None if line.is_empty() => {}
            None => self.slots.operator = Some(line.to_string()),
            Some(operator) => {
                let record =
                    Assignment::from_code_line(line, &self.international_label, &operator)?;
                self.out.records.push(record);
                self.out.international_records += 1;
                self.slots.code = None;
            }
        }
        Ok(())
    }
}

/// Run the extractor over every line of `reader`
///
/// The stream is always read to the end, even once the international listing
/// is closed.
pub fn extract_records<R: BufRead>(reader: R, config: &PipelineConfig) -> Result<Extraction> {
    let mut extractor = Extractor::new(config);
    for line in reader.lines() {
        let line = line.context(|| "Failed to read flattened text".to_string())?;
        extractor.feed(&line)?;
    }

    let out = extractor.finish();
    log::info!(
        "Read {} lines: {} main records, {} international records",
        out.lines_read,
        out.main_records,
        out.international_records
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MccMncError;

    const RULE: &str = "________________________________";

    fn extract(text: &str) -> Extraction {
        extract_records(text.as_bytes(), &PipelineConfig::default()).unwrap()
    }

    fn lines(records: &[Assignment]) -> Vec<String> {
        records.iter().map(|r| r.to_line(';')).collect()
    }

    #[test]
    fn test_region_advance() {
        assert_eq!(Region::NotStarted.advance(), Region::MainActive);
        assert_eq!(Region::MainActive.advance(), Region::MainDone);
        assert_eq!(Region::MainDone.advance(), Region::IntlActive);
        assert_eq!(Region::IntlActive.advance(), Region::Done);
        assert_eq!(Region::Done.advance(), Region::Done);
    }

    #[test]
    fn test_single_operator() {
        let text = format!(
            "Annex to ITU Operational Bulletin\nMCC + MNC codes *\nFrance\nOrange\n123 45\n{RULE}\n"
        );
        let out = extract(&text);
        assert_eq!(lines(&out.records), vec!["123;45;France;Orange"]);
        assert_eq!(out.main_records, 1);
    }

    #[test]
    fn test_front_matter_ignored() {
        let text = format!("France\nOrange\n208 01\nMCC + MNC codes *\nSpain\nMovistar\n214 07\n{RULE}\n");
        let out = extract(&text);
        assert_eq!(lines(&out.records), vec!["214;07;Spain;Movistar"]);
    }

    #[test]
    fn test_blank_line_keeps_country() {
        let text = format!(
            "MCC + MNC codes *\nFrance\nOrange\n208 01\n\nSFR\n208 10\n{RULE}\n"
        );
        let out = extract(&text);
        assert_eq!(
            lines(&out.records),
            vec!["208;01;France;Orange", "208;10;France;SFR"]
        );
    }

    #[test]
    fn test_new_country_after_complete_entry() {
        let text = format!(
            "MCC + MNC codes *\nAlbania\nVodafone\n276 02\nAlgeria\nDjezzy\n603 02\n{RULE}\n"
        );
        let out = extract(&text);
        assert_eq!(
            lines(&out.records),
            vec!["276;02;Albania;Vodafone", "603;02;Algeria;Djezzy"]
        );
    }

    #[test]
    fn test_second_code_line_read_as_country() {
        // Without a blank separator a second code line starts a "country"
        let text = format!("MCC + MNC codes *\nFrance\nOrange\n208 01\n208 02\nBouygues\n{RULE}\n");
        let out = extract(&text);
        assert_eq!(lines(&out.records), vec!["208;01;France;Orange"]);
    }

    #[test]
    fn test_international_listing() {
        let text = format!(
            "MCC + MNC codes *\nFrance\nOrange\n208 01\n{RULE}\nNotes\nMCC + MNC codes *\noperator\n12 34\nGlobalstar\n901 05\n{RULE}\n"
        );
        let out = extract(&text);
        assert_eq!(
            lines(&out.records),
            vec![
                "208;01;France;Orange",
                "12;34;International;operator",
                "901;05;International;Globalstar",
            ]
        );
        assert_eq!(out.main_records, 1);
        assert_eq!(out.international_records, 2);
    }

    #[test]
    fn test_rule_clears_pending_operator() {
        // The dangling "Orange" must not pair with the first international line
        let text = format!(
            "MCC + MNC codes *\nFrance\nOrange\n{RULE}\nMCC + MNC codes *\nIridium\n901 03\n{RULE}\n"
        );
        let out = extract(&text);
        assert_eq!(lines(&out.records), vec!["901;03;International;Iridium"]);
    }

    #[test]
    fn test_lines_after_done_ignored() {
        let text = format!(
            "MCC + MNC codes *\n{RULE}\nMCC + MNC codes *\nInmarsat\n901 11\n{RULE}\nMCC + MNC codes *\nLate\n999 99\n"
        );
        let out = extract(&text);
        assert_eq!(lines(&out.records), vec!["901;11;International;Inmarsat"]);
        assert_eq!(out.lines_read, 9);
    }

    #[test]
    fn test_heading_with_footnote_suffix() {
        let text = format!("  MCC + MNC codes *)  \nPeru\nClaro\n716 10\n{RULE}\n");
        let out = extract(&text);
        assert_eq!(lines(&out.records), vec!["716;10;Peru;Claro"]);
    }

    #[test]
    fn test_extractor_state() {
        let config = PipelineConfig::default();
        let mut extractor = Extractor::new(&config);
        extractor.feed("MCC + MNC codes *").unwrap();
        assert_eq!(extractor.region(), Region::MainActive);

        extractor.feed("France").unwrap();
        extractor.feed("Orange").unwrap();
        assert_eq!(extractor.slots().operator.as_deref(), Some("Orange"));

        extractor.feed(RULE).unwrap();
        assert_eq!(extractor.region(), Region::MainDone);
        assert_eq!(extractor.slots().operator, None);
        assert_eq!(extractor.slots().country.as_deref(), Some("France"));
    }

    #[test]
    fn test_blank_before_operator_ignored_in_international_listing() {
        let text = format!("MCC + MNC codes *\n{RULE}\nMCC + MNC codes *\n\nIridium\n901 03\n{RULE}\n");
        let out = extract(&text);
        assert_eq!(lines(&out.records), vec!["901;03;International;Iridium"]);
    }

    #[test]
    fn test_blank_code_line_in_international_listing_is_fatal() {
        let text = format!("MCC + MNC codes *\n{RULE}\nMCC + MNC codes *\nIridium\n\n901 03\n{RULE}\n");
        let err = extract_records(text.as_bytes(), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, MccMncError::MalformedCode { .. }));
    }

    #[test]
    fn test_malformed_code_line_is_fatal() {
        let text = "MCC + MNC codes *\nFrance\nOrange\n208\n";
        let err = extract_records(text.as_bytes(), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, MccMncError::MalformedCode { .. }));
    }
}
