//! Scanner registry.

use std::str::FromStr;

use crate::domain::models::{Config, ScannerKind};
use crate::domain::ports::Scanner;

use super::missing_docs::MissingDocsScanner;
use super::missing_tests::MissingTestsScanner;
use super::todo_hunter::TodoHunterScanner;

/// Which detectors a scan runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScannerFilter {
    #[default]
    All,
    Only(ScannerKind),
}

impl FromStr for ScannerFilter {
    type Err = String;

    /// `all` or one detector tag. `boss` is not a detector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        ScannerKind::from_str(s)
            .filter(ScannerKind::is_detector)
            .map(Self::Only)
            .ok_or_else(|| {
                format!("Invalid scanner: {s}. Must be one of: all, missing-docs, todo-hunter, missing-tests")
            })
    }
}

/// The closed set of detectors, in the order a full scan runs them.
pub struct ScannerRegistry {
    scanners: Vec<Box<dyn Scanner>>,
}

impl ScannerRegistry {
    pub fn new(config: &Config) -> Self {
        let excluded = &config.scan.excluded_dirs;
        let window = config.verification;
        Self {
            scanners: vec![
                Box::new(MissingDocsScanner::new(excluded.clone(), window)),
                Box::new(TodoHunterScanner::new(excluded.clone(), window)),
                Box::new(MissingTestsScanner::new(excluded.clone())),
            ],
        }
    }

    /// Detector for `kind`; `None` for boss and unknown tags.
    pub fn get(&self, kind: ScannerKind) -> Option<&dyn Scanner> {
        self.scanners
            .iter()
            .find(|s| s.kind() == kind)
            .map(|s| &**s)
    }

    pub fn select(&self, filter: ScannerFilter) -> Vec<&dyn Scanner> {
        self.scanners
            .iter()
            .filter(|s| match filter {
                ScannerFilter::All => true,
                ScannerFilter::Only(kind) => s.kind() == kind,
            })
            .map(|s| &**s)
            .collect()
    }
}

impl Default for ScannerRegistry {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
