//! Date-parameterized file name classification.
//!
//! Each file type owns a template such as
//! `{date}_RECO_GFOX_LCHC_EOD_PRD_\d{14}.dat`. For a given trade date the
//! placeholder is replaced with the compact date (`20240131`) and the result
//! is compiled as a regex anchored at the start of the name. Matching is
//! evaluated for every type independently so that overlapping patterns are
//! reported instead of resolved by declaration order.

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::file_discovery::errors::{
    DATE_PLACEHOLDER, PatternAmbiguityError, PatternError,
};
use crate::domain::file_discovery::value_objects::{FileType, RemoteFile};

/// Format a trade date the way file names and folders carry it.
#[must_use]
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Result of classifying a single listed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Exactly one type matched.
    Matched(FileType),
    /// No type matched.
    Unmatched,
    /// Several types matched; carries all of them.
    Ambiguous(Vec<FileType>),
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    file_type: FileType,
    source: String,
    regex: Regex,
}

/// Classifies listed names against the pattern table for one trade date.
#[derive(Debug, Clone)]
pub struct FilePatternMatcher {
    patterns: Vec<CompiledPattern>,
}

impl FilePatternMatcher {
    /// Compile the templates for `trade_date`.
    pub fn new<'a, I>(templates: I, trade_date: NaiveDate) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = (FileType, &'a str)>,
    {
        let date = compact_date(trade_date);
        let patterns = templates
            .into_iter()
            .map(|(file_type, template)| compile(file_type, template, &date))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Compiled pattern for a type, after date substitution.
    #[must_use]
    pub fn pattern_for(&self, file_type: FileType) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.file_type == file_type)
            .map(|p| p.source.as_str())
    }

    /// Classify a name against every configured type.
    #[must_use]
    pub fn classify(&self, name: &str) -> Classification {
        let mut matched: Vec<FileType> = self
            .patterns
            .iter()
            .filter(|p| p.regex.is_match(name))
            .map(|p| p.file_type)
            .collect();
        matched.dedup();

        match matched.len() {
            0 => Classification::Unmatched,
            1 => Classification::Matched(matched[0]),
            _ => Classification::Ambiguous(matched),
        }
    }

    /// Match a name, turning an ambiguous classification into an error.
    pub fn match_name(&self, name: &str) -> Result<Option<RemoteFile>, PatternAmbiguityError> {
        match self.classify(name) {
            Classification::Matched(file_type) => Ok(Some(RemoteFile::new(name, file_type))),
            Classification::Unmatched => Ok(None),
            Classification::Ambiguous(types) => Err(PatternAmbiguityError {
                name: name.to_string(),
                types,
            }),
        }
    }
}

fn compile(file_type: FileType, template: &str, date: &str) -> Result<CompiledPattern, PatternError> {
    if !template.contains(DATE_PLACEHOLDER) {
        return Err(PatternError::MissingDatePlaceholder {
            file_type,
            template: template.to_string(),
        });
    }

    let source = template.replace(DATE_PLACEHOLDER, date);
    // Anchored at the start only; trailing text after a match is accepted.
    let regex = Regex::new(&format!("^(?:{source})")).map_err(|e| PatternError::InvalidPattern {
        file_type,
        pattern: source.clone(),
        message: e.to_string(),
    })?;

    Ok(CompiledPattern {
        file_type,
        source,
        regex,
    })
}
