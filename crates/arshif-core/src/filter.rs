//! Filter engine: narrows the record collection by direction, archive date
//! range, and free-text search.

use chrono::{Local, NaiveDate};

use crate::models::{ArchiveRecord, Direction};

/// Ephemeral filter criteria. All criteria are conjunctive; an unset field
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// `None` means both directions.
    pub direction: Option<Direction>,
    /// Inclusive lower bound on `archiveDate`, as a local calendar date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `archiveDate`, through the end of that local
    /// calendar day.
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive substring matched against title, document number,
    /// archiver name, issuing entity, notes, and extracted text.
    pub search_term: Option<String>,
}

impl FilterSpec {
    /// True when no criterion is set, i.e. `apply` would return everything.
    pub fn is_empty(&self) -> bool {
        self.direction.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self
                .search_term
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
    }

    /// Evaluate this spec against a single record.
    pub fn matches(&self, record: &ArchiveRecord) -> bool {
        if let Some(direction) = self.direction {
            if record.file_type != direction {
                return false;
            }
        }

        // Date bounds compare local calendar dates, which makes `date_to`
        // inclusive through 23:59:59.999 of that day.
        if self.date_from.is_some() || self.date_to.is_some() {
            let archived_on = record.archive_date.with_timezone(&Local).date_naive();
            if let Some(from) = self.date_from {
                if archived_on < from {
                    return false;
                }
            }
            if let Some(to) = self.date_to {
                if archived_on > to {
                    return false;
                }
            }
        }

        if let Some(term) = self.search_term.as_deref() {
            let term = term.trim();
            if !term.is_empty() {
                let needle = term.to_lowercase();
                let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
                let hit = contains(&record.title)
                    || contains(&record.document_number)
                    || contains(&record.archiver_name)
                    || contains(&record.issuing_entity)
                    || contains(&record.notes)
                    || record
                        .extracted_text
                        .as_deref()
                        .is_some_and(|text| contains(text));
                if !hit {
                    return false;
                }
            }
        }

        true
    }
}

/// Return the matching subset, preserving original relative order.
pub fn apply<'a>(records: &'a [ArchiveRecord], spec: &FilterSpec) -> Vec<&'a ArchiveRecord> {
    records.iter().filter(|r| spec.matches(r)).collect()
}
