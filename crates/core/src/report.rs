//! Audit result records handed to the presentation layer.
//!
//! Records are fully populated before they leave the auditor and never
//! mutated afterward.

use crate::index::{Classification, IndexDescriptor};
use serde::{Deserialize, Serialize};

/// One descriptor paired with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedIndex {
    pub descriptor: IndexDescriptor,
    pub classification: Classification,
}

/// A drop attempt that failed, recorded for operator follow-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropError {
    pub index_name: String,
    pub message: String,
}

/// Terminal state of one collection's remediation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemediationOutcome {
    /// No disallowed indexes were present
    NotNeeded,
    /// Every disallowed index was dropped
    Remediated,
    /// At least one drop failed; the failures are in `drop_errors`
    Partial,
}

/// Complete audit result for one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionAuditRecord {
    pub collection_name: String,

    /// Every index with its classification, in store order
    pub indexes: Vec<ClassifiedIndex>,

    /// Names successfully dropped, in drop order; never contains `_id_`
    pub dropped_names: Vec<String>,

    /// Drop attempts that failed, in attempt order
    pub drop_errors: Vec<DropError>,

    /// Set when the collection's indexes could not be listed at all
    pub note: Option<String>,
}

impl CollectionAuditRecord {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            indexes: Vec::new(),
            dropped_names: Vec::new(),
            drop_errors: Vec::new(),
            note: None,
        }
    }

    /// Record for a collection whose index listing failed; audited as empty
    /// with an explanatory note, per the recover-and-continue policy
    pub fn listing_failed(collection_name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut record = Self::new(collection_name);
        record.note = Some(message.into());
        record
    }

    pub fn outcome(&self) -> RemediationOutcome {
        if !self.drop_errors.is_empty() {
            RemediationOutcome::Partial
        } else if self.dropped_names.is_empty() {
            RemediationOutcome::NotNeeded
        } else {
            RemediationOutcome::Remediated
        }
    }

    /// Count of indexes classified as disallowed (including `_id_`, were it
    /// ever to classify that way)
    pub fn disallowed_count(&self) -> usize {
        self.indexes
            .iter()
            .filter(|entry| entry.classification.is_disallowed())
            .count()
    }
}

/// Aggregate result of one full audit-and-remediate pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub collections: Vec<CollectionAuditRecord>,
}

impl AuditReport {
    pub fn total_dropped(&self) -> usize {
        self.collections
            .iter()
            .map(|record| record.dropped_names.len())
            .sum()
    }

    pub fn total_drop_errors(&self) -> usize {
        self.collections
            .iter()
            .map(|record| record.drop_errors.len())
            .sum()
    }

    pub fn total_listing_failures(&self) -> usize {
        self.collections
            .iter()
            .filter(|record| record.note.is_some())
            .count()
    }

    /// True when every collection finished without drop or listing failures
    pub fn is_clean(&self) -> bool {
        self.total_drop_errors() == 0 && self.total_listing_failures() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outcome_not_needed() {
        let record = CollectionAuditRecord::new("logs");
        assert_eq!(record.outcome(), RemediationOutcome::NotNeeded);
    }

    #[test]
    fn test_outcome_remediated() {
        let mut record = CollectionAuditRecord::new("users");
        record.dropped_names.push("name_text".to_string());
        assert_eq!(record.outcome(), RemediationOutcome::Remediated);
    }

    #[test]
    fn test_outcome_partial_wins_over_dropped() {
        let mut record = CollectionAuditRecord::new("orders");
        record.dropped_names.push("desc_text".to_string());
        record.drop_errors.push(DropError {
            index_name: "title_text".to_string(),
            message: "lock timeout".to_string(),
        });
        assert_eq!(record.outcome(), RemediationOutcome::Partial);
    }

    #[test]
    fn test_report_totals() {
        let mut users = CollectionAuditRecord::new("users");
        users.dropped_names.push("name_text".to_string());

        let mut orders = CollectionAuditRecord::new("orders");
        orders.drop_errors.push(DropError {
            index_name: "title_text".to_string(),
            message: "lock timeout".to_string(),
        });

        let broken = CollectionAuditRecord::listing_failed("archive", "cursor exhausted");

        let report = AuditReport {
            collections: vec![users, orders, broken],
        };
        assert_eq!(report.total_dropped(), 1);
        assert_eq!(report.total_drop_errors(), 1);
        assert_eq!(report.total_listing_failures(), 1);
        assert!(!report.is_clean());
    }
}
