//! Per-collection classification and remediation.

use crate::discovery::discover;
use idxsweep_core::{
    classify, AuditReport, ClassifiedIndex, CollectionAuditRecord, DropError, Error,
    IndexDescriptor, Result,
};
use idxsweep_store::Store;
use tracing::{info, warn};

/// Audits one collection and drops its disallowed indexes.
///
/// Every descriptor is classified and recorded in input order. The
/// disallowed subset, minus the primary-key index, is then dropped
/// sequentially; a failed drop is recorded and the remaining targets are
/// still attempted. The returned record is fully populated, never partial.
pub async fn audit_collection(
    store: &dyn Store,
    collection: &str,
    descriptors: Vec<IndexDescriptor>,
) -> CollectionAuditRecord {
    let mut record = CollectionAuditRecord::new(collection);

    for descriptor in descriptors {
        let classification = classify(&descriptor);
        if classification.is_disallowed() {
            // default_language is reported for the operator's benefit only;
            // it never feeds the classification.
            info!(
                collection,
                index = %descriptor.name,
                key_spec = %descriptor.key_spec_display(),
                default_language = ?descriptor.default_language,
                "found disallowed text index"
            );
        }
        record.indexes.push(ClassifiedIndex {
            descriptor,
            classification,
        });
    }

    let targets: Vec<String> = record
        .indexes
        .iter()
        .filter(|entry| entry.classification.is_disallowed() && !entry.descriptor.is_primary_key())
        .map(|entry| entry.descriptor.name.clone())
        .collect();

    for name in targets {
        match store.drop_index(collection, &name).await {
            Ok(()) => {
                info!(collection, index = %name, "dropped text index");
                record.dropped_names.push(name);
            }
            Err(e) => {
                warn!(collection, index = %name, error = %e, "failed to drop text index");
                record.drop_errors.push(DropError {
                    index_name: name,
                    message: drop_error_message(&e),
                });
            }
        }
    }

    record
}

/// Runs one full audit-and-remediate pass over every collection.
///
/// A collection whose indexes cannot be listed is reported with an
/// explanatory note and the run continues; only a discovery failure aborts.
pub async fn run_audit(store: &dyn Store) -> Result<AuditReport> {
    let collections = discover(store).await?;
    info!(count = collections.len(), "auditing collections");

    let mut report = AuditReport::default();
    for name in collections {
        let record = match store.list_indexes(&name).await {
            Ok(descriptors) => audit_collection(store, &name, descriptors).await,
            Err(e) => {
                warn!(collection = %name, error = %e, "failed to list indexes");
                CollectionAuditRecord::listing_failed(&name, e.to_string())
            }
        };
        report.collections.push(record);
    }
    Ok(report)
}

/// The store's own message, without the taxonomy prefix, for the record
fn drop_error_message(err: &Error) -> String {
    match err {
        Error::Store(message) | Error::Connection(message) => message.clone(),
        other => other.to_string(),
    }
}
