//! Human-readable rendering of an audit report for the operator.

use idxsweep_core::{AuditReport, Classification, CollectionAuditRecord, RemediationOutcome};
use std::fmt::Write;

/// Renders the full report as the text printed to stdout
pub fn render_report(report: &AuditReport) -> String {
    let mut out = String::new();

    for record in &report.collections {
        render_collection(&mut out, record);
    }

    let _ = writeln!(
        out,
        "summary: {} collections audited, {} text indexes dropped, {} drop failures, {} collections unreadable",
        report.collections.len(),
        report.total_dropped(),
        report.total_drop_errors(),
        report.total_listing_failures(),
    );
    if !report.is_clean() {
        let _ = writeln!(
            out,
            "some indexes could not be processed; re-run after resolving the failures above"
        );
    }
    out
}

fn render_collection(out: &mut String, record: &CollectionAuditRecord) {
    let _ = writeln!(out, "collection {}:", record.collection_name);

    if let Some(note) = &record.note {
        let _ = writeln!(out, "  could not list indexes: {note}");
        return;
    }

    for entry in &record.indexes {
        let language = entry
            .descriptor
            .default_language
            .as_deref()
            .map(|lang| format!(" (default_language: {lang})"))
            .unwrap_or_default();
        let verdict = match entry.classification {
            Classification::DisallowedText => "text index, disallowed",
            Classification::Allowed => "ok",
        };
        let _ = writeln!(
            out,
            "  {} {}{} - {}",
            entry.descriptor.name,
            entry.descriptor.key_spec_display(),
            language,
            verdict,
        );
    }

    match record.outcome() {
        RemediationOutcome::NotNeeded => {}
        RemediationOutcome::Remediated => {
            let _ = writeln!(out, "  dropped: {}", record.dropped_names.join(", "));
        }
        RemediationOutcome::Partial => {
            if !record.dropped_names.is_empty() {
                let _ = writeln!(out, "  dropped: {}", record.dropped_names.join(", "));
            }
            for drop_error in &record.drop_errors {
                let _ = writeln!(
                    out,
                    "  FAILED to drop {}: {}",
                    drop_error.index_name, drop_error.message
                );
            }
        }
    }
}

/// Prints the report to stdout
pub fn print_report(report: &AuditReport) {
    print!("{}", render_report(report));
}
