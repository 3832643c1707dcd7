use super::classifier::ColumnClassification;
use super::extractor::Extraction;
use super::parser::ParsedTable;
use super::IngestLimits;
use common::model::csv::{PreviewStatus, PreviewSummary};

/// Summarizes a processed upload for review before it is submitted.
///
/// Samples are the first `limits.preview_rows` records in file order. The error
/// list joins header warnings and row issues, in that order, and is cut at
/// `limits.max_reported_errors` with a trailing count of what was left out.
pub fn build_preview(
    table: &ParsedTable,
    classification: &ColumnClassification,
    extraction: &Extraction,
    limits: &IngestLimits,
) -> PreviewSummary {
    let total_rows = table.rows.len();
    let valid_row_count = extraction.records.len();

    let mut errors: Vec<String> = classification
        .warnings
        .iter()
        .chain(extraction.issues.iter())
        .cloned()
        .collect();
    if errors.len() > limits.max_reported_errors {
        let dropped = errors.len() - limits.max_reported_errors;
        errors.truncate(limits.max_reported_errors);
        errors.push(format!("... and {} more issues", dropped));
    }

    PreviewSummary {
        status: if valid_row_count > 0 {
            PreviewStatus::Success
        } else {
            PreviewStatus::Warning
        },
        message: format!(
            "Found {} valid rows out of {} total rows",
            valid_row_count, total_rows
        ),
        total_rows,
        valid_row_count,
        skipped_rows: extraction.skipped,
        valid_columns: classification.valid_columns.clone(),
        invalid_columns: classification.invalid_columns.clone(),
        sample_records: extraction
            .records
            .iter()
            .take(limits.preview_rows)
            .cloned()
            .collect(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::classifier::classify;
    use crate::ingest::extractor::extract;
    use crate::ingest::parser::parse_table;
    use crate::ingest::schema::USER_DATA_SCHEMA;

    fn summarize(csv: &str, limits: &IngestLimits) -> PreviewSummary {
        let table = parse_table(csv.as_bytes()).unwrap();
        let classification = classify(&table.header, &USER_DATA_SCHEMA).unwrap();
        let extraction = extract(&table, &classification, &USER_DATA_SCHEMA);
        build_preview(&table, &classification, &extraction, limits)
    }

    #[test]
    fn test_sample_is_bounded_to_first_ten() {
        let mut csv = String::from("user_id,name\n");
        for i in 1..=12 {
            csv.push_str(&format!("{},User {}\n", i, i));
        }
        let summary = summarize(&csv, &IngestLimits::default());

        assert_eq!(summary.total_rows, 12);
        assert_eq!(summary.valid_row_count, 12);
        assert_eq!(summary.sample_records.len(), 10);
        assert_eq!(summary.sample_records[0]["user_id"], "1");
        assert_eq!(summary.sample_records[9]["user_id"], "10");
        assert_eq!(summary.status, PreviewStatus::Success);
        assert_eq!(summary.message, "Found 12 valid rows out of 12 total rows");
    }

    #[test]
    fn test_errors_collect_warnings_then_row_issues() {
        let summary = summarize(
            "Email,name,EMAIL\nbad,Ann,x@y.co\n,,\nok@y.co,Bob,\n",
            &IngestLimits::default(),
        );
        assert_eq!(summary.errors.len(), 3);
        assert!(summary.errors[0].starts_with("Header:"));
        assert!(summary.errors[1].starts_with("Row 2:"));
        assert!(summary.errors[2].starts_with("Row 3:"));
        assert_eq!(summary.skipped_rows, 2);
        assert_eq!(summary.valid_row_count, 1);
        assert_eq!(summary.invalid_columns, vec!["EMAIL"]);
    }

    #[test]
    fn test_errors_are_capped() {
        let mut csv = String::from("user_id,email\n");
        for i in 0..15 {
            csv.push_str(&format!("{},broken\n", i));
        }
        let summary = summarize(&csv, &IngestLimits::default());

        assert_eq!(summary.errors.len(), 11);
        assert_eq!(summary.errors[10], "... and 5 more issues");
        assert_eq!(summary.status, PreviewStatus::Warning);
        assert!(summary.sample_records.is_empty());
    }

    #[test]
    fn test_custom_preview_size() {
        let limits = IngestLimits {
            preview_rows: 2,
            ..IngestLimits::default()
        };
        let summary = summarize("name\nA\nB\nC\n", &limits);
        assert_eq!(summary.sample_records.len(), 2);
        assert_eq!(summary.total_rows, 3);
    }
}
