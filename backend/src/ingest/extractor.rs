use super::classifier::ColumnClassification;
use super::parser::{ParsedTable, RawRow};
use super::schema::{validate_value, SchemaRegistry};
use common::model::csv::ExtractedRecord;
use common::model::field::FieldRule;
use log::debug;

/// Records pulled out of a table, plus the rows that did not make it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// One record per surviving row, in file order.
    pub records: Vec<ExtractedRecord>,
    pub skipped: usize,
    /// One `Row N: reason` entry per skipped row.
    pub issues: Vec<String>,
}

/// Projects every data row through the classification's column mappings.
///
/// Empty cells are left out of the record. A row is skipped when it has no
/// populated recognized cell or when a populated cell breaks its field rule;
/// skipping one row never stops the rest.
pub fn extract(
    table: &ParsedTable,
    classification: &ColumnClassification,
    schema: &SchemaRegistry,
) -> Extraction {
    let mut extraction = Extraction::default();

    for row in &table.rows {
        match project_row(row, classification, schema) {
            Ok(record) => extraction.records.push(record),
            Err(reason) => {
                extraction.skipped += 1;
                extraction
                    .issues
                    .push(format!("Row {}: {}", row.line, reason));
            }
        }
    }

    debug!(
        "extracted {} records, skipped {} rows",
        extraction.records.len(),
        extraction.skipped
    );
    extraction
}

fn project_row(
    row: &RawRow,
    classification: &ColumnClassification,
    schema: &SchemaRegistry,
) -> Result<ExtractedRecord, String> {
    let mut record = ExtractedRecord::new();

    for mapping in &classification.mappings {
        let value = match row.cell(mapping.index) {
            Some(v) if !v.is_empty() => v,
            _ => continue,
        };
        let rule = schema.rule_for(&mapping.key).unwrap_or(FieldRule::Text);
        if !validate_value(rule, value) {
            return Err(format!(
                "{} value '{}' is not a valid {}",
                mapping.key,
                value,
                rule.label()
            ));
        }
        record.insert(mapping.key.clone(), value.to_string());
    }

    if record.is_empty() {
        return Err("no values in recognized columns".to_string());
    }
    Ok(record)
}
