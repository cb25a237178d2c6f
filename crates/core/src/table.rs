//! Tabular query results and their CSV export.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Rows with named columns, as returned by an ad-hoc query or report.
///
/// Cells are JSON values so the table serializes directly into API
/// responses; `Null` stands for SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), CoreError> {
        if row.len() != self.columns.len() {
            return Err(CoreError::Internal(format!(
                "row has {} cells but table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of `name` in the column list.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Serialize as CSV: a header row of column names, then one line per row.
    ///
    /// `NULL` cells become empty fields; quoting follows RFC 4180.
    pub fn to_csv(&self) -> Result<String, CoreError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&self.columns)
            .map_err(|e| CoreError::Internal(format!("CSV write failed: {e}")))?;
        for row in &self.rows {
            writer
                .write_record(row.iter().map(cell_to_field))
                .map_err(|e| CoreError::Internal(format!("CSV write failed: {e}")))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CoreError::Internal(format!("CSV flush failed: {e}")))?;
        String::from_utf8(bytes).map_err(|e| CoreError::Internal(format!("CSV is not UTF-8: {e}")))
    }
}

/// Render one cell as a CSV field.
fn cell_to_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// File name for a report export: the label with filesystem-hostile
/// characters replaced, suffixed with `_report.csv`.
pub fn export_file_name(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_report.csv", stem.trim())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> QueryTable {
        let mut table = QueryTable::new(vec!["city".into(), "provider_count".into()]);
        table.push_row(vec![json!("New Jessica"), json!(2)]).unwrap();
        table.push_row(vec![json!("Springfield"), json!(2)]).unwrap();
        table
    }

    #[test]
    fn csv_has_header_then_one_line_per_row() {
        let csv = sample().to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, ["city,provider_count", "New Jessica,2", "Springfield,2"]);
    }

    #[test]
    fn csv_quotes_commas_and_quotes_and_blanks_nulls() {
        let mut table = QueryTable::new(vec!["name".into(), "contact".into()]);
        table
            .push_row(vec![json!("Bella \"Ristorante\", Ltd"), Value::Null])
            .unwrap();
        let csv = table.to_csv().unwrap();
        assert_eq!(csv.lines().nth(1), Some("\"Bella \"\"Ristorante\"\", Ltd\","));
    }

    #[test]
    fn empty_table_exports_header_only() {
        let table = QueryTable::new(vec!["total_quantity".into()]);
        assert!(table.is_empty());
        assert_eq!(table.to_csv().unwrap(), "total_quantity\n");
    }

    #[test]
    fn mismatched_row_is_rejected() {
        let mut table = QueryTable::new(vec!["a".into(), "b".into()]);
        assert!(table.push_row(vec![json!(1)]).is_err());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn column_lookup_by_name() {
        let table = sample();
        assert_eq!(table.column_index("city"), Some(0));
        assert_eq!(table.column_index("provider_count"), Some(1));
        assert!(table.column_index("missing").is_none());
    }

    #[test]
    fn export_file_name_sanitizes_label() {
        assert_eq!(
            export_file_name("Claim-to-listing ratio by city"),
            "Claim-to-listing ratio by city_report.csv"
        );
        assert_eq!(
            export_file_name("Contacts (city) / region"),
            "Contacts _city_ _ region_report.csv"
        );
    }
}
