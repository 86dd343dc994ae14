use super::statistics::{describe_columns, Describe};
use crate::models::{ColumnKind, Table};
use crate::utils::constants::{CATEGORY_LIST_LIMIT, PREVIEW_ROWS};

/// Missing-value count for one column
#[derive(Debug, Clone, PartialEq)]
pub struct MissingColumn {
    pub column: String,
    pub missing: usize,
    pub percentage: f64,
}

/// The "data understanding" pass: shape, types, gaps and per-variable summaries
pub struct DatasetOverview<'a> {
    table: &'a Table,
}

impl<'a> DatasetOverview<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    pub fn structure(&self) -> String {
        let mut out = format!(
            "Dataset shape: ({}, {}) (rows, columns)\n\nColumn names:",
            self.table.row_count(),
            self.table.column_count()
        );
        for column in self.table.columns() {
            out.push_str(&format!("\n  - {}", column));
        }

        out.push_str("\n\nData types:");
        let width = self.table.columns().iter().map(String::len).max().unwrap_or(0);
        for (idx, column) in self.table.columns().iter().enumerate() {
            out.push_str(&format!(
                "\n{:<width$}  {}",
                column,
                self.table.column_kind(idx).name(),
                width = width
            ));
        }

        out.push_str(&format!("\n\nSample data (first {} rows):\n", PREVIEW_ROWS));
        out.push_str(&self.table.head(PREVIEW_ROWS).to_text_grid());
        out
    }

    pub fn missing_values(&self) -> Vec<MissingColumn> {
        let rows = self.table.row_count().max(1) as f64;
        self.table
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let missing = self.table.null_count(idx);
                MissingColumn {
                    column: column.clone(),
                    missing,
                    percentage: missing as f64 / rows * 100.0,
                }
            })
            .filter(|m| m.missing > 0)
            .collect()
    }

    pub fn missing_summary(&self) -> String {
        let missing = self.missing_values();
        if missing.is_empty() {
            return "No missing values found.".to_string();
        }

        let mut out = format!("{:<24} {:>14} {:>10}", "", "Missing Values", "Percentage");
        for m in missing {
            out.push_str(&format!(
                "\n{:<24} {:>14} {:>10.4}",
                m.column, m.missing, m.percentage
            ));
        }
        out
    }

    pub fn variable_summary(&self) -> String {
        let numeric: Vec<(String, Describe)> = self
            .table
            .columns_of_kind(|k| k.is_numeric())
            .into_iter()
            .filter_map(|idx| {
                Describe::of(&self.table.numeric_values(idx))
                    .map(|stats| (self.table.columns()[idx].clone(), stats))
            })
            .collect();

        let mut out = String::from("Numeric variables summary:\n");
        out.push_str(&describe_columns(&numeric));

        out.push_str("\n\nCategorical variables summary:");
        for idx in self
            .table
            .columns_of_kind(|k| k == ColumnKind::Text)
        {
            let unique = self.table.distinct_count(idx);
            out.push_str(&format!(
                "\n  - {}: {} unique values",
                self.table.columns()[idx],
                unique
            ));
            if unique < CATEGORY_LIST_LIMIT {
                out.push_str(&format!(
                    "\n    Values: [{}]",
                    self.table.unique_values(idx).join(", ")
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    fn table() -> Table {
        Table::with_rows(
            "combined",
            vec!["Station_Name".to_string(), "Num_Riders".to_string()],
            vec![
                vec![Value::Text("Main St".into()), Value::Int(10)],
                vec![Value::Text("Elm".into()), Value::Null],
                vec![Value::Null, Value::Int(30)],
                vec![Value::Text("Elm".into()), Value::Int(20)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_missing_values() {
        let table = table();
        let missing = DatasetOverview::new(&table).missing_values();
        assert_eq!(missing.len(), 2);
        assert_eq!(missing[0].column, "Station_Name");
        assert_eq!(missing[0].missing, 1);
        assert_eq!(missing[0].percentage, 25.0);
    }

    #[test]
    fn test_structure_and_summary() {
        let table = table();
        let overview = DatasetOverview::new(&table);

        let structure = overview.structure();
        assert!(structure.starts_with("Dataset shape: (4, 2)"));
        assert!(structure.contains("Num_Riders    int64"));

        let summary = overview.variable_summary();
        assert!(summary.contains("Station_Name: 2 unique values"));
        assert!(summary.contains("Values: [Main St, Elm]"));
    }

    #[test]
    fn test_no_missing_values() {
        let table = Table::with_rows("t", vec!["a".to_string()], vec![vec![Value::Int(1)]]).unwrap();
        assert_eq!(
            DatasetOverview::new(&table).missing_summary(),
            "No missing values found."
        );
    }
}
