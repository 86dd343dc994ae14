use crate::analyzers::statistics::median;
use crate::error::Result;
use crate::models::{ColumnKind, Table, Value};
use crate::utils::constants::{
    COL_ADA, COL_DAY, COL_DAY_OF_WEEK, COL_LATITUDE, COL_LONGITUDE, COL_MONTH, COL_RIDE_DATE,
    COL_YEAR,
};
use crate::utils::format::number;
use chrono::Datelike;
use std::collections::HashMap;

/// What the cleaning stage changed, in the order it happened
#[derive(Debug, Clone, Default)]
pub struct CleaningReport {
    pub imputed: Vec<String>,
    pub converted: Vec<String>,
    pub derived: Vec<String>,
}

impl CleaningReport {
    pub fn summary(&self) -> String {
        let mut out = String::from("1. Handling Missing Values:");
        if self.imputed.is_empty() {
            out.push_str("\nNo missing values to handle.");
        }
        for line in &self.imputed {
            out.push_str(&format!("\n  - {}", line));
        }

        out.push_str("\n\n2. Fixing Data Types:");
        for line in &self.converted {
            out.push_str(&format!("\n  - {}", line));
        }

        out.push_str("\n\n3. Column Management:");
        for line in &self.derived {
            out.push_str(&format!("\n  - {}", line));
        }
        out
    }
}

/// Imputes missing values, fixes column types and derives calendar fields
pub struct DataCleaner;

impl DataCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, table: &mut Table) -> Result<CleaningReport> {
        let mut report = CleaningReport {
            imputed: self.handle_missing_values(table),
            ..CleaningReport::default()
        };
        report.converted = self.fix_data_types(table);
        report.derived = self.derive_date_columns(table)?;
        Ok(report)
    }

    /// Numeric gaps get the column median, categorical gaps the column mode
    pub fn handle_missing_values(&self, table: &mut Table) -> Vec<String> {
        let mut actions = Vec::new();
        if table.total_nulls() == 0 {
            return actions;
        }

        for idx in 0..table.column_count() {
            if table.null_count(idx) == 0 {
                continue;
            }
            let kind = table.column_kind(idx);
            let name = table.columns()[idx].clone();

            let fill = if kind.is_numeric() {
                median(&table.numeric_values(idx)).map(|m| {
                    actions.push(format!(
                        "Filled missing values in {} with median: {}",
                        name,
                        number(m)
                    ));
                    if kind == ColumnKind::Int && m.fract() == 0.0 {
                        Value::Int(m as i64)
                    } else {
                        Value::Float(m)
                    }
                })
            } else if kind.is_categorical() {
                column_mode(table, idx).map(|m| {
                    actions.push(format!("Filled missing values in {} with mode: {}", name, m));
                    m
                })
            } else {
                None
            };

            if let Some(fill) = fill {
                table.map_column(idx, |v| if v.is_null() { fill.clone() } else { v.clone() });
            }
        }
        actions
    }

    /// Identifiers to text, coordinates to float, `ADA` to bool, `*Date*` columns to dates
    pub fn fix_data_types(&self, table: &mut Table) -> Vec<String> {
        let mut actions = Vec::new();

        for name in table.coerce_ids_to_text() {
            actions.push(format!("Converted {} to string type", name));
        }

        for column in [COL_LATITUDE, COL_LONGITUDE] {
            if let Some(idx) = table.column_index(column) {
                table.map_column(idx, Value::to_float);
                actions.push(format!("Converted {} to numeric type", column));
            }
        }

        if let Some(idx) = table.column_index(COL_ADA) {
            table.map_column(idx, Value::to_bool);
            actions.push(format!("Converted {} to boolean type", COL_ADA));
        }

        let date_columns: Vec<(usize, String)> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, name)| name.contains("Date"))
            .map(|(idx, name)| (idx, name.clone()))
            .collect();
        for (idx, name) in date_columns {
            table.map_column(idx, Value::to_date);
            actions.push(format!("Converted {} to datetime type", name));
        }

        actions
    }

    /// `Year`, `Month`, `Day` and `DayOfWeek` (Monday = 0) from the ride date
    pub fn derive_date_columns(&self, table: &mut Table) -> Result<Vec<String>> {
        let Some(idx) = table.column_index(COL_RIDE_DATE) else {
            return Ok(Vec::new());
        };

        let dates: Vec<Option<chrono::NaiveDate>> =
            table.column_values(idx).map(Value::as_date).collect();
        let derive = |f: fn(&chrono::NaiveDate) -> i64| -> Vec<Value> {
            dates
                .iter()
                .map(|d| d.as_ref().map(f).map(Value::Int).unwrap_or(Value::Null))
                .collect()
        };

        table.set_column(COL_YEAR, derive(|d| d.year() as i64))?;
        table.set_column(COL_MONTH, derive(|d| d.month() as i64))?;
        table.set_column(COL_DAY, derive(|d| d.day() as i64))?;
        table.set_column(
            COL_DAY_OF_WEEK,
            derive(|d| d.weekday().num_days_from_monday() as i64),
        )?;

        Ok(vec![format!(
            "Created date-based derived variables ({}, {}, {}, {})",
            COL_YEAR, COL_MONTH, COL_DAY, COL_DAY_OF_WEEK
        )])
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Most frequent non-null value; ties go to the smallest value
fn column_mode(table: &Table, idx: usize) -> Option<Value> {
    let mut counts: HashMap<String, (usize, Value)> = HashMap::new();
    for value in table.column_values(idx).filter(|v| !v.is_null()) {
        counts
            .entry(value.to_string())
            .or_insert_with(|| (0, value.clone()))
            .0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(ka, (ca, _)), (kb, (cb, _))| ca.cmp(cb).then_with(|| kb.cmp(ka)))
        .map(|(_, (_, value))| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn combined() -> Table {
        Table::with_rows(
            "combined",
            ["Station_ID", "Station_Name", "ADA", "Latitude", "Ride_Date", "Num_Riders"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![
                vec![Value::Int(1), text("Main St"), Value::Int(1), text("41.9"), text("2021-03-01"), Value::Int(10)],
                vec![Value::Int(2), text("Elm"), Value::Int(0), text("x"), text("bad"), Value::Null],
                vec![Value::Int(2), Value::Null, Value::Int(1), text("41.8"), text("2021-03-07"), Value::Int(30)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_missing_values_are_imputed() {
        let mut table = combined();
        let actions = DataCleaner::new().handle_missing_values(&mut table);

        assert_eq!(table.total_nulls(), 0);
        assert_eq!(table.rows()[1][5], Value::Int(20));
        // "Elm" and "Main St" tie; the smaller value wins
        assert_eq!(table.rows()[2][1], text("Elm"));
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn test_fix_data_types() {
        let mut table = combined();
        let actions = DataCleaner::new().fix_data_types(&mut table);

        assert_eq!(table.rows()[0][0], text("1"));
        assert_eq!(table.rows()[0][2], Value::Bool(true));
        assert_eq!(table.rows()[1][2], Value::Bool(false));
        assert_eq!(table.rows()[0][3], Value::Float(41.9));
        assert_eq!(table.rows()[1][3], Value::Null);
        assert_eq!(
            table.rows()[0][4],
            Value::Date(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap())
        );
        assert_eq!(table.rows()[1][4], Value::Null);
        assert!(actions.iter().any(|a| a.contains("Ride_Date")));
    }

    #[test]
    fn test_derived_calendar_fields() -> Result<()> {
        let mut table = combined();
        let cleaner = DataCleaner::new();
        cleaner.fix_data_types(&mut table);
        cleaner.derive_date_columns(&mut table)?;

        let year = table.require_column(COL_YEAR)?;
        let dow = table.require_column(COL_DAY_OF_WEEK)?;
        assert_eq!(table.rows()[0][year], Value::Int(2021));
        // 2021-03-01 was a Monday, 2021-03-07 a Sunday
        assert_eq!(table.rows()[0][dow], Value::Int(0));
        assert_eq!(table.rows()[2][dow], Value::Int(6));
        assert_eq!(table.rows()[1][year], Value::Null);
        Ok(())
    }

    #[test]
    fn test_clean_without_optional_columns() -> Result<()> {
        let mut table = Table::with_rows(
            "small",
            vec!["Stop_ID".to_string(), "Color".to_string()],
            vec![vec![Value::Int(1), text("Red")]],
        )?;

        let report = DataCleaner::new().clean(&mut table)?;

        assert!(report.imputed.is_empty());
        assert!(report.derived.is_empty());
        assert_eq!(report.converted, vec!["Converted Stop_ID to string type".to_string()]);
        assert!(report.summary().contains("No missing values to handle."));
        Ok(())
    }
}
