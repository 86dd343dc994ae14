use super::value::{ColumnKind, Value};
use crate::error::{Result, TrackerError};
use crate::utils::format::text_grid;
use std::collections::{HashMap, HashSet};

/// An in-memory, column-named table of [`Value`] rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let mut table = Self::new(name, columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(TrackerError::InvalidFormat(format!(
                "{}: row has {} fields, expected {}",
                self.name,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.has_column(name))
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| TrackerError::MissingColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Non-null numeric cells of a column
    pub fn numeric_values(&self, idx: usize) -> Vec<f64> {
        self.column_values(idx).filter_map(Value::as_f64).collect()
    }

    /// Storage class of a column: mixed int/float is float, any other mix is text
    pub fn column_kind(&self, idx: usize) -> ColumnKind {
        let mut kind = ColumnKind::Empty;
        for value in self.column_values(idx).filter(|v| !v.is_null()) {
            kind = match (kind, value.kind()) {
                (ColumnKind::Empty, next) => next,
                (current, next) if current == next => current,
                (ColumnKind::Int, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Int) => {
                    ColumnKind::Float
                }
                _ => return ColumnKind::Text,
            };
        }
        kind
    }

    pub fn columns_of_kind(&self, pred: impl Fn(ColumnKind) -> bool) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&idx| pred(self.column_kind(idx)))
            .collect()
    }

    pub fn null_count(&self, idx: usize) -> usize {
        self.column_values(idx).filter(|v| v.is_null()).count()
    }

    pub fn total_nulls(&self) -> usize {
        (0..self.columns.len()).map(|idx| self.null_count(idx)).sum()
    }

    pub fn distinct_count(&self, idx: usize) -> usize {
        self.column_values(idx)
            .filter_map(Value::key)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Distinct non-null values in first-seen order
    pub fn unique_values(&self, idx: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        self.column_values(idx)
            .filter_map(Value::key)
            .filter(|key| seen.insert(key.clone()))
            .collect()
    }

    /// Count of each non-null value, most frequent first (ties keep first-seen order)
    pub fn value_counts(&self, idx: usize) -> Vec<(String, usize)> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for key in self.column_values(idx).filter_map(Value::key) {
            let count = counts.entry(key.clone()).or_insert(0);
            if *count == 0 {
                order.push(key);
            }
            *count += 1;
        }

        let mut result: Vec<(String, usize)> = order
            .into_iter()
            .map(|key| {
                let count = counts[&key];
                (key, count)
            })
            .collect();
        result.sort_by(|a, b| b.1.cmp(&a.1));
        result
    }

    /// Sum `value` grouped by the `keys` columns, skipping rows with a missing key or value.
    /// Groups come back in first-seen order.
    pub fn group_sum(&self, keys: &[&str], value: &str) -> Result<Vec<(Vec<String>, f64)>> {
        let key_idx = keys
            .iter()
            .map(|k| self.require_column(k))
            .collect::<Result<Vec<_>>>()?;
        let value_idx = self.require_column(value)?;

        let mut order: Vec<Vec<String>> = Vec::new();
        let mut sums: HashMap<Vec<String>, f64> = HashMap::new();

        for row in &self.rows {
            let group: Option<Vec<String>> = key_idx.iter().map(|&i| row[i].key()).collect();
            let (Some(group), Some(amount)) = (group, row[value_idx].as_f64()) else {
                continue;
            };
            match sums.get_mut(&group) {
                Some(total) => *total += amount,
                None => {
                    sums.insert(group.clone(), amount);
                    order.push(group);
                }
            }
        }

        Ok(order
            .into_iter()
            .map(|group| {
                let total = sums[&group];
                (group, total)
            })
            .collect())
    }

    /// Replace every cell of a column with `f(cell)`
    pub fn map_column(&mut self, idx: usize, f: impl Fn(&Value) -> Value) {
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
    }

    /// Append a column, or overwrite it if the name already exists
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(TrackerError::InvalidFormat(format!(
                "{}: column '{}' has {} values, expected {}",
                self.name,
                name,
                values.len(),
                self.rows.len()
            )));
        }

        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Columns whose name carries an identifier marker (`ID` or `Id`)
    pub fn id_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, name)| is_id_column(name))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Coerce every identifier column to text so keys compare equal across sources.
    /// Returns the names of the coerced columns.
    pub fn coerce_ids_to_text(&mut self) -> Vec<String> {
        let id_columns = self.id_columns();
        for &idx in &id_columns {
            self.map_column(idx, Value::to_text);
        }
        id_columns
            .into_iter()
            .map(|idx| self.columns[idx].clone())
            .collect()
    }

    /// Left outer join on a shared key column.
    ///
    /// Every left row is kept: once per matching right row, or once with nulls when
    /// nothing matches. Null keys never match. Other column names present on both sides
    /// get `_x` / `_y` suffixes.
    pub fn left_join(&self, right: &Table, on: &str) -> Result<Table> {
        let left_key = self.require_column(on)?;
        let right_key = right.require_column(on)?;

        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (row_idx, row) in right.rows.iter().enumerate() {
            if let Some(key) = row[right_key].key() {
                index.entry(key).or_default().push(row_idx);
            }
        }

        let right_columns: Vec<usize> = (0..right.columns.len())
            .filter(|&idx| idx != right_key)
            .collect();

        let overlapping: HashSet<&str> = right_columns
            .iter()
            .map(|&idx| right.columns[idx].as_str())
            .filter(|name| *name != on && self.has_column(name))
            .collect();

        let mut columns: Vec<String> = self
            .columns
            .iter()
            .map(|name| {
                if overlapping.contains(name.as_str()) {
                    format!("{}_x", name)
                } else {
                    name.clone()
                }
            })
            .collect();
        columns.extend(right_columns.iter().map(|&idx| {
            let name = &right.columns[idx];
            if overlapping.contains(name.as_str()) {
                format!("{}_y", name)
            } else {
                name.clone()
            }
        }));

        let mut joined = Table::new(self.name.clone(), columns);
        let empty_right = vec![Value::Null; right_columns.len()];

        for row in &self.rows {
            let matches = row[left_key].key().and_then(|key| index.get(&key));
            match matches {
                Some(right_rows) => {
                    for &right_idx in right_rows {
                        let right_row = &right.rows[right_idx];
                        let mut combined = row.clone();
                        combined.extend(right_columns.iter().map(|&idx| right_row[idx].clone()));
                        joined.rows.push(combined);
                    }
                }
                None => {
                    let mut combined = row.clone();
                    combined.extend(empty_right.iter().cloned());
                    joined.rows.push(combined);
                }
            }
        }

        Ok(joined)
    }

    /// First `n` rows as a new table
    pub fn head(&self, n: usize) -> Table {
        Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Render as an aligned text grid for console previews
    pub fn to_text_grid(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();
        text_grid(&self.columns, &cells)
    }
}

/// `Station_ID`, `StopId` and `MapID` are identifiers; `Ride_Date` is not
pub fn is_id_column(name: &str) -> bool {
    name.contains("ID") || name.contains("Id")
}
