use super::statistics::{describe_columns, Describe};
use crate::error::{Result, TrackerError};
use crate::models::Table;
use crate::utils::constants::{
    CATEGORY_CHART_LIMIT, COL_ADA, COL_COLOR, COL_MONTH, COL_NUM_RIDERS, COL_STATION_NAME,
    COL_TYPE_OF_DAY, COL_YEAR, TOP_N,
};
use crate::utils::filename::{chart_path, column_chart_path};
use crate::utils::format::{number, text_grid, thousands};
use crate::writers::{line_rgb, Axes, Bars, ChartRenderer, Orientation, Series, PRIMARY};
use plotters::style::RGBColor;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

const UNKNOWN_LINE: RGBColor = RGBColor(128, 128, 128);

/// Which analysis passes the menu choice selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSelection {
    Exit,
    Univariate,
    Bivariate,
    Multivariate,
    Domain,
    All,
}

impl AnalysisSelection {
    pub const MENU: &'static str = "Select analyses to run:\n\
        1. Univariate Analysis\n\
        2. Bivariate Analysis\n\
        3. Multivariate Analysis\n\
        4. Domain-Specific Analysis\n\
        5. All Analyses\n\
        0. Exit";

    pub fn runs(&self, pass: AnalysisSelection) -> bool {
        *self == AnalysisSelection::All || *self == pass
    }
}

impl FromStr for AnalysisSelection {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0" => Ok(AnalysisSelection::Exit),
            "1" => Ok(AnalysisSelection::Univariate),
            "2" => Ok(AnalysisSelection::Bivariate),
            "3" => Ok(AnalysisSelection::Multivariate),
            "4" => Ok(AnalysisSelection::Domain),
            "5" => Ok(AnalysisSelection::All),
            other => Err(TrackerError::InvalidInput(format!(
                "'{}' is not an analysis choice (0-5)",
                other
            ))),
        }
    }
}

impl fmt::Display for AnalysisSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisSelection::Exit => "exit",
            AnalysisSelection::Univariate => "univariate",
            AnalysisSelection::Bivariate => "bivariate",
            AnalysisSelection::Multivariate => "multivariate",
            AnalysisSelection::Domain => "domain-specific",
            AnalysisSelection::All => "all",
        };
        write!(f, "{}", name)
    }
}

/// Runs the descriptive analysis passes over the cleaned combined table.
///
/// Every pass checks the columns it needs and quietly skips what is missing.
/// Console output goes to `out`; charts go to the renderer's output directory.
pub struct Explorer {
    charts: ChartRenderer,
}

impl Explorer {
    pub fn new(charts: ChartRenderer) -> Self {
        Self { charts }
    }

    pub fn output_dir(&self) -> &Path {
        self.charts.output_dir()
    }

    /// Run the passes named by `selection`, returning every chart written
    pub fn run<W: Write>(
        &self,
        table: &Table,
        selection: AnalysisSelection,
        out: &mut W,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        if selection.runs(AnalysisSelection::Univariate) {
            written.extend(self.univariate(table, out)?);
        }
        if selection.runs(AnalysisSelection::Bivariate) {
            written.extend(self.bivariate(table, out)?);
        }
        if selection.runs(AnalysisSelection::Multivariate) {
            written.extend(self.multivariate(table, out)?);
        }
        if selection.runs(AnalysisSelection::Domain) {
            written.extend(self.domain_specific(table, out)?);
        }
        if selection == AnalysisSelection::Exit {
            writeln!(out, "Exiting analysis.")?;
        }

        info!("{} analysis wrote {} charts", selection, written.len());
        Ok(written)
    }

    pub fn univariate<W: Write>(&self, table: &Table, out: &mut W) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        writeln!(out, "\n3.1 Univariate Analysis:")?;

        writeln!(out, "\nNumeric Variables Distribution:")?;
        for idx in table.columns_of_kind(|k| k.is_numeric()) {
            let column = &table.columns()[idx];
            if column != COL_NUM_RIDERS && column.contains("ID") {
                continue;
            }
            let values = table.numeric_values(idx);
            let Some(stats) = Describe::of(&values) else {
                continue;
            };

            writeln!(out, "\n  - {} statistics:", column)?;
            writeln!(out, "{}", describe_columns(&[(column.clone(), stats)]))?;

            let path = column_chart_path(self.output_dir(), "univariate_numeric", column);
            self.charts
                .histogram(&path, &format!("Distribution of {}", column), column, &values)?;
            written.push(self.saved(out, path)?);
        }

        writeln!(out, "\nCategorical Variables Distribution:")?;
        for idx in table.columns_of_kind(|k| k.is_categorical()) {
            let column = &table.columns()[idx];
            let counts = table.value_counts(idx);
            writeln!(out, "\n  - {} value counts:", column)?;
            write_series(out, &counts_as_f64(&counts))?;

            if counts.len() >= CATEGORY_CHART_LIMIT {
                debug!("{} has {} categories, not charted", column, counts.len());
                continue;
            }

            let (labels, values): (Vec<String>, Vec<f64>) = counts
                .into_iter()
                .map(|(label, count)| (label, count as f64))
                .unzip();
            let path = column_chart_path(self.output_dir(), "univariate_categorical", column);
            self.charts.bar_chart(
                &path,
                &format!("Distribution of {}", column),
                Axes {
                    x_desc: "count",
                    y_desc: column,
                    ..Axes::default()
                },
                Bars::new(&labels, &values, Orientation::Horizontal),
            )?;
            written.push(self.saved(out, path)?);
        }

        Ok(written)
    }

    pub fn bivariate<W: Write>(&self, table: &Table, out: &mut W) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        writeln!(out, "\n3.2 Bivariate Analysis:")?;

        if table.has_columns(&[COL_STATION_NAME, COL_NUM_RIDERS]) {
            writeln!(out, "\nRidership by Station:")?;
            let top = top_groups(table, COL_STATION_NAME, TOP_N)?;
            write_series(out, &top)?;

            let (labels, values): (Vec<String>, Vec<f64>) = top.into_iter().unzip();
            let path = chart_path(self.output_dir(), "bivariate_top10_stations");
            self.charts.bar_chart(
                &path,
                "Top 10 Stations by Ridership",
                Axes {
                    x_desc: "Number of Riders",
                    ..Axes::default()
                },
                Bars::new(&labels, &values, Orientation::Horizontal),
            )?;
            written.push(self.saved(out, path)?);
        } else {
            debug!("Skipping station ridership: columns missing");
        }

        if table.has_columns(&[COL_TYPE_OF_DAY, COL_NUM_RIDERS]) {
            writeln!(out, "\nRidership by Day Type:")?;
            let by_day = sorted_by_key(single_key(table.group_sum(&[COL_TYPE_OF_DAY], COL_NUM_RIDERS)?));
            write_series(out, &by_day)?;

            let (labels, values): (Vec<String>, Vec<f64>) = by_day.into_iter().unzip();
            let path = chart_path(self.output_dir(), "bivariate_day_type");
            self.charts.bar_chart(
                &path,
                "Ridership by Day Type",
                Axes {
                    x_desc: "Day Type (W=Weekday, A=Saturday, U=Sunday/Holiday)",
                    y_desc: "Number of Riders",
                    ..Axes::default()
                },
                Bars::new(&labels, &values, Orientation::Vertical),
            )?;
            written.push(self.saved(out, path)?);
        } else {
            debug!("Skipping day type ridership: columns missing");
        }

        if table.has_columns(&[COL_MONTH, COL_NUM_RIDERS]) {
            writeln!(out, "\nRidership by Month:")?;
            let by_month = sorted_by_key(single_key(table.group_sum(&[COL_MONTH], COL_NUM_RIDERS)?));
            write_series(out, &by_month)?;

            let points = by_month
                .iter()
                .filter_map(|(month, riders)| month.parse::<f64>().ok().map(|m| (m, *riders)))
                .collect();
            let path = chart_path(self.output_dir(), "bivariate_month_ridership");
            self.charts.line_chart(
                &path,
                "Ridership by Month",
                Axes {
                    x_desc: "Month",
                    y_desc: "Number of Riders",
                    ..Axes::default()
                },
                &[Series::new(COL_NUM_RIDERS, points, PRIMARY)],
                true,
            )?;
            written.push(self.saved(out, path)?);
        } else {
            debug!("Skipping monthly ridership: columns missing");
        }

        Ok(written)
    }

    pub fn multivariate<W: Write>(&self, table: &Table, out: &mut W) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        writeln!(out, "\n3.3 Multivariate Analysis:")?;

        if table.has_columns(&[COL_STATION_NAME, COL_TYPE_OF_DAY, COL_NUM_RIDERS]) {
            writeln!(out, "\nRidership by Station and Day Type:")?;
            let groups = table.group_sum(&[COL_STATION_NAME, COL_TYPE_OF_DAY], COL_NUM_RIDERS)?;
            let pivot = Pivot::from_groups(&groups);
            writeln!(out, "{}", pivot.head(TOP_N).to_text())?;

            let top: Vec<String> = top_groups(table, COL_STATION_NAME, TOP_N)?
                .into_iter()
                .map(|(station, _)| station)
                .collect();
            let heat = pivot.restrict_rows(&top);
            let path = chart_path(self.output_dir(), "multivariate_station_day_type");
            self.charts.heatmap(
                &path,
                "Ridership by Station and Day Type (Top 10 Stations)",
                Axes {
                    x_desc: COL_TYPE_OF_DAY,
                    y_desc: COL_STATION_NAME,
                    x_categories: Some(heat.columns.as_slice()),
                    y_categories: Some(heat.rows.as_slice()),
                },
                &heat.cells,
            )?;
            written.push(self.saved(out, path)?);
        } else {
            debug!("Skipping station x day type: columns missing");
        }

        if table.has_columns(&[COL_YEAR, COL_MONTH, COL_NUM_RIDERS]) {
            writeln!(out, "\nRidership by Year and Month:")?;
            let groups = table.group_sum(&[COL_YEAR, COL_MONTH], COL_NUM_RIDERS)?;
            let pivot = Pivot::from_groups(&groups);
            writeln!(out, "{}", pivot.to_text())?;

            let path = chart_path(self.output_dir(), "multivariate_year_month");
            self.charts.heatmap(
                &path,
                "Ridership by Year and Month",
                Axes {
                    x_desc: "Month",
                    y_desc: "Year",
                    x_categories: Some(pivot.columns.as_slice()),
                    y_categories: Some(pivot.rows.as_slice()),
                },
                &pivot.cells,
            )?;
            written.push(self.saved(out, path)?);
        } else {
            debug!("Skipping year x month: columns missing");
        }

        Ok(written)
    }

    pub fn domain_specific<W: Write>(&self, table: &Table, out: &mut W) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        writeln!(out, "\n3.4 Domain-Specific Analysis:")?;

        if let Some(idx) = table.column_index(COL_ADA) {
            writeln!(out, "\nAccessibility Analysis:")?;
            let (accessible, inaccessible) =
                table
                    .column_values(idx)
                    .fold((0usize, 0usize), |(yes, no), value| match value.as_bool() {
                        Some(true) => (yes + 1, no),
                        Some(false) => (yes, no + 1),
                        None => (yes, no),
                    });
            writeln!(out, "Accessible stops: {}", accessible)?;
            writeln!(out, "Non-accessible stops: {}", inaccessible)?;

            let mut slices = Vec::new();
            if accessible > 0 {
                slices.push(("True".to_string(), accessible as f64));
            }
            if inaccessible > 0 {
                slices.push(("False".to_string(), inaccessible as f64));
            }
            let path = chart_path(self.output_dir(), "domain_ada_accessibility");
            self.charts
                .pie_chart(&path, "Proportion of ADA Accessible Stops", &slices)?;
            written.push(self.saved(out, path)?);
        } else {
            info!("No {} column; skipping accessibility analysis", COL_ADA);
        }

        if table.has_columns(&[COL_COLOR, COL_NUM_RIDERS]) {
            writeln!(out, "\nLine Color Analysis:")?;
            let mut by_color = single_key(table.group_sum(&[COL_COLOR], COL_NUM_RIDERS)?);
            by_color.sort_by(|a, b| b.1.total_cmp(&a.1));
            write_series(out, &by_color)?;

            let colors: Vec<RGBColor> = by_color
                .iter()
                .map(|(name, _)| line_rgb(name).unwrap_or(UNKNOWN_LINE))
                .collect();
            let (labels, values): (Vec<String>, Vec<f64>) = by_color.into_iter().unzip();
            let path = chart_path(self.output_dir(), "domain_line_color");
            self.charts.bar_chart(
                &path,
                "Ridership by Line Color",
                Axes {
                    x_desc: "Line Color",
                    y_desc: "Number of Riders",
                    ..Axes::default()
                },
                Bars::new(&labels, &values, Orientation::Vertical).with_colors(&colors),
            )?;
            written.push(self.saved(out, path)?);
        } else {
            debug!("Skipping line color ridership: columns missing");
        }

        Ok(written)
    }

    fn saved<W: Write>(&self, out: &mut W, path: PathBuf) -> Result<PathBuf> {
        writeln!(out, "Saved plot to {}", path.display())?;
        Ok(path)
    }
}

/// The `n` largest per-key sums of `Num_Riders`, largest first
fn top_groups(table: &Table, key: &str, n: usize) -> Result<Vec<(String, f64)>> {
    let mut sums = single_key(table.group_sum(&[key], COL_NUM_RIDERS)?);
    sums.sort_by(|a, b| b.1.total_cmp(&a.1));
    sums.truncate(n);
    Ok(sums)
}

fn single_key(groups: Vec<(Vec<String>, f64)>) -> Vec<(String, f64)> {
    groups
        .into_iter()
        .filter_map(|(mut keys, sum)| keys.pop().map(|k| (k, sum)))
        .collect()
}

/// Order group labels the way a sorted index would: numerically when every
/// label is a number, otherwise lexically
fn sorted_by_key(mut groups: Vec<(String, f64)>) -> Vec<(String, f64)> {
    sort_labels(&mut groups, |g| &g.0);
    groups
}

fn sort_labels<T>(items: &mut [T], label: impl Fn(&T) -> &String) {
    let numeric = items.iter().all(|item| label(item).parse::<f64>().is_ok());
    if numeric {
        items.sort_by(|a, b| {
            let x = label(a).parse::<f64>().unwrap_or(f64::NAN);
            let y = label(b).parse::<f64>().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        });
    } else {
        items.sort_by(|a, b| label(a).cmp(label(b)));
    }
}

fn counts_as_f64(counts: &[(String, usize)]) -> Vec<(String, f64)> {
    counts
        .iter()
        .map(|(label, count)| (label.clone(), *count as f64))
        .collect()
}

fn write_series<W: Write>(out: &mut W, series: &[(String, f64)]) -> Result<()> {
    let width = series.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in series {
        writeln!(out, "{:<width$}  {}", label, number(*value), width = width)?;
    }
    Ok(())
}

/// A two-key group sum spread into a row x column grid
#[derive(Debug, Clone, PartialEq)]
struct Pivot {
    rows: Vec<String>,
    columns: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
}

impl Pivot {
    fn from_groups(groups: &[(Vec<String>, f64)]) -> Self {
        let mut rows: Vec<String> = Vec::new();
        let mut columns: Vec<String> = Vec::new();
        let mut sums: HashMap<(String, String), f64> = HashMap::new();

        for (keys, sum) in groups {
            let [row, column] = keys.as_slice() else {
                continue;
            };
            if !rows.contains(row) {
                rows.push(row.clone());
            }
            if !columns.contains(column) {
                columns.push(column.clone());
            }
            sums.insert((row.clone(), column.clone()), *sum);
        }

        sort_labels(&mut rows, |r| r);
        sort_labels(&mut columns, |c| c);

        let cells = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| sums.get(&(row.clone(), column.clone())).copied())
                    .collect()
            })
            .collect();

        Self {
            rows,
            columns,
            cells,
        }
    }

    fn head(&self, n: usize) -> Self {
        Self {
            rows: self.rows.iter().take(n).cloned().collect(),
            columns: self.columns.clone(),
            cells: self.cells.iter().take(n).cloned().collect(),
        }
    }

    /// Keep only `keep` rows, in sorted row order
    fn restrict_rows(&self, keep: &[String]) -> Self {
        let (rows, cells) = self
            .rows
            .iter()
            .zip(&self.cells)
            .filter(|(row, _)| keep.contains(row))
            .map(|(row, cells)| (row.clone(), cells.clone()))
            .unzip();
        Self {
            rows,
            columns: self.columns.clone(),
            cells,
        }
    }

    fn to_text(&self) -> String {
        let header: Vec<String> = std::iter::once(String::new())
            .chain(self.columns.iter().cloned())
            .collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .zip(&self.cells)
            .map(|(row, cells)| {
                std::iter::once(row.clone())
                    .chain(cells.iter().map(|cell| match cell {
                        Some(v) => thousands(v.round() as i64),
                        None => "NaN".to_string(),
                    }))
                    .collect()
            })
            .collect();
        text_grid(&header, &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn combined(with_ada: bool) -> Table {
        let mut names = vec![
            "Station_ID",
            "Station_Name",
            "Type_of_Day",
            "Num_Riders",
            "Color",
            "Year",
            "Month",
        ];
        if with_ada {
            names.push("ADA");
        }
        let rows = [
            ("40010", "Austin", "W", 100, "Blue", 2023, 1, true),
            ("40010", "Austin", "A", 40, "Blue", 2023, 2, true),
            ("40020", "Harlem", "W", 300, "Green", 2023, 1, false),
            ("40020", "Harlem", "U", 20, "Green", 2024, 1, false),
            ("40030", "Linden", "W", 50, "Purple-Express", 2024, 2, true),
        ];
        let rows = rows
            .iter()
            .map(|&(id, name, day, riders, color, year, month, ada)| {
                let mut row = vec![
                    text(id),
                    text(name),
                    text(day),
                    Value::Int(riders),
                    text(color),
                    Value::Int(year),
                    Value::Int(month),
                ];
                if with_ada {
                    row.push(Value::Bool(ada));
                }
                row
            })
            .collect();
        Table::with_rows("combined", cols(&names), rows).unwrap()
    }

    fn explorer(dir: &TempDir) -> Explorer {
        Explorer::new(ChartRenderer::new(dir.path()))
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!("0".parse::<AnalysisSelection>().unwrap(), AnalysisSelection::Exit);
        assert_eq!(" 5 ".parse::<AnalysisSelection>().unwrap(), AnalysisSelection::All);
        assert!("6".parse::<AnalysisSelection>().is_err());
        assert!("".parse::<AnalysisSelection>().is_err());

        assert!(AnalysisSelection::All.runs(AnalysisSelection::Domain));
        assert!(!AnalysisSelection::Bivariate.runs(AnalysisSelection::Domain));
    }

    #[test]
    fn test_pivot_fills_missing_cells() {
        let groups = vec![
            (vec!["B".to_string(), "W".to_string()], 3.0),
            (vec!["A".to_string(), "U".to_string()], 1.0),
            (vec!["A".to_string(), "W".to_string()], 2.0),
        ];
        let pivot = Pivot::from_groups(&groups);
        assert_eq!(pivot.rows, cols(&["A", "B"]));
        assert_eq!(pivot.columns, cols(&["U", "W"]));
        assert_eq!(pivot.cells, vec![vec![Some(1.0), Some(2.0)], vec![None, Some(3.0)]]);

        let only_b = pivot.restrict_rows(&cols(&["B"]));
        assert_eq!(only_b.rows, cols(&["B"]));
        assert!(pivot.to_text().contains("NaN"));
    }

    #[test]
    fn test_numeric_labels_sort_numerically() {
        let sorted = sorted_by_key(vec![
            ("10".to_string(), 1.0),
            ("2".to_string(), 2.0),
            ("1".to_string(), 3.0),
        ]);
        let labels: Vec<&str> = sorted.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_line_colors() {
        assert_eq!(line_rgb("Purple-Express"), line_rgb("Purple"));
        assert_eq!(line_rgb("Teal"), None);
    }

    #[test]
    fn test_many_categories_are_tabulated_not_charted() {
        let rows = (0..40)
            .map(|i| vec![text(&format!("Station {}", i)), Value::Int(i)])
            .collect();
        let table =
            Table::with_rows("stations", cols(&["Station_Name", "Num_Riders"]), rows).unwrap();

        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let charts = explorer(&dir).univariate(&table, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Station_Name value counts:"), "{}", printed);
        assert!(printed.contains("Station 39"));
        assert!(!dir
            .path()
            .join("univariate_categorical_Station_Name.png")
            .exists());
        assert_eq!(charts.len(), 1, "only the Num_Riders histogram");
    }

    #[test]
    fn test_bivariate_writes_three_charts() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let charts = explorer(&dir).bivariate(&combined(true), &mut out).unwrap();

        assert_eq!(charts.len(), 3);
        for chart in &charts {
            assert!(chart.exists(), "{} missing", chart.display());
        }

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Ridership by Station:"));
        let harlem = printed.find("Harlem").unwrap();
        let austin = printed.find("Austin").unwrap();
        assert!(harlem < austin, "stations should be ordered by riders");
    }

    #[test]
    fn test_univariate_skips_id_columns() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let mut table = combined(true);
        table
            .set_column("Stop_ID", vec![Value::Int(1); table.row_count()])
            .unwrap();

        let charts = explorer(&dir).univariate(&table, &mut out).unwrap();
        let names: Vec<String> = charts
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();

        assert!(names.contains(&"univariate_numeric_Num_Riders.png".to_string()));
        assert!(names.contains(&"univariate_categorical_Color.png".to_string()));
        assert!(names.contains(&"univariate_categorical_ADA.png".to_string()));
        assert!(!names.iter().any(|n| n.contains("Stop_ID")));
    }

    #[test]
    fn test_domain_without_ada_is_skipped() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let charts = explorer(&dir)
            .domain_specific(&combined(false), &mut out)
            .unwrap();

        assert_eq!(charts.len(), 1);
        assert!(charts[0].ends_with("domain_line_color.png"));
        let printed = String::from_utf8(out).unwrap();
        assert!(!printed.contains("Accessibility Analysis"));
    }

    #[test]
    fn test_run_all_without_ada_completes() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let charts = explorer(&dir)
            .run(&combined(false), AnalysisSelection::All, &mut out)
            .unwrap();

        assert!(charts.iter().any(|p| p.ends_with("multivariate_year_month.png")));
        assert!(charts.iter().any(|p| p.ends_with("bivariate_top10_stations.png")));
        assert!(!charts.iter().any(|p| p.ends_with("domain_ada_accessibility.png")));
    }

    #[test]
    fn test_exit_choice_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let charts = explorer(&dir)
            .run(&combined(true), AnalysisSelection::Exit, &mut out)
            .unwrap();
        assert!(charts.is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "Exiting analysis.\n");
    }
}
