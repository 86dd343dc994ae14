use crate::error::{Result, TrackerError};
use crate::models::LineColor;
use crate::utils::constants::{CHART_HEIGHT, CHART_WIDTH};
use crate::utils::format::thousands;
use image::imageops::FilterType;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const FONT: &str = "sans-serif";
const HISTOGRAM_BINS: usize = 30;

/// Default bar/line color (matplotlib's first cycle color)
pub const PRIMARY: RGBColor = RGBColor(31, 119, 180);

/// Qualitative palette for multi-series and pie charts
pub const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

type Chart2d<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Axis descriptions and optional category names for a cartesian chart
#[derive(Debug, Clone, Copy, Default)]
pub struct Axes<'a> {
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub x_categories: Option<&'a [String]>,
    pub y_categories: Option<&'a [String]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Labelled bar lengths; `colors` falls back to [`PRIMARY`] per bar
#[derive(Debug, Clone, Copy)]
pub struct Bars<'a> {
    pub labels: &'a [String],
    pub values: &'a [f64],
    pub colors: Option<&'a [RGBColor]>,
    pub orientation: Orientation,
}

impl<'a> Bars<'a> {
    pub fn new(labels: &'a [String], values: &'a [f64], orientation: Orientation) -> Self {
        Self {
            labels,
            values,
            colors: None,
            orientation,
        }
    }

    pub fn with_colors(mut self, colors: &'a [RGBColor]) -> Self {
        self.colors = Some(colors);
        self
    }
}

/// One named line of a line chart
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        Self {
            name: name.into(),
            points,
            color,
        }
    }

    /// Plot values against their position (0, 1, 2, ...)
    pub fn indexed(name: impl Into<String>, values: &[f64], color: RGBColor) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        Self::new(name, points, color)
    }
}

/// A labelled point drawn over the map extent
#[derive(Debug, Clone)]
pub struct MapPoint {
    pub label: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Geographic window of a map chart
#[derive(Debug, Clone, Copy)]
pub struct Extent {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

/// Renders PNG charts into a fixed output directory.
///
/// Text (titles, axes, legends) needs a registered TrueType font. Without one the
/// renderer still draws the data but leaves every label off.
pub struct ChartRenderer {
    output_dir: PathBuf,
    labelled: bool,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            labelled: false,
        }
    }

    /// Register a font for chart text. Failures degrade to unlabelled charts.
    pub fn with_font(mut self, font: Option<&Path>) -> Self {
        match font {
            Some(path) => match register_font_file(path) {
                Ok(()) => {
                    debug!("Registered chart font {}", path.display());
                    self.labelled = true;
                }
                Err(e) => warn!("Charts will be unlabelled: {}", e),
            },
            None => warn!("No chart font found; charts will be unlabelled"),
        }
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if it does not exist yet
    pub fn ensure_output_dir(&self) -> Result<bool> {
        if self.output_dir.exists() {
            Ok(false)
        } else {
            fs::create_dir_all(&self.output_dir)?;
            Ok(true)
        }
    }

    /// Histogram of a numeric column
    pub fn histogram(&self, path: &Path, title: &str, x_desc: &str, values: &[f64]) -> Result<()> {
        let (lo, hi) = padded_bounds(values.iter().copied(), 0.0);
        let bins = histogram_bins(values, lo, hi, HISTOGRAM_BINS);
        let max_count = bins.iter().map(|b| b.2).max().unwrap_or(0) as f64;

        let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(TrackerError::chart)?;

        let mut chart = self
            .builder(&root, title)
            .build_cartesian_2d(lo..hi, 0.0..(max_count * 1.05).max(1.0))
            .map_err(TrackerError::chart)?;

        self.draw_axes(
            &mut chart,
            Axes {
                x_desc,
                y_desc: "Count",
                ..Axes::default()
            },
        )?;

        chart
            .draw_series(bins.iter().filter(|b| b.2 > 0).map(|&(start, end, count)| {
                Rectangle::new([(start, 0.0), (end, count as f64)], PRIMARY.filled())
            }))
            .map_err(TrackerError::chart)?;

        root.present().map_err(TrackerError::chart)?;
        Ok(())
    }

    /// Bar chart, one bar per label. Horizontal bars list the first label at the top.
    pub fn bar_chart(&self, path: &Path, title: &str, axes: Axes<'_>, bars: Bars<'_>) -> Result<()> {
        let n = bars.labels.len().max(1);
        let top = bars.values.iter().copied().fold(0.0, f64::max).max(1.0) * 1.1;
        let slots = -0.5..(n as f64 - 0.5);
        let reversed: Vec<String> = bars.labels.iter().rev().cloned().collect();

        let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(TrackerError::chart)?;

        let mut builder = self.builder(&root, title);
        let (mut chart, axes) = match bars.orientation {
            Orientation::Vertical => (
                builder
                    .build_cartesian_2d(slots, 0.0..top)
                    .map_err(TrackerError::chart)?,
                Axes {
                    x_categories: Some(bars.labels),
                    ..axes
                },
            ),
            Orientation::Horizontal => (
                builder
                    .y_label_area_size(220)
                    .build_cartesian_2d(0.0..top, slots)
                    .map_err(TrackerError::chart)?,
                Axes {
                    y_categories: Some(reversed.as_slice()),
                    ..axes
                },
            ),
        };
        self.draw_axes(&mut chart, axes)?;

        chart
            .draw_series(bars.values.iter().enumerate().map(|(i, &v)| {
                let color = bars.colors.and_then(|c| c.get(i)).copied().unwrap_or(PRIMARY);
                let corners = match bars.orientation {
                    Orientation::Vertical => {
                        let x = i as f64;
                        [(x - 0.4, 0.0), (x + 0.4, v)]
                    }
                    Orientation::Horizontal => {
                        let y = (n - 1 - i) as f64;
                        [(0.0, y - 0.4), (v, y + 0.4)]
                    }
                };
                Rectangle::new(corners, color.filled())
            }))
            .map_err(TrackerError::chart)?;

        root.present().map_err(TrackerError::chart)?;
        Ok(())
    }

    /// Line chart with one line per series; `markers` adds a dot at every point
    pub fn line_chart(
        &self,
        path: &Path,
        title: &str,
        axes: Axes<'_>,
        series: &[Series],
        markers: bool,
    ) -> Result<()> {
        let all_points = || series.iter().flat_map(|s| s.points.iter());
        let (x_lo, x_hi) = padded_bounds(all_points().map(|p| p.0), 0.0);
        let (y_lo, y_hi) = padded_bounds(all_points().map(|p| p.1), 0.05);

        let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(TrackerError::chart)?;

        let mut chart = self
            .builder(&root, title)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
            .map_err(TrackerError::chart)?;

        self.draw_axes(&mut chart, axes)?;

        for line in series {
            let color = line.color;
            let drawn = chart
                .draw_series(LineSeries::new(line.points.iter().copied(), color.stroke_width(2)))
                .map_err(TrackerError::chart)?;
            if self.labelled {
                drawn.label(line.name.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }

            if markers {
                chart
                    .draw_series(
                        line.points
                            .iter()
                            .map(|&p| Circle::new(p, 4, color.filled())),
                    )
                    .map_err(TrackerError::chart)?;
            }
        }

        if self.labelled && series.len() > 1 {
            chart
                .configure_series_labels()
                .label_font((FONT, 16))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(TrackerError::chart)?;
        }

        root.present().map_err(TrackerError::chart)?;
        Ok(())
    }

    /// Heatmap of a row x column matrix; missing cells are left blank
    pub fn heatmap(
        &self,
        path: &Path,
        title: &str,
        axes: Axes<'_>,
        matrix: &[Vec<Option<f64>>],
    ) -> Result<()> {
        let rows = matrix.len().max(1);
        let cols = matrix.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let (lo, hi) = padded_bounds(matrix.iter().flatten().flatten().copied(), 0.0);

        // Row 0 sits at the top, as in a printed pivot table
        let row_labels: Option<Vec<String>> = axes
            .y_categories
            .map(|labels| labels.iter().rev().cloned().collect());

        let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(TrackerError::chart)?;

        let mut chart = self
            .builder(&root, title)
            .y_label_area_size(220)
            .build_cartesian_2d(-0.5..(cols as f64 - 0.5), -0.5..(rows as f64 - 0.5))
            .map_err(TrackerError::chart)?;

        self.draw_axes(
            &mut chart,
            Axes {
                y_categories: row_labels.as_deref(),
                ..axes
            },
        )?;

        let cells: Vec<(f64, f64, f64)> = matrix
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter().enumerate().filter_map(move |(c, v)| {
                    v.map(|value| (c as f64, (rows - 1 - r) as f64, value))
                })
            })
            .collect();

        chart
            .draw_series(cells.iter().map(|&(x, y, value)| {
                let shade = viridis((value - lo) / (hi - lo));
                Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], shade.filled())
            }))
            .map_err(TrackerError::chart)?;

        if self.labelled {
            let style = (FONT, 13)
                .into_font()
                .color(&WHITE)
                .pos(Pos::new(HPos::Center, VPos::Center));
            chart
                .draw_series(cells.iter().map(|&(x, y, value)| {
                    Text::new(thousands(value.round() as i64), (x, y), style.clone())
                }))
                .map_err(TrackerError::chart)?;
        }

        root.present().map_err(TrackerError::chart)?;
        Ok(())
    }

    /// Pie chart with one wedge per (label, value); labels show the percentage
    pub fn pie_chart(&self, path: &Path, title: &str, slices: &[(String, f64)]) -> Result<()> {
        let total: f64 = slices.iter().map(|s| s.1).filter(|v| *v > 0.0).sum();

        let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(TrackerError::chart)?;
        let area = if self.labelled {
            root.titled(title, (FONT, 28)).map_err(TrackerError::chart)?
        } else {
            root.clone()
        };

        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = (width.min(height) as f64) * 0.38;

        let mut start = -std::f64::consts::FRAC_PI_2;
        for (i, (label, value)) in slices.iter().enumerate() {
            if *value <= 0.0 || total <= 0.0 {
                continue;
            }
            let sweep = value / total * std::f64::consts::TAU;
            let color = PALETTE[i % PALETTE.len()];

            area.draw(&Polygon::new(
                wedge(center, radius, start, start + sweep),
                color.filled(),
            ))
            .map_err(TrackerError::chart)?;

            if self.labelled {
                let mid = start + sweep / 2.0;
                let at = |r: f64| {
                    (
                        center.0 + (r * mid.cos()) as i32,
                        center.1 + (r * mid.sin()) as i32,
                    )
                };
                let centered = Pos::new(HPos::Center, VPos::Center);
                area.draw(&Text::new(
                    label.clone(),
                    at(radius * 1.15),
                    (FONT, 20).into_font().color(&BLACK).pos(centered),
                ))
                .map_err(TrackerError::chart)?;
                area.draw(&Text::new(
                    format!("{:.1}%", value / total * 100.0),
                    at(radius * 0.6),
                    (FONT, 18).into_font().color(&WHITE).pos(centered),
                ))
                .map_err(TrackerError::chart)?;
            }

            start += sweep;
        }

        root.present().map_err(TrackerError::chart)?;
        Ok(())
    }

    /// Scatter of labelled points over an optional background image covering `extent`
    pub fn map_scatter(
        &self,
        path: &Path,
        title: &str,
        extent: Extent,
        background: Option<&Path>,
        points: &[MapPoint],
        color: RGBColor,
    ) -> Result<()> {
        let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(TrackerError::chart)?;

        let mut chart = self
            .builder(&root, title)
            .build_cartesian_2d(extent.min_lon..extent.max_lon, extent.min_lat..extent.max_lat)
            .map_err(TrackerError::chart)?;

        if let Some(image_path) = background {
            match image::open(image_path) {
                Ok(image) => {
                    let (w, h) = chart.plotting_area().dim_in_pixel();
                    let image = image.resize_exact(w, h, FilterType::Nearest);
                    let element: BitMapElement<_> = ((extent.min_lon, extent.max_lat), image).into();
                    chart
                        .draw_series(std::iter::once(element))
                        .map_err(TrackerError::chart)?;
                }
                Err(e) => warn!(
                    "Could not load map background {}: {}",
                    image_path.display(),
                    e
                ),
            }
        }

        self.draw_axes(
            &mut chart,
            Axes {
                x_desc: "Longitude",
                y_desc: "Latitude",
                ..Axes::default()
            },
        )?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|p| Circle::new((p.longitude, p.latitude), 6, color.filled())),
            )
            .map_err(TrackerError::chart)?;

        if self.labelled {
            chart
                .draw_series(points.iter().map(|p| {
                    Text::new(
                        p.label.clone(),
                        (p.longitude, p.latitude),
                        (FONT, 12).into_font().color(&BLACK),
                    )
                }))
                .map_err(TrackerError::chart)?;
        }

        root.present().map_err(TrackerError::chart)?;
        Ok(())
    }

    fn builder<'a, 'b>(
        &self,
        root: &'a DrawingArea<BitMapBackend<'b>, plotters::coord::Shift>,
        title: &str,
    ) -> ChartBuilder<'a, 'b, BitMapBackend<'b>> {
        let mut builder = ChartBuilder::on(root);
        builder
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100);
        if self.labelled {
            builder.caption(title, (FONT, 28));
        }
        builder
    }

    fn draw_axes(&self, chart: &mut Chart2d<'_, '_>, axes: Axes<'_>) -> Result<()> {
        if !self.labelled {
            return Ok(());
        }

        let x_categories = axes.x_categories.unwrap_or(&[]);
        let y_categories = axes.y_categories.unwrap_or(&[]);
        let x_category = |x: &f64| category_label(x_categories, *x);
        let y_category = |y: &f64| category_label(y_categories, *y);
        let y_number = |y: &f64| format_tick(*y);

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(axes.x_desc)
            .y_desc(axes.y_desc)
            .label_style((FONT, 14))
            .axis_desc_style((FONT, 18));

        if axes.x_categories.is_some() {
            mesh.x_labels(x_categories.len().max(1))
                .x_label_formatter(&x_category);
        }
        if axes.y_categories.is_some() {
            mesh.y_labels(y_categories.len().max(1))
                .y_label_formatter(&y_category);
        } else {
            mesh.y_label_formatter(&y_number);
        }

        mesh.draw().map_err(TrackerError::chart)?;
        Ok(())
    }
}

/// Drawing color of a known `Lines.Color` value
pub fn line_rgb(name: &str) -> Option<RGBColor> {
    LineColor::parse(name).map(|line| {
        let (r, g, b) = line.rgb();
        RGBColor(r, g, b)
    })
}

fn register_font_file(path: &Path) -> Result<()> {
    let bytes = fs::read(path)?;
    // Fonts are registered process-wide for the rest of the run
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT, FontStyle::Normal, bytes)
        .map_err(|_| TrackerError::Chart(format!("invalid font file {}", path.display())))
}

/// Label for a category axis tick; ticks between categories stay blank
fn category_label(labels: &[String], position: f64) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 1000.0 {
        thousands(value.round() as i64)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Min and max of the values, widened by `pad` of the span and never empty
fn padded_bounds(values: impl Iterator<Item = f64>, pad: f64) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let margin = (hi - lo) * pad;
    (lo - margin, hi + margin)
}

/// Equal-width bins over `[lo, hi]` as `(start, end, count)`
fn histogram_bins(values: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<(f64, f64, usize)> {
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values.iter().filter(|v| v.is_finite()) {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = lo + i as f64 * width;
            (start, start + width, count)
        })
        .collect()
}

/// Sample the viridis ramp at `t` in `[0, 1]`
fn viridis(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - i as f64;
    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Polygon approximating a pie wedge from `start` to `end` radians
fn wedge(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = (((end - start) / std::f64::consts::TAU) * 180.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + (end - start) * step as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn renderer(dir: &TempDir) -> ChartRenderer {
        ChartRenderer::new(dir.path().join("plots"))
    }

    #[test]
    fn test_ensure_output_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let charts = renderer(&dir);
        assert!(charts.ensure_output_dir()?);
        assert!(!charts.ensure_output_dir()?);
        assert!(charts.output_dir().is_dir());
        Ok(())
    }

    #[test]
    fn test_unlabelled_charts_are_written() -> Result<()> {
        let dir = TempDir::new()?;
        let charts = renderer(&dir);
        charts.ensure_output_dir()?;
        let out = charts.output_dir().to_path_buf();

        let labels = vec!["W".to_string(), "A".to_string(), "U".to_string()];
        charts.histogram(&out.join("hist.png"), "h", "x", &[1.0, 2.0, 2.0, 3.0, 9.0])?;
        let counts = [10.0, 4.0, 3.0];
        charts.bar_chart(
            &out.join("bar.png"),
            "b",
            Axes::default(),
            Bars::new(&labels, &counts, Orientation::Vertical).with_colors(&PALETTE[..3]),
        )?;
        charts.bar_chart(
            &out.join("hbar.png"),
            "hb",
            Axes::default(),
            Bars::new(&labels, &counts, Orientation::Horizontal),
        )?;
        charts.line_chart(
            &out.join("line.png"),
            "l",
            Axes::default(),
            &[
                Series::indexed("one", &[1.0, 3.0, 2.0], PALETTE[0]),
                Series::indexed("two", &[2.0, 1.0], PALETTE[1]),
            ],
            true,
        )?;
        charts.heatmap(
            &out.join("heat.png"),
            "hm",
            Axes::default(),
            &[vec![Some(1.0), None], vec![Some(3.0), Some(4.0)]],
        )?;
        charts.pie_chart(
            &out.join("pie.png"),
            "p",
            &[("True".to_string(), 3.0), ("False".to_string(), 1.0)],
        )?;

        for name in ["hist", "bar", "hbar", "line", "heat", "pie"] {
            assert!(out.join(format!("{}.png", name)).exists(), "{} missing", name);
        }
        Ok(())
    }

    #[test]
    fn test_map_without_background_image() -> Result<()> {
        let dir = TempDir::new()?;
        let charts = renderer(&dir);
        charts.ensure_output_dir()?;
        let path = charts.output_dir().join("map.png");

        charts.map_scatter(
            &path,
            "Red line",
            Extent {
                min_lon: -87.9277,
                max_lon: -87.5569,
                min_lat: 41.7012,
                max_lat: 42.0868,
            },
            Some(Path::new("/no/such/chicago.png")),
            &[MapPoint {
                label: "Clark/Lake".to_string(),
                longitude: -87.630886,
                latitude: 41.885737,
            }],
            RGBColor(198, 12, 48),
        )?;

        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_category_label() {
        let labels = vec!["Jan".to_string(), "Feb".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Jan");
        assert_eq!(category_label(&labels, 1.0000001), "Feb");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn test_padded_bounds() {
        assert_eq!(padded_bounds(std::iter::empty(), 0.1), (0.0, 1.0));
        assert_eq!(padded_bounds([5.0].into_iter(), 0.1), (4.0, 6.0));
        let (lo, hi) = padded_bounds([0.0, 10.0].into_iter(), 0.1);
        assert!((lo + 1.0).abs() < 1e-9 && (hi - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_bins_cover_every_value() {
        let values = [0.0, 0.5, 1.0, 10.0];
        let bins = histogram_bins(&values, 0.0, 10.0, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.2).sum::<usize>(), 4);
        assert_eq!(bins[4].2, 1);
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0), RGBColor(68, 1, 84));
        assert_eq!(viridis(1.0), RGBColor(253, 231, 37));
        assert_eq!(viridis(f64::NAN), RGBColor(68, 1, 84));
    }

    #[test]
    fn test_wedge_starts_at_center() {
        let points = wedge((100, 100), 50.0, 0.0, std::f64::consts::FRAC_PI_2);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (150, 100));
        assert_eq!(*points.last().unwrap(), (100, 150));
    }
}
