use super::console::Console;
use super::queries::{self, DailyRidership, Period, RidershipOrder, StationLocation};
use super::session::Session;
use crate::error::Result;
use crate::models::normalize_color;
use crate::utils::constants::{MAP_MAX_LAT, MAP_MAX_LON, MAP_MIN_LAT, MAP_MIN_LON};
use crate::utils::format::{percent_suffix, thousands};
use crate::writers::{line_rgb, Axes, Extent, MapPoint, Series, PALETTE, PRIMARY};
use std::io::{BufRead, Write};
use tracing::{debug, warn};
use validator::Validate;

const NO_STATIONS: &str = "**No stations found...";
const LINE_PROMPT: &str = "Enter a line color (e.g. Red or Yellow): ";
const SAMPLE_ROWS: usize = 5;

/// True if the pattern would match more than one literal name under LIKE
pub fn has_wildcard(pattern: &str) -> bool {
    pattern.contains('_') || pattern.contains('%')
}

pub fn print_stats<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) -> Result<()> {
    let stats = queries::general_stats(session.connection())?;
    let base = session.percent_total();

    console.say("General stats:")?;
    console.say(format!("  # of stations: {}", thousands(stats.stations)))?;
    console.say(format!("  # of stops: {}", thousands(stats.stops)))?;
    console.say(format!("  # of ride entries: {}", thousands(stats.ride_entries)))?;
    console.say(format!(
        "  date range: {}  -  {}",
        stats.first_date.as_deref().unwrap_or("None"),
        stats.last_date.as_deref().unwrap_or("None")
    ))?;
    console.say(format!("  Total ridership: {}", thousands(stats.total_riders)))?;
    for (day_type, riders) in &stats.by_day_type {
        console.say(format!(
            "  {} ridership: {} {}",
            day_type.label(),
            thousands(*riders),
            percent_suffix(*riders, base)
        ))?;
    }
    Ok(())
}

/// Command 1
pub fn find_stations<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) -> Result<()> {
    let pattern = console.ask("Enter partial station name (wildcards _ and %): ")?;
    if !has_wildcard(&pattern) {
        return console.say(NO_STATIONS);
    }

    let stations = queries::stations_like(session.connection(), &pattern)?;
    if stations.is_empty() {
        return console.say(NO_STATIONS);
    }
    for station in stations {
        console.say(format!("{} : {}", station.id, station.name))?;
    }
    Ok(())
}

/// Commands 2, 3 and 4
pub fn station_ridership<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
    order: RidershipOrder,
) -> Result<()> {
    let heading = match order {
        RidershipOrder::ByName => "** ridership all stations **",
        RidershipOrder::MostRiders => "** top-10 stations **",
        RidershipOrder::FewestRiders => "** least-10 stations **",
    };
    console.say(heading)?;

    for row in queries::ridership_by_station(session.connection(), order)? {
        console.say(format!(
            "{} : {} {}",
            row.name,
            thousands(row.riders),
            percent_suffix(row.riders, session.percent_total())
        ))?;
    }
    Ok(())
}

/// Command 5
pub fn stops_by_line<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) -> Result<()> {
    let color = normalize_color(&console.ask(LINE_PROMPT)?);
    let stops = queries::stops_on_line(session.connection(), &color)?;
    if stops.is_empty() {
        return console.say("No such line...");
    }

    for stop in stops {
        console.say(format!(
            "{} : direction = {} (accessible? {})",
            stop.stop_name,
            stop.direction,
            if stop.accessible { "yes" } else { "no" }
        ))?;
    }
    Ok(())
}

/// Commands 6 and 7
pub fn ridership_by_period<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
    period: Period,
) -> Result<()> {
    let rows = queries::ridership_by_period(session.connection(), period)?;
    for row in &rows {
        console.say(format!("{} : {}", row.period, thousands(row.riders)))?;
    }

    if !console.confirm("Plot? (y/n): ")? {
        return Ok(());
    }
    if rows.is_empty() {
        return console.say("Nothing to plot.");
    }

    let points = rows
        .iter()
        .filter_map(|row| row.period.parse::<f64>().ok().map(|p| (p, row.riders as f64)))
        .collect();
    let label = period.label();
    let path = session.plot_path(&format!("report_ridership_by_{}", label.to_lowercase()))?;
    session.charts().line_chart(
        &path,
        &format!("Total Ridership by {}", label),
        Axes {
            x_desc: label,
            y_desc: "Ridership",
            ..Axes::default()
        },
        &[Series::new("Ridership", points, PRIMARY)],
        false,
    )?;
    console.say(format!("Saved plot to {}", path.display()))
}

/// Command 8
pub fn compare_stations<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) -> Result<()> {
    let year = console.ask("Year to compare against? ")?;

    let first = station_year(session, console, "Enter station 1 (wildcards _ and %): ", &year)?;
    let Some(second) = station_year(session, console, "Enter station 2 (wildcards _ and %): ", &year)?
    else {
        return Ok(());
    };
    let first = first.unwrap_or_default();

    if first.is_empty() && second.is_empty() {
        return console.say(NO_STATIONS);
    }

    print_station_sample(console, "Station 1:", &first)?;
    print_station_sample(console, "Station 2:", &second)?;

    if !console.confirm("Plot? (y/n) ")? {
        return Ok(());
    }

    let series: Vec<Series> = [&first, &second]
        .into_iter()
        .zip(PALETTE)
        .filter(|(rows, _)| !rows.is_empty())
        .map(|(rows, color)| {
            let riders: Vec<f64> = rows.iter().map(|r| r.riders as f64).collect();
            Series::indexed(format!("Ridership at {}", rows[0].station_name), &riders, color)
        })
        .collect();
    let names: Vec<&str> = [&first, &second]
        .iter()
        .filter_map(|rows| rows.first().map(|r| r.station_name.as_str()))
        .collect();

    let path = session.plot_path(&format!("report_two_station_{}", year.trim()))?;
    session.charts().line_chart(
        &path,
        &format!("Daily Ridership at {} for {}", names.join(" and "), year.trim()),
        Axes {
            x_desc: "Day",
            y_desc: "Ridership",
            ..Axes::default()
        },
        &series,
        false,
    )?;
    console.say(format!("Saved plot to {}", path.display()))
}

/// Prompt for one station pattern; `None` when it has no wildcard and no query ran
fn station_year<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
    prompt: &str,
    year: &str,
) -> Result<Option<Vec<DailyRidership>>> {
    let pattern = console.ask(prompt)?;
    if !has_wildcard(&pattern) {
        console.say(NO_STATIONS)?;
        return Ok(None);
    }
    let rows = queries::daily_ridership(session.connection(), year, &pattern)?;
    debug!("{} daily rows for '{}' in {}", rows.len(), pattern, year.trim());
    Ok(Some(rows))
}

/// Station header, then the first and last few days without repeating any
fn print_station_sample<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    heading: &str,
    rows: &[DailyRidership],
) -> Result<()> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    console.say(format!("{} {} {}", heading, first.station_id, first.station_name))?;

    let tail_start = rows.len().saturating_sub(SAMPLE_ROWS).max(SAMPLE_ROWS.min(rows.len()));
    for row in rows.iter().take(SAMPLE_ROWS).chain(&rows[tail_start..]) {
        console.say(format!("{} {}", row.date, row.riders))?;
    }
    Ok(())
}

/// Command 9
pub fn station_locations<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) -> Result<()> {
    let color = normalize_color(&console.ask(LINE_PROMPT)?);
    let locations = queries::station_locations(session.connection(), &color)?;
    if locations.is_empty() {
        return console.say(format!("No such line \"{}\"...", color));
    }

    for location in &locations {
        console.say(format!(
            "{} : ({}, {})",
            location.name,
            coordinate(location.latitude),
            coordinate(location.longitude)
        ))?;
    }

    if !console.confirm("Plot? (y/n): ")? {
        return Ok(());
    }

    let points: Vec<MapPoint> = locations.iter().filter_map(map_point).collect();

    let background = session.map_image();
    if !background.exists() {
        warn!("Map image {} not found; plotting without it", background.display());
    }

    let path = session.plot_path(&format!("report_line_{}", color))?;
    session.charts().map_scatter(
        &path,
        &format!("{} line", color),
        Extent {
            min_lon: MAP_MIN_LON,
            max_lon: MAP_MAX_LON,
            min_lat: MAP_MIN_LAT,
            max_lat: MAP_MAX_LAT,
        },
        background.exists().then_some(background),
        &points,
        line_rgb(&color).unwrap_or(PRIMARY),
    )?;
    console.say(format!("Saved plot to {}", path.display()))
}

/// A plottable point, or `None` (with a warning) for missing or out-of-range coordinates
fn map_point(location: &StationLocation) -> Option<MapPoint> {
    if let Err(e) = location.validate() {
        warn!("Skipping {} with invalid coordinates: {}", location.name, e);
        return None;
    }
    match (location.latitude, location.longitude) {
        (Some(latitude), Some(longitude)) => Some(MapPoint {
            label: location.name.clone(),
            longitude,
            latitude,
        }),
        _ => {
            warn!("Skipping {} without coordinates", location.name);
            None
        }
    }
}

fn coordinate(value: Option<f64>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_has_wildcard() {
        assert!(has_wildcard("Clark%"));
        assert!(has_wildcard("_ake"));
        for plain in ["Clark/Lake", "", "Harlem-Lake"] {
            assert!(!has_wildcard(plain), "{:?}", plain);
        }
    }

    fn daily(n: usize) -> Vec<DailyRidership> {
        (1..=n)
            .map(|day| DailyRidership {
                station_id: 40010,
                station_name: "Austin".to_string(),
                date: format!("2020-01-{:02}", day),
                riders: day as i64,
            })
            .collect()
    }

    fn sample(rows: &[DailyRidership]) -> Vec<String> {
        let mut console = Console::new(Cursor::new(Vec::<u8>::new()), Vec::new());
        print_station_sample(&mut console, "Station 1:", rows).unwrap();
        String::from_utf8(console.into_output())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_sample_shows_head_and_tail() {
        let lines = sample(&daily(12));
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Station 1: 40010 Austin");
        assert_eq!(lines[5], "2020-01-05 5");
        assert_eq!(lines[6], "2020-01-08 8");
        assert_eq!(lines[10], "2020-01-12 12");
    }

    fn location(latitude: Option<f64>, longitude: Option<f64>) -> StationLocation {
        StationLocation {
            name: "Howard".to_string(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_map_point_skips_missing_and_invalid_coordinates() {
        let point = map_point(&location(Some(42.019063), Some(-87.672892))).unwrap();
        assert_eq!(point.label, "Howard");
        assert_eq!(point.latitude, 42.019063);

        assert!(map_point(&location(None, Some(-87.672892))).is_none());
        assert!(map_point(&location(Some(42.0), None)).is_none());
        assert!(map_point(&location(Some(95.0), Some(-87.6))).is_none());
        assert_eq!(coordinate(None), "None");
        assert_eq!(coordinate(Some(41.5)), "41.5");
    }

    #[test]
    fn test_short_sample_has_no_repeats() {
        assert_eq!(sample(&daily(3)).len(), 4);
        assert_eq!(sample(&daily(7)).len(), 8);
        assert!(sample(&[]).is_empty());
    }
}
