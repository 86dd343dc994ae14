//! Canned, parameterized queries against the ridership database.
//!
//! Every user-supplied string is bound as a parameter. An empty result is an
//! empty `Vec`; errors are reserved for the database itself failing.

use crate::error::Result;
use crate::models::DayType;
use rusqlite::{params, Connection};
use validator::Validate;

/// Headline numbers printed when the reporter starts
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralStats {
    pub stations: i64,
    pub stops: i64,
    pub ride_entries: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub total_riders: i64,
    pub by_day_type: Vec<(DayType, i64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationRidership {
    pub name: String,
    pub riders: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RidershipOrder {
    ByName,
    MostRiders,
    FewestRiders,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStop {
    pub stop_name: String,
    pub direction: String,
    pub accessible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month,
    Year,
}

impl Period {
    fn strftime(&self) -> &'static str {
        match self {
            Period::Month => "%m",
            Period::Year => "%Y",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Month => "Month",
            Period::Year => "Year",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRidership {
    pub period: String,
    pub riders: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRidership {
    pub station_id: i64,
    pub station_name: String,
    pub date: String,
    pub riders: i64,
}

/// Coordinates may be NULL in the database; range checks only apply to present values
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct StationLocation {
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

pub fn total_ridership(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row(
        "SELECT COALESCE(SUM(Num_Riders), 0) FROM Ridership",
        [],
        |r| r.get(0),
    )?)
}

pub fn general_stats(conn: &Connection) -> Result<GeneralStats> {
    let count = |table: &str| -> Result<i64> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?)
    };

    let (first_date, last_date) = conn.query_row(
        "SELECT strftime('%Y-%m-%d', MIN(Ride_Date)), strftime('%Y-%m-%d', MAX(Ride_Date)) FROM Ridership",
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;

    let mut by_day_type = Vec::with_capacity(DayType::ALL.len());
    for day_type in DayType::ALL {
        let riders: i64 = conn.query_row(
            "SELECT COALESCE(SUM(Num_Riders), 0) FROM Ridership WHERE Type_of_Day = ?1",
            [day_type.code()],
            |r| r.get(0),
        )?;
        by_day_type.push((day_type, riders));
    }

    Ok(GeneralStats {
        stations: count("Stations")?,
        stops: count("Stops")?,
        ride_entries: count("Ridership")?,
        first_date,
        last_date,
        total_riders: total_ridership(conn)?,
        by_day_type,
    })
}

/// Stations whose name matches a LIKE pattern, ordered by name
pub fn stations_like(conn: &Connection, pattern: &str) -> Result<Vec<Station>> {
    let mut stmt = conn.prepare(
        "SELECT Station_ID, Station_Name FROM Stations WHERE Station_Name LIKE ?1 ORDER BY Station_Name ASC",
    )?;
    let rows = stmt
        .query_map([pattern], |r| {
            Ok(Station {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn ridership_by_station(conn: &Connection, order: RidershipOrder) -> Result<Vec<StationRidership>> {
    let tail = match order {
        RidershipOrder::ByName => "ORDER BY Stations.Station_Name ASC",
        RidershipOrder::MostRiders => "ORDER BY SUM(Ridership.Num_Riders) DESC LIMIT 10",
        RidershipOrder::FewestRiders => "ORDER BY SUM(Ridership.Num_Riders) ASC LIMIT 10",
    };
    let sql = format!(
        "SELECT Stations.Station_Name, SUM(Ridership.Num_Riders) \
         FROM Ridership INNER JOIN Stations ON Stations.Station_ID = Ridership.Station_ID \
         GROUP BY Stations.Station_Name {}",
        tail
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |r| {
            Ok(StationRidership {
                name: r.get(0)?,
                riders: r.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Stops served by the line of an exact (already normalized) color
pub fn stops_on_line(conn: &Connection, color: &str) -> Result<Vec<LineStop>> {
    let mut stmt = conn.prepare(
        "SELECT Stops.Stop_Name, Stops.Direction, Stops.ADA FROM Stops \
         INNER JOIN StopDetails ON Stops.Stop_ID = StopDetails.Stop_ID \
         INNER JOIN Lines ON StopDetails.Line_ID = Lines.Line_ID \
         WHERE Lines.Color = ?1 ORDER BY Stops.Stop_Name ASC",
    )?;
    let rows = stmt
        .query_map([color], |r| {
            Ok(LineStop {
                stop_name: r.get(0)?,
                direction: r.get(1)?,
                accessible: r.get::<_, Option<i64>>(2)?.unwrap_or(0) != 0,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Total riders per calendar month or year, in chronological order
pub fn ridership_by_period(conn: &Connection, period: Period) -> Result<Vec<PeriodRidership>> {
    let mut stmt = conn.prepare(
        "SELECT strftime(?1, Ride_Date) AS Period, SUM(Num_Riders) FROM Ridership \
         GROUP BY Period ORDER BY Period ASC",
    )?;
    let rows = stmt
        .query_map([period.strftime()], |r| {
            Ok(PeriodRidership {
                period: r.get::<_, Option<String>>(0)?.unwrap_or_default(),
                riders: r.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Daily rows for stations matching `pattern` within one calendar year, by date
pub fn daily_ridership(conn: &Connection, year: &str, pattern: &str) -> Result<Vec<DailyRidership>> {
    let mut stmt = conn.prepare(
        "SELECT Ridership.Station_ID, Stations.Station_Name, strftime('%Y-%m-%d', Ride_Date), Num_Riders \
         FROM Ridership INNER JOIN Stations ON Ridership.Station_ID = Stations.Station_ID \
         WHERE strftime('%Y', Ride_Date) = ?1 AND Station_Name LIKE ?2 \
         ORDER BY Ride_Date ASC",
    )?;
    let rows = stmt
        .query_map(params![year.trim(), pattern], |r| {
            Ok(DailyRidership {
                station_id: r.get(0)?,
                station_name: r.get(1)?,
                date: r.get(2)?,
                riders: r.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Distinct station coordinates along the line of an exact color
pub fn station_locations(conn: &Connection, color: &str) -> Result<Vec<StationLocation>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT Stations.Station_Name, Stops.Latitude, Stops.Longitude FROM Stops \
         INNER JOIN StopDetails ON StopDetails.Stop_ID = Stops.Stop_ID \
         INNER JOIN Lines ON StopDetails.Line_ID = Lines.Line_ID \
         INNER JOIN Stations ON Stations.Station_ID = Stops.Station_ID \
         WHERE Lines.Color = ?1 ORDER BY Stations.Station_Name ASC",
    )?;
    let rows = stmt
        .query_map([color], |r| {
            Ok(StationLocation {
                name: r.get(0)?,
                latitude: r.get(1)?,
                longitude: r.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
