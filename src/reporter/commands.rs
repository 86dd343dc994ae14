use super::console::Console;
use super::handlers;
use super::queries::{Period, RidershipOrder};
use super::session::Session;
use crate::error::{Result, TrackerError};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// One entry of the reporter's command menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FindStations,
    AllStationRidership,
    TopStations,
    BottomStations,
    StopsByLine,
    RidershipByMonth,
    RidershipByYear,
    CompareStations,
    StationLocations,
    Exit,
}

impl FromStr for Command {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(Command::FindStations),
            "2" => Ok(Command::AllStationRidership),
            "3" => Ok(Command::TopStations),
            "4" => Ok(Command::BottomStations),
            "5" => Ok(Command::StopsByLine),
            "6" => Ok(Command::RidershipByMonth),
            "7" => Ok(Command::RidershipByYear),
            "8" => Ok(Command::CompareStations),
            "9" => Ok(Command::StationLocations),
            "x" => Ok(Command::Exit),
            other => Err(TrackerError::InvalidInput(format!("unknown command '{}'", other))),
        }
    }
}

impl Command {
    /// Run the command to completion against the session
    pub fn execute<R: BufRead, W: Write>(
        self,
        session: &Session,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        match self {
            Command::FindStations => handlers::find_stations(session, console),
            Command::AllStationRidership => {
                handlers::station_ridership(session, console, RidershipOrder::ByName)
            }
            Command::TopStations => {
                handlers::station_ridership(session, console, RidershipOrder::MostRiders)
            }
            Command::BottomStations => {
                handlers::station_ridership(session, console, RidershipOrder::FewestRiders)
            }
            Command::StopsByLine => handlers::stops_by_line(session, console),
            Command::RidershipByMonth => handlers::ridership_by_period(session, console, Period::Month),
            Command::RidershipByYear => handlers::ridership_by_period(session, console, Period::Year),
            Command::CompareStations => handlers::compare_stations(session, console),
            Command::StationLocations => handlers::station_locations(session, console),
            Command::Exit => Ok(()),
        }
    }
}
