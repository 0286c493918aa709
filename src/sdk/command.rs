use crate::sdk::session::{GeoPoint, SelectionMode};
use chrono::{NaiveDate, NaiveTime};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// One user action in the interactive session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Mode(SelectionMode),
    Click(GeoPoint),
    Date(NaiveDate),
    Time(NaiveTime),
    Passengers(i64),
    Reset,
    Predict,
    Show,
    Export(PathBuf),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid {what}: {value:?}")]
    Invalid { what: &'static str, value: String },
}

pub const HELP: &str = "\
Commands:
  mode pickup|dropoff   choose which point the next click sets
  click <lat> <lng>     click the map
  date YYYY-MM-DD       trip date
  time HH:MM[:SS]       trip time
  passengers <1-8>      number of passengers
  reset                 clear both locations
  predict               ask the fare service for an estimate
  show                  redraw the map
  export <path>         write the map as GeoJSON
  help                  this text
  quit                  end the session";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        match (verb.as_str(), args.as_slice()) {
            ("mode", [mode]) => match mode.to_ascii_lowercase().as_str() {
                "pickup" => Ok(Command::Mode(SelectionMode::Pickup)),
                "dropoff" => Ok(Command::Mode(SelectionMode::Dropoff)),
                _ => Err(invalid("mode", mode)),
            },
            ("mode", _) => Err(CommandError::Usage("mode pickup|dropoff")),

            ("click", [lat, lng]) => {
                let latitude = parse_float("latitude", lat)?;
                let longitude = parse_float("longitude", lng)?;
                GeoPoint::checked(latitude, longitude)
                    .map(Command::Click)
                    .ok_or_else(|| invalid("coordinates", &format!("{} {}", lat, lng)))
            }
            ("click", _) => Err(CommandError::Usage("click <lat> <lng>")),

            ("date", [date]) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(Command::Date)
                .map_err(|_| invalid("date", date)),
            ("date", _) => Err(CommandError::Usage("date YYYY-MM-DD")),

            ("time", [time]) => NaiveTime::parse_from_str(time, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
                .map(Command::Time)
                .map_err(|_| invalid("time", time)),
            ("time", _) => Err(CommandError::Usage("time HH:MM[:SS]")),

            ("passengers", [count]) => count
                .parse::<i64>()
                .map(Command::Passengers)
                .map_err(|_| invalid("passenger count", count)),
            ("passengers", _) => Err(CommandError::Usage("passengers <1-8>")),

            ("export", [path]) => Ok(Command::Export(PathBuf::from(path))),
            ("export", _) => Err(CommandError::Usage("export <path>")),

            ("reset", []) => Ok(Command::Reset),
            ("predict", []) => Ok(Command::Predict),
            ("show", []) => Ok(Command::Show),
            ("help", _) => Ok(Command::Help),
            ("quit" | "exit", []) => Ok(Command::Quit),

            ("reset" | "predict" | "show" | "quit" | "exit", _) => {
                Err(CommandError::Usage("this command takes no arguments"))
            }
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_float(what: &'static str, raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>().map_err(|_| invalid(what, raw))
}

fn invalid(what: &'static str, value: &str) -> CommandError {
    CommandError::Invalid {
        what,
        value: value.to_string(),
    }
}
