//! Line commands accepted by the interactive session.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::commands::OpenTarget;

pub const HELP: &str = "\
Commands:
  start             start the PhotoPrism server
  stop              stop the PhotoPrism server
  status            show whether the server is running
  open <target>     open web, pictures, data or logs
  logs              open the server log
  help              show this help
  quit              stop the server and exit";

/// One line of session input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Stop,
    Status,
    Open(OpenTarget),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSessionError(String);

impl fmt::Display for ParseSessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (type 'help' for commands)", self.0)
    }
}

impl std::error::Error for ParseSessionError {}

impl FromStr for SessionCommand {
    type Err = ParseSessionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(ParseSessionError("Empty command".to_string()));
        };

        let parsed = match command.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "stop" => Self::Stop,
            "status" => Self::Status,
            "logs" => Self::Open(OpenTarget::Logs),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "open" => {
                let target = words.next().unwrap_or("web");
                let target = <OpenTarget as ValueEnum>::from_str(target, true)
                    .map_err(|_| ParseSessionError(format!("Unknown open target '{target}'")))?;
                Self::Open(target)
            }
            other => return Err(ParseSessionError(format!("Unknown command '{other}'"))),
        };

        match words.next() {
            Some(extra) => Err(ParseSessionError(format!("Unexpected argument '{extra}'"))),
            None => Ok(parsed),
        }
    }
}
