use americano::{SlotIndex, tournament::Points};
use std::fmt;

/// Commands accepted at the tournament prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the courts of the displayed round
    Show,
    Next,
    Prev,
    /// Adjust one slot's score
    Score { slot: SlotIndex, delta: Points },
    /// Record a court's final score in the displayed round
    Result {
        court: usize,
        team1: Points,
        team2: Points,
    },
    Rank,
    Audit,
    Save,
    Reset,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A command argument is not a valid number.
    InvalidNumber { what: &'static str, value: String },
    /// Wrong number of arguments.
    Usage(&'static str),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { what, value } => write!(f, "Invalid {what} '{value}'"),
            Self::Usage(usage) => write!(f, "Usage: {usage}"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

pub const HELP: &str = "\
Commands:
  show                     Courts of the current round
  next | prev              Move between rounds
  score SLOT DELTA         Add DELTA (may be negative) to a slot
  result COURT A B         Final score of a court this round
  rank                     Leaderboard
  audit                    Pairing coverage of this schedule
  save                     Save to the database
  reset                    Discard scores and enter a new roster
  help                     This text
  quit                     Leave
";

/// Parse one prompt line.
///
/// # Examples
///
/// ```
/// use americano_cli::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("next"), Ok(Command::Next));
/// assert_eq!(parse_command("score 3 -2"), Ok(Command::Score { slot: 3, delta: -2 }));
/// assert!(parse_command("dance").is_err());
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();

    match parts.as_slice() {
        ["show"] | ["s"] => Ok(Command::Show),
        ["next"] | ["n"] => Ok(Command::Next),
        ["prev"] | ["p"] => Ok(Command::Prev),
        ["rank"] | ["r"] => Ok(Command::Rank),
        ["audit"] => Ok(Command::Audit),
        ["save"] => Ok(Command::Save),
        ["reset"] => Ok(Command::Reset),
        ["help"] | ["?"] => Ok(Command::Help),
        ["quit"] | ["exit"] | ["q"] => Ok(Command::Quit),
        ["score", slot, delta] => Ok(Command::Score {
            slot: number("slot", slot)?,
            delta: number("delta", delta)?,
        }),
        ["score", ..] => Err(ParseError::Usage("score SLOT DELTA")),
        ["result", court, team1, team2] => Ok(Command::Result {
            court: number("court", court)?,
            team1: number("score", team1)?,
            team2: number("score", team2)?,
        }),
        ["result", ..] => Err(ParseError::Usage("result COURT A B")),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

fn number<T: std::str::FromStr>(what: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        what,
        value: value.to_string(),
    })
}
