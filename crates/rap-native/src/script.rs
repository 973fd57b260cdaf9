//! Line-oriented command script that stands in for input devices.
//!
//! ```text
//! # comment
//! drag left 0.3        # absolute hand position
//! press right ArrowUp  # focused-hand key, optional `shift`
//! key w                # both-hands key or digit jump
//! blur right
//! lock on
//! target 2/3
//! snap
//! tick 60              # frames at 60 Hz
//! describe
//! reset
//! ```

use rap_core::RatioTerm;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` is missing its {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("`{0}` is not a hand (expected left or right)")]
    InvalidHand(String),
    #[error("`{0}` is not on or off")]
    InvalidToggle(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Drag(RatioTerm, f64),
    Press {
        term: RatioTerm,
        key: String,
        shift: bool,
    },
    Key {
        key: String,
        shift: bool,
    },
    Blur(RatioTerm),
    Lock(bool),
    Target(f64),
    Snap,
    Tick(u32),
    Describe,
    Reset,
}

/// `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(None);
    };

    let command = match name {
        "drag" => {
            let term = parse_hand(parts.next().ok_or(CommandError::MissingArgument {
                command: "drag",
                what: "hand",
            })?)?;
            let value = parse_number(parts.next().ok_or(CommandError::MissingArgument {
                command: "drag",
                what: "position",
            })?)?;
            Command::Drag(term, value)
        }
        "press" => {
            let term = parse_hand(parts.next().ok_or(CommandError::MissingArgument {
                command: "press",
                what: "hand",
            })?)?;
            let key = parts.next().ok_or(CommandError::MissingArgument {
                command: "press",
                what: "key",
            })?;
            Command::Press {
                term,
                key: key.to_string(),
                shift: parts.next() == Some("shift"),
            }
        }
        "key" => {
            let key = parts.next().ok_or(CommandError::MissingArgument {
                command: "key",
                what: "key",
            })?;
            Command::Key {
                key: key.to_string(),
                shift: parts.next() == Some("shift"),
            }
        }
        "blur" => Command::Blur(parse_hand(parts.next().ok_or(
            CommandError::MissingArgument {
                command: "blur",
                what: "hand",
            },
        )?)?),
        "lock" => match parts.next() {
            Some("on") => Command::Lock(true),
            Some("off") => Command::Lock(false),
            Some(other) => return Err(CommandError::InvalidToggle(other.to_string())),
            None => {
                return Err(CommandError::MissingArgument {
                    command: "lock",
                    what: "on/off",
                })
            }
        },
        "target" => {
            let raw = parts.next().ok_or(CommandError::MissingArgument {
                command: "target",
                what: "ratio",
            })?;
            Command::Target(parse_ratio(raw)?)
        }
        "snap" => Command::Snap,
        "tick" => {
            let frames = match parts.next() {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?,
                None => 1,
            };
            Command::Tick(frames)
        }
        "describe" => Command::Describe,
        "reset" => Command::Reset,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_hand(raw: &str) -> Result<RatioTerm, CommandError> {
    match raw {
        "left" | "antecedent" => Ok(RatioTerm::Antecedent),
        "right" | "consequent" => Ok(RatioTerm::Consequent),
        other => Err(CommandError::InvalidHand(other.to_string())),
    }
}

fn parse_number(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::InvalidNumber(raw.to_string()))
}

/// `0.5` or `1/2`.
fn parse_ratio(raw: &str) -> Result<f64, CommandError> {
    match raw.split_once('/') {
        Some((num, den)) => {
            let num = parse_number(num)?;
            let den = parse_number(den)?;
            if den == 0.0 {
                return Err(CommandError::InvalidNumber(raw.to_string()));
            }
            Ok(num / den)
        }
        None => parse_number(raw),
    }
}
