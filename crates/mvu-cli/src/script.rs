//! Interaction scripts.
//!
//! A script is a list of user interactions, one per line:
//!
//! ```text
//! # bump the counter, pick a row, jump to it
//! increment
//! increment
//! row:500
//! scroll
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::fmt;
use std::str::FromStr;

use mvu_counter::ids;
use mvu_runtime::Event;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while reading a script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// The text is not a known step.
    #[error("unknown step '{step}' (expected increment, decrement, row:<text> or scroll)")]
    UnknownStep { step: String },

    /// A script line holds an unknown step.
    #[error("line {line}: unknown step '{step}'")]
    InvalidLine { line: usize, step: String },
}

/// One simulated user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "text", rename_all = "lowercase")]
pub enum Step {
    /// Click the Increment button.
    Increment,
    /// Click the Decrement button.
    Decrement,
    /// Type into the row input. The text is passed through unparsed.
    Row(String),
    /// Click the scroll control.
    Scroll,
}

impl Step {
    /// Element id and event this step delivers.
    pub fn to_event(&self) -> (&'static str, Event) {
        match self {
            Self::Increment => (ids::INCREMENT, Event::Click),
            Self::Decrement => (ids::DECREMENT, Event::Click),
            Self::Row(text) => (ids::ROW_INPUT, Event::Change(text.clone())),
            Self::Scroll => (ids::SCROLL, Event::Click),
        }
    }
}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(text) = trimmed.strip_prefix("row:") {
            return Ok(Self::Row(text.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "increment" | "inc" => Ok(Self::Increment),
            "decrement" | "dec" => Ok(Self::Decrement),
            "scroll" => Ok(Self::Scroll),
            _ => Err(ScriptError::UnknownStep {
                step: trimmed.to_string(),
            }),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increment => f.write_str("increment"),
            Self::Decrement => f.write_str("decrement"),
            Self::Row(text) => write!(f, "row:{text}"),
            Self::Scroll => f.write_str("scroll"),
        }
    }
}

/// Parse a script, reporting the first bad line (1-based).
pub fn parse_script(source: &str) -> Result<Vec<Step>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            line.parse().map_err(|_| ScriptError::InvalidLine {
                line: index + 1,
                step: line.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_and_aliases() {
        assert_eq!("increment".parse(), Ok(Step::Increment));
        assert_eq!(" INC ".parse(), Ok(Step::Increment));
        assert_eq!("dec".parse(), Ok(Step::Decrement));
        assert_eq!("scroll".parse(), Ok(Step::Scroll));
    }

    #[test]
    fn row_text_is_kept_verbatim() {
        assert_eq!("row:500".parse(), Ok(Step::Row("500".to_string())));
        assert_eq!("row:abc".parse(), Ok(Step::Row("abc".to_string())));
        assert_eq!("row:".parse(), Ok(Step::Row(String::new())));
    }

    #[test]
    fn unknown_step_is_rejected() {
        assert_eq!(
            "jump".parse::<Step>(),
            Err(ScriptError::UnknownStep {
                step: "jump".to_string()
            })
        );
    }

    #[test]
    fn script_skips_comments_and_reports_line_numbers() {
        let source = "# warm up\nincrement\n\nrow:3\nscroll\n";
        assert_eq!(
            parse_script(source).unwrap(),
            vec![Step::Increment, Step::Row("3".to_string()), Step::Scroll]
        );

        let err = parse_script("increment\n\nfly\n").unwrap_err();
        assert_eq!(
            err,
            ScriptError::InvalidLine {
                line: 3,
                step: "fly".to_string()
            }
        );
    }

    #[test]
    fn steps_map_to_controls() {
        assert_eq!(Step::Increment.to_event(), (ids::INCREMENT, Event::Click));
        assert_eq!(
            Step::Row("7".to_string()).to_event(),
            (ids::ROW_INPUT, Event::Change("7".to_string()))
        );
    }
}
