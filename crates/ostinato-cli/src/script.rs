//! Footswitch script parsing.
//!
//! A script is a plain text file of `SECONDS:SWITCH` lines, one press per
//! line, with `#` comments and blank lines ignored:
//!
//! ```text
//! # record one bar, then overdub
//! 0.5:activate
//! 2.5:activate
//! 3.0:dub
//! 5.0:activate
//! ```
//!
//! Two presses of the same switch within the double-press window come out
//! of the surface as a reset, exactly as they would on hardware. Presses
//! of the same switch must be spaced by at least two audio blocks so the
//! release between them is observed; at typical block sizes anything
//! slower than ~50 ms apart is safe.

use ostinato_control::Switch;
use std::path::Path;

/// Script parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A line did not match `SECONDS:SWITCH`.
    #[error("script line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The script file could not be read.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// One scheduled footswitch press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptEvent {
    /// When the press lands, in seconds from the start of the input.
    pub at_secs: f64,
    /// Which switch is pressed.
    pub switch: Switch,
}

/// Parses script text into events sorted by time.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    let mut events = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw_line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let Some((time_str, switch_str)) = content.split_once(':') else {
            return Err(ScriptError::Parse {
                line,
                message: format!("expected SECONDS:SWITCH, got {content:?}"),
            });
        };

        let at_secs: f64 = time_str.trim().parse().map_err(|_| ScriptError::Parse {
            line,
            message: format!("invalid time {:?}", time_str.trim()),
        })?;
        if at_secs < 0.0 || !at_secs.is_finite() {
            return Err(ScriptError::Parse {
                line,
                message: format!("time must be finite and non-negative, got {at_secs}"),
            });
        }

        let switch = match switch_str.trim().to_ascii_lowercase().as_str() {
            "activate" => Switch::Activate,
            "reset" => Switch::Reset,
            "undo" => Switch::Undo,
            "redo" => Switch::Redo,
            "dub" => Switch::Dub,
            other => {
                return Err(ScriptError::Parse {
                    line,
                    message: format!(
                        "unknown switch {other:?} (expected activate, reset, undo, redo, or dub)"
                    ),
                });
            }
        };

        events.push(ScriptEvent { at_secs, switch });
    }

    events.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
    Ok(events)
}

/// Loads and parses a script file.
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<ScriptEvent>, ScriptError> {
    let text = std::fs::read_to_string(path)?;
    parse_script(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_script() {
        let events = parse_script("0.5:activate\n2.5:activate\n3.0:dub\n").unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].switch, Switch::Activate);
        assert_eq!(events[2].switch, Switch::Dub);
        assert!((events[1].at_secs - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_comments_and_blanks_ignored() {
        let text = "# header\n\n1.0:undo # inline comment\n   \n2.0:redo\n";
        let events = parse_script(text).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].switch, Switch::Undo);
    }

    #[test]
    fn test_events_sorted_by_time() {
        let events = parse_script("5.0:undo\n1.0:activate\n3.0:dub\n").unwrap();
        let times: Vec<f64> = events.iter().map(|e| e.at_secs).collect();
        assert_eq!(times, [1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_switch_names_case_insensitive() {
        let events = parse_script("1.0:ACTIVATE\n").unwrap();
        assert_eq!(events[0].switch, Switch::Activate);
    }

    #[test]
    fn test_bad_time_reports_line() {
        let err = parse_script("0.5:activate\nnope:undo\n").unwrap_err();
        match err {
            ScriptError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_switch_rejected() {
        assert!(parse_script("1.0:stomp\n").is_err());
    }

    #[test]
    fn test_negative_time_rejected() {
        assert!(parse_script("-1.0:undo\n").is_err());
    }

    #[test]
    fn test_missing_colon_rejected() {
        assert!(parse_script("1.0 undo\n").is_err());
    }
}
