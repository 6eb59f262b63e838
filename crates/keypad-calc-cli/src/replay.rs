//! Scripted key replay
//!
//! A script is a string of keys. Every keypad character stands for itself;
//! named keys are written in angle brackets:
//!
//! | token     | key                                 |
//! |-----------|-------------------------------------|
//! | `<bs>`    | Backspace                           |
//! | `<enter>` | Enter (same as `=`)                 |
//! | `<esc>`   | Escape (same as `c`)                |
//! | `<wait>`  | let the error display time elapse   |
//!
//! Whitespace is ignored, so `12 + 7 <enter>` is fine.

use keypad_calc::config::EngineConfig;
use keypad_calc::core::Engine;
use keypad_calc::frontend::RecordingFrontend;
use keypad_calc::input::KeypadAction;
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// One parsed script step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptToken {
    /// A key press, in `KeyboardEvent.key` spelling
    Key(String),
    /// The error display time elapses
    Wait,
}

impl ScriptToken {
    /// How the token is written in a script
    #[must_use]
    pub fn source(&self) -> String {
        match self {
            Self::Key(key) => match key.as_str() {
                "Backspace" => "<bs>".to_string(),
                "Enter" => "<enter>".to_string(),
                "Escape" => "<esc>".to_string(),
                other => other.to_string(),
            },
            Self::Wait => "<wait>".to_string(),
        }
    }
}

fn named_token(name: &str) -> Option<ScriptToken> {
    let key = match name.to_ascii_lowercase().as_str() {
        "bs" | "backspace" => "Backspace",
        "enter" => "Enter",
        "esc" | "escape" => "Escape",
        "wait" => return Some(ScriptToken::Wait),
        _ => return None,
    };
    Some(ScriptToken::Key(key.to_string()))
}

/// Parses a replay script
pub fn parse_script(script: &str) -> CliResult<Vec<ScriptToken>> {
    let mut tokens = Vec::new();
    let mut chars = script.char_indices();

    while let Some((pos, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }
        if ch == '<' {
            let rest = &script[pos + 1..];
            let Some(end) = rest.find('>') else {
                return Err(CliError::invalid_argument(format!(
                    "unterminated '<' at offset {pos}"
                )));
            };
            let name = &rest[..end];
            let token = named_token(name).ok_or_else(|| {
                CliError::invalid_argument(format!("unknown key <{name}> at offset {pos}"))
            })?;
            tokens.push(token);
            // skip the name and the closing bracket
            for _ in 0..=name.chars().count() {
                chars.next();
            }
            continue;
        }

        let key = ch.to_string();
        if KeypadAction::from_key(&key).is_none() {
            return Err(CliError::invalid_argument(format!(
                "unknown key '{ch}' at offset {pos}"
            )));
        }
        tokens.push(ScriptToken::Key(key));
    }

    Ok(tokens)
}

/// Display state after one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    /// The token as written
    pub input: String,
    /// Display text after the step
    pub display: String,
    /// Whether the error indicator was showing
    pub error: bool,
}

/// Result of replaying a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Every step in order
    pub steps: Vec<ReplayStep>,
    /// Display text at the end
    pub display: String,
    /// Whether the script ended with the error indicator showing
    pub error: bool,
}

/// Replays `tokens` against a fresh engine
pub fn run_script(tokens: &[ScriptToken], config: EngineConfig) -> CliResult<ReplayReport> {
    let mut engine = Engine::with_config(RecordingFrontend::new(), config)?;
    let mut steps = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            ScriptToken::Key(key) => {
                engine.press_key(key);
            }
            ScriptToken::Wait => {
                if engine.frontend_mut().take_pending_reset() {
                    engine.reset_after_error();
                } else {
                    tracing::debug!("<wait> with no reset pending");
                }
            }
        }
        steps.push(ReplayStep {
            input: token.source(),
            display: engine.frontend().text().to_string(),
            error: engine.is_error(),
        });
    }

    tracing::info!(steps = steps.len(), "replay finished");
    Ok(ReplayReport {
        steps,
        display: engine.frontend().text().to_string(),
        error: engine.is_error(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn keys(tokens: &[ScriptToken]) -> Vec<String> {
        tokens.iter().map(ScriptToken::source).collect()
    }

    // ===== parse_script tests =====

    #[test]
    fn test_parse_plain_keys() {
        let tokens = parse_script("7+3=").unwrap();
        assert_eq!(keys(&tokens), vec!["7", "+", "3", "="]);
    }

    #[test]
    fn test_parse_ignores_whitespace() {
        let tokens = parse_script(" 12 +\t7 ").unwrap();
        assert_eq!(keys(&tokens), vec!["1", "2", "+", "7"]);
    }

    #[test]
    fn test_parse_named_keys() {
        let tokens = parse_script("120<bs><enter><esc><wait>").unwrap();
        assert_eq!(
            tokens,
            vec![
                ScriptToken::Key("1".into()),
                ScriptToken::Key("2".into()),
                ScriptToken::Key("0".into()),
                ScriptToken::Key("Backspace".into()),
                ScriptToken::Key("Enter".into()),
                ScriptToken::Key("Escape".into()),
                ScriptToken::Wait,
            ]
        );
    }

    #[test]
    fn test_parse_named_keys_case_insensitive() {
        let tokens = parse_script("<BS><Enter>").unwrap();
        assert_eq!(keys(&tokens), vec!["<bs>", "<enter>"]);
    }

    #[test]
    fn test_parse_unknown_char() {
        let err = parse_script("2^3").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { .. }));
        assert!(err.to_string().contains("'^'"));
    }

    #[test]
    fn test_parse_unknown_named_key() {
        let err = parse_script("1<tab>").unwrap_err();
        assert!(err.to_string().contains("<tab>"));
    }

    #[test]
    fn test_parse_unterminated_bracket() {
        let err = parse_script("1<bs").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_parse_empty_script() {
        assert!(parse_script("").unwrap().is_empty());
    }

    // ===== run_script tests =====

    #[test]
    fn test_run_simple_sum() {
        let tokens = parse_script("7+3=").unwrap();
        let report = run_script(&tokens, EngineConfig::default()).unwrap();
        assert_eq!(report.display, "10");
        assert!(!report.error);
        let shown: Vec<&str> = report.steps.iter().map(|s| s.display.as_str()).collect();
        assert_eq!(shown, vec!["7", "7", "3", "10"]);
    }

    #[test]
    fn test_run_error_then_wait() {
        let tokens = parse_script("5/0=<wait>").unwrap();
        let report = run_script(&tokens, EngineConfig::default()).unwrap();
        assert_eq!(report.steps[3].display, "Error");
        assert!(report.steps[3].error);
        assert_eq!(report.display, "0");
        assert!(!report.error);
    }

    #[test]
    fn test_run_error_without_wait() {
        let tokens = parse_script("5/0=").unwrap();
        let report = run_script(&tokens, EngineConfig::default()).unwrap();
        assert_eq!(report.display, "Error");
        assert!(report.error);
    }

    #[test]
    fn test_run_with_config() {
        let tokens = parse_script("1234567").unwrap();
        let config = EngineConfig::default().with_max_digits(5);
        let report = run_script(&tokens, config).unwrap();
        assert_eq!(report.display, "12,345");
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let config = EngineConfig::default().with_max_digits(0);
        assert!(run_script(&[], config).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let tokens = parse_script("2*3<enter>").unwrap();
        let report = run_script(&tokens, EngineConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["display"], "6");
        assert_eq!(json["steps"][3]["input"], "<enter>");
    }
}
