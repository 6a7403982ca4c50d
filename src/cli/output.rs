//! Handles all user-facing output for the CLI.
//!
//! Colouring, JSON/YAML serialization and the trace table live here so every command
//! prints the same way.

use std::io::Write;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::args::{ColorMode, OutputFormat};
use crate::engine::{recognition_line, OutputSink, Recognition};
use crate::errors::{unspanned, AnbnError, ErrorKind, ErrorReporting, PhaseContext};
use crate::recognizer::{Action, Trace};

// ============================================================================
// TERMINAL SINK
// ============================================================================

/// Resolves `--color`; `auto` colours only when stdout is a terminal.
pub fn color_choice(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
    }
}

/// Stdout sink that colours headings and verdicts.
pub struct TerminalSink {
    stdout: StandardStream,
}

impl TerminalSink {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            stdout: StandardStream::stdout(color_choice(mode)),
        }
    }

    fn write_colored(&mut self, text: &str, color: Option<Color>, bold: bool) {
        if let Some(color) = color {
            let _ = self
                .stdout
                .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
        }
        let _ = writeln!(self.stdout, "{text}");
        let _ = self.stdout.reset();
    }
}

impl OutputSink for TerminalSink {
    fn emit(&mut self, text: &str) {
        let (color, bold) = classify(text);
        self.write_colored(text, color, bold);
    }
}

fn classify(text: &str) -> (Option<Color>, bool) {
    if text.contains("is accepted by the PDA.") || text.starts_with("accept") {
        (Some(Color::Green), false)
    } else if text.contains("is rejected by the PDA.") || text.starts_with("reject") {
        (Some(Color::Red), false)
    } else if is_heading(text) {
        (Some(Color::Yellow), true)
    } else {
        (None, false)
    }
}

fn is_heading(text: &str) -> bool {
    matches!(
        text,
        "Generated strings:" | "PDA recognition:" | "Derivation trees:"
    ) || text.starts_with("Derivation tree for string")
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Serializes `value` as pretty JSON or YAML.
pub fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, AnbnError> {
    let result = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        OutputFormat::Text => Err("text output is not a serialization format".to_string()),
    };

    result.map_err(|message| {
        PhaseContext::detached("output").report(
            ErrorKind::Serialization {
                format: format.name().to_string(),
                message,
            },
            unspanned(),
        )
    })
}

/// `check` output line, optionally with the rejection reason.
pub fn check_line(recognition: &Recognition, explain: bool) -> String {
    let line = recognition_line(recognition);
    match (&recognition.rejection, explain) {
        (Some(rejection), true) => format!("{line} ({rejection})"),
        _ => line,
    }
}

/// One line per step, then the verdict.
pub fn trace_lines(trace: &Trace) -> Vec<String> {
    let mut lines = vec![format!("Trace of '{}':", trace.input)];
    for step in &trace.steps {
        let action = match step.action {
            Action::Push => "push a",
            Action::Pop => "pop a",
            Action::Reject => "reject",
        };
        let phase = if step.b_phase { "b" } else { "a" };
        lines.push(format!(
            "  [{}] '{}' {:<6} depth={} phase={}",
            step.index, step.symbol, action, step.depth, phase
        ));
    }
    lines.push(match trace.verdict.rejection() {
        None => "accepted".to_string(),
        Some(rejection) => format!("rejected: {rejection}"),
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::trace;

    #[test]
    fn test_classify() {
        assert_eq!(
            classify("The string 'ab' is accepted by the PDA.").0,
            Some(Color::Green)
        );
        assert_eq!(
            classify("The string 'ba' is rejected by the PDA.").0,
            Some(Color::Red)
        );
        assert_eq!(classify("PDA recognition:"), (Some(Color::Yellow), true));
        assert_eq!(classify("  a"), (None, false));
    }

    #[test]
    fn test_classify_explained_lines() {
        let rejected = check_line(&Recognition::of("aab", None), true);
        assert_eq!(classify(&rejected).0, Some(Color::Red));
        let accepted = check_line(&Recognition::of("ab", None), true);
        assert_eq!(classify(&accepted).0, Some(Color::Green));
    }

    #[test]
    fn test_trace_lines() {
        let lines = trace_lines(&trace("ba"));
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("reject"));
        assert!(lines[2].starts_with("rejected:"));

        let lines = trace_lines(&trace("ab"));
        assert_eq!(lines.last().unwrap(), "accepted");
    }

    #[test]
    fn test_check_line_explains_rejections() {
        let rejected = Recognition::of("aab", None);
        assert_eq!(
            check_line(&rejected, false),
            "The string 'aab' is rejected by the PDA."
        );
        assert!(check_line(&rejected, true).contains('('));
        let accepted = Recognition::of("ab", None);
        assert!(!check_line(&accepted, true).contains('('));
    }

    #[test]
    fn test_serialize_json() {
        let text = serialize(&vec!["ab"], OutputFormat::Json).unwrap();
        assert!(text.contains("\"ab\""));
        assert!(serialize(&vec!["ab"], OutputFormat::Text).is_err());
    }
}
