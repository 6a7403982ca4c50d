//! anbn Error Handling
//!
//! Every fallible operation in the crate returns [`AnbnError`]. Errors are built through the
//! [`ErrorReporting`] trait so that the source, span, diagnostic code and help text are filled
//! in consistently; rendering is left to `miette`.
//!
//! Rejection by the recognizer is *not* an error. Errors only arise when a caller asks for
//! something that needs a member of the language (a derivation, a pair count) or when
//! configuration and arguments are out of range.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::recognizer::Rejection;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// The text an error points into, usually the candidate string itself.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context from a candidate string or file content.
    pub fn from_input(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create a fallback when there is no meaningful source to show.
    pub fn fallback(context: &str) -> Self {
        Self {
            name: "fallback".to_string(),
            content: format!("// {}", context),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::fallback("default context")
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The single error type: what went wrong, where, and how to help.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct AnbnError {
    pub kind: ErrorKind,
    pub source_info: SourceInfo,
    pub diagnostic_info: DiagnosticInfo,
}

/// All error kinds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("'{input}' is not of the form a^n b^n: {rejection}")]
    NotInLanguage { input: String, rejection: Rejection },

    #[error("{requested} pairs exceeds the derivation limit of {limit}")]
    PairLimitExceeded { requested: usize, limit: usize },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("failed to write {format} output: {message}")]
    Serialization { format: String, message: String },

    #[error("grammar rejected '{input}': {message}")]
    GrammarMismatch { input: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Derivation,
    Configuration,
    Output,
}

/// Context-specific source information
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. }
            | Self::NotInLanguage { .. }
            | Self::GrammarMismatch { .. } => ErrorCategory::Input,

            Self::PairLimitExceeded { .. } => ErrorCategory::Derivation,

            Self::InvalidPath { .. } | Self::InvalidConfig { .. } => ErrorCategory::Configuration,

            Self::Serialization { .. } => ErrorCategory::Output,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::NotInLanguage { .. } => "not_in_language",
            Self::PairLimitExceeded { .. } => "pair_limit_exceeded",
            Self::InvalidPath { .. } => "invalid_path",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::Serialization { .. } => "serialization",
            Self::GrammarMismatch { .. } => "grammar_mismatch",
        }
    }

    fn default_help(&self) -> Option<String> {
        match self {
            Self::NotInLanguage { .. } => Some(
                "only strings accepted by the PDA have a pair count and a derivation tree".into(),
            ),
            Self::PairLimitExceeded { .. } => Some(
                "raise `max_pairs` (or `max_arena_pairs` for `tree --arena`) in the configuration".into(),
            ),
            Self::InvalidConfig { .. } => Some(
                "known fields: max_n, max_pairs, max_arena_pairs, indent_unit, epsilon, distractors".into(),
            ),
            _ => None,
        }
    }
}

impl AnbnError {
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Replaces the help text generated for the error kind.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }

    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::InvalidArgument { .. } => "invalid value".into(),
            ErrorKind::NotInLanguage { rejection, .. } => rejection.label().into(),
            ErrorKind::PairLimitExceeded { .. } => "too many pairs".into(),
            ErrorKind::InvalidPath { .. } => "invalid path".into(),
            ErrorKind::InvalidConfig { .. } => "configuration issue".into(),
            ErrorKind::Serialization { .. } => "serialization failed".into(),
            ErrorKind::GrammarMismatch { .. } => "grammar stopped here".into(),
        }
    }
}

impl Diagnostic for AnbnError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

// ============================================================================
// ERROR CONSTRUCTION
// ============================================================================

/// Context-aware error creation - each context knows how to create appropriate errors
pub trait ErrorReporting {
    /// Create an error with context-appropriate enhancements
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> AnbnError;

    fn invalid_argument(&self, argument: &str, reason: &str, span: SourceSpan) -> AnbnError {
        self.report(
            ErrorKind::InvalidArgument {
                argument: argument.into(),
                reason: reason.into(),
            },
            span,
        )
    }

    fn not_in_language(&self, input: &str, rejection: Rejection) -> AnbnError {
        let span = rejection.span_in(input);
        self.report(
            ErrorKind::NotInLanguage {
                input: input.into(),
                rejection,
            },
            span,
        )
    }

    fn pair_limit_exceeded(&self, requested: usize, limit: usize) -> AnbnError {
        self.report(
            ErrorKind::PairLimitExceeded { requested, limit },
            unspanned(),
        )
    }

    fn invalid_config(&self, message: &str, span: SourceSpan) -> AnbnError {
        self.report(
            ErrorKind::InvalidConfig {
                message: message.into(),
            },
            span,
        )
    }
}

/// General-purpose error creation context: a source plus the pipeline phase it belongs to.
pub struct PhaseContext {
    pub source: SourceContext,
    pub phase: String,
}

impl PhaseContext {
    pub fn new(source: SourceContext, phase: impl Into<String>) -> Self {
        Self {
            source,
            phase: phase.into(),
        }
    }

    /// A context whose source is a single candidate string.
    pub fn for_input(input: &str, phase: impl Into<String>) -> Self {
        Self::new(SourceContext::from_input("input", input), phase)
    }

    /// A context with no meaningful source text.
    pub fn detached(phase: &str) -> Self {
        Self::new(SourceContext::fallback(phase), phase)
    }
}

impl ErrorReporting for PhaseContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> AnbnError {
        let error_code = format!("anbn::{}::{}", self.phase, kind.code_suffix());
        let help = kind.default_help();

        AnbnError {
            kind,
            source_info: SourceInfo {
                source: self.source.to_named_source(),
                primary_span: span,
                phase: self.phase.clone(),
            },
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }
}

/// Placeholder span for errors not tied to a location in the source.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

/// Byte span of the character at `index` (a char index, not a byte offset).
/// An index at or past the end yields an empty span at the end of the input.
pub fn char_span(input: &str, index: usize) -> SourceSpan {
    match input.char_indices().nth(index) {
        Some((offset, c)) => SourceSpan::from(offset..offset + c.len_utf8()),
        None => SourceSpan::from(input.len()..input.len()),
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints an AnbnError with full miette diagnostics to stderr.
pub fn print_error(error: AnbnError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
