//! Orchestration: generate candidates, recognize them, derive trees for the accepted ones.
//!
//! [`Pipeline`] holds no I/O. Each stage returns plain data and [`PipelineReport`]
//! serializes as-is; [`write_transcript`] turns a report into the human-readable transcript
//! through an [`OutputSink`].

use std::{cell::RefCell, rc::Rc};

use serde::Serialize;

use crate::config::Config;
use crate::errors::AnbnError;
use crate::generate::{invalid_strings, valid_strings, DistractorGenerator};
use crate::pairs::pair_count;
use crate::recognizer::{scan, Rejection};
use crate::tree::{build_bounded, DerivationTree, TreeRenderer};

// ============================================================================
// OUTPUT SINKS
// ============================================================================

/// Destination for transcript lines.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// Discards everything.
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _text: &str) {}
}

/// Writes each line to stdout.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Collects output in memory, one line per `emit`.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn lines(&self) -> Vec<&str> {
        self.buffer.lines().collect()
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }
}

/// Shared, single-threaded handle to a sink.
#[derive(Clone)]
pub struct SharedOutput(pub Rc<RefCell<dyn OutputSink>>);

impl SharedOutput {
    pub fn new<T: OutputSink + 'static>(sink: T) -> Self {
        SharedOutput(Rc::new(RefCell::new(sink)))
    }

    /// Wraps a sink the caller keeps a typed handle to, e.g. an [`OutputBuffer`] read back
    /// in tests.
    pub fn from_rc<T: OutputSink + 'static>(sink: Rc<RefCell<T>>) -> Self {
        SharedOutput(sink)
    }

    pub fn emit(&self, text: &str) {
        self.0.borrow_mut().emit(text);
    }
}

// ============================================================================
// REPORT DATA
// ============================================================================

/// The recognizer's answer for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recognition {
    pub input: String,
    /// Whether the generator meant this to be a member; `None` for user-supplied input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<bool>,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

impl Recognition {
    pub fn of(input: &str, expected: Option<bool>) -> Self {
        let verdict = scan(input);
        Self {
            input: input.to_string(),
            expected,
            accepted: verdict.is_accepted(),
            rejection: verdict.rejection(),
        }
    }

    /// True when an expectation was recorded and the recognizer disagreed with it.
    pub fn is_mismatch(&self) -> bool {
        self.expected.is_some_and(|expected| expected != self.accepted)
    }
}

/// An accepted string with its tree and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    pub input: String,
    pub pairs: usize,
    pub tree: DerivationTree,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
    pub recognitions: Vec<Recognition>,
    pub accepted: Vec<String>,
    pub derivations: Vec<Derivation>,
}

impl PipelineReport {
    pub fn mismatches(&self) -> impl Iterator<Item = &Recognition> {
        self.recognitions.iter().filter(|r| r.is_mismatch())
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    renderer: TreeRenderer,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self, AnbnError> {
        config.validate()?;
        let renderer = TreeRenderer::from_config(&config);
        Ok(Self { config, renderer })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn renderer(&self) -> &TreeRenderer {
        &self.renderer
    }

    /// Members for n in `0..=max_n`, then the curated distractors followed by any random ones.
    pub fn generate(&self) -> Result<(Vec<String>, Vec<String>), AnbnError> {
        let valid = valid_strings(self.config.max_n);
        let mut invalid = invalid_strings();

        let distractors = &self.config.distractors;
        if distractors.count > 0 {
            let mut generator = match distractors.seed {
                Some(seed) => DistractorGenerator::from_seed(seed, distractors.max_len)?,
                None => DistractorGenerator::from_entropy(distractors.max_len)?,
            };
            invalid.extend(generator.generate(distractors.count));
        }

        Ok((valid, invalid))
    }

    /// One recognition per string, members first, each tagged with its expected outcome.
    pub fn recognize(&self, valid: &[String], invalid: &[String]) -> Vec<Recognition> {
        valid
            .iter()
            .map(|s| Recognition::of(s, Some(true)))
            .chain(invalid.iter().map(|s| Recognition::of(s, Some(false))))
            .collect()
    }

    pub fn recognize_all<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<Recognition> {
        inputs
            .iter()
            .map(|s| Recognition::of(s.as_ref(), None))
            .collect()
    }

    /// Accepted inputs in their original order. Duplicates are kept.
    pub fn accepted(&self, recognitions: &[Recognition]) -> Vec<String> {
        recognitions
            .iter()
            .filter(|r| r.accepted)
            .map(|r| r.input.clone())
            .collect()
    }

    pub fn derive(&self, accepted: &[String]) -> Result<Vec<Derivation>, AnbnError> {
        accepted.iter().map(|s| self.derive_one(s)).collect()
    }

    /// Pair count, tree and rendering for one string. Fails on non-members and on pair
    /// counts above `max_pairs`.
    pub fn derive_one(&self, input: &str) -> Result<Derivation, AnbnError> {
        let pairs = pair_count(input)?;
        let tree = build_bounded(pairs, self.config.max_pairs)?;
        let lines = self.renderer.render(&tree);
        Ok(Derivation {
            input: input.to_string(),
            pairs,
            tree,
            lines,
        })
    }

    pub fn run(&self) -> Result<PipelineReport, AnbnError> {
        let (valid, invalid) = self.generate()?;
        let recognitions = self.recognize(&valid, &invalid);
        let accepted = self.accepted(&recognitions);
        let derivations = self.derive(&accepted)?;
        Ok(PipelineReport {
            valid,
            invalid,
            recognitions,
            accepted,
            derivations,
        })
    }
}

// ============================================================================
// TRANSCRIPT
// ============================================================================

pub fn write_transcript(report: &PipelineReport, output: &SharedOutput) {
    output.emit("Generated strings:");
    for s in report.valid.iter().chain(&report.invalid) {
        output.emit(&format!("String: '{s}'"));
    }

    output.emit("");
    output.emit("PDA recognition:");
    for recognition in &report.recognitions {
        output.emit(&recognition_line(recognition));
    }

    output.emit("");
    output.emit("Derivation trees:");
    for derivation in &report.derivations {
        output.emit("");
        output.emit(&format!("Derivation tree for string '{}':", derivation.input));
        for line in &derivation.lines {
            output.emit(line);
        }
    }
}

pub fn recognition_line(recognition: &Recognition) -> String {
    let outcome = if recognition.accepted {
        "accepted"
    } else {
        "rejected"
    };
    format!("The string '{}' is {outcome} by the PDA.", recognition.input)
}
