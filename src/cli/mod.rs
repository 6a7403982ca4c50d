//! The anbn command-line interface.
//!
//! Parses arguments, builds a [`Pipeline`] from the configuration, and prints results.
//! Errors are reported through miette on stderr with exit status 2; `check` exits with
//! status 1 when any candidate is rejected.

use std::process;

use clap::Parser;
use serde::Serialize;

use crate::cli::args::{AnbnArgs, Command, OutputFormat, PipelineArgs};
use crate::cli::output::{check_line, serialize, trace_lines, TerminalSink};
use crate::config::Config;
use crate::discovery::InputDiscoverer;
use crate::engine::{write_transcript, Pipeline, SharedOutput};
use crate::errors::{print_error, AnbnError, ErrorReporting, PhaseContext};
use crate::recognizer::trace;
use crate::tree::render::EPSILON;
use crate::tree::{build, checked_pairs, DerivationArena};

pub mod args;
pub mod output;

const EXIT_REJECTED: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// The main entry point for the CLI.
pub fn run() {
    let args = AnbnArgs::parse();

    match dispatch(args) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            print_error(e);
            process::exit(EXIT_ERROR);
        }
    }
}

fn dispatch(args: AnbnArgs) -> Result<i32, AnbnError> {
    let output = SharedOutput::new(TerminalSink::new(args.color));

    match args.command {
        Command::Run { pipeline, format } => {
            let pipeline = Pipeline::new(resolve_config(&pipeline)?)?;
            let report = pipeline.run()?;
            match format {
                OutputFormat::Text => write_transcript(&report, &output),
                _ => output.emit(&serialize(&report, format)?),
            }
            Ok(0)
        }

        Command::Generate { pipeline, format } => {
            let pipeline = Pipeline::new(resolve_config(&pipeline)?)?;
            let (valid, invalid) = pipeline.generate()?;
            match format {
                OutputFormat::Text => {
                    for s in valid.iter().chain(&invalid) {
                        output.emit(&format!("String: '{s}'"));
                    }
                }
                _ => {
                    #[derive(Serialize)]
                    struct Generated {
                        valid: Vec<String>,
                        invalid: Vec<String>,
                    }
                    output.emit(&serialize(&Generated { valid, invalid }, format)?);
                }
            }
            Ok(0)
        }

        Command::Check {
            strings,
            path,
            explain,
            format,
        } => {
            let mut inputs: Vec<String> = strings.iter().map(|s| normalize(s)).collect();
            if let Some(path) = path {
                inputs.extend(
                    InputDiscoverer::read_inputs(path)?
                        .into_iter()
                        .map(|input| input.text),
                );
            }

            let pipeline = Pipeline::new(Config::default())?;
            let recognitions = pipeline.recognize_all(&inputs);
            match format {
                OutputFormat::Text => {
                    for recognition in &recognitions {
                        output.emit(&check_line(recognition, explain));
                    }
                }
                _ => output.emit(&serialize(&recognitions, format)?),
            }

            Ok(if recognitions.iter().all(|r| r.accepted) {
                0
            } else {
                EXIT_REJECTED
            })
        }

        Command::Tree {
            n,
            arena,
            config,
            format,
        } => {
            let config = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            let pipeline = Pipeline::new(config)?;
            let pairs = checked_pairs(n)?;
            let lines = if arena {
                let limit = pipeline.config().max_arena_pairs;
                if pairs > limit {
                    return Err(PhaseContext::detached("tree")
                        .pair_limit_exceeded(pairs, limit)
                        .with_help("raise `max_arena_pairs` in a --config file"));
                }
                let arena = DerivationArena::try_build(pairs)?;
                pipeline.renderer().render_arena(&arena)
            } else {
                let limit = pipeline.config().max_pairs;
                if pairs > limit {
                    return Err(PhaseContext::detached("tree")
                        .pair_limit_exceeded(pairs, limit)
                        .with_help("pass --arena to render trees this large"));
                }
                pipeline.renderer().render(&build(pairs))
            };
            emit_lines(&output, format, &lines)?;
            Ok(0)
        }

        Command::Derive { input, format } => {
            let pipeline = Pipeline::new(Config::default())?;
            let derivation = pipeline.derive_one(&normalize(&input))?;
            match format {
                OutputFormat::Text => {
                    output.emit(&format!(
                        "Derivation tree for string '{}' ({} pairs):",
                        derivation.input, derivation.pairs
                    ));
                    for line in &derivation.lines {
                        output.emit(line);
                    }
                }
                _ => output.emit(&serialize(&derivation, format)?),
            }
            Ok(0)
        }

        Command::Trace { input, format } => {
            let trace = trace(&normalize(&input));
            match format {
                OutputFormat::Text => trace_lines(&trace).iter().for_each(|l| output.emit(l)),
                _ => output.emit(&serialize(&trace, format)?),
            }
            Ok(0)
        }
    }
}

/// File values first, then any flags given on the command line.
fn resolve_config(args: &PipelineArgs) -> Result<Config, AnbnError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(max_n) = args.max_n {
        config.max_n = max_n;
    }
    if let Some(count) = args.distractors {
        config.distractors.count = count;
    }
    if let Some(seed) = args.seed {
        config.distractors.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

/// `ε` on the command line stands for the empty string.
fn normalize(input: &str) -> String {
    if input == EPSILON {
        String::new()
    } else {
        input.to_string()
    }
}

fn emit_lines(output: &SharedOutput, format: OutputFormat, lines: &[String]) -> Result<(), AnbnError> {
    match format {
        OutputFormat::Text => lines.iter().for_each(|line| output.emit(line)),
        _ => output.emit(&serialize(&lines, format)?),
    }
    Ok(())
}
