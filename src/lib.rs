pub use crate::errors::{AnbnError, ErrorKind};
pub use crate::recognizer::{accepts, scan, Rejection, Verdict};
pub use crate::tree::{build, render, DerivationTree};

pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod generate;
pub mod pairs;
pub mod recognizer;
pub mod symbol;
pub mod syntax;
pub mod tree;
