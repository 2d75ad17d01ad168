use anyhow::Context;
use std::{fs, path::Path};
use thiserror::Error;

use crate::scene::Scene;

mod lexer;
mod parser;

pub use parser::parse;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("line {line}: unrecognized input `{text}`")]
    LexerError { line: u32, text: String },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("line {line}: expected {expected}, found `{found}`")]
    Unexpected {
        line: u32,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: invalid number `{text}`")]
    InvalidNumber { line: u32, text: String },

    #[error("line {line}: invalid color `{text}`")]
    InvalidColor { line: u32, text: String },

    #[error("line {line}: unknown command `{name}`")]
    UnknownCommand { line: u32, name: String },

    #[error("line {line}: unknown material `{name}`")]
    UnknownMaterial { line: u32, name: String },

    #[error("line {line}: unknown compositing mode `{name}`, expected `nearest` or `last`")]
    UnknownCompositing { line: u32, name: String },
}

/// Read and parse a scene file, for a `width` by `height` viewport.
pub fn load<P: AsRef<Path>>(path: P, width: u32, height: u32) -> anyhow::Result<Scene> {
    let path = path.as_ref();
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene file `{}`", path.display()))?;
    let scene = parse(&input, width, height)
        .with_context(|| format!("failed to parse scene file `{}`", path.display()))?;
    Ok(scene)
}
