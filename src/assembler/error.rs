//! Errors raised while assembling a Hack source file.
//!
//! Every variant aborts the current run. Line numbers are 1-based.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to read source file `{}`: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("unknown computation `{comp}` on line {line}")]
    UnknownComputation { line: usize, comp: String },

    #[error("unknown destination `{dest}` on line {line}")]
    UnknownDestination { line: usize, dest: String },

    #[error("unknown jump condition `{jump}` on line {line}")]
    UnknownJump { line: usize, jump: String },

    #[error("address `{value}` on line {line} does not fit in 15 bits (max 32767)")]
    AddressRange { line: usize, value: String },

    #[error("unresolved symbol `{symbol}` on line {line}")]
    SymbolLookup { line: usize, symbol: String },

    #[error("unable to write output file `{}`: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn syntax<S: Into<String>>(line: usize, message: S) -> Self {
        Error::Syntax { line, message: message.into() }
    }

    /// The source line the error points at, if it came from a command.
    pub fn line(&self) -> Option<usize> {
        use Error::*;
        match self {
            Syntax { line, .. }
            | UnknownComputation { line, .. }
            | UnknownDestination { line, .. }
            | UnknownJump { line, .. }
            | AddressRange { line, .. }
            | SymbolLookup { line, .. } => Some(*line),
            SourceRead { .. } | OutputWrite { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
