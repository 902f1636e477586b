//! Host-level errors: process-boundary failures the language itself cannot
//! represent as a `Value::Err` (§4.10). These never leak into evaluation
//! results — an in-language error is always a `Value`, never a `Result`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
