//! Printing of the final facts record

use crate::data::{to_tab_json, Facts};
use std::io::{self, Write};
use thiserror::Error;

/// Errors that can occur when printing facts
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("could not encode facts: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not write facts: {0}")]
    Io(#[from] io::Error),
}

/// Writes `facts` as tab-indented JSON followed by a newline
pub fn print_facts<W: Write>(out: &mut W, facts: &Facts) -> Result<(), OutputError> {
    let json = to_tab_json(facts)?;
    out.write_all(&json)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
