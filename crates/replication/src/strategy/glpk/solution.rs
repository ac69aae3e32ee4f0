//! Solver output parsing.
//!
//! The model prints `nodes * nodes` integers in row-major order. An empty
//! output means the model had no feasible solution; anything else that falls
//! short of a full grid is a format error.

use crate::error::{FormatError, GenerateError, Result};
use corelib::{TagAwarenessRank, VbmapParams, RI};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read the RI from the solver's display file.
pub fn parse(params: &VbmapParams, path: &Path) -> Result<RI> {
    let file = File::open(path).map_err(|source| GenerateError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    parse_reader(params, BufReader::new(file))
}

/// Read the RI from any stream holding solver output.
///
/// Nothing is reserved up front beyond what the input can hold, so a huge
/// `num_nodes` with short output fails cleanly.
pub fn parse_reader<R: Read>(params: &VbmapParams, mut reader: R) -> Result<RI> {
    let n = params.num_nodes;

    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(FormatError::Io)?;

    let mut tokens = text.split_whitespace().peekable();
    if n > 0 && tokens.peek().is_none() {
        return Err(GenerateError::NoSolution);
    }

    let expected = n
        .checked_mul(n)
        .ok_or(FormatError::GridTooLarge { nodes: n })?;
    let mut values = Vec::with_capacity(expected.min(text.len()));

    for index in 0..expected {
        let token = tokens
            .next()
            .ok_or(FormatError::Truncated { index, expected })?;

        let value: i64 = token.parse().map_err(|_| FormatError::InvalidToken {
            index,
            token: token.to_owned(),
        })?;

        values.push(value != 0);
    }

    let matrix = if n == 0 {
        Vec::new()
    } else {
        values.chunks(n).map(<[bool]>::to_vec).collect()
    };

    Ok(RI::new(matrix, TagAwarenessRank::StrictlyTagAware))
}
