//! Command scripts
//!
//! One command per line:
//!
//! ```text
//! # grow, then edit the new corner
//! add-row
//! add-column
//! set 4 4 corner
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. The value of `set`
//! is the rest of the line after the column index.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use cellgrid_core::GridModel;

/// A single grid command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    AddRow,
    RemoveRow,
    AddColumn,
    RemoveColumn,
    Set {
        row: usize,
        col: usize,
        value: String,
    },
}

impl Op {
    /// Apply the command. Returns whether the grid changed.
    pub fn apply(&self, model: &GridModel) -> Result<bool> {
        let changed = match self {
            Op::AddRow => model.add_row(),
            Op::RemoveRow => model.remove_row(),
            Op::AddColumn => model.add_column(),
            Op::RemoveColumn => model.remove_column(),
            Op::Set { row, col, value } => model
                .try_set_cell_value(*row, *col, value.as_str())
                .with_context(|| format!("Cannot set cell ({}, {})", row, col))?,
        };
        Ok(changed)
    }
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (line, ""),
        };

        let op = match name {
            "add-row" => Op::AddRow,
            "remove-row" => Op::RemoveRow,
            "add-column" | "add-col" => Op::AddColumn,
            "remove-column" | "remove-col" => Op::RemoveColumn,
            "set" => return parse_set(rest),
            "" => bail!("empty command"),
            other => bail!("unknown command '{}'", other),
        };

        if !rest.is_empty() {
            bail!("'{}' takes no arguments", name);
        }
        Ok(op)
    }
}

fn parse_set(args: &str) -> Result<Op> {
    let mut parts = args.splitn(3, char::is_whitespace);
    let row = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("usage: set <row> <col> <value>"))?;
    let col = parts
        .next()
        .ok_or_else(|| anyhow!("usage: set <row> <col> <value>"))?;
    let value = parts.next().unwrap_or("").trim_start();

    Ok(Op::Set {
        row: row
            .parse()
            .with_context(|| format!("invalid row index '{}'", row))?,
        col: col
            .parse()
            .with_context(|| format!("invalid column index '{}'", col))?,
        value: value.to_string(),
    })
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::AddRow => f.write_str("add-row"),
            Op::RemoveRow => f.write_str("remove-row"),
            Op::AddColumn => f.write_str("add-column"),
            Op::RemoveColumn => f.write_str("remove-column"),
            Op::Set { row, col, value } => write!(f, "set {} {} {}", row, col, value),
        }
    }
}

/// Parse a whole script, reporting the line number of the first bad line
pub fn parse_script(text: &str) -> Result<Vec<Op>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            line.parse::<Op>()
                .with_context(|| format!("line {}: '{}'", idx + 1, line.trim()))
        })
        .collect()
}
