use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Template that makes `jj config list` print one JSON object per line.
const JSON_LINE_TEMPLATE: &str = r#"json(self) ++ "\n""#;

/// One row of `jj config list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Dotted key, e.g. `colors."diff removed".fg`
    pub name: String,
    /// Raw value as jj printed it: a string for colors, usually a bool for flags
    pub value: Value,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub is_overridden: bool,
}

/// Settings for running `jj config list`
#[derive(Debug, Clone)]
pub struct JjConfigQuery<'a> {
    pub program: &'a str,
    pub namespace: &'a str,
    pub repo: Option<&'a Path>,
}

impl JjConfigQuery<'_> {
    fn args(&self) -> Vec<&str> {
        vec![
            "config",
            "list",
            "--color",
            "never",
            "--include-defaults",
            self.namespace,
            "-T",
            JSON_LINE_TEMPLATE,
        ]
    }
}

/// Run jj and collect every config entry under the query's namespace, defaults included.
pub fn collect(query: &JjConfigQuery<'_>) -> Result<Vec<ConfigEntry>> {
    let args = query.args();
    debug!(program = query.program, ?args, repo = ?query.repo, "running jj config list");

    let mut command = Command::new(query.program);
    command.args(&args);
    if let Some(repo) = query.repo {
        command.current_dir(repo);
    }

    let output = command.output().map_err(|source| Error::Spawn {
        program: query.program.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            program: query.program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = decode_stdout(query.program, output.stdout)?;
    let entries = parse_config_lines(&stdout)?;
    info!(count = entries.len(), namespace = query.namespace, "collected config entries");
    Ok(entries)
}

fn decode_stdout(program: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|source| Error::InvalidUtf8 {
        program: program.to_string(),
        source,
    })
}

/// Parse line-delimited JSON config output. Blank lines are ignored; any other line
/// that is not a valid entry fails the whole parse.
pub fn parse_config_lines(output: &str) -> Result<Vec<ConfigEntry>> {
    output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<ConfigEntry>(line).map_err(|source| Error::InvalidEntry {
                line_number: i + 1,
                line: line.to_string(),
                source,
            })
        })
        .collect()
}
