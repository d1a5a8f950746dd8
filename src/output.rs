use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::theme::{ColorScheme, ThemeRule};

/// Where the two generated documents end up.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub colors: PathBuf,
    pub rules: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: &Path, colors_file: &str, rules_file: &str) -> Self {
        Self {
            colors: dir.join(colors_file),
            rules: dir.join(rules_file),
        }
    }
}

/// Both documents, serialized and ready to write.
#[derive(Debug)]
pub struct Rendered {
    pub colors: String,
    pub rules: String,
    pub rule_count: usize,
}

pub fn render(scheme: &ColorScheme, rules: &[ThemeRule]) -> Result<Rendered> {
    let colors = serde_json::to_string_pretty(scheme)
        .map_err(|source| Error::Serialize { what: "color map", source })?;
    let rules_json = serde_json::to_string_pretty(rules)
        .map_err(|source| Error::Serialize { what: "theme rules", source })?;
    Ok(Rendered {
        colors,
        rules: rules_json,
        rule_count: rules.len(),
    })
}

/// Write the color map, then the rules. Nothing is written if serialization fails,
/// and the rules file is left alone if the color map could not be written.
pub fn write_outputs(paths: &OutputPaths, rendered: &Rendered) -> Result<()> {
    write_atomic(&paths.colors, &rendered.colors)?;
    info!(path = %paths.colors.display(), "wrote color map");
    write_atomic(&paths.rules, &rendered.rules)?;
    info!(path = %paths.rules.display(), count = rendered.rule_count, "wrote theme rules");
    Ok(())
}

/// Atomic write: write to a temp file next to the target, then rename over it.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_error)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content).map_err(write_error)?;
    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(source));
    }
    Ok(())
}
