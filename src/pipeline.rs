use tracing::{info, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::output::{self, OutputPaths, Rendered};
use crate::services::jj::{self, ConfigEntry, JjConfigQuery};
use crate::theme::{build_rules, ColorScheme};

/// What one run produced.
#[derive(Debug)]
pub struct Summary {
    pub paths: OutputPaths,
    pub rendered: Rendered,
    pub scope_count: usize,
}

/// Collect the live jj config and convert it.
pub fn run(settings: &Settings, dry_run: bool) -> Result<Summary> {
    let query = JjConfigQuery {
        program: &settings.jj_program,
        namespace: &settings.namespace,
        repo: settings.repo.as_deref(),
    };
    let entries = jj::collect(&query)?;
    convert(&entries, settings, dry_run)
}

/// Build the raw color map and the rules from already-collected entries, then write
/// both files unless `dry_run` is set. Every fallible step runs before the first write.
pub fn convert(entries: &[ConfigEntry], settings: &Settings, dry_run: bool) -> Result<Summary> {
    let scheme = ColorScheme::from_entries(entries, &settings.namespace)?;
    if scheme.is_empty() {
        warn!(namespace = %settings.namespace, "no color entries found");
    }
    let rules = build_rules(&scheme)?;
    info!(scopes = scheme.len(), rules = rules.len(), "built theme rules");

    let rendered = output::render(&scheme, &rules)?;
    let paths = OutputPaths::new(&settings.output_dir, &settings.colors_file, &settings.rules_file);
    if !dry_run {
        output::write_outputs(&paths, &rendered)?;
    }

    Ok(Summary {
        paths,
        rendered,
        scope_count: scheme.len(),
    })
}
