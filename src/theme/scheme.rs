use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::services::jj::ConfigEntry;

/// Attribute used when a key names only the scope (`colors.error = "red"`).
const DEFAULT_ATTRIBUTE: &str = "fg";

/// Style of one jj label, with values exactly as jj reported them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColorAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dim: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlined: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<Value>,
    /// Attributes jj knows about but the theme format has no place for
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl ColorAttributes {
    fn set(&mut self, attribute: &str, entry: &ConfigEntry) -> Result<()> {
        let value = entry.value.clone();
        match attribute {
            "fg" => self.fg = Some(color_string(entry)?),
            "bg" => self.bg = Some(color_string(entry)?),
            "bold" => self.bold = Some(value),
            "dim" => self.dim = Some(value),
            "italic" => self.italic = Some(value),
            "underlined" => self.underlined = Some(value),
            "reverse" => self.reverse = Some(value),
            other => {
                debug!(name = %entry.name, attribute = other, "keeping unrecognized attribute");
                self.other.insert(other.to_string(), value);
            }
        }
        Ok(())
    }

    pub fn is_bold(&self) -> bool {
        is_truthy(self.bold.as_ref())
    }

    pub fn is_italic(&self) -> bool {
        is_truthy(self.italic.as_ref())
    }

    pub fn is_underlined(&self) -> bool {
        is_truthy(self.underlined.as_ref())
    }
}

fn color_string(entry: &ConfigEntry) -> Result<String> {
    match &entry.value {
        Value::String(s) => Ok(s.clone()),
        other => Err(Error::NonStringColor {
            name: entry.name.clone(),
            value: other.to_string(),
        }),
    }
}

/// Flag values arrive as TOML booleans, but a hand-written string is accepted too.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            ["true", "yes", "on", "1"]
                .iter()
                .any(|truthy| s.eq_ignore_ascii_case(truthy))
        }
        _ => false,
    }
}

/// Every jj label under the color namespace, keyed by label.
///
/// Labels may contain spaces (`diff removed`); quotes from the TOML key are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColorScheme {
    scopes: BTreeMap<String, ColorAttributes>,
}

impl ColorScheme {
    /// Fold flat config entries into per-label attribute sets.
    pub fn from_entries(entries: &[ConfigEntry], namespace: &str) -> Result<Self> {
        let mut scopes: BTreeMap<String, ColorAttributes> = BTreeMap::new();
        for entry in entries {
            let (scope, attribute) = parse_key(&entry.name, namespace)?;
            scopes.entry(scope).or_default().set(&attribute, entry)?;
        }
        debug!(scopes = scopes.len(), entries = entries.len(), "reconstructed color scheme");
        Ok(Self { scopes })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorAttributes)> {
        self.scopes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// Split `<namespace>.<scope>[.<attribute>]` into scope label and attribute name.
fn parse_key(name: &str, namespace: &str) -> Result<(String, String)> {
    let shape_error = || Error::SchemeShape { name: name.to_string() };

    let segments = split_key(name);
    let root = split_key(namespace);
    let rest = segments
        .strip_prefix(root.as_slice())
        .ok_or_else(shape_error)?;

    let (scope, attribute) = match rest {
        [scope] => (*scope, DEFAULT_ATTRIBUTE),
        [scope, attribute] => (*scope, *attribute),
        _ => return Err(shape_error()),
    };

    let scope = scope.replace('"', "");
    if scope.is_empty() || attribute.is_empty() {
        return Err(shape_error());
    }
    Ok((scope, attribute.to_string()))
}

/// Split a dotted key, leaving dots inside double quotes alone.
fn split_key(name: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, c) in name.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '.' if !in_quotes => {
                segments.push(&name[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&name[start..]);
    segments
}
