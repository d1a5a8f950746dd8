use serde::Serialize;
use tracing::{debug, warn};

use super::color::{normalize, Rgb};
use super::legend;
use super::scheme::{ColorAttributes, ColorScheme};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Italic,
}

/// One entry of Zed's `semantic_token_rules`. Unset fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeRule {
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgb>,
}

impl ThemeRule {
    fn from_attributes(token_type: &str, attrs: &ColorAttributes) -> Result<Self> {
        // dim and reverse have no counterpart in the rule format
        Ok(Self {
            token_type: token_type.to_string(),
            font_weight: attrs.is_bold().then_some(FontWeight::Bold),
            font_style: attrs.is_italic().then_some(FontStyle::Italic),
            underline: attrs.is_underlined().then_some(true),
            foreground_color: color(attrs.fg.as_deref())?,
            background_color: color(attrs.bg.as_deref())?,
        })
    }
}

/// An empty color string means "not set".
fn color(spec: Option<&str>) -> Result<Option<Rgb>> {
    spec.filter(|s| !s.is_empty()).map(normalize).transpose()
}

/// Build one rule per single-word label. Compound labels like `diff removed` only
/// style nested output and have no token type of their own, so they are skipped.
pub fn build_rules(scheme: &ColorScheme) -> Result<Vec<ThemeRule>> {
    let mut rules = Vec::new();
    for (scope, attrs) in scheme.iter() {
        // padded labels are skipped too, so the token type is always the label verbatim
        if scope.is_empty() || scope.contains(char::is_whitespace) {
            debug!(scope, "skipping compound scope");
            continue;
        }
        if !legend::is_known(scope) {
            warn!(token_type = scope, "token type is not in the language server legend");
        }
        rules.push(ThemeRule::from_attributes(scope, attrs)?);
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::services::jj::ConfigEntry;
    use serde_json::{json, Value};

    fn scheme(entries: &[(&str, Value)]) -> ColorScheme {
        let entries: Vec<ConfigEntry> = entries
            .iter()
            .map(|(name, value)| ConfigEntry {
                name: name.to_string(),
                value: value.clone(),
                source: "default".to_string(),
                path: None,
                is_overridden: false,
            })
            .collect();
        ColorScheme::from_entries(&entries, "colors").unwrap()
    }

    #[test]
    fn test_bold_only_rule_has_no_colors() {
        let rules = build_rules(&scheme(&[("colors.working_copy.bold", json!("true"))])).unwrap();
        assert_eq!(rules.len(), 1);
        let json = serde_json::to_value(&rules[0]).unwrap();
        assert_eq!(json, json!({"token_type": "working_copy", "font_weight": "bold"}));
    }

    #[test]
    fn test_compound_scope_skipped() {
        let scheme = scheme(&[
            (r#"colors."diff removed".fg"#, json!("red")),
            ("colors.removed", json!("red")),
        ]);
        let rules = build_rules(&scheme).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].token_type, "removed");
    }

    #[test]
    fn test_colors_normalized() {
        let scheme = scheme(&[
            ("colors.error.fg", json!("ansi-color-196")),
            ("colors.error.bg", json!("#11223344")),
            ("colors.error.italic", json!(true)),
            ("colors.error.underlined", json!(true)),
        ]);
        let rules = build_rules(&scheme).unwrap();
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(
            json,
            json!([{
                "token_type": "error",
                "font_style": "italic",
                "underline": true,
                "foreground_color": "#ff0000",
                "background_color": "#112233"
            }])
        );
    }

    #[test]
    fn test_false_flags_omitted() {
        let scheme = scheme(&[
            ("colors.hint.bold", json!(false)),
            ("colors.hint.italic", json!("false")),
            ("colors.hint.underlined", json!(false)),
        ]);
        let rules = build_rules(&scheme).unwrap();
        let json = serde_json::to_value(&rules[0]).unwrap();
        assert_eq!(json, json!({"token_type": "hint"}));
    }

    #[test]
    fn test_dim_and_reverse_not_projected() {
        let scheme = scheme(&[
            ("colors.elided.dim", json!(true)),
            ("colors.elided.reverse", json!(true)),
        ]);
        let rules = build_rules(&scheme).unwrap();
        assert_eq!(
            rules,
            vec![ThemeRule {
                token_type: "elided".to_string(),
                font_weight: None,
                font_style: None,
                underline: None,
                foreground_color: None,
                background_color: None,
            }]
        );
    }

    #[test]
    fn test_padded_scope_skipped() {
        let scheme = scheme(&[
            (r#"colors." error".fg"#, json!("red")),
            (r#"colors."hint ".fg"#, json!("red")),
            ("colors.error.fg", json!("blue")),
        ]);
        let rules = build_rules(&scheme).unwrap();
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(json, json!([{"token_type": "error", "foreground_color": "#000080"}]));
    }

    #[test]
    fn test_empty_color_treated_as_unset() {
        let scheme = scheme(&[
            ("colors.error.fg", json!("")),
            ("colors.error.bg", json!("")),
            ("colors.error.bold", json!(true)),
        ]);
        let rules = build_rules(&scheme).unwrap();
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(json, json!([{"token_type": "error", "font_weight": "bold"}]));
    }

    #[test]
    fn test_unknown_color_aborts() {
        let scheme = scheme(&[("colors.error", json!("chartreuse"))]);
        let err = build_rules(&scheme).unwrap_err();
        assert!(matches!(err, Error::UnknownColor(ref s) if s == "chartreuse"));
    }

    #[test]
    fn test_compound_scope_with_bad_color_is_ignored() {
        let scheme = scheme(&[(r#"colors."diff added".fg"#, json!("chartreuse"))]);
        assert!(build_rules(&scheme).unwrap().is_empty());
    }
}
