pub mod color;
pub mod legend;
pub mod rules;
pub mod scheme;

pub use rules::{build_rules, ThemeRule};
pub use scheme::ColorScheme;
