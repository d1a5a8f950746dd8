//! Color spec normalization.
//!
//! jj accepts three spellings for a color: a hex string (`#rrggbb` or `#rrggbbaa`),
//! an xterm palette index (`ansi-color-N`) and one of the sixteen ANSI names plus
//! `default`. Every spelling resolves to a single opaque RGB value.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Opaque 24-bit color, printed as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb(r, g, b)
    }

    pub const fn gray(level: u8) -> Self {
        Rgb(level, level, level)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

const ANSI_COLOR_PREFIX: &str = "ansi-color-";

/// Base ANSI colors in palette order (indices 0-15).
pub const ANSI_NAMES: [(&str, Rgb); 16] = [
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("red", Rgb::new(0x80, 0x00, 0x00)),
    ("green", Rgb::new(0x00, 0x80, 0x00)),
    ("yellow", Rgb::new(0x80, 0x80, 0x00)),
    ("blue", Rgb::new(0x00, 0x00, 0x80)),
    ("magenta", Rgb::new(0x80, 0x00, 0x80)),
    ("cyan", Rgb::new(0x00, 0x80, 0x80)),
    ("white", Rgb::new(0xc0, 0xc0, 0xc0)),
    ("bright black", Rgb::new(0x80, 0x80, 0x80)),
    ("bright red", Rgb::new(0xff, 0x00, 0x00)),
    ("bright green", Rgb::new(0x00, 0xff, 0x00)),
    ("bright yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("bright blue", Rgb::new(0x00, 0x00, 0xff)),
    ("bright magenta", Rgb::new(0xff, 0x00, 0xff)),
    ("bright cyan", Rgb::new(0x00, 0xff, 0xff)),
    ("bright white", Rgb::new(0xff, 0xff, 0xff)),
];

/// What the terminal's own foreground is assumed to be.
pub const DEFAULT_COLOR: Rgb = Rgb::gray(0xff);

/// Channel levels of the 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn hex_color_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})(?:[0-9a-fA-F]{2})?$")
            .expect("Invalid hex color regex pattern")
    })
}

/// Resolve an xterm 256-color palette index.
pub fn ansi256(index: u8) -> Rgb {
    match index {
        0..=15 => ANSI_NAMES[index as usize].1,
        16..=231 => {
            let cube = index - 16;
            let r = cube / 36;
            let g = (cube % 36) / 6;
            let b = cube % 6;
            Rgb::new(
                CUBE_LEVELS[r as usize],
                CUBE_LEVELS[g as usize],
                CUBE_LEVELS[b as usize],
            )
        }
        232..=255 => Rgb::gray(8 + 10 * (index - 232)),
    }
}

/// Look up a named ANSI color, ignoring ASCII case.
pub fn named(name: &str) -> Option<Rgb> {
    let name = name.to_ascii_lowercase();
    if name == "default" {
        return Some(DEFAULT_COLOR);
    }
    ANSI_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, rgb)| *rgb)
}

/// Normalize a jj color spec to an opaque RGB value.
///
/// An alpha channel on a hex spec is dropped, not blended.
pub fn normalize(spec: &str) -> Result<Rgb> {
    if spec.starts_with('#') {
        let caps = hex_color_regex()
            .captures(spec)
            .ok_or_else(|| Error::UnknownColor(spec.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&caps[i], 16).map_err(|_| Error::UnknownColor(spec.to_string()))
        };
        return Ok(Rgb::new(channel(1)?, channel(2)?, channel(3)?));
    }

    if let Some(index) = spec.strip_prefix(ANSI_COLOR_PREFIX) {
        // u8 parsing rejects both non-digits and anything past 255
        return index
            .parse::<u8>()
            .map(ansi256)
            .map_err(|_| Error::AnsiIndex(spec.to_string()));
    }

    named(spec).ok_or_else(|| Error::UnknownColor(spec.to_string()))
}
