//! Squad color assignment.
//!
//! Every squad gets a stable fill color. Colors come from an explicit
//! configuration table when present; squads missing from the table get a
//! deterministic color derived from a hash of their name, lightened when
//! the result is too dark to carry white text. Derived colors are cached
//! so a squad keeps its color across tribes within one run.
//!
//! The palette is an owned store passed into each tribe pass rather than
//! ambient global state. A parallel driver would need to partition it or
//! guard it: two tribes could otherwise race to derive a color for the
//! same unseen squad.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An RGB color triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex triple (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel sum, used by the brightness floor.
    fn luma_sum(&self) -> u16 {
        u16::from(self.r) + u16::from(self.g) + u16::from(self.b)
    }
}

/// Derive a stable color from a squad name.
///
/// First three bytes of the md5 digest become the RGB channels; colors
/// darker than the brightness floor are lightened so box labels stay
/// readable.
pub fn derive_color(name: &str) -> Rgb {
    let digest = md5::compute(name.as_bytes());
    let mut color = Rgb::new(digest[0], digest[1], digest[2]);
    if color.luma_sum() < 300 {
        color.r = color.r.saturating_add(60);
        color.g = color.g.saturating_add(60);
        color.b = color.b.saturating_add(60);
    }
    color
}

/// Squad-to-color store: configured entries plus cached derived colors.
#[derive(Clone, Debug, Default)]
pub struct SquadPalette {
    colors: HashMap<String, Rgb>,
}

impl SquadPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the palette from configured `squad -> "#RRGGBB"` pairs.
    /// Unparseable hex values are skipped.
    pub fn from_hex_table<'a, I>(table: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let colors = table
            .into_iter()
            .filter_map(|(squad, hex)| Some((squad.to_string(), Rgb::from_hex(hex)?)))
            .collect();
        Self { colors }
    }

    /// Color for a squad: configured or cached if known, otherwise
    /// derived from the name and memorized for reuse.
    pub fn color_for(&mut self, squad: &str) -> Rgb {
        if let Some(color) = self.colors.get(squad) {
            return *color;
        }
        let color = derive_color(squad);
        self.colors.insert(squad.to_string(), color);
        color
    }

    /// Look up a squad without extending the cache.
    pub fn get(&self, squad: &str) -> Option<Rgb> {
        self.colors.get(squad).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
