/// Fixed colour palettes and deterministic cyclic colour assignment.
///
/// The core never generates colours. It indexes into an injected ordered
/// palette: the i-th distinct key seen gets `palette[i % palette.len()]`,
/// and a key seen again keeps its first colour.
use std::collections::HashMap;
use std::fmt;

/// An opaque sRGB colour, independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ── Palettes ────────────────────────────────────────────────────────

/// Neutral slate grey used for directories and the "Other" chart slice.
pub const NEUTRAL: Rgb = Rgb::new(0x94, 0xa3, 0xb8);

/// Eight colours for extension stats, indexed by `colorIndex`.
pub const EXTENSION_PALETTE: [Rgb; 8] = [
    Rgb::new(0x3b, 0x82, 0xf6),
    Rgb::new(0xef, 0x44, 0x44),
    Rgb::new(0x10, 0xb9, 0x81),
    Rgb::new(0xf5, 0x9e, 0x0b),
    Rgb::new(0x8b, 0x5c, 0xf6),
    Rgb::new(0xec, 0x48, 0x99),
    Rgb::new(0x63, 0x66, 0xf1),
    Rgb::new(0x14, 0xb8, 0xa6),
];

/// Ten colours for treemap groups.
pub const TABLEAU10: [Rgb; 10] = [
    Rgb::new(0x4e, 0x79, 0xa7),
    Rgb::new(0xf2, 0x8e, 0x2c),
    Rgb::new(0xe1, 0x57, 0x59),
    Rgb::new(0x76, 0xb7, 0xb2),
    Rgb::new(0x59, 0xa1, 0x4f),
    Rgb::new(0xed, 0xc9, 0x49),
    Rgb::new(0xaf, 0x7a, 0xa1),
    Rgb::new(0xff, 0x9d, 0xa7),
    Rgb::new(0x9c, 0x75, 0x5f),
    Rgb::new(0xba, 0xb0, 0xab),
];

/// 34 categorical colours for graph file nodes: Tableau10, Set3, Paired.
pub const CATEGORY_PALETTE: [Rgb; 34] = [
    Rgb::new(0x4e, 0x79, 0xa7),
    Rgb::new(0xf2, 0x8e, 0x2c),
    Rgb::new(0xe1, 0x57, 0x59),
    Rgb::new(0x76, 0xb7, 0xb2),
    Rgb::new(0x59, 0xa1, 0x4f),
    Rgb::new(0xed, 0xc9, 0x49),
    Rgb::new(0xaf, 0x7a, 0xa1),
    Rgb::new(0xff, 0x9d, 0xa7),
    Rgb::new(0x9c, 0x75, 0x5f),
    Rgb::new(0xba, 0xb0, 0xab),
    Rgb::new(0x8d, 0xd3, 0xc7),
    Rgb::new(0xff, 0xff, 0xb3),
    Rgb::new(0xbe, 0xba, 0xda),
    Rgb::new(0xfb, 0x80, 0x72),
    Rgb::new(0x80, 0xb1, 0xd3),
    Rgb::new(0xfd, 0xb4, 0x62),
    Rgb::new(0xb3, 0xde, 0x69),
    Rgb::new(0xfc, 0xcd, 0xe5),
    Rgb::new(0xd9, 0xd9, 0xd9),
    Rgb::new(0xbc, 0x80, 0xbd),
    Rgb::new(0xcc, 0xeb, 0xc5),
    Rgb::new(0xff, 0xed, 0x6f),
    Rgb::new(0xa6, 0xce, 0xe3),
    Rgb::new(0x1f, 0x78, 0xb4),
    Rgb::new(0xb2, 0xdf, 0x8a),
    Rgb::new(0x33, 0xa0, 0x2c),
    Rgb::new(0xfb, 0x9a, 0x99),
    Rgb::new(0xe3, 0x1a, 0x1c),
    Rgb::new(0xfd, 0xbf, 0x6f),
    Rgb::new(0xff, 0x7f, 0x00),
    Rgb::new(0xca, 0xb2, 0xd6),
    Rgb::new(0x6a, 0x3d, 0x9a),
    Rgb::new(0xff, 0xff, 0x99),
    Rgb::new(0xb1, 0x59, 0x28),
];

/// Colour at `index`, wrapping around the palette.
#[inline]
pub fn cyclic(palette: &[Rgb], index: usize) -> Rgb {
    if palette.is_empty() {
        NEUTRAL
    } else {
        palette[index % palette.len()]
    }
}

// ── Assignment ──────────────────────────────────────────────────────

/// Assigns palette colours to string keys in first-seen order.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Vec<Rgb>,
    seen: HashMap<String, usize>,
}

impl ColorAssigner {
    pub fn new(palette: impl Into<Vec<Rgb>>) -> Self {
        Self {
            palette: palette.into(),
            seen: HashMap::new(),
        }
    }

    /// Colour for `key`, registering it if this is its first appearance.
    pub fn assign(&mut self, key: &str) -> Rgb {
        let next = self.seen.len();
        let index = *self.seen.entry(key.to_owned()).or_insert(next);
        cyclic(&self.palette, index)
    }

    /// Colour for an already registered key.
    pub fn get(&self, key: &str) -> Option<Rgb> {
        self.seen.get(key).map(|&i| cyclic(&self.palette, i))
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
