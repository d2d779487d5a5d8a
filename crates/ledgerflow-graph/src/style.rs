//! Flow Diagram Color System
//!
//! Maps node kinds and category labels to display colors, mirroring the
//! dashboard's palette. Resolution is a pure lookup with a fixed fallback;
//! there is no mutable palette state.

use ledgerflow_core::NodeKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_tuple(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// Hex form as used on the wire, `#RRGGBB`. Alpha is only emitted when
    /// not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s}")))
    }
}

// ============================================================================
// Color Constants - dashboard palette
// ============================================================================

// Income sources (blues and teals), cycled per deposit ordinal
pub const DEPOSIT_CYCLE: [Color; 4] = [
    Color::rgb(14, 165, 233),  // #0EA5E9
    Color::rgb(6, 182, 212),   // #06B6D4
    Color::rgb(59, 130, 246),  // #3B82F6
    Color::rgb(29, 78, 216),   // #1D4ED8
];

// Pooled income and goals (purple)
pub const COLOR_POOL: Color = Color::rgb(139, 92, 246); // #8B5CF6
pub const COLOR_GOAL: Color = Color::rgb(139, 92, 246); // #8B5CF6

// Fallbacks
pub const COLOR_CATEGORY_FALLBACK: Color = Color::rgb(16, 185, 129); // #10B981
pub const COLOR_DEFAULT: Color = Color::rgb(107, 114, 128); // #6B7280

const CATEGORY_PALETTE: &[(&str, Color)] = &[
    ("food-&-dining", Color::rgb(16, 185, 129)),
    ("shopping", Color::rgb(59, 130, 246)),
    ("transport", Color::rgb(139, 92, 246)),
    ("bills", Color::rgb(239, 68, 68)),
    ("entertainment", Color::rgb(245, 158, 11)),
    ("groceries", Color::rgb(5, 150, 105)),
    ("travel", Color::rgb(236, 72, 153)),
    ("healthcare", Color::rgb(132, 204, 22)),
    ("education", Color::rgb(99, 102, 241)),
    ("other", Color::rgb(107, 114, 128)),
    ("dining", Color::rgb(249, 115, 22)),
];

const EXPENSE_PALETTE: &[(&str, Color)] = &[
    ("restaurants-&-bars", Color::rgb(249, 115, 22)),
    ("coffee-shops", Color::rgb(146, 64, 14)),
    ("clothing", Color::rgb(124, 58, 237)),
    ("new-laptop", Color::rgb(31, 41, 55)),
    ("car-repair", Color::rgb(220, 38, 38)),
    ("weekly-shop", Color::rgb(5, 150, 105)),
    ("special-dinners", Color::rgb(245, 158, 11)),
    ("movie-night", Color::rgb(139, 92, 246)),
    ("utility-bills", Color::rgb(239, 68, 68)),
];

/// Normalizes a palette key: lowercased, whitespace runs become `-`.
pub(crate) fn slug(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut last_was_space = false;
    for ch in key.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push('-');
            }
            last_was_space = true;
        } else {
            out.extend(ch.to_lowercase());
            last_was_space = false;
        }
    }
    out
}

fn lookup(palette: &[(&str, Color)], key: &str) -> Option<Color> {
    let key = slug(key);
    palette
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, color)| *color)
}

/// Resolves the display color for a node.
///
/// `key` is the category label (or display name) used for palette lookup on
/// category/expense kinds; `ordinal` is the node's position within its kind
/// bucket and drives the deposit color cycle.
pub fn resolve_color(kind: NodeKind, key: Option<&str>, ordinal: usize) -> Color {
    match kind {
        NodeKind::Deposit => DEPOSIT_CYCLE[ordinal % DEPOSIT_CYCLE.len()],
        NodeKind::Pool => COLOR_POOL,
        NodeKind::Category => key
            .and_then(|k| lookup(CATEGORY_PALETTE, k))
            .unwrap_or(COLOR_CATEGORY_FALLBACK),
        NodeKind::Expense => key
            .and_then(|k| lookup(EXPENSE_PALETTE, k))
            .unwrap_or(COLOR_DEFAULT),
        NodeKind::Goal => COLOR_GOAL,
    }
}
