//! Color swatches for the color facet.

/// Swatch used for colors outside the palette.
pub const DEFAULT_SWATCH_COLOR: &str = "#cbd5e1";

/// Known color tokens and their swatch hex values.
pub const COLOR_SWATCH_PALETTE: [(&str, &str); 9] = [
    ("black", "#111827"),
    ("blue", "#3f5bd3"),
    ("gray", "#4b5563"),
    ("green", "#16a34a"),
    ("orange", "#ea580c"),
    ("pink", "#ec4899"),
    ("red", "#e11d48"),
    ("silver", "#94a3b8"),
    ("white", "#f8fafc"),
];

/// Swatch hex value for a color token.
pub fn swatch_color_for_token(token: &str) -> &'static str {
    COLOR_SWATCH_PALETTE
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, hex)| *hex)
        .unwrap_or(DEFAULT_SWATCH_COLOR)
}
