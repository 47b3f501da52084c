//! Category color assignment
//!
//! Each category name gets a stable color from a fixed palette, assigned on
//! first sight by a rotating cursor. Both the per-name assignment and the
//! cursor live in the preference store, so colors survive across sessions
//! and never move once assigned.

use crate::preferences::{keys, PreferenceStore};

/// Observable10, Tableau10, Dark2, and Category10, concatenated
pub const PALETTE: [&str; 38] = [
    "#4269d0", "#efb118", "#ff725c", "#6cc5b0", "#3ca951", "#ff8ab7", "#a463f2", "#97bbf5",
    "#9c6b4e", "#9498a0", "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949",
    "#af7aa1", "#ff9da7", "#9c755f", "#bab0ab", "#1b9e77", "#d95f02", "#7570b3", "#e7298a",
    "#66a61e", "#e6ab02", "#a6761d", "#666666", "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728",
    "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Hex color for `category`, assigning and persisting a fresh one when the
/// store has none yet
pub fn color_for<S: PreferenceStore>(store: &S, category: &str) -> String {
    let key = keys::color(category);
    if let Some(stored) = store.get(&key) {
        return stored;
    }

    let cursor = store
        .get(keys::COLOR_INDEX)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0)
        % PALETTE.len();
    let color = PALETTE[cursor];

    store.set(keys::COLOR_INDEX, &((cursor + 1) % PALETTE.len()).to_string());
    store.set(&key, color);
    color.to_string()
}

/// Parse "#rrggbb" into its components; `None` for anything else
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferences;

    #[test]
    fn test_assignment_is_stable() {
        let store = MemoryPreferences::new();
        let first = color_for(&store, "Work");
        let second = color_for(&store, "Work");
        assert_eq!(first, second);
        assert_eq!(first, PALETTE[0]);
    }

    #[test]
    fn test_cursor_advances_per_new_name() {
        let store = MemoryPreferences::new();
        assert_eq!(color_for(&store, "Work"), PALETTE[0]);
        assert_eq!(color_for(&store, "Health"), PALETTE[1]);
        assert_eq!(color_for(&store, "Work"), PALETTE[0]);
        assert_eq!(color_for(&store, "Chores"), PALETTE[2]);
    }

    #[test]
    fn test_cursor_wraps_around() {
        let store = MemoryPreferences::new();
        store.set(keys::COLOR_INDEX, &(PALETTE.len() - 1).to_string());
        assert_eq!(color_for(&store, "Last"), PALETTE[PALETTE.len() - 1]);
        assert_eq!(color_for(&store, "Wrapped"), PALETTE[0]);
    }

    #[test]
    fn test_garbage_cursor_resets() {
        let store = MemoryPreferences::new();
        store.set(keys::COLOR_INDEX, "not-a-number");
        assert_eq!(color_for(&store, "Work"), PALETTE[0]);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#4269d0"), Some((0x42, 0x69, 0xd0)));
        assert_eq!(parse_hex("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("4269d0"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_palette_entries_are_valid_hex() {
        for color in PALETTE {
            assert!(parse_hex(color).is_some(), "bad palette entry {color}");
        }
    }
}
