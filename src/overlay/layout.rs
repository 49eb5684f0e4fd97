use crate::config::LayoutMetrics;
use crate::overlay::model::{KeyDescriptor, KeyRect};

/// Rows of the virtual keyboard, top to bottom.
pub const KEY_LAYOUT: [&[&str]; 5] = [
    &[
        "ESC",
        "1",
        "2",
        "3",
        "4",
        "5",
        "6",
        "7",
        "8",
        "9",
        "0",
        "-",
        "=",
        "BACKSPACE",
    ],
    &[
        "TAB", "Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "[", "]", "\\",
    ],
    &[
        "CAPS", "A", "S", "D", "F", "G", "H", "J", "K", "L", ";", "'", "ENTER",
    ],
    &[
        "SHIFT", "Z", "X", "C", "V", "B", "N", "M", ",", ".", "/", "SHIFT",
    ],
    &["CTRL", "WIN", "ALT", "SPACE", "ALTGR", "MENU", "CTRL"],
];

/// Width of a key relative to a regular letter key.
pub fn width_multiplier(label: &str) -> f32 {
    match label {
        "SPACE" => 6.0,
        "SHIFT" | "ENTER" | "BACKSPACE" => 2.5,
        "TAB" | "CAPS" => 2.0,
        "CTRL" | "WIN" | "ALT" | "ALTGR" | "MENU" | "ESC" => 1.5,
        _ => 1.0,
    }
}

/// Lays out `rows` left to right, top to bottom.
pub fn layout_rows(rows: &[&[&str]], metrics: &LayoutMetrics) -> Vec<KeyDescriptor> {
    let mut keys = Vec::with_capacity(rows.iter().map(|row| row.len()).sum());
    for (row_idx, row) in rows.iter().enumerate() {
        let y = metrics.start_y + row_idx as i32 * (metrics.key_height + metrics.spacing);
        let mut x = metrics.margin_left;
        for label in row.iter() {
            let label = label.to_uppercase();
            let width = (metrics.key_width as f32 * width_multiplier(&label)) as i32;
            keys.push(KeyDescriptor {
                rect: KeyRect::new(x, y, width - metrics.inset, metrics.key_height),
                label,
            });
            x += width + metrics.spacing;
        }
    }
    keys
}

/// Builds the descriptor list for the fixed keyboard.
pub fn generate_keys(metrics: &LayoutMetrics) -> Vec<KeyDescriptor> {
    layout_rows(&KEY_LAYOUT, metrics)
}

/// First descriptor carrying `label`. Duplicated keys resolve to the leftmost
/// one on the topmost row.
pub fn find_key<'a>(keys: &'a [KeyDescriptor], label: &str) -> Option<&'a KeyDescriptor> {
    keys.iter().find(|key| key.label == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> Vec<KeyDescriptor> {
        generate_keys(&LayoutMetrics::default())
    }

    #[test]
    fn one_descriptor_per_layout_entry() {
        let total: usize = KEY_LAYOUT.iter().map(|row| row.len()).sum();
        assert_eq!(keys().len(), total);
    }

    #[test]
    fn first_key_sits_at_margin() {
        let keys = keys();
        assert_eq!(keys[0].label, "ESC");
        assert_eq!(keys[0].rect, KeyRect::new(30, 180, 88, 40));
        // 30 + 90 + 5
        assert_eq!(keys[1].rect, KeyRect::new(125, 180, 58, 40));
    }

    #[test]
    fn rows_advance_by_height_plus_spacing() {
        let keys = keys();
        let tab = find_key(&keys, "TAB").unwrap();
        let ctrl = find_key(&keys, "CTRL").unwrap();
        assert_eq!(tab.rect.y, 225);
        assert_eq!(ctrl.rect.y, 360);
        assert_eq!(tab.rect.x, 30);
    }

    #[test]
    fn space_is_six_keys_wide() {
        let keys = keys();
        let space = find_key(&keys, "SPACE").unwrap();
        assert_eq!(space.rect.width, 60 * 6 - 2);
    }

    #[test]
    fn unknown_labels_use_unit_width() {
        assert_eq!(width_multiplier("Q"), 1.0);
        assert_eq!(width_multiplier("\\"), 1.0);
        assert_eq!(width_multiplier("ALTGR"), 1.5);
    }

    #[test]
    fn layout_rows_uppercases_labels() {
        let keys = layout_rows(&[&["space", "a"][..]], &LayoutMetrics::default());
        assert_eq!(keys[0].label, "SPACE");
        assert_eq!(keys[0].rect.width, 358);
        assert_eq!(keys[1].label, "A");
        assert_eq!(keys[1].rect.x, 30 + 360 + 5);
    }
}
