// colors.rs
use std::collections::HashMap;

pub const PALETTE: [&str; 14] = [
    "red", "orange", "yellow", "green", "teal", "blue", "cyan", "purple", "pink", "linkedin",
    "facebook", "whatsapp", "twitter", "telegram",
];

/// Handed out once every palette slot is taken.
pub const FALLBACK_COLOR: &str = "gray";

/// Gives each label its own badge color for as long as the bag lives.
///
/// A bag belongs to one rendered view. Labels keep their color on repeat
/// calls and no two labels share a palette slot; once the palette runs out
/// every new label gets `FALLBACK_COLOR` and is not remembered.
#[derive(Debug, Default)]
pub struct ColorBag {
    slots: [Option<String>; PALETTE.len()],
    reserved: HashMap<String, usize>,
}

impl ColorBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve_color_for_id(&mut self, label: &str) -> &'static str {
        if let Some(&index) = self.reserved.get(label) {
            return PALETTE[index];
        }

        let start = label_hash(label) % PALETTE.len();
        for offset in 0..PALETTE.len() {
            let index = (start + offset) % PALETTE.len();
            if self.slots[index].is_none() {
                self.slots[index] = Some(label.to_string());
                self.reserved.insert(label.to_string(), index);
                return PALETTE[index];
            }
        }

        FALLBACK_COLOR
    }
}

// Sum of UTF-16 code units. Collides easily, but is stable for a given label.
fn label_hash(label: &str) -> usize {
    label.encode_utf16().map(usize::from).sum()
}
