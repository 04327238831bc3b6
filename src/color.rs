use std::collections::HashMap;

use ratatui::style::Color;

/// Ten-color categorical palette.
pub const CATEGORY10: [Color; 10] = [
    Color::Rgb(0x1f, 0x77, 0xb4),
    Color::Rgb(0xff, 0x7f, 0x0e),
    Color::Rgb(0x2c, 0xa0, 0x2c),
    Color::Rgb(0xd6, 0x27, 0x28),
    Color::Rgb(0x94, 0x67, 0xbd),
    Color::Rgb(0x8c, 0x56, 0x4b),
    Color::Rgb(0xe3, 0x77, 0xc2),
    Color::Rgb(0x7f, 0x7f, 0x7f),
    Color::Rgb(0xbc, 0xbd, 0x22),
    Color::Rgb(0x17, 0xbe, 0xcf),
];

/// Ordinal color scale.
///
/// Keys are assigned palette entries in first-seen order and the palette
/// repeats once exhausted. The mapping is only stable within one instance.
#[derive(Clone, Debug)]
pub struct OrdinalScale {
    palette: Vec<Color>,
    domain: HashMap<String, usize>,
}

impl Default for OrdinalScale {
    fn default() -> Self {
        Self::new(CATEGORY10.to_vec())
    }
}

impl OrdinalScale {
    pub fn new(palette: Vec<Color>) -> Self {
        debug_assert!(!palette.is_empty(), "palette must not be empty");
        Self {
            palette,
            domain: HashMap::new(),
        }
    }

    pub fn color(&mut self, key: &str) -> Color {
        let next = self.domain.len();
        let index = *self.domain.entry(key.to_string()).or_insert(next);
        self.palette[index % self.palette.len()]
    }
}
