use indexmap::IndexMap;

use crate::render::Color;

/// 12-color pastel qualitative palette used for bars.
pub const SET3: [Color; 12] = [
    Color::rgb8(0x8d, 0xd3, 0xc7),
    Color::rgb8(0xff, 0xff, 0xb3),
    Color::rgb8(0xbe, 0xba, 0xda),
    Color::rgb8(0xfb, 0x80, 0x72),
    Color::rgb8(0x80, 0xb1, 0xd3),
    Color::rgb8(0xfd, 0xb4, 0x62),
    Color::rgb8(0xb3, 0xde, 0x69),
    Color::rgb8(0xfc, 0xcd, 0xe5),
    Color::rgb8(0xd9, 0xd9, 0xd9),
    Color::rgb8(0xbc, 0x80, 0xbd),
    Color::rgb8(0xcc, 0xeb, 0xc5),
    Color::rgb8(0xff, 0xed, 0x6f),
];

/// 10-color categorical palette used for areas.
pub const CATEGORY10: [Color; 10] = [
    Color::rgb8(0x1f, 0x77, 0xb4),
    Color::rgb8(0xff, 0x7f, 0x0e),
    Color::rgb8(0x2c, 0xa0, 0x2c),
    Color::rgb8(0xd6, 0x27, 0x28),
    Color::rgb8(0x94, 0x67, 0xbd),
    Color::rgb8(0x8c, 0x56, 0x4b),
    Color::rgb8(0xe3, 0x77, 0xc2),
    Color::rgb8(0x7f, 0x7f, 0x7f),
    Color::rgb8(0xbc, 0xbd, 0x22),
    Color::rgb8(0x17, 0xbe, 0xcf),
];

/// Ordinal scale with an implicit domain: keys get palette entries in the
/// order they are first requested, wrapping around the palette.
#[derive(Debug, Clone)]
pub struct OrdinalColorScale {
    palette: &'static [Color],
    assigned: IndexMap<String, usize>,
}

impl OrdinalColorScale {
    #[must_use]
    pub fn new(palette: &'static [Color]) -> Self {
        Self {
            palette,
            assigned: IndexMap::new(),
        }
    }

    pub fn color_for(&mut self, key: &str) -> Color {
        let next = self.assigned.len();
        let slot = *self.assigned.entry(key.to_owned()).or_insert(next);
        self.palette
            .get(slot % self.palette.len().max(1))
            .copied()
            .unwrap_or(Color::rgb(0.0, 0.0, 0.0))
    }

    /// Keys in assignment order.
    pub fn domain(&self) -> impl Iterator<Item = &str> + '_ {
        self.assigned.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{CATEGORY10, OrdinalColorScale, SET3};

    #[test]
    fn keys_keep_their_first_assignment() {
        let mut scale = OrdinalColorScale::new(&SET3);
        let first = scale.color_for("a");
        let second = scale.color_for("b");
        assert_eq!(scale.color_for("a"), first);
        assert_eq!(first.to_hex(), "#8dd3c7");
        assert_eq!(second.to_hex(), "#ffffb3");
        assert_eq!(scale.domain().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn palette_wraps_after_last_entry() {
        let mut scale = OrdinalColorScale::new(&CATEGORY10);
        for index in 0..10 {
            scale.color_for(&format!("id-{index}"));
        }
        assert_eq!(scale.color_for("id-10"), CATEGORY10[0]);
    }
}
