//! Named colour table.
//!
//! The table index is what gets persisted as the user's selection, so the
//! table is append-only: reordering or removing an entry silently changes
//! the meaning of every stored selection (there is no migration path).

/// A named 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub name: &'static str,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(name: &'static str, red: u8, green: u8, blue: u8) -> Self {
        Self {
            name,
            red,
            green,
            blue,
        }
    }
}

/// Selectable backlight colours, in persisted-index order.
pub const COLORS: [Color; 13] = [
    Color::new("Orange", 255, 79, 0),
    Color::new("Yellow", 255, 170, 0),
    Color::new("Spring", 167, 255, 0),
    Color::new("Lime", 0, 255, 0),
    Color::new("Aqua", 0, 255, 127),
    Color::new("Cyan", 0, 210, 210),
    Color::new("Azure", 0, 127, 255),
    Color::new("Blue", 0, 0, 255),
    Color::new("Purple", 127, 0, 255),
    Color::new("Magenta", 210, 0, 210),
    Color::new("Pink", 255, 0, 127),
    Color::new("Red", 255, 0, 0),
    Color::new("White", 140, 140, 140),
];

/// Number of entries in [`COLORS`].
pub const fn color_count() -> usize {
    COLORS.len()
}

/// Look up a colour by its persisted index.
pub fn color(index: u8) -> Option<&'static Color> {
    COLORS.get(usize::from(index))
}

/// Human-readable name of the colour at `index`, `None` past the end.
pub fn color_name(index: u8) -> Option<&'static str> {
    color(index).map(|c| c.name)
}

/// Map any index onto the table: out-of-range selections reset to the
/// first entry instead of failing.
pub fn clamp_index(index: u8) -> u8 {
    if usize::from(index) < color_count() {
        index
    } else {
        0
    }
}
