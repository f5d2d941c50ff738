//! Named color palettes.
//!
//! A closed registry of fixed palettes, identified by the stable id
//! strings the control surface uses. The identity id `original` is not
//! in the registry: it means "no mapping".
//!
//! Mapping replaces a color with the redmean-nearest palette entry;
//! see [`crate::color::redmean`].

use crate::color::{redmean, Rgb};

/// Id of the identity palette (no mapping).
pub const ORIGINAL: &str = "original";

const fn c(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r, g, b)
}

/// Saturated primaries and secondaries.
pub const VIBRANT: &[Rgb] = &[
    c(0xe6, 0x19, 0x4b),
    c(0x3c, 0xb4, 0x4b),
    c(0xff, 0xe1, 0x19),
    c(0x43, 0x63, 0xd8),
    c(0xf5, 0x82, 0x31),
    c(0x91, 0x1e, 0xb4),
    c(0x46, 0xf0, 0xf0),
    c(0xf0, 0x32, 0xe6),
    c(0xbc, 0xf6, 0x0c),
    c(0x00, 0x80, 0x80),
    c(0xe6, 0xbe, 0xff),
    c(0x9a, 0x63, 0x24),
];

/// Soft washed-out tones.
pub const PASTEL: &[Rgb] = &[
    c(0xfb, 0xb4, 0xae),
    c(0xb3, 0xcd, 0xe3),
    c(0xcc, 0xeb, 0xc5),
    c(0xde, 0xcb, 0xe4),
    c(0xfe, 0xd9, 0xa6),
    c(0xff, 0xff, 0xcc),
    c(0xe5, 0xd8, 0xbd),
    c(0xfd, 0xda, 0xec),
    c(0xb3, 0xe2, 0xcd),
    c(0xfd, 0xcd, 0xac),
    c(0xcb, 0xd5, 0xe8),
    c(0xf2, 0xf2, 0xf2),
];

/// Soil, moss and bark tones.
pub const EARTHY: &[Rgb] = &[
    c(0x6e, 0x46, 0x32),
    c(0x8a, 0x5a, 0x44),
    c(0xa9, 0x7c, 0x50),
    c(0xc4, 0xa3, 0x5a),
    c(0x8a, 0x9a, 0x5b),
    c(0x6b, 0x8e, 0x23),
    c(0x55, 0x6b, 0x2f),
    c(0x8b, 0x73, 0x55),
    c(0xa0, 0x52, 0x2d),
    c(0xcd, 0x85, 0x3f),
    c(0xde, 0xb8, 0x87),
    c(0xf5, 0xde, 0xb3),
];

/// Gemstone tones over dark grounds.
pub const JEWEL: &[Rgb] = &[
    c(0x0f, 0x52, 0xba),
    c(0x50, 0xc8, 0x78),
    c(0xe0, 0x11, 0x5f),
    c(0x99, 0x66, 0xcc),
    c(0xff, 0xc8, 0x7c),
    c(0x00, 0xa8, 0x6b),
    c(0x73, 0x36, 0x35),
    c(0xe4, 0xd0, 0x0a),
    c(0x40, 0xe0, 0xd0),
    c(0x35, 0x38, 0x39),
    c(0xea, 0xe0, 0xc8),
    c(0x4b, 0x00, 0x82),
];

/// Deep water to foam.
pub const OCEAN: &[Rgb] = &[
    c(0x01, 0x2a, 0x4a),
    c(0x01, 0x3a, 0x63),
    c(0x01, 0x49, 0x7c),
    c(0x01, 0x4f, 0x86),
    c(0x2a, 0x6f, 0x97),
    c(0x2c, 0x7d, 0xa0),
    c(0x46, 0x8f, 0xaf),
    c(0x61, 0xa5, 0xc2),
    c(0x89, 0xc2, 0xd9),
    c(0xa9, 0xd6, 0xe5),
    c(0xca, 0xf0, 0xf8),
    c(0xe0, 0xfb, 0xfc),
];

/// Late-season reds, oranges and browns.
pub const AUTUMN: &[Rgb] = &[
    c(0x6a, 0x04, 0x0f),
    c(0x9d, 0x02, 0x08),
    c(0xd0, 0x00, 0x00),
    c(0xdc, 0x2f, 0x02),
    c(0xe8, 0x5d, 0x04),
    c(0xf4, 0x8c, 0x06),
    c(0xfa, 0xa3, 0x07),
    c(0xff, 0xba, 0x08),
    c(0xb0, 0x89, 0x68),
    c(0x7f, 0x4f, 0x24),
    c(0x93, 0x66, 0x39),
    c(0xa6, 0x8a, 0x64),
];

/// Achromatic ramp.
pub const NOIR: &[Rgb] = &[
    c(0x00, 0x00, 0x00),
    c(0x1a, 0x1a, 0x1a),
    c(0x33, 0x33, 0x33),
    c(0x4d, 0x4d, 0x4d),
    c(0x66, 0x66, 0x66),
    c(0x80, 0x80, 0x80),
    c(0xb3, 0xb3, 0xb3),
    c(0xff, 0xff, 0xff),
];

/// Thirteen-step blue ramp, navy to ice.
pub const MONOCHROME_BLUE: &[Rgb] = &[
    c(0x05, 0x0d, 0x1a),
    c(0x0a, 0x1a, 0x33),
    c(0x10, 0x28, 0x47),
    c(0x16, 0x36, 0x5c),
    c(0x1d, 0x44, 0x70),
    c(0x24, 0x52, 0x85),
    c(0x2b, 0x60, 0x99),
    c(0x33, 0x6f, 0xad),
    c(0x3f, 0x7f, 0xc1),
    c(0x55, 0x90, 0xcc),
    c(0x72, 0xa3, 0xd6),
    c(0x95, 0xb9, 0xe0),
    c(0xc0, 0xd4, 0xec),
];

/// All recognized palette ids, identity first.
pub const PALETTE_IDS: &[&str] = &[
    ORIGINAL,
    "vibrant",
    "pastel",
    "earthy",
    "jewel",
    "ocean",
    "autumn",
    "noir",
    "monochrome-blue",
];

/// Resolve a palette id. `original` and unknown ids yield `None`
/// (no mapping).
pub fn lookup(id: &str) -> Option<&'static [Rgb]> {
    match id {
        "vibrant" => Some(VIBRANT),
        "pastel" => Some(PASTEL),
        "earthy" => Some(EARTHY),
        "jewel" => Some(JEWEL),
        "ocean" => Some(OCEAN),
        "autumn" => Some(AUTUMN),
        "noir" => Some(NOIR),
        "monochrome-blue" => Some(MONOCHROME_BLUE),
        _ => None,
    }
}

/// Nearest palette entry by redmean distance.
pub fn map_color(color: Rgb, palette: &[Rgb]) -> Rgb {
    *palette
        .iter()
        .min_by(|a, b| redmean(color, **a).total_cmp(&redmean(color, **b)))
        .expect("palettes in the registry are non-empty")
}
