//! RAL colour palette offered by the configurator.

/// A selectable frame colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub hex: &'static str,
    pub ral: &'static str,
    pub name: &'static str,
}

pub const DEFAULT_COLOR: &str = "#7C7F7E";

pub const PALETTE: [PaletteColor; 5] = [
    PaletteColor {
        hex: "#6A7578",
        ral: "7016",
        name: "Anthracite",
    },
    PaletteColor {
        hex: "#5A5A5A",
        ral: "9005",
        name: "Black",
    },
    PaletteColor {
        hex: "#7C7F7E",
        ral: "7037",
        name: "Grey",
    },
    PaletteColor {
        hex: "#5A3D31",
        ral: "8028",
        name: "Brown",
    },
    PaletteColor {
        hex: "#FFFFFF",
        ral: "9016",
        name: "White",
    },
];

/// Looks up a palette entry by hex code (case-insensitive).
pub fn find_by_hex(hex: &str) -> Option<&'static PaletteColor> {
    PALETTE.iter().find(|c| c.hex.eq_ignore_ascii_case(hex))
}

/// True for a `#RRGGBB` string.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
