use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const PCI_ADDR: Color = Color::BrightYellow;
pub const MAC_ADDR: Color = Color::Magenta;
pub const DRIVER: Color = Color::BrightBlue;
pub const MISSING: Color = Color::BrightBlack;
