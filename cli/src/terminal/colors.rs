use colored::Color;

pub const PRIMARY: Color = Color::BrightCyan;
pub const ACCENT: Color = Color::BrightMagenta;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const URL: Color = Color::BrightBlue;
pub const MEDIA_TYPE: Color = Color::Yellow;
pub const UNDECODABLE: Color = Color::Red;
