pub mod hit;
pub mod path;
pub mod svg;

pub use hit::hit_test;
pub use svg::{SvgTheme, render_svg};
