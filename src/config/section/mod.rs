//! Configuration section definitions.

mod assets;
mod themes;

pub use assets::AssetsConfig;
pub use themes::ThemesConfig;
