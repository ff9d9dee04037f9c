//! Static asset selection and placement.

mod copy;
pub mod glob;
mod rule;

// Types
pub use glob::Glob;
pub use rule::AssetRule;

// Processing (side effects)
pub use copy::{CopySummary, copy_static_assets};
