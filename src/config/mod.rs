pub mod toml;
pub mod view;

pub use view::{BadgeConfig, ViewConfig};
