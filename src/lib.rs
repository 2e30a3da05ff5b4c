pub mod badge;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod image;
pub mod layout;
pub mod mask;
pub mod paintable;
pub mod paths;
pub mod shape;
pub mod status;
pub mod view;

pub use badge::{BadgeDrawable, BadgeStyle};
pub use config::{BadgeConfig, ViewConfig};
pub use error::{AvatarError, Result};
pub use layout::{CompositeLayout, MAX_CAPACITY};
pub use mask::{MaskDrawable, MaskStyle};
pub use paintable::{Bounds, ColorFilter, Opacity, Paintable};
pub use shape::ShapeMode;
pub use status::StatusDot;
pub use view::AvatarView;
