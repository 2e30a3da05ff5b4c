use crate::color::{self, Color, RED, WHITE};
use crate::layout::clamp_count;
use crate::shape::ShapeMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_WIDTH: f32 = 100.0;
pub const DEFAULT_HEIGHT: f32 = 100.0;
pub const DEFAULT_CORNER_RADIUS: f32 = 5.0;
pub const DEFAULT_DIVIDER_WIDTH: f32 = 1.0;
pub const DEFAULT_MARGIN: f32 = 0.0;
pub const DEFAULT_DENSITY: f32 = 1.0;

pub fn default_width() -> f32 {
    DEFAULT_WIDTH
}

pub fn default_height() -> f32 {
    DEFAULT_HEIGHT
}

pub fn default_avatars_count() -> Option<usize> {
    Some(1)
}

pub fn default_corner_radius() -> f32 {
    DEFAULT_CORNER_RADIUS
}

pub fn default_divider_width() -> f32 {
    DEFAULT_DIVIDER_WIDTH
}

pub fn default_margin() -> f32 {
    DEFAULT_MARGIN
}

pub fn default_density() -> f32 {
    DEFAULT_DENSITY
}

pub fn default_badge_color() -> Color {
    RED
}

pub fn default_badge_tint() -> Color {
    WHITE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(
        default = "default_avatars_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatars_count: Option<usize>,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    #[serde(default = "default_divider_width")]
    pub divider_width: f32,
    #[serde(default = "default_margin")]
    pub margin: f32,
    #[serde(default = "default_density")]
    pub density: f32,
    #[serde(default)]
    pub shape: ShapeMode,
    #[serde(default)]
    pub vignette: bool,
    #[serde(default)]
    pub with_status: bool,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub badge: BadgeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
    #[serde(
        default = "default_badge_color",
        deserialize_with = "color::deserialize",
        serialize_with = "color::serialize"
    )]
    pub color: Color,
    #[serde(
        default = "default_badge_tint",
        deserialize_with = "color::deserialize",
        serialize_with = "color::serialize"
    )]
    pub tint: Color,
    #[serde(default)]
    pub shape: ShapeMode,
    #[serde(default)]
    pub show: bool,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            icon: None,
            color: default_badge_color(),
            tint: default_badge_tint(),
            shape: ShapeMode::default(),
            show: false,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            avatars_count: default_avatars_count(),
            corner_radius: default_corner_radius(),
            divider_width: default_divider_width(),
            margin: default_margin(),
            density: default_density(),
            shape: ShapeMode::default(),
            vignette: false,
            with_status: false,
            online: false,
            badge: BadgeConfig::default(),
        }
    }
}

impl ViewConfig {
    pub fn density(&self) -> f32 {
        if self.density.is_finite() && self.density > 0.0 {
            self.density
        } else {
            DEFAULT_DENSITY
        }
    }

    pub fn px(&self, dp: f32) -> f32 {
        dp.max(0.0) * self.density()
    }

    pub fn size_px(&self) -> (u32, u32) {
        (
            self.px(self.width).round() as u32,
            self.px(self.height).round() as u32,
        )
    }

    pub fn content_size_px(&self) -> (u32, u32) {
        let (width, height) = self.size_px();
        let margins = (self.px(self.margin) * 2.0).round() as u32;
        (
            width.saturating_sub(margins).max(1),
            height.saturating_sub(margins).max(1),
        )
    }

    pub fn expected_count(&self) -> usize {
        clamp_count(self.avatars_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEST_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn test_temp_dir(name: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        let id = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        dir.push(format!("multiavatar-config-tests-{name}-{}-{id}", std::process::id()));
        fs::create_dir_all(&dir).expect("test temp dir should be creatable");
        dir
    }

    fn parse(raw: &str) -> ViewConfig {
        crate::config::toml::parse_from_str(Path::new("test.toml"), raw).expect("config should parse")
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(parse(""), ViewConfig::default());
    }

    #[test]
    fn sizes_scale_with_density() {
        let config = parse("width = 48\nheight = 40\nmargin = 2\ndensity = 2.5\n");
        assert_eq!(config.size_px(), (120, 100));
        assert_eq!(config.content_size_px(), (110, 90));
        assert_eq!(config.px(DEFAULT_DIVIDER_WIDTH), 2.5);
    }

    #[test]
    fn avatar_count_is_clamped() {
        assert_eq!(parse("avatars_count = 7").expected_count(), 4);
        assert_eq!(parse("avatars_count = 0").expected_count(), 1);
        assert_eq!(parse("").expected_count(), 1);
    }

    #[test]
    fn badge_table_reads_hex_colors() {
        let config = parse(
            r##"
shape = "arc"

[badge]
color = "#00ff00"
tint = "#80112233"
shape = "rounded_rect"
show = true
"##,
        );
        assert_eq!(config.shape, ShapeMode::Arc);
        assert_eq!(config.badge.color, Rgba([0, 255, 0, 255]));
        assert_eq!(config.badge.tint, Rgba([0x11, 0x22, 0x33, 0x80]));
        assert_eq!(config.badge.shape, ShapeMode::RoundedRect);
        assert!(config.badge.show);
    }

    #[test]
    fn bad_badge_color_reports_the_file() {
        let err = crate::config::toml::parse_from_str::<ViewConfig>(
            Path::new("broken.toml"),
            "[badge]\ncolor = \"red\"\n",
        )
        .expect_err("named colors are not supported");
        let message = err.to_string();
        assert!(message.contains("broken.toml"));
        assert!(message.contains("Invalid color"));
    }

    #[test]
    fn invalid_density_falls_back_to_one() {
        let config = parse("density = 0");
        assert_eq!(config.density(), 1.0);
        assert_eq!(config.size_px(), (100, 100));
    }

    #[test]
    fn config_round_trips_through_a_file() {
        let path = test_temp_dir("round-trip").join("nested").join("view.toml");
        let mut config = ViewConfig::default();
        config.avatars_count = Some(3);
        config.badge.color = Rgba([1, 2, 3, 255]);
        crate::config::toml::save_to_file_pretty(&path, &config).expect("config should save");
        let loaded: ViewConfig =
            crate::config::toml::load_from_file(&path).expect("config should load");
        assert_eq!(loaded, config);
    }
}
