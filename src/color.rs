use crate::error::AvatarError;
use image::Rgba;
use resvg::tiny_skia;
use serde::{Deserialize, Deserializer, Serializer};

pub type Color = Rgba<u8>;

pub const WHITE: Color = Rgba([0xff, 0xff, 0xff, 0xff]);
pub const RED: Color = Rgba([0xff, 0x00, 0x00, 0xff]);
pub const GREEN: Color = Rgba([0x00, 0xff, 0x00, 0xff]);
pub const GRAY: Color = Rgba([0x88, 0x88, 0x88, 0xff]);

pub fn parse_hex_color(value: &str) -> Result<Color, AvatarError> {
    let invalid = || AvatarError::InvalidColor(value.to_string());
    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }
    let byte = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).map_err(|_| invalid());

    match hex.len() {
        6 => Ok(Rgba([byte(0)?, byte(2)?, byte(4)?, 0xff])),
        8 => Ok(Rgba([byte(2)?, byte(4)?, byte(6)?, byte(0)?])),
        _ => Err(invalid()),
    }
}

pub fn to_hex_color(color: Color) -> String {
    let [r, g, b, a] = color.0;
    if a == 0xff {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{a:02x}{r:02x}{g:02x}{b:02x}")
    }
}

pub fn to_skia(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.0;
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_hex_color(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_hex_color(*color))
}
