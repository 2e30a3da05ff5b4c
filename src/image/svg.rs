use crate::color::Color;
use crate::error::{AvatarError, Result};
use crate::image::raster::from_pixmap;
use image::RgbaImage;
use resvg::tiny_skia;
use resvg::usvg;
use std::path::Path;

pub fn parse_tree(label: &str, svg_data: &[u8], options: &usvg::Options) -> Result<usvg::Tree> {
    usvg::Tree::from_data(svg_data, options).map_err(|err| AvatarError::Svg {
        label: label.to_string(),
        message: err.to_string(),
    })
}

pub fn render_tree(
    label: &str,
    tree: &usvg::Tree,
    scale: f32,
    target_w: u32,
    target_h: u32,
) -> Result<tiny_skia::Pixmap> {
    let mut pixmap =
        tiny_skia::Pixmap::new(target_w, target_h).ok_or_else(|| AvatarError::Allocation {
            label: label.to_string(),
            width: target_w,
            height: target_h,
        })?;
    resvg::render(
        tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

// The tint replaces the color channels and multiplies the alpha channel, so
// the icon keeps its silhouette and antialiasing.
pub fn vector_to_bitmap(
    label: &str,
    svg_data: &[u8],
    resources_dir: Option<&Path>,
    tint: Color,
    density: f32,
) -> Result<RgbaImage> {
    let options = usvg::Options {
        resources_dir: resources_dir.map(|p| p.to_path_buf()),
        ..usvg::Options::default()
    };
    let tree = parse_tree(label, svg_data, &options)?;
    let size = tree.size();
    let density = density.max(f32::EPSILON);
    let width = (size.width() * density).round().max(1.0) as u32;
    let height = (size.height() * density).round().max(1.0) as u32;

    let pixmap = render_tree(label, &tree, density, width, height)?;
    let mut icon = from_pixmap(&pixmap);
    apply_tint(&mut icon, tint);
    Ok(icon)
}

pub fn load_vector_icon(path: &Path, tint: Color, density: f32) -> Result<RgbaImage> {
    let data = std::fs::read(path).map_err(|err| AvatarError::Svg {
        label: path.display().to_string(),
        message: err.to_string(),
    })?;
    vector_to_bitmap(
        &path.display().to_string(),
        &data,
        path.parent(),
        tint,
        density,
    )
}

pub fn apply_tint(image: &mut RgbaImage, tint: Color) {
    let [r, g, b, a] = tint.0;
    for pixel in image.pixels_mut() {
        let alpha = (pixel[3] as u16 * a as u16 / 255) as u8;
        pixel.0 = [r, g, b, alpha];
    }
}
