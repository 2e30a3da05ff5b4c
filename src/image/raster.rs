use crate::color::Color;
use crate::geometry::{ScaleToFit, Tile};
use image::imageops::FilterType::Lanczos3;
use image::imageops::{crop_imm, overlay, resize};
use image::{Rgba, RgbaImage};
use resvg::tiny_skia;

pub fn fill(image: &mut RgbaImage, color: Color) {
    for pixel in image.pixels_mut() {
        *pixel = color;
    }
}

pub fn extract_thumbnail(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    let src_w = src.width();
    let src_h = src.height();
    if src_w == 0 || src_h == 0 {
        return RgbaImage::new(width, height);
    }

    let target_ratio = width as f32 / height as f32;
    let (crop_w, crop_h) = if src_w as f32 / src_h as f32 > target_ratio {
        let w = ((src_h as f32) * target_ratio).round() as u32;
        (w.clamp(1, src_w), src_h)
    } else {
        let h = ((src_w as f32) / target_ratio).round() as u32;
        (src_w, h.clamp(1, src_h))
    };
    let x_offset = (src_w - crop_w) / 2;
    let y_offset = (src_h - crop_h) / 2;

    let cropped = crop_imm(src, x_offset, y_offset, crop_w, crop_h).to_image();
    if cropped.dimensions() == (width, height) {
        return cropped;
    }
    resize(&cropped, width, height, Lanczos3)
}

pub fn draw_tile(dst: &mut RgbaImage, src: &RgbaImage, tile: Tile) {
    let placed = tile.fit.place(src.width(), src.height(), tile.rect);
    let (x, y, width, height) = placed.to_pixels();
    if width == 0 || height == 0 {
        return;
    }

    let scaled = match tile.fit {
        ScaleToFit::CenterCrop => extract_thumbnail(src, width, height),
        ScaleToFit::Start | ScaleToFit::End if src.dimensions() == (width, height) => src.clone(),
        ScaleToFit::Start | ScaleToFit::End => resize(src, width, height, Lanczos3),
    };
    overlay(dst, &scaled, x, y);
}

pub fn to_pixmap(image: &RgbaImage) -> Option<tiny_skia::Pixmap> {
    let mut pixmap = tiny_skia::Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

pub fn from_pixmap(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}
