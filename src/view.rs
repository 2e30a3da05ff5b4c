use crate::color::Color;
use crate::config::view::ViewConfig;
use crate::error::{AvatarError, Result};
use crate::image::raster::from_pixmap;
use crate::image::text::TextRasterizer;
use crate::layout::{CompositeLayout, DEFAULT_KEY};
use crate::mask::{MaskDrawable, MaskStyle};
use crate::paintable::{Bounds, Paintable};
use crate::status::StatusDot;
use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, PixmapMut};
use std::cell::Ref;

#[derive(Debug)]
pub struct AvatarView {
    layout: CompositeLayout,
    background: MaskDrawable,
    status: StatusDot,
    width: u32,
    height: u32,
    online: bool,
    with_status: bool,
    invalidated: bool,
}

impl AvatarView {
    pub fn new(config: &ViewConfig) -> Result<Self> {
        Self::with_text_rasterizer(config, TextRasterizer::system())
    }

    pub fn with_text_rasterizer(config: &ViewConfig, text: TextRasterizer) -> Result<Self> {
        let (width, height) = config.size_px();
        let (content_w, content_h) = config.content_size_px();
        let margin = config.px(config.margin);

        let layout = CompositeLayout::new(
            content_w,
            content_h,
            config.px(config.divider_width),
            config.avatars_count,
            text,
        )?;
        let mut background = MaskDrawable::new(
            layout.shared_raster(),
            MaskStyle {
                shape: config.shape,
                corner_radius: config.px(config.corner_radius),
                margin,
                vignette: config.vignette,
            },
        );
        background.resize(Bounds::from_size(width, height));

        let mut status = StatusDot::new(margin, config.density());
        status.measure(width, height);

        log::debug!(
            "avatar view {width}x{height}, content {content_w}x{content_h}, expecting {}",
            layout.expected_count()
        );
        Ok(Self {
            layout,
            background,
            status,
            width,
            height,
            online: config.online,
            with_status: config.with_status,
            invalidated: false,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn add_bitmap(&mut self, bitmap: RgbaImage) -> bool {
        self.add_bitmap_at(DEFAULT_KEY, bitmap)
    }

    pub fn add_bitmap_at(&mut self, key: usize, bitmap: RgbaImage) -> bool {
        let rendered = self.layout.add_bitmap(key, bitmap);
        self.invalidated |= rendered;
        rendered
    }

    pub fn add_text_bitmap(&mut self, text: &str, color: Color) -> Result<bool> {
        self.add_text_bitmap_at(DEFAULT_KEY, text, color)
    }

    pub fn add_text_bitmap_at(&mut self, key: usize, text: &str, color: Color) -> Result<bool> {
        let rendered = self.layout.add_text_bitmap(key, text, color)?;
        self.invalidated |= rendered;
        Ok(rendered)
    }

    pub fn clear(&mut self) {
        self.layout.clear();
        self.set_online(false);
    }

    pub fn online(&self) -> bool {
        self.online
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
        self.invalidated = true;
    }

    pub fn with_status(&self) -> bool {
        self.with_status
    }

    pub fn set_with_status(&mut self, with_status: bool) {
        self.with_status = with_status;
        self.invalidated = true;
    }

    pub fn avatars_count(&self) -> usize {
        self.layout.expected_count()
    }

    pub fn set_avatars_count(&mut self, count: Option<usize>) {
        self.layout.set_expected_count(count);
    }

    pub fn render_count(&self) -> u64 {
        self.layout.render_count()
    }

    pub fn raster(&self) -> Ref<'_, RgbaImage> {
        self.layout.raster()
    }

    pub fn background(&self) -> &MaskDrawable {
        &self.background
    }

    pub fn background_mut(&mut self) -> &mut MaskDrawable {
        &mut self.background
    }

    pub fn status_position(&self) -> (f32, f32) {
        self.status.position()
    }

    pub fn take_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    pub fn measure(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.background.resize(Bounds::from_size(width, height));
        self.status.measure(width, height);
    }

    pub fn draw(&self, canvas: &mut PixmapMut<'_>) {
        self.background.paint(canvas);
        if self.with_status {
            self.status.paint(canvas, self.online);
        }
    }

    pub fn snapshot(&self) -> Result<RgbaImage> {
        let mut pixmap =
            Pixmap::new(self.width, self.height).ok_or_else(|| AvatarError::Allocation {
                label: "avatar view".to_string(),
                width: self.width,
                height: self.height,
            })?;
        self.draw(&mut pixmap.as_mut());
        Ok(from_pixmap(&pixmap))
    }
}

#[cfg(test)]
mod tests;
