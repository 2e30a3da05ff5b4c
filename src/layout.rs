use crate::color::{Color, WHITE};
use crate::error::{AvatarError, Result};
use crate::geometry::{Tile, full_bleed, split_tile};
use crate::image::raster::{draw_tile, fill};
use crate::image::text::TextRasterizer;
use image::RgbaImage;
use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const MAX_CAPACITY: usize = 4;
pub const DEFAULT_KEY: usize = 0;
pub const MAX_RASTER_BYTES: u64 = 256 * 1024 * 1024;

pub type SharedRaster = Rc<RefCell<RgbaImage>>;

pub fn clamp_count(count: Option<usize>) -> usize {
    count.unwrap_or(1).clamp(1, MAX_CAPACITY)
}

#[derive(Debug)]
pub struct CompositeLayout {
    slots: BTreeMap<usize, RgbaImage>,
    expected_count: usize,
    raster: SharedRaster,
    divider: f32,
    background: Color,
    text: TextRasterizer,
    render_count: u64,
}

impl CompositeLayout {
    pub fn new(
        width: u32,
        height: u32,
        divider: f32,
        expected_count: Option<usize>,
        text: TextRasterizer,
    ) -> Result<Self> {
        let bytes = u64::from(width)
            .checked_mul(u64::from(height))
            .and_then(|pixels| pixels.checked_mul(4));
        let fits = bytes.is_some_and(|bytes| {
            bytes <= MAX_RASTER_BYTES && usize::try_from(bytes).is_ok()
        });
        if width == 0 || height == 0 || !fits {
            return Err(AvatarError::Allocation {
                label: "composite raster".to_string(),
                width,
                height,
            });
        }
        Ok(Self {
            slots: BTreeMap::new(),
            expected_count: clamp_count(expected_count),
            raster: Rc::new(RefCell::new(RgbaImage::new(width, height))),
            divider: divider.max(0.0),
            background: WHITE,
            text,
            render_count: 0,
        })
    }

    pub fn shared_raster(&self) -> SharedRaster {
        Rc::clone(&self.raster)
    }

    pub fn raster(&self) -> Ref<'_, RgbaImage> {
        self.raster.borrow()
    }

    pub fn expected_count(&self) -> usize {
        self.expected_count
    }

    pub fn set_expected_count(&mut self, count: Option<usize>) {
        let clamped = clamp_count(count);
        if count.is_some_and(|requested| requested != clamped) {
            log::warn!("avatar count {count:?} clamped to {clamped}");
        }
        self.expected_count = clamped;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains_key(&self, key: usize) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn content_size(&self) -> (u32, u32) {
        self.raster.borrow().dimensions()
    }

    pub fn add_bitmap(&mut self, key: usize, bitmap: RgbaImage) -> bool {
        if self.slots.contains_key(&key) {
            log::debug!("slot {key} already filled, ignoring bitmap");
            return false;
        }
        self.slots.insert(key, bitmap);
        if self.slots.len() == self.expected_count {
            self.render()
        } else {
            false
        }
    }

    pub fn add_text_bitmap(&mut self, key: usize, text: &str, color: Color) -> Result<bool> {
        let (width, height) = self.content_size();
        let bitmap = self.text.rasterize(text, color, width, height)?;
        Ok(self.add_bitmap(key, bitmap))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    // Plans every tile before touching the raster, so a pass that hits a key
    // with no place in the layout leaves the previous composition intact.
    fn plan(&self, width: f32, height: f32) -> Option<Vec<(&RgbaImage, Tile)>> {
        match self.slots.len() {
            0 => None,
            1 | 2 => {
                let (_, bitmap) = self.slots.iter().next()?;
                Some(vec![(bitmap, full_bleed(width, height))])
            }
            count => self
                .slots
                .iter()
                .map(|(&key, bitmap)| {
                    let tile = split_tile(count, key, width, height, self.divider);
                    if tile.is_none() {
                        log::warn!("slot {key} has no tile in a {count}-avatar layout, render aborted");
                    }
                    tile.map(|tile| (bitmap, tile))
                })
                .collect(),
        }
    }

    fn render(&mut self) -> bool {
        let (width, height) = self.content_size();
        let Some(plan) = self.plan(width as f32, height as f32) else {
            return false;
        };

        {
            let mut raster = self.raster.borrow_mut();
            fill(&mut raster, self.background);
            for (bitmap, tile) in plan {
                draw_tile(&mut raster, bitmap, tile);
            }
        }
        self.render_count += 1;
        log::debug!(
            "rendered {} avatar(s) into {width}x{height} raster",
            self.slots.len()
        );
        true
    }
}
