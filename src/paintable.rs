use crate::color::Color;
use crate::geometry::Rect;
use resvg::tiny_skia::{self, PixmapMut, PixmapPaint, PremultipliedColorU8, Transform};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left as f32,
            self.top as f32,
            self.right as f32,
            self.bottom as f32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opacity {
    Translucent,
    Transparent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFilter {
    Tint(Color),
    Multiply(Color),
}

impl ColorFilter {
    pub fn apply(&self, pixmap: &mut tiny_skia::Pixmap) {
        for pixel in pixmap.pixels_mut() {
            *pixel = self.filter(*pixel);
        }
    }

    fn filter(&self, pixel: PremultipliedColorU8) -> PremultipliedColorU8 {
        let mul = |a: u8, b: u8| (a as u16 * b as u16 / 255) as u8;
        let (r, g, b, a) = match *self {
            ColorFilter::Tint(color) => {
                let [tr, tg, tb, ta] = color.0;
                let alpha = mul(pixel.alpha(), ta);
                (mul(tr, alpha), mul(tg, alpha), mul(tb, alpha), alpha)
            }
            ColorFilter::Multiply(color) => {
                let [tr, tg, tb, ta] = color.0;
                (
                    mul(pixel.red(), mul(tr, ta)),
                    mul(pixel.green(), mul(tg, ta)),
                    mul(pixel.blue(), mul(tb, ta)),
                    mul(pixel.alpha(), ta),
                )
            }
        };
        PremultipliedColorU8::from_rgba(r, g, b, a).unwrap_or(pixel)
    }
}

pub trait Paintable {
    fn resize(&mut self, bounds: Bounds);

    fn paint(&self, canvas: &mut PixmapMut<'_>);

    fn opacity(&self) -> Opacity {
        Opacity::Translucent
    }

    fn set_alpha(&mut self, alpha: u8);

    fn set_color_filter(&mut self, filter: Option<ColorFilter>);
}

pub(crate) fn with_layer<F>(
    canvas: &mut PixmapMut<'_>,
    alpha: u8,
    filter: Option<ColorFilter>,
    paint_fn: F,
) where
    F: FnOnce(&mut PixmapMut<'_>),
{
    if alpha == u8::MAX && filter.is_none() {
        paint_fn(canvas);
        return;
    }
    if alpha == 0 {
        return;
    }

    let Some(mut layer) = tiny_skia::Pixmap::new(canvas.width(), canvas.height()) else {
        return;
    };
    paint_fn(&mut layer.as_mut());
    if let Some(filter) = filter {
        filter.apply(&mut layer);
    }

    let paint = PixmapPaint {
        opacity: alpha as f32 / 255.0,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);
}
