use crate::color::{Color, GRAY, GREEN, WHITE, to_skia};
use crate::shape;
use resvg::tiny_skia::{FillRule, LineCap, Paint, PixmapMut, Stroke, Transform};

pub const STATUS_POSITION_RATIO: f32 = 0.8535;
pub const STATUS_STROKE_RADIUS: f32 = 5.0;
pub const STATUS_FILL_RADIUS: f32 = 5.0;
pub const STATUS_STROKE_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusDot {
    x: f32,
    y: f32,
    margin: f32,
    stroke_radius: f32,
    fill_radius: f32,
    stroke_width: f32,
    ring_color: Color,
    on_color: Color,
    off_color: Color,
}

impl StatusDot {
    // `margin` is in pixels, the radii are scaled by `density`.
    pub fn new(margin: f32, density: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            margin,
            stroke_radius: STATUS_STROKE_RADIUS * density,
            fill_radius: STATUS_FILL_RADIUS * density,
            stroke_width: STATUS_STROKE_WIDTH * density,
            ring_color: WHITE,
            on_color: GREEN,
            off_color: GRAY,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn measure(&mut self, width: u32, height: u32) {
        let margins = self.margin * 2.0;
        self.x = (width as f32 - margins) * STATUS_POSITION_RATIO;
        self.y = (height as f32 - margins) * STATUS_POSITION_RATIO;
    }

    pub fn paint(&self, canvas: &mut PixmapMut<'_>, online: bool) {
        let mut paint = Paint::default();
        paint.anti_alias = true;

        if let Some(ring) = shape::circle(self.x, self.y, self.stroke_radius) {
            paint.set_color(to_skia(self.ring_color));
            let stroke = Stroke {
                width: self.stroke_width,
                line_cap: LineCap::Round,
                ..Stroke::default()
            };
            canvas.stroke_path(&ring, &paint, &stroke, Transform::identity(), None);
        }

        if let Some(dot) = shape::circle(self.x, self.y, self.fill_radius) {
            let fill = if online { self.on_color } else { self.off_color };
            paint.set_color(to_skia(fill));
            canvas.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::Pixmap;

    fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let pixel = pixmap.pixel(x, y).expect("pixel in range").demultiply();
        [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]
    }

    #[test]
    fn position_follows_every_measure() {
        let mut dot = StatusDot::new(5.0, 1.0);
        dot.measure(110, 110);
        assert_eq!(dot.position(), (100.0 * STATUS_POSITION_RATIO, 100.0 * STATUS_POSITION_RATIO));
        dot.measure(210, 60);
        assert_eq!(dot.position(), (200.0 * STATUS_POSITION_RATIO, 50.0 * STATUS_POSITION_RATIO));
    }

    #[test]
    fn online_changes_only_the_fill() {
        let mut dot = StatusDot::new(0.0, 4.0);
        dot.measure(60, 60);
        let (cx, cy) = dot.position();
        let (cx, cy) = (cx as u32, cy as u32);

        let mut online = Pixmap::new(100, 100).expect("pixmap");
        dot.paint(&mut online.as_mut(), true);
        let mut offline = Pixmap::new(100, 100).expect("pixmap");
        dot.paint(&mut offline.as_mut(), false);

        assert_eq!(rgba(&online, cx, cy), [0, 255, 0, 255]);
        assert_eq!(rgba(&offline, cx, cy), [0x88, 0x88, 0x88, 255]);

        // Ring: radius 20, stroke 4, so the band outside the fill reaches 22.
        for (x, y) in [(cx + 21, cy), (cx - 21, cy), (cx, cy + 21)] {
            assert_eq!(rgba(&online, x, y), rgba(&offline, x, y));
            assert_eq!(rgba(&online, x, y)[..3], [255, 255, 255]);
        }
    }
}
