use crate::geometry::Rect;
use resvg::tiny_skia::{Path, PathBuilder};
use serde::{Deserialize, Serialize};

const KAPPA: f32 = 0.552_284_8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeMode {
    #[default]
    Circle,
    Arc,
    RoundedRect,
}

pub fn circle(cx: f32, cy: f32, radius: f32) -> Option<Path> {
    PathBuilder::from_circle(cx, cy, radius)
}

// Pie slice of the oval inscribed in `oval`, sweeping 180 degrees clockwise
// from the bottom through the left edge to the top.
pub fn half_disc(oval: Rect) -> Option<Path> {
    if oval.is_empty() {
        return None;
    }
    let cx = oval.center_x();
    let cy = oval.center_y();
    let kx = oval.width() / 2.0 * KAPPA;
    let ky = oval.height() / 2.0 * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy);
    pb.line_to(cx, oval.bottom);
    pb.cubic_to(cx - kx, oval.bottom, oval.left, cy + ky, oval.left, cy);
    pb.cubic_to(oval.left, cy - ky, cx - kx, oval.top, cx, oval.top);
    pb.close();
    pb.finish()
}

pub fn rounded_rect(rect: Rect, rx: f32, ry: f32) -> Option<Path> {
    if rect.is_empty() {
        return None;
    }
    let rx = rx.clamp(0.0, rect.width() / 2.0);
    let ry = ry.clamp(0.0, rect.height() / 2.0);
    if rx == 0.0 || ry == 0.0 {
        return Some(PathBuilder::from_rect(rect.to_skia()?));
    }
    let (l, t, r, b) = (rect.left, rect.top, rect.right, rect.bottom);
    let kx = rx * KAPPA;
    let ky = ry * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(l + rx, t);
    pb.line_to(r - rx, t);
    pb.cubic_to(r - rx + kx, t, r, t + ry - ky, r, t + ry);
    pb.line_to(r, b - ry);
    pb.cubic_to(r, b - ry + ky, r - rx + kx, b, r - rx, b);
    pb.line_to(l + rx, b);
    pb.cubic_to(l + rx - kx, b, l, b - ry + ky, l, b - ry);
    pb.line_to(l, t + ry);
    pb.cubic_to(l, t + ry - ky, l + rx - kx, t, l + rx, t);
    pb.close();
    pb.finish()
}
