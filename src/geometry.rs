use resvg::tiny_skia;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    pub fn inset(&self, amount: f32) -> Rect {
        Rect::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    pub fn to_pixels(&self) -> (i64, i64, u32, u32) {
        let x0 = self.left.round() as i64;
        let y0 = self.top.round() as i64;
        let x1 = self.right.round() as i64;
        let y1 = self.bottom.round() as i64;
        (x0, y0, (x1 - x0).max(0) as u32, (y1 - y0).max(0) as u32)
    }

    pub fn to_skia(&self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleToFit {
    Start,
    End,
    CenterCrop,
}

impl ScaleToFit {
    pub fn place(self, src_width: u32, src_height: u32, dst: Rect) -> Rect {
        if src_width == 0 || src_height == 0 {
            return Rect::new(dst.left, dst.top, dst.left, dst.top);
        }
        let sw = src_width as f32;
        let sh = src_height as f32;
        match self {
            ScaleToFit::CenterCrop => dst,
            ScaleToFit::Start => {
                let scale = (dst.width() / sw).min(dst.height() / sh);
                Rect::new(dst.left, dst.top, dst.left + sw * scale, dst.top + sh * scale)
            }
            ScaleToFit::End => {
                let scale = (dst.width() / sw).min(dst.height() / sh);
                Rect::new(
                    dst.right - sw * scale,
                    dst.bottom - sh * scale,
                    dst.right,
                    dst.bottom,
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub rect: Rect,
    pub fit: ScaleToFit,
}

// Two avatars share this layout: only the first slot is drawn and the second
// one never gets a region of its own.
pub fn full_bleed(width: f32, height: f32) -> Tile {
    Tile {
        rect: Rect::from_size(width, height),
        fit: ScaleToFit::Start,
    }
}

pub fn split_tile(count: usize, key: usize, width: f32, height: f32, divider: f32) -> Option<Tile> {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let gap = divider / 2.0;

    let left_col = (0.0, half_w - gap);
    let right_col = (half_w + gap, width);
    let top_row = (0.0, half_h - gap);
    let bottom_row = (half_h + gap, height);

    let tile = |(left, right): (f32, f32), (top, bottom): (f32, f32), fit| Tile {
        rect: Rect::new(left, top, right, bottom),
        fit,
    };

    match (count, key) {
        (3, 0) => Some(tile(left_col, (0.0, height), ScaleToFit::CenterCrop)),
        (3, 1) | (4, 1) => Some(tile(right_col, top_row, ScaleToFit::Start)),
        (3, 2) | (4, 2) => Some(tile(right_col, bottom_row, ScaleToFit::End)),
        (4, 0) => Some(tile(left_col, top_row, ScaleToFit::Start)),
        (4, 3) => Some(tile(left_col, bottom_row, ScaleToFit::End)),
        _ => None,
    }
}
