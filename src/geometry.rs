/// Screen-space rectangles and the few geometric queries the simulation needs.
///
/// Coordinates are pixels with the origin at the top-left of the screen and
/// `y` growing downward.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Rect {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn centerx(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn centery(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn center(&self) -> (f32, f32) {
        (self.centerx(), self.centery())
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn set_center(&mut self, cx: f32, cy: f32) {
        self.x = cx - self.w / 2.0;
        self.y = cy - self.h / 2.0;
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Strict overlap test: rectangles that merely share an edge do not
    /// intersect, so a rectangle clamped flush against a wall is clear of it.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Returns true if any part of the segment `a`–`b` lies inside this
    /// rectangle (edges included).  Liang–Barsky clipping.
    pub fn clips_segment(&self, a: (f32, f32), b: (f32, f32)) -> bool {
        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;

        let boundaries = [
            (-dx, a.0 - self.left()),
            (dx, self.right() - a.0),
            (-dy, a.1 - self.top()),
            (dy, self.bottom() - a.1),
        ];

        for (p, q) in boundaries {
            if p == 0.0 {
                // Parallel to this edge: outside means no intersection at all.
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > t_exit {
                    return false;
                }
                t_enter = t_enter.max(t);
            } else {
                if t < t_enter {
                    return false;
                }
                t_exit = t_exit.min(t);
            }
        }
        t_enter <= t_exit
    }
}

/// Euclidean distance between two points.
pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - b.0).hypot(a.1 - b.1)
}
