/// Vertical position on the current page. Blocks are measured first and only
/// placed once `fits` confirms they end above the content bottom.
#[derive(Debug, Clone, Copy)]
pub(super) struct LayoutCursor {
    y: f32,
    top: f32,
    bottom: f32,
}

impl LayoutCursor {
    pub(super) fn new(top: f32, bottom: f32) -> Self {
        Self {
            y: top,
            top,
            bottom,
        }
    }

    pub(super) fn y(&self) -> f32 {
        self.y
    }

    pub(super) fn at_top(&self) -> bool {
        (self.y - self.top).abs() < f32::EPSILON
    }

    pub(super) fn fits(&self, height: f32) -> bool {
        self.y + height <= self.bottom + 0.01
    }

    pub(super) fn advance(&mut self, dy: f32) {
        debug_assert!(dy >= 0.0, "cursor only moves down");
        self.y += dy.max(0.0);
    }
}
