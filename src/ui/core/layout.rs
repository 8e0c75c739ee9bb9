//! Positioning: anchors, percentages and offsets resolved against the display
//! (root elements) or a parent's content box (children).

use super::geom::{Pos, Rect, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Insets {
    pub const fn all(v: u16) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    pub const fn xy(x: u16, y: u16) -> Self {
        Self {
            left: x,
            right: x,
            top: y,
            bottom: y,
        }
    }

    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

impl Rect {
    pub fn inset(self, insets: Insets) -> Self {
        let x = self.x.saturating_add(insets.left);
        let y = self.y.saturating_add(insets.top);
        let w = self.w.saturating_sub(insets.horizontal());
        let h = self.h.saturating_sub(insets.vertical());
        Rect::new(x, y, w, h)
    }

    pub fn intersect(self, other: Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        Rect::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    /// Parse an anchor keyword. Case, `_`, `-` and spaces are ignored, so
    /// `topLeft`, `top_left` and `top-left` are the same keyword.
    pub fn parse(keyword: &str) -> Option<Self> {
        let key: String = keyword
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        let anchor = match key.as_str() {
            "topleft" | "lefttop" | "tl" | "nw" | "northwest" => Anchor::TopLeft,
            "top" | "topcenter" | "topcentre" | "centertop" | "tc" | "n" | "north" => Anchor::Top,
            "topright" | "righttop" | "tr" | "ne" | "northeast" => Anchor::TopRight,
            "left" | "centerleft" | "leftcenter" | "middleleft" | "cl" | "w" | "west" => {
                Anchor::Left
            }
            "center" | "centre" | "middle" | "c" => Anchor::Center,
            "right" | "centerright" | "rightcenter" | "middleright" | "cr" | "e" | "east" => {
                Anchor::Right
            }
            "bottomleft" | "leftbottom" | "bl" | "sw" | "southwest" => Anchor::BottomLeft,
            "bottom" | "bottomcenter" | "bottomcentre" | "centerbottom" | "bc" | "s"
            | "south" => Anchor::Bottom,
            "bottomright" | "rightbottom" | "br" | "se" | "southeast" => Anchor::BottomRight,
            _ => return None,
        };
        Some(anchor)
    }

    /// Origin of a box of `size` anchored inside an area of `area`, relative to the area origin.
    pub fn place(self, size: Size, area: Size) -> (i32, i32) {
        let free_w = i32::from(area.w) - i32::from(size.w);
        let free_h = i32::from(area.h) - i32::from(size.h);
        let x = match self {
            Anchor::TopLeft | Anchor::Left | Anchor::BottomLeft => 0,
            Anchor::Top | Anchor::Center | Anchor::Bottom => free_w.div_euclid(2),
            Anchor::TopRight | Anchor::Right | Anchor::BottomRight => free_w,
        };
        let y = match self {
            Anchor::TopLeft | Anchor::Top | Anchor::TopRight => 0,
            Anchor::Left | Anchor::Center | Anchor::Right => free_h.div_euclid(2),
            Anchor::BottomLeft | Anchor::Bottom | Anchor::BottomRight => free_h,
        };
        (x, y)
    }

    /// Reference point of the anchor inside an area (a zero-sized box placed there).
    pub fn point(self, area: Size) -> (i32, i32) {
        self.place(Size::default(), area)
    }
}

/// Declarative position of an element. Later steps override earlier ones:
/// absolute coordinates, then percentages, then the anchor; offsets are added last.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub x: Option<i32>,
    pub y: Option<i32>,
    /// 0..=100, scaled by the area width.
    pub x_percent: Option<f32>,
    /// 0..=100, scaled by the area height.
    pub y_percent: Option<f32>,
    pub anchor: Option<Anchor>,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Placement {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn anchored(anchor: Anchor) -> Self {
        Self {
            anchor: Some(anchor),
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, dx: i32, dy: i32) -> Self {
        self.offset_x = dx;
        self.offset_y = dy;
        self
    }

    /// Signed origin of a box of `size` inside `area`.
    pub fn resolve(&self, size: Size, area: Rect) -> (i32, i32) {
        let mut x = self.x.unwrap_or(0);
        let mut y = self.y.unwrap_or(0);

        if let Some(pct) = self.x_percent {
            x = percent_of(pct, area.w);
        }
        if let Some(pct) = self.y_percent {
            y = percent_of(pct, area.h);
        }

        if let Some(anchor) = self.anchor {
            (x, y) = anchor.place(size, area.size());
        }

        (
            i32::from(area.x) + x + self.offset_x,
            i32::from(area.y) + y + self.offset_y,
        )
    }
}

fn percent_of(pct: f32, extent: u16) -> i32 {
    ((pct / 100.0) * f32::from(extent)).floor() as i32
}

/// Bounds of a root element on a display of `display` cells.
pub fn resolve_root(placement: &Placement, size: Size, display: Size) -> Rect {
    resolve_root_at(placement, size, display, (0, 0))
}

/// Like `resolve_root`, shifted by the origin of an offset child scene before clamping.
pub fn resolve_root_at(
    placement: &Placement,
    size: Size,
    display: Size,
    origin: (i32, i32),
) -> Rect {
    let (x, y) = placement.resolve(size, Rect::from_pos_size(Pos::default(), display));
    Rect::from_pos_size(Pos::clamped(x + origin.0, y + origin.1), size)
}

/// Parent bounds shrunk by border thickness and padding on every side, never below 1x1.
pub fn content_box(bounds: Rect, border: bool, padding: u16) -> Rect {
    let inner = bounds.inset(Insets::all(u16::from(border).saturating_add(padding)));
    Rect::new(inner.x, inner.y, inner.w.max(1), inner.h.max(1))
}

/// Bounds of a child element inside its parent's content box.
pub fn resolve_child(placement: &Placement, size: Size, content: Rect) -> Rect {
    let (x, y) = placement.resolve(size, content);
    Rect::from_pos_size(Pos::clamped(x, y), size)
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/layout.rs"]
mod tests;
