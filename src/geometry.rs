// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Geometric primitives on the 1 ft layout grid: Point2, Vector2, Rect, SharedEdge
//!
//! All public coordinates are in feet. The pipeline only ever produces whole-foot
//! values but lengths and centroids are kept as f32 so derived quantities
//! (overlaps, anchors, distances) need no conversion.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub type Point2 = nalgebra::Point2<f32>;
pub type Vector2 = nalgebra::Vector2<f32>;

/// Manhattan distance between two points (ft)
#[inline]
pub fn manhattan(a: Point2, b: Point2) -> f32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Axis aligned rectangle on the layout grid
///
/// `x` grows east and `y` grows north, with the origin at the lot's southwest
/// corner. `depth` is the north-south extent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// West edge (ft)
    pub x: f32,
    /// South edge (ft)
    pub y: f32,
    /// East-west extent (ft)
    pub width: f32,
    /// North-south extent (ft)
    pub depth: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, depth: f32) -> Self {
        Rect {
            x,
            y,
            width,
            depth,
        }
    }

    /// East edge (ft)
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// North edge (ft)
    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.depth
    }

    /// Gross area (ft²)
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.depth
    }

    /// Centroid
    #[inline]
    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width / 2.0, self.y + self.depth / 2.0)
    }

    /// Shorter side (ft)
    #[inline]
    pub fn min_dim(&self) -> f32 {
        self.width.min(self.depth)
    }

    /// Longer side (ft)
    #[inline]
    pub fn max_dim(&self) -> f32 {
        self.width.max(self.depth)
    }

    /// Length of the diagonal (ft)
    #[inline]
    pub fn diagonal(&self) -> f32 {
        (self.width * self.width + self.depth * self.depth).sqrt()
    }

    /// Whether `other` lies completely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    /// Whether the interiors of both rectangles intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Shared edge with `other`, if any
    ///
    /// Two rectangles share an edge when their projections overlap strictly on
    /// one axis and touch exactly on the other.
    pub fn shares_edge(&self, other: &Rect) -> Option<SharedEdge> {
        let x_overlap = self.right().min(other.right()) - self.x.max(other.x);
        let y_overlap = self.top().min(other.top()) - self.y.max(other.y);

        if (self.right() == other.x || other.right() == self.x) && y_overlap > 0.0 {
            return Some(SharedEdge {
                overlap: y_overlap,
                orientation: WallOrientation::Vertical,
                position: self.x.max(other.x),
                start: self.y.max(other.y),
            });
        }
        if (self.top() == other.y || other.top() == self.y) && x_overlap > 0.0 {
            return Some(SharedEdge {
                overlap: x_overlap,
                orientation: WallOrientation::Horizontal,
                position: self.y.max(other.y),
                start: self.x.max(other.x),
            });
        }
        None
    }
}

/// Run direction of a wall segment in plan view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallOrientation {
    /// Runs east-west
    Horizontal,
    /// Runs north-south
    Vertical,
}

impl Display for WallOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let printable = match *self {
            WallOrientation::Horizontal => "horizontal",
            WallOrientation::Vertical => "vertical",
        };
        write!(f, "{}", printable)
    }
}

/// Edge segment shared by two rectangles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharedEdge {
    /// Overlap length (ft)
    pub overlap: f32,
    /// Run direction of the shared segment
    pub orientation: WallOrientation,
    /// Coordinate of the touching edge on the perpendicular axis (ft)
    pub position: f32,
    /// Start of the overlap along the run axis (ft)
    pub start: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_and_overlap() {
        let outer = Rect::new(0.0, 0.0, 20.0, 20.0);
        let inner = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.overlaps(&inner));

        // touching is not overlapping
        let beside = Rect::new(20.0, 0.0, 5.0, 5.0);
        assert!(!outer.overlaps(&beside));
    }

    #[test]
    fn edge_sharing() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 4.0, 8.0, 10.0);
        let edge = a.shares_edge(&b).unwrap();
        assert_eq!(edge.orientation, WallOrientation::Vertical);
        assert_eq!(edge.overlap, 6.0);
        assert_eq!(edge.start, 4.0);

        // corner contact only: projections do not overlap strictly
        let c = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(a.shares_edge(&c).is_none());

        // separated
        let d = Rect::new(11.0, 0.0, 5.0, 5.0);
        assert!(a.shares_edge(&d).is_none());
    }

    #[test]
    fn manhattan_distance() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, 6.0);
        assert_eq!(manhattan(a, b), 7.0);
    }
}
