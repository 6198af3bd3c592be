//! Stroke style and the in-progress stroke path.

use kurbo::{Line, Point};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Shape drawn at the ends of each segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat end exactly at the endpoint.
    Butt,
    /// Half-disc centered on the endpoint.
    #[default]
    Round,
    /// Flat end extended by half the line width.
    Square,
}

/// Pen style, fixed for the duration of one stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
    pub color: Color,
}

impl StrokeStyle {
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }
}

/// The stroke currently being drawn.
///
/// Only the pen position is tracked; pixels go straight into the surface as
/// each segment arrives.
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    style: StrokeStyle,
    current: Point,
    segments: usize,
}

impl ActiveStroke {
    /// Start a new stroke at `origin`.
    pub fn begin(origin: Point, style: StrokeStyle) -> Self {
        Self {
            style,
            current: origin,
            segments: 0,
        }
    }

    /// Append a segment to `point` and return it for rendering.
    pub fn extend_to(&mut self, point: Point) -> Line {
        let segment = Line::new(self.current, point);
        self.current = point;
        self.segments += 1;
        segment
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> StrokeStyle {
        StrokeStyle {
            width: 5.0,
            cap: LineCap::Round,
            color: Color::from_rgba8(0, 0, 0, 255),
        }
    }

    #[test]
    fn test_begin_sets_origin() {
        let stroke = ActiveStroke::begin(Point::new(3.0, 4.0), style());
        assert_eq!(stroke.segment_count(), 0);
        assert_eq!(
            stroke.clone().extend_to(Point::new(5.0, 4.0)),
            Line::new((3.0, 4.0), (5.0, 4.0))
        );
    }

    #[test]
    fn test_extend_chains_segments() {
        let mut stroke = ActiveStroke::begin(Point::new(0.0, 0.0), style());

        let first = stroke.extend_to(Point::new(10.0, 0.0));
        let second = stroke.extend_to(Point::new(10.0, 10.0));

        assert_eq!(first, Line::new((0.0, 0.0), (10.0, 0.0)));
        assert_eq!(second, Line::new((10.0, 0.0), (10.0, 10.0)));
        assert_eq!(stroke.segment_count(), 2);
    }

    #[test]
    fn test_half_width() {
        assert_eq!(style().half_width(), 2.5);
    }
}
