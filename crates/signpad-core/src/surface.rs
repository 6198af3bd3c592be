//! RGBA pixel surface and stroke rasterization.

use crate::stroke::{LineCap, StrokeStyle};
use kurbo::{Line, ParamCurveNearest, Point, Rect, Vec2};
use peniko::Color;
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Snapshot is {snapshot_width}x{snapshot_height}, surface is {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        snapshot_width: u32,
        snapshot_height: u32,
    },
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Accuracy passed to kurbo's nearest-point query; segments are straight
/// lines so this only guards the degenerate case.
const NEAREST_ACCURACY: f64 = 1e-9;

/// A straight-alpha RGBA8 pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// An immutable copy of a surface's pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Box<[u8]>,
}

/// A rectangular block of pixels copied out of a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl Surface {
    /// Create a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut surface = Self::transparent(width, height);
        surface.fill(background);
        surface
    }

    /// Create a fully transparent surface.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA8 data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f64, self.height as f64)
    }

    /// RGBA value of a single pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        let value = [rgba.r, rgba.g, rgba.b, rgba.a];
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&value);
        }
    }

    /// True if every pixel equals `color`.
    pub fn is_filled_with(&self, color: Color) -> bool {
        let rgba = color.to_rgba8();
        let value = [rgba.r, rgba.g, rgba.b, rgba.a];
        self.pixels.chunks_exact(4).all(|px| px == value)
    }

    /// Capture the current pixels.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone().into_boxed_slice(),
        }
    }

    /// Replace the pixels with a previously captured snapshot.
    pub fn restore(&mut self, snapshot: &Snapshot) -> SurfaceResult<()> {
        if snapshot.width != self.width || snapshot.height != self.height {
            return Err(SurfaceError::SizeMismatch {
                width: self.width,
                height: self.height,
                snapshot_width: snapshot.width,
                snapshot_height: snapshot.height,
            });
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
        Ok(())
    }

    /// Copy the pixels inside `rect` (clipped to the surface, expanded to
    /// whole pixels). Returns `None` when nothing remains after clipping.
    pub fn copy_region(&self, rect: Rect) -> Option<PixelRegion> {
        let (x0, y0, x1, y1) = self.pixel_span(rect)?;
        let width = x1 - x0;
        let height = y1 - y0;
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in y0..y1 {
            let start = self.index(x0, y);
            let end = start + width as usize * 4;
            pixels.extend_from_slice(&self.pixels[start..end]);
        }
        Some(PixelRegion {
            x: x0,
            y: y0,
            width,
            height,
            pixels,
        })
    }

    /// Rasterize one anti-aliased segment with the given style, blending
    /// source-over. Returns the area touched, if any.
    pub fn draw_segment(&mut self, segment: Line, style: &StrokeStyle) -> Option<Rect> {
        let half = style.half_width();
        if !(half > 0.0) {
            return None;
        }
        let reach = match style.cap {
            LineCap::Square => half * std::f64::consts::SQRT_2,
            LineCap::Butt | LineCap::Round => half,
        } + 1.0;
        let area = Rect::from_points(segment.p0, segment.p1).inflate(reach, reach);
        let (x0, y0, x1, y1) = self.pixel_span(area)?;

        let rgba = style.color.to_rgba8();
        let ink = [rgba.r, rgba.g, rgba.b];
        let ink_alpha = rgba.a as f64 / 255.0;
        if ink_alpha <= 0.0 {
            return None;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = segment_coverage(segment, center, half, style.cap);
                if coverage > 0.0 {
                    let i = self.index(x, y);
                    blend_over(&mut self.pixels[i..i + 4], ink, ink_alpha * coverage);
                }
            }
        }

        Some(Rect::new(x0 as f64, y0 as f64, x1 as f64, y1 as f64))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Whole-pixel span `[x0, x1) x [y0, y1)` of `rect` clipped to the surface.
    fn pixel_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let clipped = rect.intersect(self.bounds());
        let x0 = clipped.x0.floor().max(0.0) as u32;
        let y0 = clipped.y0.floor().max(0.0) as u32;
        let x1 = (clipped.x1.ceil().min(self.width as f64)).max(0.0) as u32;
        let y1 = (clipped.y1.ceil().min(self.height as f64)).max(0.0) as u32;
        (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
    }
}

/// Fraction of the pixel centered at `p` covered by the stroked segment,
/// using a one-pixel linear falloff across the edge.
fn segment_coverage(segment: Line, p: Point, half: f64, cap: LineCap) -> f64 {
    let edge = |distance: f64| (half + 0.5 - distance).clamp(0.0, 1.0);

    let dir: Vec2 = segment.p1 - segment.p0;
    let len = dir.hypot();

    match cap {
        LineCap::Round => edge(segment.nearest(p, NEAREST_ACCURACY).distance_sq.sqrt()),
        LineCap::Butt | LineCap::Square if len < f64::EPSILON => match cap {
            LineCap::Square => {
                let offset = p - segment.p0;
                edge(offset.x.abs().max(offset.y.abs()))
            }
            _ => 0.0,
        },
        LineCap::Butt | LineCap::Square => {
            let unit = dir / len;
            let offset = p - segment.p0;
            let along = offset.dot(unit);
            let across = offset.cross(unit).abs();
            let extension = if cap == LineCap::Square { half } else { 0.0 };
            let inside_ends = (along + extension).min(len + extension - along);
            edge(across) * (inside_ends + 0.5).clamp(0.0, 1.0)
        }
    }
}

/// Source-over blend of `ink` at `alpha` onto a straight-alpha pixel.
fn blend_over(dst: &mut [u8], ink: [u8; 3], alpha: f64) {
    let dst_alpha = dst[3] as f64 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return;
    }
    for c in 0..3 {
        let src = ink[c] as f64;
        let bg = dst[c] as f64;
        let value = (src * alpha + bg * dst_alpha * (1.0 - alpha)) / out_alpha;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn white() -> Color {
        Color::from_rgba8(255, 255, 255, 255)
    }

    fn pen(width: f64, cap: LineCap) -> StrokeStyle {
        StrokeStyle {
            width,
            cap,
            color: Color::from_rgba8(0, 0, 0, 255),
        }
    }

    #[test]
    fn test_new_surface_is_filled() {
        let surface = Surface::new(8, 4, white());
        assert_eq!(surface.pixels().len(), 8 * 4 * 4);
        assert!(surface.is_filled_with(white()));
        assert_eq!(surface.pixel(7, 3), Some(WHITE));
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn test_transparent_surface() {
        let surface = Surface::transparent(2, 2);
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_round_segment_covers_its_centerline() {
        let mut surface = Surface::new(40, 20, white());
        let dirty = surface
            .draw_segment(Line::new((5.0, 10.0), (35.0, 10.0)), &pen(5.0, LineCap::Round))
            .unwrap();

        assert_eq!(surface.pixel(20, 9), Some(BLACK));
        assert_eq!(surface.pixel(5, 9), Some(BLACK));
        // Well outside the stroke
        assert_eq!(surface.pixel(20, 2), Some(WHITE));
        assert!(dirty.contains(Point::new(20.0, 10.0)));
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut round = Surface::new(40, 20, white());
        let mut butt = Surface::new(40, 20, white());
        let segment = Line::new((10.0, 10.0), (30.0, 10.0));

        round.draw_segment(segment, &pen(6.0, LineCap::Round));
        butt.draw_segment(segment, &pen(6.0, LineCap::Butt));

        // Two pixels before the start point is inside the round cap only
        assert_eq!(round.pixel(8, 9), Some(BLACK));
        assert_eq!(butt.pixel(8, 9), Some(WHITE));
    }

    #[test]
    fn test_square_cap_extends_by_half_width() {
        let mut surface = Surface::new(40, 20, white());
        surface.draw_segment(Line::new((10.0, 10.0), (30.0, 10.0)), &pen(6.0, LineCap::Square));

        assert_eq!(surface.pixel(8, 8), Some(BLACK));
        assert_eq!(surface.pixel(3, 9), Some(WHITE));
    }

    #[test]
    fn test_zero_length_round_segment_draws_disc() {
        let mut surface = Surface::new(20, 20, white());
        let center = Point::new(10.0, 10.0);
        surface.draw_segment(Line::new(center, center), &pen(6.0, LineCap::Round));

        assert_eq!(surface.pixel(9, 9), Some(BLACK));
        assert_eq!(surface.pixel(10, 10), Some(BLACK));
        assert_eq!(surface.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_zero_length_butt_segment_draws_nothing() {
        let mut surface = Surface::new(20, 20, white());
        let center = Point::new(10.0, 10.0);
        surface.draw_segment(Line::new(center, center), &pen(6.0, LineCap::Butt));
        assert!(surface.is_filled_with(white()));
    }

    #[test]
    fn test_segment_outside_surface_is_clipped() {
        let mut surface = Surface::new(10, 10, white());
        let segment = Line::new((-50.0, -50.0), (-40.0, -40.0));
        let dirty = surface.draw_segment(segment, &pen(5.0, LineCap::Round));
        assert!(dirty.is_none());
        assert!(surface.is_filled_with(white()));
    }

    #[test]
    fn test_ink_on_transparent_is_opaque() {
        let mut surface = Surface::transparent(20, 20);
        surface.draw_segment(Line::new((2.0, 10.0), (18.0, 10.0)), &pen(4.0, LineCap::Round));
        assert_eq!(surface.pixel(10, 9), Some(BLACK));
        assert_eq!(surface.pixel(10, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_edge_pixels_are_blended() {
        let mut surface = Surface::new(20, 20, white());
        // Half-width 1.0 off the pixel grid, so row 11 is only partly covered
        surface.draw_segment(Line::new((0.0, 10.25), (20.0, 10.25)), &pen(2.0, LineCap::Butt));
        let edge = surface.pixel(10, 11).unwrap();
        assert!(edge[0] > 0 && edge[0] < 255, "expected partial coverage, got {:?}", edge);
        assert_eq!(edge[3], 255);
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut surface = Surface::new(16, 16, white());
        let blank = surface.snapshot();

        surface.draw_segment(Line::new((0.0, 0.0), (16.0, 16.0)), &pen(3.0, LineCap::Round));
        assert!(!surface.is_filled_with(white()));

        surface.restore(&blank).unwrap();
        assert!(surface.is_filled_with(white()));
    }

    #[test]
    fn test_restore_rejects_other_sizes() {
        let mut surface = Surface::new(16, 16, white());
        let other = Surface::new(8, 8, white()).snapshot();
        assert_eq!(
            surface.restore(&other),
            Err(SurfaceError::SizeMismatch {
                width: 16,
                height: 16,
                snapshot_width: 8,
                snapshot_height: 8,
            })
        );
    }

    #[test]
    fn test_copy_region_clips_to_surface() {
        let mut surface = Surface::new(4, 4, white());
        surface.fill(Color::from_rgba8(1, 2, 3, 255));

        let region = surface.copy_region(Rect::new(2.5, -3.0, 10.0, 1.2)).unwrap();
        assert_eq!((region.x, region.y, region.width, region.height), (2, 0, 2, 2));
        assert_eq!(region.pixels.len(), 2 * 2 * 4);
        assert_eq!(&region.pixels[..4], &[1, 2, 3, 255]);

        assert!(surface.copy_region(Rect::new(5.0, 5.0, 9.0, 9.0)).is_none());
    }

    #[test]
    fn test_zero_sized_surface() {
        let mut surface = Surface::new(0, 0, white());
        assert!(surface.is_empty());
        let segment = Line::new((0.0, 0.0), (3.0, 0.0));
        assert!(surface.draw_segment(segment, &pen(5.0, LineCap::Round)).is_none());
    }
}
