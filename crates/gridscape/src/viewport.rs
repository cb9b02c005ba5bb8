//! Cached host viewport and the entity visibility test.
//!
//! The manager keeps the last host font, cell size and view rectangle it saw.
//! When any of them changes, every entity must be re-evaluated; otherwise
//! per-entity notifications are enough.
//!
//! # Visibility rules
//!
//! | Appearance | Cell-space position | Pixel-space position |
//! |------------|--------------------|----------------------|
//! | single cell | view rect contains position | pixel area contains position |
//! | surface | view rect intersects footprint | pixel area intersects footprint |
//!
//! The pixel area is the host's absolute pixel area moved to
//! `view origin × cell size` and grown by one cell on every side, so entities
//! in a partially scrolled cell still count as visible.

use gridscape_core::{Point, Rect, Size};

use crate::entity::{EntityGeometry, Footprint};
use crate::host::{FontHandle, HostSurface};

/// The viewport state a visibility decision was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CachedViewport {
    pub font: Option<FontHandle>,
    /// Size of one cell in pixels.
    pub font_size: Size,
    /// Visible cells.
    pub view: Rect,
    /// Visible pixels, offset by the scroll position and grown by one cell.
    pub pixel_area: Rect,
}

impl CachedViewport {
    /// Read the current viewport from a host.
    pub fn capture(host: &dyn HostSurface) -> Self {
        let font_size = host.font_size();
        let view = host.view_rect();
        let pixel_area = host
            .absolute_pixel_area()
            .with_position(view.origin * font_size)
            .expand(font_size.width, font_size.height);

        Self {
            font: Some(host.font()),
            font_size,
            view,
            pixel_area,
        }
    }

    /// Whether this cache disagrees with `current` on anything that forces a
    /// full re-evaluation.
    pub fn differs_from(&self, current: &CachedViewport) -> bool {
        self.font != current.font
            || self.font_size != current.font_size
            || self.view != current.view
    }

    /// The rectangle an entity occupies, in the space its position is in.
    ///
    /// Single-cell entities have no area; `None` is returned and callers use
    /// a point test instead. In cell space the rectangle is measured in
    /// cells; in pixel space it is the same area scaled by the cell size.
    pub fn footprint_rect(&self, geometry: &EntityGeometry) -> Option<Rect> {
        match geometry.footprint {
            Footprint::Cell => None,
            Footprint::Area { center, size } if geometry.use_pixel_positioning => {
                Some(Rect::from_origin_size(
                    geometry.position - center * self.font_size,
                    size * self.font_size,
                ))
            }
            Footprint::Area { center, size } => Some(Rect::from_origin_size(
                geometry.position - center,
                size,
            )),
        }
    }

    /// Whether an entity with this geometry is on screen.
    pub fn is_visible(&self, geometry: &EntityGeometry) -> bool {
        self.is_visible_at(geometry, geometry.position)
    }

    /// Whether an entity with this geometry would be on screen at `position`.
    pub fn is_visible_at(&self, geometry: &EntityGeometry, position: Point) -> bool {
        let geometry = EntityGeometry {
            position,
            ..*geometry
        };
        let area = if geometry.use_pixel_positioning {
            &self.pixel_area
        } else {
            &self.view
        };

        match self.footprint_rect(&geometry) {
            None => area.contains(geometry.position),
            Some(rect) => area.intersects(&rect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> CachedViewport {
        let font_size = Size::new(8, 16);
        let view = Rect::new(0, 0, 10, 10);
        CachedViewport {
            font: Some(FontHandle(1)),
            font_size,
            view,
            pixel_area: Rect::new(0, 0, 80, 160)
                .with_position(view.origin * font_size)
                .expand(8, 16),
        }
    }

    fn cell(x: i32, y: i32, pixel: bool) -> EntityGeometry {
        EntityGeometry {
            position: Point::new(x, y),
            use_pixel_positioning: pixel,
            footprint: Footprint::Cell,
        }
    }

    fn area(x: i32, y: i32, center: Point, size: Size, pixel: bool) -> EntityGeometry {
        EntityGeometry {
            position: Point::new(x, y),
            use_pixel_positioning: pixel,
            footprint: Footprint::Area { center, size },
        }
    }

    #[test]
    fn test_single_cell_in_view() {
        let vp = viewport();
        assert!(vp.is_visible(&cell(2, 3, false)));
        assert!(vp.is_visible(&cell(9, 9, false)));
        assert!(!vp.is_visible(&cell(10, 0, false)));
        assert!(!vp.is_visible(&cell(100, 100, false)));
    }

    #[test]
    fn test_pixel_and_cell_agree() {
        let vp = viewport();
        assert!(vp.is_visible(&cell(2, 3, false)));
        assert!(vp.is_visible(&cell(2 * 8, 3 * 16, true)));
    }

    #[test]
    fn test_pixel_area_tolerates_one_cell() {
        let vp = viewport();
        assert!(vp.is_visible(&cell(-8, 0, true)));
        assert!(!vp.is_visible(&cell(-9, 0, true)));
        assert!(vp.is_visible(&cell(87, 175, true)));
        assert!(!vp.is_visible(&cell(88, 0, true)));
    }

    #[test]
    fn test_surface_anchored_by_center() {
        let vp = viewport();
        let size = Size::new(3, 3);
        let center = Point::new(1, 1);
        // Covers cells 10..13 horizontally: just outside.
        assert!(!vp.is_visible(&area(11, 5, center, size, false)));
        // Covers cells 9..12: overlaps the last column.
        assert!(vp.is_visible(&area(10, 5, center, size, false)));
        assert!(vp.is_visible(&area(-1, -1, center, size, false)));
        assert!(!vp.is_visible(&area(-2, 5, center, size, false)));
    }

    #[test]
    fn test_surface_pixel_footprint() {
        let vp = viewport();
        let geometry = area(100, 40, Point::new(1, 1), Size::new(2, 2), true);
        assert_eq!(vp.footprint_rect(&geometry), Some(Rect::new(92, 24, 16, 32)));
        // Pixel area spans -8..88 horizontally.
        assert!(!vp.is_visible(&geometry));
        assert!(vp.is_visible_at(&geometry, Point::new(95, 40)));
    }

    #[test]
    fn test_scrolled_view() {
        let mut vp = viewport();
        let host_area = Rect::new(200, 100, 80, 160);
        vp.view = Rect::new(20, 5, 10, 10);
        vp.pixel_area = host_area
            .with_position(vp.view.origin * vp.font_size)
            .expand(8, 16);

        assert!(!vp.is_visible(&cell(2, 3, false)));
        assert!(vp.is_visible(&cell(22, 7, false)));
        assert!(vp.is_visible(&cell(22 * 8, 7 * 16, true)));
    }

    #[test]
    fn test_far_positions_stay_invisible() {
        let vp = viewport();
        let center = Point::new(1, 1);
        let size = Size::new(3, 3);
        for pixel in [false, true] {
            assert!(!vp.is_visible(&area(i32::MAX, 5, center, size, pixel)));
            assert!(!vp.is_visible(&area(i32::MIN, i32::MIN, center, size, pixel)));
            assert!(!vp.is_visible(&cell(i32::MAX, i32::MAX, pixel)));
        }
    }

    #[test]
    fn test_differs_ignores_pixel_area() {
        let a = viewport();
        let mut b = a;
        b.pixel_area = Rect::new(1, 1, 1, 1);
        assert!(!a.differs_from(&b));
        b.view = Rect::new(1, 0, 10, 10);
        assert!(a.differs_from(&b));
    }
}
