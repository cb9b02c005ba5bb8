//! Shared fixtures for manager integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use gridscape::{
    AnimatedSurface, CellGrid, Color, ColoredGlyph, Entity, FontHandle, HostSurface,
    RenderPipeline, RenderStepList,
};
use gridscape_core::{Point, Rect, Size};

pub const CELL: Size = Size::new(8, 16);

/// Route `tracing` output to the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A host whose viewport can be changed between frames.
pub struct TestHost {
    font: Mutex<FontHandle>,
    font_size: Mutex<Size>,
    view: Mutex<Rect>,
    pixel_area: Mutex<Rect>,
    pipeline: Option<RenderStepList>,
}

impl TestHost {
    /// A `width` x `height` cell view at the origin with 8x16 cells.
    pub fn new(width: i32, height: i32) -> Arc<Self> {
        Arc::new(Self::build(width, height, Some(RenderStepList::new())))
    }

    /// A host that has no render pipeline.
    pub fn without_pipeline() -> Arc<Self> {
        Arc::new(Self::build(10, 10, None))
    }

    fn build(width: i32, height: i32, pipeline: Option<RenderStepList>) -> Self {
        Self {
            font: Mutex::new(FontHandle(1)),
            font_size: Mutex::new(CELL),
            view: Mutex::new(Rect::new(0, 0, width, height)),
            pixel_area: Mutex::new(Rect::new(0, 0, width * CELL.width, height * CELL.height)),
            pipeline,
        }
    }

    pub fn scroll_to(&self, x: i32, y: i32) {
        let mut view = self.view.lock();
        *view = view.with_position(Point::new(x, y));
    }

    pub fn set_font(&self, font: FontHandle) {
        *self.font.lock() = font;
    }

    pub fn set_pixel_area(&self, area: Rect) {
        *self.pixel_area.lock() = area;
    }

    pub fn steps(&self) -> &RenderStepList {
        self.pipeline.as_ref().expect("host has no pipeline")
    }
}

impl HostSurface for TestHost {
    fn font(&self) -> FontHandle {
        *self.font.lock()
    }

    fn font_size(&self) -> Size {
        *self.font_size.lock()
    }

    fn view_rect(&self) -> Rect {
        *self.view.lock()
    }

    fn absolute_pixel_area(&self) -> Rect {
        *self.pixel_area.lock()
    }

    fn render_pipeline(&self) -> Option<&dyn RenderPipeline> {
        self.pipeline.as_ref().map(|steps| steps as &dyn RenderPipeline)
    }
}

pub fn glyph(ch: char) -> ColoredGlyph {
    ColoredGlyph::new(ch as u32, Color::WHITE, Color::BLACK)
}

pub fn cell_entity(x: i32, y: i32, z: i32) -> Arc<Entity> {
    Arc::new(Entity::single_cell(glyph('@'), z).with_position(Point::new(x, y)))
}

pub fn pixel_entity(x: i32, y: i32, z: i32) -> Arc<Entity> {
    Arc::new(
        Entity::single_cell(glyph('*'), z)
            .with_position(Point::new(x, y))
            .with_pixel_positioning(true),
    )
}

/// A two-frame `width` x `height` surface centered on its middle cell.
pub fn surface_entity(x: i32, y: i32, width: i32, height: i32, z: i32) -> Arc<Entity> {
    let frames = vec![
        CellGrid::filled(width, height, glyph('#')),
        CellGrid::filled(width, height, glyph('+')),
    ];
    let surface = AnimatedSurface::new(frames, Duration::from_millis(100))
        .expect("two frames")
        .with_center(Point::new(width / 2, height / 2));
    Arc::new(Entity::surface(surface, z).with_position(Point::new(x, y)))
}

pub fn z_order(entities: &[Arc<Entity>]) -> Vec<i32> {
    entities.iter().map(|entity| entity.z_index()).collect()
}
