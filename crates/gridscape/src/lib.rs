//! Gridscape - entity visibility and redraw coordination for cell grids.
//!
//! Entities are glyphs or animated surfaces positioned on a host's cell grid,
//! either by cell or by pixel. An [`EntityManager`] attached to a host keeps
//! track of which entities fall inside the host's viewport, keeps those sorted
//! by z-index, and raises one dirty flag whenever the picture on screen would
//! change.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use gridscape::{Color, ColoredGlyph, Entity, EntityManager};
//! use gridscape_core::Point;
//!
//! let manager = EntityManager::new();
//! let player = Arc::new(
//!     Entity::single_cell(ColoredGlyph::new('@' as u32, Color::WHITE, Color::BLACK), 10)
//!         .with_position(Point::new(4, 2)),
//! );
//! manager.add(&player);
//! manager.attach_to_host(host)?;
//!
//! loop {
//!     manager.update(Duration::from_millis(16));
//!     if let Some(draw_list) = manager.render_step().and_then(|step| step.refresh()) {
//!         // draw `draw_list` back to front
//!     }
//! }
//! ```

pub mod appearance;
pub mod config;
pub mod effect;
pub mod entity;
pub mod error;
pub mod glyph;
pub mod host;
pub mod manager;
pub mod render_step;
pub mod surface;
pub mod viewport;

pub use appearance::{Appearance, AppearanceMode, SingleCellAppearance};
pub use config::{DEFAULT_RENDER_STEP_ORDER, ManagerBuilder, ManagerConfig};
pub use effect::{Blink, CellEffect, Fade};
pub use entity::{Entity, EntityGeometry, EntityId, Footprint, PositionChange};
pub use error::{EntityError, EntityResult};
pub use glyph::{Color, ColoredGlyph, Mirror};
pub use host::{FontHandle, HostSurface, RenderPipeline, RenderStep, RenderStepId, RenderStepList};
pub use manager::{EntityManager, ManagerStats};
pub use render_step::EntityRenderStep;
pub use surface::{AnimatedSurface, CellGrid, PlaybackState};
pub use viewport::CachedViewport;
