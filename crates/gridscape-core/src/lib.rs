//! Core systems for Gridscape.
//!
//! This crate provides the foundational pieces shared by the entity and
//! visibility layers:
//!
//! - **Geometry**: integer points, sizes and half-open rectangles used for
//!   both cell-space and pixel-space math
//! - **Signal/Slot System**: synchronous, type-safe change notification
//! - **Logging**: `tracing` targets, span names and helper macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use gridscape_core::{Point, Signal};
//!
//! let position_changed = Signal::<(Point, Point)>::new();
//!
//! let conn_id = position_changed.connect(|(old, new)| {
//!     println!("moved from {old:?} to {new:?}");
//! });
//!
//! position_changed.emit((Point::new(0, 0), Point::new(1, 0)));
//! position_changed.disconnect(conn_id);
//! ```

pub mod geometry;
pub mod logging;
pub mod signal;

pub use geometry::{Point, Rect, Size};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
