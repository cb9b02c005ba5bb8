//! The host surface abstraction.
//!
//! A host is whatever owns the cell grid entities are drawn onto: a console
//! window, a scrollable panel, an offscreen buffer. The visibility layer only
//! polls it for viewport state and registers a single render step into its
//! draw pipeline; it never draws anything itself.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use gridscape_core::{Rect, Size};

/// An opaque handle identifying the host's current font.
///
/// Only compared for equality: a different handle means cell metrics may have
/// changed and every entity must be re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u64);

/// The surface a manager attaches to.
pub trait HostSurface: Send + Sync {
    /// The font currently used to draw the surface.
    fn font(&self) -> FontHandle;

    /// Size of one cell in pixels.
    fn font_size(&self) -> Size;

    /// The cells currently scrolled into view.
    fn view_rect(&self) -> Rect;

    /// The surface's on-screen bounds in pixels.
    fn absolute_pixel_area(&self) -> Rect;

    /// The draw pipeline entities are rendered through.
    ///
    /// Hosts that cannot draw return `None`; attaching to them fails with
    /// [`EntityError::UnsupportedHost`](crate::EntityError::UnsupportedHost).
    fn render_pipeline(&self) -> Option<&dyn RenderPipeline> {
        None
    }
}

/// Global counter for render step IDs.
static NEXT_RENDER_STEP_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a render step within a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderStepId(u64);

impl RenderStepId {
    /// Allocate a fresh, process-unique ID.
    pub fn next() -> Self {
        Self(NEXT_RENDER_STEP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One unit of work in a host's ordered draw pipeline.
pub trait RenderStep: Send + Sync {
    fn id(&self) -> RenderStepId;

    /// A short label for diagnostics.
    fn name(&self) -> &str;

    /// Steps run in ascending sort order.
    fn sort_order(&self) -> u32;

    /// Release whatever the step holds. Called once when the step is removed.
    fn dispose(&self);

    fn as_any(&self) -> &dyn Any;
}

/// The registration point for render steps.
pub trait RenderPipeline: Send + Sync {
    fn insert_step(&self, step: Arc<dyn RenderStep>);

    /// Remove a step. Returns `false` if it was not registered.
    fn remove_step(&self, id: RenderStepId) -> bool;
}

/// A ready-made render pipeline: steps kept sorted by [`RenderStep::sort_order`].
///
/// Steps with equal sort order run in insertion order.
#[derive(Default)]
pub struct RenderStepList {
    steps: Mutex<Vec<Arc<dyn RenderStep>>>,
}

impl RenderStepList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the registered steps in execution order.
    pub fn steps(&self) -> Vec<Arc<dyn RenderStep>> {
        self.steps.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.steps.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.lock().is_empty()
    }

    /// Find a step of concrete type `T`.
    pub fn find<T: RenderStep + 'static>(&self) -> Option<Arc<dyn RenderStep>> {
        self.steps
            .lock()
            .iter()
            .find(|step| step.as_any().is::<T>())
            .cloned()
    }
}

impl RenderPipeline for RenderStepList {
    fn insert_step(&self, step: Arc<dyn RenderStep>) {
        let mut steps = self.steps.lock();
        let order = step.sort_order();
        let index = steps.partition_point(|existing| existing.sort_order() <= order);
        steps.insert(index, step);
    }

    fn remove_step(&self, id: RenderStepId) -> bool {
        let mut steps = self.steps.lock();
        match steps.iter().position(|step| step.id() == id) {
            Some(index) => {
                steps.remove(index);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for RenderStepList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps = self.steps.lock();
        f.debug_list()
            .entries(steps.iter().map(|step| (step.name().to_string(), step.sort_order())))
            .finish()
    }
}
