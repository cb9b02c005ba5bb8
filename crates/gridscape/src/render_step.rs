//! The render step a manager registers with its host.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use gridscape_core::logging::targets;

use crate::entity::Entity;
use crate::host::{RenderStep, RenderStepId};
use crate::manager::{EntityManager, ManagerShared};

/// Draws a manager's visible entities as part of the host's pipeline.
///
/// The step holds only a weak link to its manager; once the manager is gone
/// the step reports nothing to draw.
pub struct EntityRenderStep {
    id: RenderStepId,
    sort_order: u32,
    manager: Mutex<Weak<ManagerShared>>,
    disposed: AtomicBool,
}

impl EntityRenderStep {
    pub(crate) fn new(sort_order: u32) -> Self {
        Self {
            id: RenderStepId::next(),
            sort_order,
            manager: Mutex::new(Weak::new()),
            disposed: AtomicBool::new(false),
        }
    }

    /// Point the step at the manager whose entities it draws.
    pub fn set_data(&self, manager: &EntityManager) {
        *self.manager.lock() = Arc::downgrade(&manager.shared);
        self.disposed.store(false, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn manager(&self) -> Option<Arc<ManagerShared>> {
        if self.is_disposed() {
            return None;
        }
        self.manager.lock().upgrade()
    }

    /// Whether the manager has anything new to draw.
    pub fn needs_redraw(&self) -> bool {
        self.manager().is_some_and(|manager| manager.is_dirty())
    }

    /// Entities to draw, back to front. Hidden entities are skipped.
    pub fn visible_entities(&self) -> Vec<Arc<Entity>> {
        self.manager()
            .map(|manager| manager.visible_entities())
            .unwrap_or_default()
            .into_iter()
            .filter(|entity| entity.is_visible())
            .collect()
    }

    /// Take the draw list if a redraw is needed, marking the manager clean.
    ///
    /// Returns `None` when nothing changed since the last refresh.
    pub fn refresh(&self) -> Option<Vec<Arc<Entity>>> {
        let Some(manager) = self.manager() else {
            if !self.is_disposed() {
                gridscape_core::gridscape_warn!("entity render step refreshed after its manager was dropped");
            }
            return None;
        };
        if !manager.is_dirty() {
            return None;
        }

        let draw_list = self.visible_entities();
        manager.mark_clean();
        tracing::trace!(target: targets::RENDER_STEP, count = draw_list.len(), "entity draw list refreshed");
        Some(draw_list)
    }
}

impl RenderStep for EntityRenderStep {
    fn id(&self) -> RenderStepId {
        self.id
    }

    fn name(&self) -> &str {
        "entities"
    }

    fn sort_order(&self) -> u32 {
        self.sort_order
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
        *self.manager.lock() = Weak::new();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for EntityRenderStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRenderStep")
            .field("id", &self.id)
            .field("sort_order", &self.sort_order)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

static_assertions::assert_impl_all!(EntityRenderStep: Send, Sync);
