//! The entity visibility manager.
//!
//! [`EntityManager`] owns references to a set of entities, keeps the subset
//! that intersects its host's viewport sorted by z-index, and folds every
//! change that matters for drawing into one aggregate dirty flag.
//!
//! # Lifecycle
//!
//! A manager is either detached or attached to exactly one host:
//!
//! - **Detached**: added entities wait in a holding buffer. Nothing is
//!   subscribed, nothing is visible.
//! - **Attached**: the holding buffer is flushed into the live collection in
//!   one batch (one sort), every live entity is subscribed, and a render step
//!   is registered with the host.
//!
//! Detaching moves the live collection back into the holding buffer and tears
//! down every subscription, so a later attach restores the same entities.
//!
//! # Per-frame flow
//!
//! ```ignore
//! // update thread, once per frame
//! manager.update(frame_time);
//!
//! // draw pass
//! if let Some(draw_list) = manager.render_step().and_then(|step| step.refresh()) {
//!     for entity in draw_list {
//!         draw(&entity);
//!     }
//! }
//! ```
//!
//! # Draw order
//!
//! Visible entities are kept in ascending z-index order using a stable sort.
//! Entities with equal z-index keep their relative order in the visible list;
//! an entity that becomes visible is placed after the ones already there.

use std::collections::HashSet;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use gridscape_core::logging::{span_names, targets};
use gridscape_core::{ConnectionId, PerfSpan, Signal};

use crate::config::ManagerConfig;
use crate::entity::{Entity, EntityId, PositionChange};
use crate::error::{EntityError, EntityResult};
use crate::host::{HostSurface, RenderStep};
use crate::render_step::EntityRenderStep;
use crate::viewport::CachedViewport;

/// Counters describing the work a manager has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagerStats {
    /// Individual entity visibility evaluations.
    pub visibility_checks: u64,
    /// Sorts of the visible list.
    pub sorts: u64,
    /// Updates that re-evaluated every entity because the viewport changed.
    pub full_evaluations: u64,
}

/// The slots a manager has connected to one entity.
struct Subscriptions {
    position: ConnectionId,
    visibility: ConnectionId,
    dirty: ConnectionId,
    layout: ConnectionId,
}

impl Subscriptions {
    fn connect(shared: &Arc<ManagerShared>, entity: &Arc<Entity>) -> Self {
        let position = {
            let (manager, weak_entity) = (Arc::downgrade(shared), Arc::downgrade(entity));
            entity.position_changed.connect(move |change| {
                if let (Some(manager), Some(entity)) = (manager.upgrade(), weak_entity.upgrade()) {
                    manager.on_position_changed(&entity, change);
                }
            })
        };
        let visibility = {
            let (manager, weak_entity) = (Arc::downgrade(shared), Arc::downgrade(entity));
            entity.visibility_changed.connect(move |_| {
                if let (Some(manager), Some(entity)) = (manager.upgrade(), weak_entity.upgrade()) {
                    manager.on_visibility_changed(&entity);
                }
            })
        };
        let dirty = {
            let (manager, weak_entity) = (Arc::downgrade(shared), Arc::downgrade(entity));
            entity.dirty_changed.connect(move |&dirty| {
                if let (Some(manager), Some(entity)) = (manager.upgrade(), weak_entity.upgrade()) {
                    manager.on_dirty_changed(&entity, dirty);
                }
            })
        };
        let layout = {
            let (manager, weak_entity) = (Arc::downgrade(shared), Arc::downgrade(entity));
            entity.layout_changed.connect(move |_| {
                if let (Some(manager), Some(entity)) = (manager.upgrade(), weak_entity.upgrade()) {
                    manager.on_layout_changed(&entity);
                }
            })
        };

        Self {
            position,
            visibility,
            dirty,
            layout,
        }
    }

    fn disconnect(self, entity: &Entity) {
        entity.position_changed.disconnect(self.position);
        entity.visibility_changed.disconnect(self.visibility);
        entity.dirty_changed.disconnect(self.dirty);
        entity.layout_changed.disconnect(self.layout);
    }
}

/// A live entity and its subscriptions.
struct Tracked {
    entity: Arc<Entity>,
    subscriptions: Subscriptions,
}

/// Live state that only exists while a host is attached.
struct Attached {
    host: Arc<dyn HostSurface>,
    render_step: Arc<EntityRenderStep>,
    viewport: CachedViewport,
    /// Insertion-ordered live entities.
    entities: Vec<Tracked>,
    index: HashSet<EntityId>,
    /// Visible entities, ascending by z-index.
    visible: Vec<Arc<Entity>>,
    visible_ids: HashSet<EntityId>,
}

impl Attached {
    fn new(host: Arc<dyn HostSurface>, render_step: Arc<EntityRenderStep>, viewport: CachedViewport) -> Self {
        Self {
            host,
            render_step,
            viewport,
            entities: Vec::new(),
            index: HashSet::new(),
            visible: Vec::new(),
            visible_ids: HashSet::new(),
        }
    }

    fn entity_list(&self) -> Vec<Arc<Entity>> {
        self.entities.iter().map(|tracked| tracked.entity.clone()).collect()
    }

    /// Bring one entity's visible-list membership in line with its geometry.
    ///
    /// Returns `true` if membership changed. With `sort`, the visible list is
    /// re-sorted whenever the entity ends up visible.
    fn evaluate(&mut self, entity: &Arc<Entity>, sort: bool, stats: &mut ManagerStats) -> bool {
        stats.visibility_checks += 1;

        let id = entity.id();
        let visible = self.viewport.is_visible(&entity.geometry());
        let listed = self.visible_ids.contains(&id);

        let changed = match (visible, listed) {
            (true, false) => {
                self.visible_ids.insert(id);
                self.visible.push(entity.clone());
                true
            }
            (false, true) => {
                self.visible_ids.remove(&id);
                self.visible.retain(|other| other.id() != id);
                true
            }
            _ => false,
        };

        if changed {
            tracing::trace!(target: targets::MANAGER, entity = %id, visible, "visibility changed");
        }
        if sort && visible {
            self.sort_visible(stats);
        }
        changed
    }

    fn sort_visible(&mut self, stats: &mut ManagerStats) {
        self.visible.sort_by_key(|entity| entity.z_index());
        stats.sorts += 1;
    }
}

enum Lifecycle {
    Detached { holding: Vec<Arc<Entity>> },
    Attached(Box<Attached>),
}

struct ManagerState {
    lifecycle: Lifecycle,
    is_dirty: bool,
    stats: ManagerStats,
}

/// State shared between the manager, its subscriptions and its render step.
pub(crate) struct ManagerShared {
    config: ManagerConfig,
    state: Mutex<ManagerState>,
}

impl ManagerShared {
    /// Insert an entity into the live collection.
    ///
    /// Returns `false` if the entity was already live and existence checks
    /// are enabled.
    fn add_live(
        shared: &Arc<ManagerShared>,
        attached: &mut Attached,
        entity: &Arc<Entity>,
        sort: bool,
        is_dirty: &mut bool,
        stats: &mut ManagerStats,
    ) -> bool {
        let id = entity.id();
        if !attached.index.insert(id) && !shared.config.skip_existence_checks {
            return false;
        }

        let subscriptions = Subscriptions::connect(shared, entity);
        attached.entities.push(Tracked {
            entity: entity.clone(),
            subscriptions,
        });
        if attached.evaluate(entity, sort, stats) {
            *is_dirty = true;
        }
        tracing::trace!(target: targets::MANAGER, manager = %shared.config.name, entity = %id, "entity added");
        true
    }

    fn on_position_changed(&self, entity: &Arc<Entity>, change: &PositionChange) {
        let mut state = self.state.lock();
        let ManagerState {
            lifecycle,
            is_dirty,
            stats,
        } = &mut *state;
        let Lifecycle::Attached(attached) = lifecycle else {
            return;
        };
        if !attached.index.contains(&entity.id()) {
            return;
        }

        // The old image has to be erased even if the new position is off screen.
        if attached.viewport.is_visible_at(&entity.geometry(), change.old) {
            *is_dirty = true;
        }
        if attached.evaluate(entity, true, stats) {
            *is_dirty = true;
        }
    }

    fn on_layout_changed(&self, entity: &Arc<Entity>) {
        let mut state = self.state.lock();
        let ManagerState {
            lifecycle,
            is_dirty,
            stats,
        } = &mut *state;
        let Lifecycle::Attached(attached) = lifecycle else {
            return;
        };
        if !attached.index.contains(&entity.id()) {
            return;
        }

        if attached.visible_ids.contains(&entity.id()) {
            *is_dirty = true;
        }
        if attached.evaluate(entity, true, stats) {
            *is_dirty = true;
        }
    }

    fn on_visibility_changed(&self, entity: &Entity) {
        let mut state = self.state.lock();
        let is_listed = match &state.lifecycle {
            Lifecycle::Attached(attached) => attached.visible_ids.contains(&entity.id()),
            Lifecycle::Detached { .. } => false,
        };
        if is_listed {
            state.is_dirty = true;
        }
    }

    fn on_dirty_changed(&self, entity: &Entity, dirty: bool) {
        // Clean transitions come from the draw pass and never need a redraw.
        if dirty {
            self.on_visibility_changed(entity);
        }
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.state.lock().is_dirty
    }

    pub(crate) fn visible_entities(&self) -> Vec<Arc<Entity>> {
        match &self.state.lock().lifecycle {
            Lifecycle::Attached(attached) => attached.visible.clone(),
            Lifecycle::Detached { .. } => Vec::new(),
        }
    }

    /// Clear the aggregate flag and the dirty bits of every visible entity.
    pub(crate) fn mark_clean(&self) {
        let visible = {
            let mut state = self.state.lock();
            state.is_dirty = false;
            match &state.lifecycle {
                Lifecycle::Attached(attached) => attached.visible.clone(),
                Lifecycle::Detached { .. } => Vec::new(),
            }
        };
        for entity in visible {
            entity.set_dirty(false);
        }
    }
}

/// Tracks which entities are on screen and whether the screen needs redrawing.
///
/// # Example
///
/// ```ignore
/// use gridscape::{Entity, EntityManager};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let manager = EntityManager::new();
/// let player = Arc::new(Entity::single_cell(glyph, 10));
/// manager.add(&player);            // buffered until attached
///
/// manager.attach_to_host(host.clone())?;
/// manager.update(Duration::from_millis(16));
/// assert!(manager.is_dirty());
/// ```
pub struct EntityManager {
    pub(crate) shared: Arc<ManagerShared>,
    /// Signal emitted after an entity joins the live collection.
    pub entity_added: Signal<EntityId>,
    /// Signal emitted after an entity leaves the live collection.
    pub entity_removed: Signal<EntityId>,
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityManager {
    /// Create a detached manager with default settings.
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    /// Create a detached manager with custom settings.
    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            shared: Arc::new(ManagerShared {
                config,
                state: Mutex::new(ManagerState {
                    lifecycle: Lifecycle::Detached {
                        holding: Vec::new(),
                    },
                    is_dirty: false,
                    stats: ManagerStats::default(),
                }),
            }),
            entity_added: Signal::new(),
            entity_removed: Signal::new(),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.shared.config
    }

    /// Add an entity.
    ///
    /// While detached the entity is buffered. While attached it joins the live
    /// collection, its visibility is evaluated and `entity_added` fires.
    /// Returns `false` if the entity was already present (unless existence
    /// checks are skipped).
    pub fn add(&self, entity: &Arc<Entity>) -> bool {
        let (accepted, live) = {
            let mut state = self.shared.state.lock();
            let ManagerState {
                lifecycle,
                is_dirty,
                stats,
            } = &mut *state;
            match lifecycle {
                Lifecycle::Detached { holding } => {
                    (buffer(holding, entity, self.shared.config.skip_existence_checks), false)
                }
                Lifecycle::Attached(attached) => {
                    let added = ManagerShared::add_live(&self.shared, attached, entity, true, is_dirty, stats);
                    (added, added)
                }
            }
        };

        if live {
            self.entity_added.emit(entity.id());
        }
        accepted
    }

    /// Add several entities, sorting the visible list once at the end.
    ///
    /// Returns how many entities were accepted.
    pub fn add_range<I>(&self, entities: I) -> usize
    where
        I: IntoIterator<Item = Arc<Entity>>,
    {
        let (accepted, live) = {
            let mut state = self.shared.state.lock();
            let ManagerState {
                lifecycle,
                is_dirty,
                stats,
            } = &mut *state;
            match lifecycle {
                Lifecycle::Detached { holding } => {
                    let skip = self.shared.config.skip_existence_checks;
                    let count = entities
                        .into_iter()
                        .filter(|entity| buffer(holding, entity, skip))
                        .count();
                    (count, Vec::new())
                }
                Lifecycle::Attached(attached) => {
                    let mut added = Vec::new();
                    for entity in entities {
                        if ManagerShared::add_live(&self.shared, attached, &entity, false, is_dirty, stats) {
                            added.push(entity.id());
                        }
                    }
                    if !added.is_empty() {
                        attached.sort_visible(stats);
                    }
                    (added.len(), added)
                }
            }
        };

        for id in live {
            self.entity_added.emit(id);
        }
        accepted
    }

    /// Stop tracking an entity.
    ///
    /// Removing a visible entity marks the manager dirty so its image gets
    /// erased. Removing an entity that is not present is a no-op and returns
    /// `false`.
    pub fn remove(&self, entity: &Entity) -> bool {
        let id = entity.id();
        let removed = {
            let mut state = self.shared.state.lock();
            let ManagerState {
                lifecycle,
                is_dirty,
                ..
            } = &mut *state;
            match lifecycle {
                Lifecycle::Detached { holding } => holding
                    .iter()
                    .position(|held| held.id() == id)
                    .map(|index| {
                        holding.remove(index);
                        None
                    }),
                Lifecycle::Attached(attached) => attached
                    .entities
                    .iter()
                    .position(|tracked| tracked.entity.id() == id)
                    .map(|index| {
                        let tracked = attached.entities.remove(index);
                        let still_present = attached.entities.iter().any(|t| t.entity.id() == id);
                        if !still_present {
                            attached.index.remove(&id);
                            if attached.visible_ids.remove(&id) {
                                attached.visible.retain(|other| other.id() != id);
                                *is_dirty = true;
                            }
                        }
                        Some(tracked)
                    }),
            }
        };

        match removed {
            None => false,
            Some(None) => true,
            Some(Some(tracked)) => {
                tracked.subscriptions.disconnect(&tracked.entity);
                tracing::trace!(target: targets::MANAGER, manager = %self.shared.config.name, entity = %id, "entity removed");
                self.entity_removed.emit(id);
                true
            }
        }
    }

    /// Remove every entity, live and buffered, one at a time.
    pub fn clear(&self) {
        let mut all = self.entities();
        all.extend(self.held_entities());
        for entity in all {
            self.remove(&entity);
        }
    }

    /// Attach to a host surface.
    ///
    /// Flushes the holding buffer in one batch, captures the viewport and
    /// registers the render step. Fails with [`EntityError::AlreadyAttached`]
    /// if a host is already set, or [`EntityError::UnsupportedHost`] if the
    /// host has no render pipeline; on failure nothing changes.
    ///
    /// Host code (viewport queries, `insert_step`) runs without the manager
    /// lock held, so the pipeline may query the step while inserting it.
    pub fn attach_to_host(&self, host: Arc<dyn HostSurface>) -> EntityResult<()> {
        let _span = PerfSpan::new(span_names::ATTACH);

        if self.is_attached() {
            return Err(EntityError::AlreadyAttached);
        }
        let Some(pipeline) = host.render_pipeline() else {
            return Err(EntityError::UnsupportedHost);
        };

        let render_step = Arc::new(EntityRenderStep::new(self.shared.config.render_step_order));
        render_step.set_data(self);
        let mut attached = Attached::new(host.clone(), render_step.clone(), CachedViewport::capture(&*host));

        let added = {
            let mut state = self.shared.state.lock();
            let ManagerState {
                lifecycle,
                is_dirty,
                stats,
            } = &mut *state;
            let holding = match lifecycle {
                Lifecycle::Detached { holding } => std::mem::take(holding),
                Lifecycle::Attached(_) => {
                    render_step.dispose();
                    return Err(EntityError::AlreadyAttached);
                }
            };

            let mut added = Vec::with_capacity(holding.len());
            for entity in &holding {
                if ManagerShared::add_live(&self.shared, &mut attached, entity, false, is_dirty, stats) {
                    added.push(entity.id());
                }
            }
            attached.sort_visible(stats);
            *is_dirty = true;

            tracing::debug!(
                target: targets::MANAGER,
                manager = %self.shared.config.name,
                entities = attached.entities.len(),
                visible = attached.visible.len(),
                "attached to host"
            );
            *lifecycle = Lifecycle::Attached(Box::new(attached));
            added
        };

        pipeline.insert_step(render_step);
        for id in added {
            self.entity_added.emit(id);
        }
        Ok(())
    }

    /// Detach from the current host.
    ///
    /// Moves the live collection into the holding buffer, then removes the
    /// render step and unsubscribes every entity outside the manager lock.
    /// Returns `false` if not attached.
    pub fn detach_from_host(&self) -> bool {
        let attached = {
            let mut state = self.shared.state.lock();
            let Lifecycle::Attached(attached) = &state.lifecycle else {
                return false;
            };
            let holding = attached.entity_list();
            match std::mem::replace(&mut state.lifecycle, Lifecycle::Detached { holding }) {
                Lifecycle::Attached(attached) => *attached,
                Lifecycle::Detached { .. } => return false,
            }
        };

        tracing::debug!(
            target: targets::MANAGER,
            manager = %self.shared.config.name,
            entities = attached.entities.len(),
            "detached from host"
        );
        if let Some(pipeline) = attached.host.render_pipeline() {
            pipeline.remove_step(attached.render_step.id());
        }
        attached.render_step.dispose();

        for Tracked {
            entity,
            subscriptions,
        } in attached.entities
        {
            subscriptions.disconnect(&entity);
        }
        true
    }

    /// Advance every live entity and refresh visibility.
    ///
    /// If the host's font, cell size or view changed since the last call,
    /// every entity is re-evaluated and the visible list sorted once.
    /// Otherwise the manager relies on entity notifications for visibility and
    /// only checks whether a visible entity became dirty.
    pub fn update(&self, elapsed: Duration) {
        let _span = PerfSpan::new(span_names::MANAGER_UPDATE);

        let Some(host) = self.host() else {
            return;
        };
        let current = CachedViewport::capture(&*host);

        let (entities, full) = {
            let mut state = self.shared.state.lock();
            let ManagerState {
                lifecycle,
                is_dirty,
                stats,
            } = &mut *state;
            let Lifecycle::Attached(attached) = lifecycle else {
                return;
            };

            let full = attached.viewport.differs_from(&current);
            if full {
                attached.viewport = current;
                *is_dirty = true;
                stats.full_evaluations += 1;
            }
            (attached.entity_list(), full)
        };

        for entity in &entities {
            entity.update(elapsed);
        }

        let mut state = self.shared.state.lock();
        let ManagerState {
            lifecycle,
            is_dirty,
            stats,
        } = &mut *state;
        let Lifecycle::Attached(attached) = lifecycle else {
            return;
        };

        if full {
            let _full_span = PerfSpan::new(span_names::FULL_EVALUATION);
            tracing::debug!(
                target: targets::MANAGER,
                manager = %self.shared.config.name,
                view = ?attached.viewport.view,
                "viewport changed, re-evaluating all entities"
            );
            for entity in attached.entity_list() {
                attached.evaluate(&entity, false, stats);
            }
            attached.sort_visible(stats);
        } else if !*is_dirty && attached.visible.iter().any(|entity| entity.is_dirty()) {
            *is_dirty = true;
        }
    }

    /// Re-evaluate one entity's visibility now.
    ///
    /// Returns whether the entity is visible. Fails with
    /// [`EntityError::NotManaged`] if the entity is not in the live collection.
    pub fn calculate_entity_visibility(&self, entity: &Arc<Entity>) -> EntityResult<bool> {
        let mut state = self.shared.state.lock();
        let ManagerState {
            lifecycle,
            is_dirty,
            stats,
        } = &mut *state;
        let id = entity.id();
        match lifecycle {
            Lifecycle::Attached(attached) if attached.index.contains(&id) => {
                if attached.evaluate(entity, true, stats) {
                    *is_dirty = true;
                }
                Ok(attached.visible_ids.contains(&id))
            }
            _ => Err(EntityError::NotManaged(id)),
        }
    }

    /// Test an entity against the cached viewport without changing anything.
    ///
    /// Always `false` while detached.
    pub fn is_entity_visible(&self, entity: &Entity) -> bool {
        match &self.shared.state.lock().lifecycle {
            Lifecycle::Attached(attached) => attached.viewport.is_visible(&entity.geometry()),
            Lifecycle::Detached { .. } => false,
        }
    }

    /// Live entities in insertion order. Empty while detached.
    pub fn entities(&self) -> Vec<Arc<Entity>> {
        match &self.shared.state.lock().lifecycle {
            Lifecycle::Attached(attached) => attached.entity_list(),
            Lifecycle::Detached { .. } => Vec::new(),
        }
    }

    /// Entities waiting in the holding buffer. Empty while attached.
    pub fn held_entities(&self) -> Vec<Arc<Entity>> {
        match &self.shared.state.lock().lifecycle {
            Lifecycle::Detached { holding } => holding.clone(),
            Lifecycle::Attached(_) => Vec::new(),
        }
    }

    /// Visible entities, ascending by z-index.
    pub fn visible_entities(&self) -> Vec<Arc<Entity>> {
        self.shared.visible_entities()
    }

    pub fn entity_count(&self) -> usize {
        match &self.shared.state.lock().lifecycle {
            Lifecycle::Attached(attached) => attached.entities.len(),
            Lifecycle::Detached { .. } => 0,
        }
    }

    pub fn visible_count(&self) -> usize {
        match &self.shared.state.lock().lifecycle {
            Lifecycle::Attached(attached) => attached.visible.len(),
            Lifecycle::Detached { .. } => 0,
        }
    }

    /// Whether the entity is live or buffered in this manager.
    pub fn contains(&self, entity: &Entity) -> bool {
        let id = entity.id();
        match &self.shared.state.lock().lifecycle {
            Lifecycle::Attached(attached) => attached.index.contains(&id),
            Lifecycle::Detached { holding } => holding.iter().any(|held| held.id() == id),
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.shared.state.lock().lifecycle, Lifecycle::Attached(_))
    }

    pub fn host(&self) -> Option<Arc<dyn HostSurface>> {
        match &self.shared.state.lock().lifecycle {
            Lifecycle::Attached(attached) => Some(attached.host.clone()),
            Lifecycle::Detached { .. } => None,
        }
    }

    /// The render step registered with the current host.
    pub fn render_step(&self) -> Option<Arc<EntityRenderStep>> {
        match &self.shared.state.lock().lifecycle {
            Lifecycle::Attached(attached) => Some(attached.render_step.clone()),
            Lifecycle::Detached { .. } => None,
        }
    }

    /// Whether anything visible changed since the last [`mark_clean`](Self::mark_clean).
    pub fn is_dirty(&self) -> bool {
        self.shared.is_dirty()
    }

    pub fn set_dirty(&self, dirty: bool) {
        self.shared.state.lock().is_dirty = dirty;
    }

    /// Clear the aggregate flag and the dirty bits of every visible entity.
    ///
    /// Call after the host has drawn the visible entities.
    pub fn mark_clean(&self) {
        self.shared.mark_clean();
    }

    pub fn stats(&self) -> ManagerStats {
        self.shared.state.lock().stats
    }
}

impl Drop for EntityManager {
    fn drop(&mut self) {
        self.detach_from_host();
    }
}

impl std::fmt::Debug for EntityManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        let mut debug = f.debug_struct("EntityManager");
        debug.field("name", &self.shared.config.name);
        match &state.lifecycle {
            Lifecycle::Attached(attached) => debug
                .field("attached", &true)
                .field("entities", &attached.entities.len())
                .field("visible", &attached.visible.len()),
            Lifecycle::Detached { holding } => debug
                .field("attached", &false)
                .field("held", &holding.len()),
        };
        debug.field("is_dirty", &state.is_dirty).finish()
    }
}

/// Push onto the holding buffer unless the entity is already there.
fn buffer(holding: &mut Vec<Arc<Entity>>, entity: &Arc<Entity>, skip_checks: bool) -> bool {
    if !skip_checks && holding.iter().any(|held| held.id() == entity.id()) {
        return false;
    }
    holding.push(entity.clone());
    true
}

static_assertions::assert_impl_all!(EntityManager: Send, Sync);
