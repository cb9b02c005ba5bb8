//! Positioned, animated entities.
//!
//! An [`Entity`] is a position, a z-index and exactly one [`Appearance`]. It
//! reports every change that can affect visibility or redraw through its
//! public signals:
//!
//! | Signal | Raised when |
//! |--------|-------------|
//! | [`position_changed`](Entity::position_changed) | the position is set, even to the same value |
//! | [`visibility_changed`](Entity::visibility_changed) | the visible flag flips |
//! | [`dirty_changed`](Entity::dirty_changed) | the active appearance's dirty bit flips |
//! | [`layout_changed`](Entity::layout_changed) | footprint, z-index or positioning mode changes |
//!
//! Signals are emitted after the entity's internal lock is released, so slots
//! may freely call back into the entity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use gridscape_core::logging::targets;
use gridscape_core::{Point, Signal, Size};

use crate::appearance::{Appearance, AppearanceMode, SingleCellAppearance};
use crate::error::{EntityError, EntityResult};
use crate::glyph::ColoredGlyph;
use crate::surface::AnimatedSurface;

/// Global entity counter for unique IDs.
static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique entity identifier, assigned at construction.
///
/// IDs increase monotonically in creation order and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value of this ID.
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload of [`Entity::position_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChange {
    pub old: Point,
    pub new: Point,
}

/// The area an entity occupies relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footprint {
    /// A single cell at the position.
    Cell,
    /// A block of cells whose `center` cell sits on the position.
    Area { center: Point, size: Size },
}

/// A consistent snapshot of everything visibility math needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityGeometry {
    pub position: Point,
    pub use_pixel_positioning: bool,
    pub footprint: Footprint,
}

struct EntityState {
    name: String,
    position: Point,
    z_index: i32,
    use_pixel_positioning: bool,
    is_visible: bool,
    appearance: Appearance,
}

impl EntityState {
    fn footprint(&self) -> Footprint {
        match &self.appearance {
            Appearance::SingleCell(_) => Footprint::Cell,
            Appearance::Surface(surface) => Footprint::Area {
                center: surface.center(),
                size: Size::new(surface.width(), surface.height()),
            },
        }
    }

    fn layout_key(&self) -> (Footprint, i32, bool) {
        (self.footprint(), self.z_index, self.use_pixel_positioning)
    }
}

/// A positioned object drawn either as one glyph or as an animated surface.
///
/// Entities are shared as `Arc<Entity>`: the caller owns them and a manager
/// only holds references. All setters take `&self`.
///
/// # Example
///
/// ```ignore
/// use gridscape::{Color, ColoredGlyph, Entity};
/// use gridscape_core::Point;
///
/// let player = Entity::single_cell(ColoredGlyph::new('@' as u32, Color::WHITE, Color::BLACK), 10)
///     .with_position(Point::new(5, 5));
///
/// player.position_changed.connect(|change| {
///     println!("moved {:?} -> {:?}", change.old, change.new);
/// });
/// player.set_position(Point::new(6, 5));
/// ```
pub struct Entity {
    id: EntityId,
    state: Mutex<EntityState>,
    /// Signal emitted whenever the position is assigned.
    pub position_changed: Signal<PositionChange>,
    /// Signal emitted when the visible flag changes.
    pub visibility_changed: Signal<bool>,
    /// Signal emitted when the dirty bit changes.
    pub dirty_changed: Signal<bool>,
    /// Signal emitted when the footprint, z-index or positioning mode changes.
    pub layout_changed: Signal<()>,
}

impl Entity {
    /// Create an entity with the given appearance and z-index at the origin.
    pub fn new(appearance: impl Into<Appearance>, z_index: i32) -> Self {
        let entity = Self {
            id: EntityId::next(),
            state: Mutex::new(EntityState {
                name: String::new(),
                position: Point::ZERO,
                z_index,
                use_pixel_positioning: false,
                is_visible: true,
                appearance: appearance.into(),
            }),
            position_changed: Signal::new(),
            visibility_changed: Signal::new(),
            dirty_changed: Signal::new(),
            layout_changed: Signal::new(),
        };
        tracing::trace!(target: targets::ENTITY, id = %entity.id, z_index, "entity created");
        entity
    }

    /// Create a single-glyph entity.
    pub fn single_cell(glyph: ColoredGlyph, z_index: i32) -> Self {
        Self::new(SingleCellAppearance::new(glyph), z_index)
    }

    /// Create a surface entity.
    pub fn surface(surface: AnimatedSurface, z_index: i32) -> Self {
        Self::new(surface, z_index)
    }

    /// Set the initial position without raising any signal.
    pub fn with_position(self, position: Point) -> Self {
        self.state.lock().position = position;
        self
    }

    /// Set the initial positioning mode without raising any signal.
    pub fn with_pixel_positioning(self, enabled: bool) -> Self {
        self.state.lock().use_pixel_positioning = enabled;
        self
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.state.lock().name = name.into();
        self
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> String {
        self.state.lock().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.state.lock().name = name.into();
    }

    pub fn position(&self) -> Point {
        self.state.lock().position
    }

    /// Move the entity.
    ///
    /// Always marks the entity dirty and raises `position_changed`, even when
    /// `position` equals the current one.
    pub fn set_position(&self, position: Point) {
        let (old, became_dirty) = {
            let mut state = self.state.lock();
            let old = std::mem::replace(&mut state.position, position);
            let was_dirty = state.appearance.is_dirty();
            state.appearance.set_dirty(true);
            (old, !was_dirty)
        };

        self.position_changed.emit(PositionChange { old, new: position });
        if became_dirty {
            self.dirty_changed.emit(true);
        }
    }

    pub fn z_index(&self) -> i32 {
        self.state.lock().z_index
    }

    /// Change the draw order key. Marks the entity dirty when it changes.
    pub fn set_z_index(&self, z_index: i32) {
        self.modify(|state| {
            if state.z_index != z_index {
                state.z_index = z_index;
                state.appearance.set_dirty(true);
            }
        });
    }

    pub fn uses_pixel_positioning(&self) -> bool {
        self.state.lock().use_pixel_positioning
    }

    /// Switch between cell-space and pixel-space interpretation of the position.
    ///
    /// The position value itself is left untouched.
    pub fn set_use_pixel_positioning(&self, enabled: bool) {
        self.modify(|state| {
            if state.use_pixel_positioning != enabled {
                state.use_pixel_positioning = enabled;
                state.appearance.set_dirty(true);
            }
        });
    }

    pub fn is_visible(&self) -> bool {
        self.state.lock().is_visible
    }

    /// Show or hide the entity. Hidden entities are still tracked for
    /// visibility but skipped by the draw list.
    pub fn set_visible(&self, visible: bool) {
        let changed = {
            let mut state = self.state.lock();
            std::mem::replace(&mut state.is_visible, visible) != visible
        };
        if changed {
            self.visibility_changed.emit(visible);
        }
    }

    pub fn appearance_mode(&self) -> AppearanceMode {
        self.state.lock().appearance.mode()
    }

    pub fn is_single_cell(&self) -> bool {
        self.appearance_mode() == AppearanceMode::SingleCell
    }

    pub fn is_surface(&self) -> bool {
        self.appearance_mode() == AppearanceMode::Surface
    }

    /// Replace the appearance, possibly switching modes.
    ///
    /// The new appearance is installed dirty.
    pub fn set_appearance(&self, appearance: impl Into<Appearance>) {
        let mut appearance = appearance.into();
        appearance.set_dirty(true);
        self.modify(move |state| {
            state.appearance = appearance;
        });
    }

    pub fn set_single_cell(&self, appearance: SingleCellAppearance) {
        self.set_appearance(appearance);
    }

    pub fn set_surface(&self, surface: AnimatedSurface) {
        self.set_appearance(surface);
    }

    /// Read the single-cell appearance.
    ///
    /// Fails with [`EntityError::InvalidState`] if the entity is in surface mode.
    pub fn with_single_cell<R>(&self, f: impl FnOnce(&SingleCellAppearance) -> R) -> EntityResult<R> {
        match &self.state.lock().appearance {
            Appearance::SingleCell(cell) => Ok(f(cell)),
            Appearance::Surface(_) => Err(not_single_cell()),
        }
    }

    /// Modify the single-cell appearance.
    ///
    /// Fails with [`EntityError::InvalidState`] if the entity is in surface mode.
    pub fn with_single_cell_mut<R>(
        &self,
        f: impl FnOnce(&mut SingleCellAppearance) -> R,
    ) -> EntityResult<R> {
        self.modify(|state| match &mut state.appearance {
            Appearance::SingleCell(cell) => Ok(f(cell)),
            Appearance::Surface(_) => Err(not_single_cell()),
        })
    }

    /// Read the surface appearance.
    ///
    /// Fails with [`EntityError::InvalidState`] if the entity is in single-cell mode.
    pub fn with_surface<R>(&self, f: impl FnOnce(&AnimatedSurface) -> R) -> EntityResult<R> {
        match &self.state.lock().appearance {
            Appearance::Surface(surface) => Ok(f(surface)),
            Appearance::SingleCell(_) => Err(not_surface()),
        }
    }

    /// Modify the surface appearance.
    ///
    /// Fails with [`EntityError::InvalidState`] if the entity is in single-cell mode.
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut AnimatedSurface) -> R) -> EntityResult<R> {
        self.modify(|state| match &mut state.appearance {
            Appearance::Surface(surface) => Ok(f(surface)),
            Appearance::SingleCell(_) => Err(not_surface()),
        })
    }

    /// Whether the active appearance needs to be redrawn.
    pub fn is_dirty(&self) -> bool {
        self.state.lock().appearance.is_dirty()
    }

    pub fn set_dirty(&self, dirty: bool) {
        self.modify(|state| state.appearance.set_dirty(dirty));
    }

    /// Advance the active appearance's animation or effect clock.
    ///
    /// A zero duration is a no-op.
    pub fn update(&self, elapsed: Duration) {
        if elapsed.is_zero() {
            return;
        }
        self.modify(|state| {
            state.appearance.update(elapsed);
        });
    }

    /// Snapshot the position, positioning mode and footprint under one lock.
    pub fn geometry(&self) -> EntityGeometry {
        let state = self.state.lock();
        EntityGeometry {
            position: state.position,
            use_pixel_positioning: state.use_pixel_positioning,
            footprint: state.footprint(),
        }
    }

    /// Run `f` against the state and raise whatever signals its changes imply.
    fn modify<R>(&self, f: impl FnOnce(&mut EntityState) -> R) -> R {
        let (result, layout_changed, dirty_flip) = {
            let mut state = self.state.lock();
            let layout_before = state.layout_key();
            let was_dirty = state.appearance.is_dirty();

            let result = f(&mut *state);

            let is_dirty = state.appearance.is_dirty();
            (
                result,
                state.layout_key() != layout_before,
                (is_dirty != was_dirty).then_some(is_dirty),
            )
        };

        if layout_changed {
            self.layout_changed.emit(());
        }
        if let Some(dirty) = dirty_flip {
            self.dirty_changed.emit(dirty);
        }
        result
    }
}

fn not_single_cell() -> EntityError {
    EntityError::InvalidState {
        reason: "entity is configured for a surface appearance",
    }
}

fn not_surface() -> EntityError {
    EntityError::InvalidState {
        reason: "entity is configured for a single-cell appearance",
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &state.name)
            .field("position", &state.position)
            .field("z_index", &state.z_index)
            .field("mode", &state.appearance.mode())
            .field("pixel_positioning", &state.use_pixel_positioning)
            .finish()
    }
}

static_assertions::assert_impl_all!(Entity: Send, Sync);
