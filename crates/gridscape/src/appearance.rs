//! Entity appearances.
//!
//! An entity is drawn in exactly one of two ways: as a single colored glyph or
//! as an animated multi-cell surface. [`Appearance`] is the closed union of the
//! two; an entity always holds a populated variant, so there is no state in
//! which it has neither or both.

use std::time::Duration;

use crate::effect::CellEffect;
use crate::glyph::ColoredGlyph;
use crate::surface::AnimatedSurface;

/// Which appearance variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppearanceMode {
    SingleCell,
    Surface,
}

/// A single glyph, optionally decorated by a time-based effect.
#[derive(Debug)]
pub struct SingleCellAppearance {
    /// The glyph as configured by the owner.
    base: ColoredGlyph,
    /// The glyph as it should be drawn this frame (base plus effect output).
    rendered: ColoredGlyph,
    effect: Option<Box<dyn CellEffect>>,
    is_dirty: bool,
}

impl SingleCellAppearance {
    /// Create an appearance showing `glyph`. New appearances start dirty.
    pub fn new(glyph: ColoredGlyph) -> Self {
        Self {
            base: glyph,
            rendered: glyph,
            effect: None,
            is_dirty: true,
        }
    }

    /// Attach an effect at construction time.
    pub fn with_effect(mut self, effect: impl CellEffect + 'static) -> Self {
        self.set_effect(Some(Box::new(effect)));
        self
    }

    /// The glyph to draw, including any effect output.
    pub fn glyph(&self) -> &ColoredGlyph {
        &self.rendered
    }

    /// The glyph as configured, without effect output.
    pub fn base_glyph(&self) -> &ColoredGlyph {
        &self.base
    }

    /// Replace the glyph. A running effect restarts from the new glyph.
    pub fn set_glyph(&mut self, glyph: ColoredGlyph) {
        self.base = glyph;
        self.rendered = glyph;
        if let Some(effect) = self.effect.as_mut() {
            effect.restart();
        }
        self.is_dirty = true;
    }

    pub fn effect(&self) -> Option<&dyn CellEffect> {
        self.effect.as_deref()
    }

    /// Install or remove an effect. Removing restores the base glyph.
    pub fn set_effect(&mut self, effect: Option<Box<dyn CellEffect>>) {
        self.effect = effect;
        if let Some(effect) = self.effect.as_mut() {
            effect.restart();
        }
        self.rendered = self.base;
        self.is_dirty = true;
    }

    /// Advance the effect clock.
    ///
    /// Returns `true` if the rendered glyph changed, in which case the
    /// appearance is now dirty.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        if elapsed.is_zero() {
            return false;
        }
        let Some(effect) = self.effect.as_mut() else {
            return false;
        };
        if effect.is_finished() {
            return false;
        }

        let changed = effect.update(elapsed, &self.base, &mut self.rendered);
        if changed {
            self.is_dirty = true;
        }
        changed
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    #[inline]
    pub fn set_dirty(&mut self, dirty: bool) {
        self.is_dirty = dirty;
    }
}

/// The active appearance of an entity.
#[derive(Debug)]
pub enum Appearance {
    SingleCell(SingleCellAppearance),
    Surface(AnimatedSurface),
}

impl Appearance {
    pub fn mode(&self) -> AppearanceMode {
        match self {
            Self::SingleCell(_) => AppearanceMode::SingleCell,
            Self::Surface(_) => AppearanceMode::Surface,
        }
    }

    /// Advance the active appearance. Returns `true` if it changed visually.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        match self {
            Self::SingleCell(cell) => cell.update(elapsed),
            Self::Surface(surface) => surface.update(elapsed),
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            Self::SingleCell(cell) => cell.is_dirty(),
            Self::Surface(surface) => surface.is_dirty(),
        }
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        match self {
            Self::SingleCell(cell) => cell.set_dirty(dirty),
            Self::Surface(surface) => surface.set_dirty(dirty),
        }
    }
}

impl From<SingleCellAppearance> for Appearance {
    fn from(cell: SingleCellAppearance) -> Self {
        Self::SingleCell(cell)
    }
}

impl From<ColoredGlyph> for Appearance {
    fn from(glyph: ColoredGlyph) -> Self {
        Self::SingleCell(SingleCellAppearance::new(glyph))
    }
}

impl From<AnimatedSurface> for Appearance {
    fn from(surface: AnimatedSurface) -> Self {
        Self::Surface(surface)
    }
}
