//! Animated multi-cell surfaces.
//!
//! An [`AnimatedSurface`] is a sequence of [`CellGrid`] frames played back at a
//! fixed frame duration. Its [`center`](AnimatedSurface::center) is the cell of
//! the frame that sits on the owning entity's position, so a surface with a
//! center of `(1, 1)` drawn at `(10, 10)` covers cells starting at `(9, 9)`.
//!
//! # Example
//!
//! ```ignore
//! use gridscape::{AnimatedSurface, CellGrid};
//! use gridscape_core::Point;
//! use std::time::Duration;
//!
//! let frames = vec![CellGrid::new(3, 3), CellGrid::new(3, 3)];
//! let mut surface = AnimatedSurface::new(frames, Duration::from_millis(250))?
//!     .with_center(Point::new(1, 1));
//!
//! // In your update loop:
//! surface.update(delta_time);
//! let frame = surface.current_frame();
//! ```

use std::time::Duration;

use gridscape_core::{Point, Size};

use crate::effect::whole_periods;
use crate::error::{EntityError, EntityResult};
use crate::glyph::ColoredGlyph;

/// A rectangular buffer of glyphs, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    width: i32,
    height: i32,
    cells: Vec<ColoredGlyph>,
}

impl CellGrid {
    /// Create a grid filled with default glyphs. Negative sizes clamp to zero.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, ColoredGlyph::default())
    }

    /// Create a grid with every cell set to `glyph`.
    pub fn filled(width: i32, height: i32, glyph: ColoredGlyph) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![glyph; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&ColoredGlyph> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell. Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, x: i32, y: i32, glyph: ColoredGlyph) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = glyph;
                true
            }
            None => false,
        }
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[ColoredGlyph] {
        &self.cells
    }
}

/// Playback state for an animated surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    /// Reached the last frame of a non-repeating animation.
    Stopped,
}

/// A multi-frame cell animation anchored by a center offset.
#[derive(Debug, Clone)]
pub struct AnimatedSurface {
    frames: Vec<CellGrid>,
    frame_duration: Duration,
    center: Point,
    repeat: bool,
    current_frame: usize,
    /// Time elapsed in the current frame.
    frame_elapsed: Duration,
    state: PlaybackState,
    is_dirty: bool,
}

impl AnimatedSurface {
    /// Create a looping animation that starts playing at frame 0.
    ///
    /// Fails with [`EntityError::InvalidState`] if `frames` is empty.
    pub fn new(frames: Vec<CellGrid>, frame_duration: Duration) -> EntityResult<Self> {
        if frames.is_empty() {
            return Err(EntityError::InvalidState {
                reason: "an animated surface needs at least one frame",
            });
        }

        Ok(Self {
            frames,
            frame_duration,
            center: Point::ZERO,
            repeat: true,
            current_frame: 0,
            frame_elapsed: Duration::ZERO,
            state: PlaybackState::Playing,
            is_dirty: true,
        })
    }

    /// A one-frame surface that never animates.
    pub fn single(frame: CellGrid) -> Self {
        Self {
            frames: vec![frame],
            frame_duration: Duration::ZERO,
            center: Point::ZERO,
            repeat: false,
            current_frame: 0,
            frame_elapsed: Duration::ZERO,
            state: PlaybackState::Stopped,
            is_dirty: true,
        }
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    /// Play once and stop on the last frame instead of looping.
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
        self.is_dirty = true;
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    pub fn current_frame(&self) -> &CellGrid {
        &self.frames[self.current_frame]
    }

    /// Mutable access to the current frame. Marks the surface dirty.
    pub fn current_frame_mut(&mut self) -> &mut CellGrid {
        self.is_dirty = true;
        &mut self.frames[self.current_frame]
    }

    pub fn frames(&self) -> &[CellGrid] {
        &self.frames
    }

    /// Width of the current frame in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.current_frame().width()
    }

    /// Height of the current frame in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.current_frame().height()
    }

    #[inline]
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn play(&mut self) {
        if self.state == PlaybackState::Stopped {
            self.restart();
        } else {
            self.state = PlaybackState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop playback and rewind to the first frame.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.goto_frame(0);
    }

    /// Rewind to the first frame and start playing.
    pub fn restart(&mut self) {
        self.goto_frame(0);
        self.state = PlaybackState::Playing;
    }

    /// Jump to a frame. Out-of-range indices are clamped to the last frame.
    pub fn goto_frame(&mut self, frame: usize) {
        let frame = frame.min(self.frames.len() - 1);
        if frame != self.current_frame {
            self.current_frame = frame;
            self.is_dirty = true;
        }
        self.frame_elapsed = Duration::ZERO;
    }

    /// Advance the animation clock.
    ///
    /// Returns `true` if the current frame changed, in which case the surface
    /// is now dirty.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        if elapsed.is_zero() || self.state != PlaybackState::Playing {
            return false;
        }
        if self.frames.len() < 2 || self.frame_duration.is_zero() {
            return false;
        }

        let start_frame = self.current_frame;
        let (steps, remainder) =
            whole_periods(self.frame_elapsed.saturating_add(elapsed), self.frame_duration);
        let frame_count = self.frames.len() as u128;
        let target = self.current_frame as u128 + steps;

        if target < frame_count {
            self.current_frame = target as usize;
            self.frame_elapsed = remainder;
        } else if self.repeat {
            self.current_frame = (target % frame_count) as usize;
            self.frame_elapsed = remainder;
        } else {
            self.current_frame = self.frames.len() - 1;
            self.state = PlaybackState::Stopped;
            self.frame_elapsed = Duration::ZERO;
        }

        let changed = self.current_frame != start_frame;
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
