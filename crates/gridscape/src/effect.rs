//! Time-based effects for single-cell appearances.
//!
//! An effect never mutates the glyph it decorates. Each update it receives the
//! base glyph and writes its output into a separate rendered copy, so removing
//! an effect restores the original look.

use std::fmt;
use std::time::Duration;

use crate::glyph::{Color, ColoredGlyph};

/// A visual effect driven by elapsed time.
pub trait CellEffect: Send + fmt::Debug {
    /// Advance the effect clock by `elapsed` and write the result into `cell`.
    ///
    /// Returns `true` if `cell` changed.
    fn update(&mut self, elapsed: Duration, base: &ColoredGlyph, cell: &mut ColoredGlyph) -> bool;

    /// Whether the effect has run to completion.
    fn is_finished(&self) -> bool;

    /// Reset the effect to its initial state.
    fn restart(&mut self);
}

/// Toggles the glyph between shown and hidden at a fixed interval.
#[derive(Debug, Clone)]
pub struct Blink {
    interval: Duration,
    /// Number of hide/show cycles before finishing. `None` blinks forever.
    blink_count: Option<u32>,
    elapsed: Duration,
    shown: bool,
    blinks_done: u32,
    finished: bool,
}

impl Blink {
    /// Blink forever, spending `interval` in each state.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            blink_count: None,
            elapsed: Duration::ZERO,
            shown: true,
            blinks_done: 0,
            finished: false,
        }
    }

    /// Stop after `count` full hide/show cycles, finishing shown.
    pub fn with_count(mut self, count: u32) -> Self {
        self.blink_count = Some(count);
        self
    }

    /// Whether the glyph is currently in the shown phase.
    pub fn is_shown(&self) -> bool {
        self.shown
    }
}

impl CellEffect for Blink {
    fn update(&mut self, elapsed: Duration, base: &ColoredGlyph, cell: &mut ColoredGlyph) -> bool {
        if self.finished || self.interval.is_zero() {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(elapsed);
        let (toggles, remainder) = whole_periods(self.elapsed, self.interval);
        if toggles > 0 {
            // Toggles needed from here to the last hide/show cycle's show.
            let to_finish = self.blink_count.map(|count| {
                let cycles = u128::from(count.saturating_sub(self.blinks_done).max(1));
                if self.shown { cycles * 2 } else { cycles * 2 - 1 }
            });

            if to_finish.is_some_and(|needed| toggles >= needed) {
                self.blinks_done = self.blink_count.unwrap_or(self.blinks_done);
                self.shown = true;
                self.finished = true;
                self.elapsed = Duration::ZERO;
            } else {
                let shows = if self.shown { toggles / 2 } else { toggles.div_ceil(2) };
                self.blinks_done = self
                    .blinks_done
                    .saturating_add(u32::try_from(shows).unwrap_or(u32::MAX));
                self.shown ^= toggles % 2 == 1;
                self.elapsed = remainder;
            }
        }

        let before = *cell;
        *cell = *base;
        cell.is_visible = base.is_visible && self.shown;
        *cell != before
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.shown = true;
        self.blinks_done = 0;
        self.finished = false;
    }
}

/// Interpolates the foreground color toward a target color.
#[derive(Debug, Clone)]
pub struct Fade {
    target: Color,
    duration: Duration,
    repeat: bool,
    elapsed: Duration,
    finished: bool,
}

impl Fade {
    /// Fade the foreground to `target` over `duration`.
    pub fn new(target: Color, duration: Duration) -> Self {
        Self {
            target,
            duration,
            repeat: false,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Start over from the base color every time the fade completes.
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Progress through the current pass, from `0.0` to `1.0`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

impl CellEffect for Fade {
    fn update(&mut self, elapsed: Duration, base: &ColoredGlyph, cell: &mut ColoredGlyph) -> bool {
        if self.finished {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.elapsed >= self.duration {
            if self.repeat && !self.duration.is_zero() {
                self.elapsed = whole_periods(self.elapsed, self.duration).1;
            } else {
                self.elapsed = self.duration;
                self.finished = true;
            }
        }

        let before = *cell;
        *cell = *base;
        cell.foreground = base.foreground.lerp(self.target, self.progress());
        *cell != before
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.finished = false;
    }
}

/// Split `elapsed` into whole `period`s and the time left over.
///
/// `period` must be non-zero.
pub(crate) fn whole_periods(elapsed: Duration, period: Duration) -> (u128, Duration) {
    let period = period.as_nanos();
    let elapsed = elapsed.as_nanos();
    let remainder = u64::try_from(elapsed % period).unwrap_or(u64::MAX);
    (elapsed / period, Duration::from_nanos(remainder))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph() -> ColoredGlyph {
        ColoredGlyph::new(u32::from('@'), Color::WHITE, Color::BLACK)
    }

    #[test]
    fn test_blink_toggles_on_interval() {
        let base = glyph();
        let mut cell = base;
        let mut blink = Blink::new(Duration::from_millis(100));

        assert!(!blink.update(Duration::from_millis(50), &base, &mut cell));
        assert!(cell.is_visible);

        assert!(blink.update(Duration::from_millis(50), &base, &mut cell));
        assert!(!cell.is_visible);

        assert!(blink.update(Duration::from_millis(100), &base, &mut cell));
        assert!(cell.is_visible);
        assert!(!blink.is_finished());
    }

    #[test]
    fn test_blink_count_finishes_shown() {
        let base = glyph();
        let mut cell = base;
        let mut blink = Blink::new(Duration::from_millis(10)).with_count(2);

        blink.update(Duration::from_millis(35), &base, &mut cell);
        assert!(!blink.is_finished());
        blink.update(Duration::from_millis(5), &base, &mut cell);
        assert!(blink.is_finished());
        assert!(cell.is_visible);

        assert!(!blink.update(Duration::from_millis(10), &base, &mut cell));

        blink.restart();
        assert!(!blink.is_finished());
        assert!(blink.is_shown());
    }

    #[test]
    fn test_blink_long_hitch_is_bounded() {
        let base = glyph();
        let mut cell = base;

        let mut forever = Blink::new(Duration::from_nanos(1));
        forever.update(Duration::from_secs(3 * 24 * 3600) + Duration::from_nanos(1), &base, &mut cell);
        assert!(!forever.is_shown());
        assert!(!cell.is_visible);

        let mut counted = Blink::new(Duration::from_nanos(1)).with_count(3);
        counted.update(Duration::from_secs(3600), &base, &mut cell);
        assert!(counted.is_finished());
        assert!(cell.is_visible);
    }

    #[test]
    fn test_fade_repeat_long_hitch() {
        let base = glyph();
        let mut cell = base;
        let mut fade = Fade::new(Color::BLACK, Duration::from_nanos(100)).repeating();

        fade.update(Duration::from_secs(3600) + Duration::from_nanos(50), &base, &mut cell);
        assert!(!fade.is_finished());
        assert!((fade.progress() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_whole_periods() {
        assert_eq!(
            whole_periods(Duration::from_millis(250), Duration::from_millis(100)),
            (2, Duration::from_millis(50))
        );
        assert_eq!(whole_periods(Duration::ZERO, Duration::from_millis(100)), (0, Duration::ZERO));
    }

    #[test]
    fn test_blink_zero_interval_is_inert() {
        let base = glyph();
        let mut cell = base;
        let mut blink = Blink::new(Duration::ZERO);
        assert!(!blink.update(Duration::from_secs(1), &base, &mut cell));
    }

    #[test]
    fn test_fade_reaches_target() {
        let base = glyph();
        let mut cell = base;
        let mut fade = Fade::new(Color::BLACK, Duration::from_millis(100));

        assert!(fade.update(Duration::from_millis(50), &base, &mut cell));
        assert_eq!(cell.foreground, Color::from_rgb8(128, 128, 128));

        fade.update(Duration::from_millis(80), &base, &mut cell);
        assert!(fade.is_finished());
        assert_eq!(cell.foreground, Color::BLACK);
        assert_eq!(cell.background, base.background);
    }

    #[test]
    fn test_fade_repeat_wraps() {
        let base = glyph();
        let mut cell = base;
        let mut fade = Fade::new(Color::BLACK, Duration::from_millis(100)).repeating();

        fade.update(Duration::from_millis(150), &base, &mut cell);
        assert!(!fade.is_finished());
        assert!((fade.progress() - 0.5).abs() < 0.001);
    }
}
