//! Cell contents: colors, mirroring and the colored glyph.
//!
//! The visibility layer never inspects these values; they exist so that
//! appearances and effects have something concrete to animate and so that a
//! host's draw pass has something to read.

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);

    /// Create a color from RGBA components.
    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Linear interpolation between two colors.
    ///
    /// `t` is clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// How a glyph is mirrored when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mirror {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// A single glyph with its colors, mirroring and visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColoredGlyph {
    /// Glyph index into the host font.
    pub glyph: u32,
    pub foreground: Color,
    pub background: Color,
    pub mirror: Mirror,
    /// Hidden glyphs keep their data but are not drawn.
    pub is_visible: bool,
}

impl ColoredGlyph {
    /// Create a visible, unmirrored glyph.
    pub const fn new(glyph: u32, foreground: Color, background: Color) -> Self {
        Self {
            glyph,
            foreground,
            background,
            mirror: Mirror::None,
            is_visible: true,
        }
    }

    /// Return a copy with a different mirror mode.
    pub const fn with_mirror(mut self, mirror: Mirror) -> Self {
        self.mirror = mirror;
        self
    }
}

impl Default for ColoredGlyph {
    fn default() -> Self {
        Self::new(0, Color::WHITE, Color::TRANSPARENT)
    }
}
