use crate::foundation::error::{CarnetError, CarnetResult};

pub use kurbo::{Affine, Point, Rect};

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for CardSize {
    fn default() -> Self {
        Self {
            width: 350,
            height: 500,
        }
    }
}

impl CardSize {
    /// Largest edge `vello_cpu` pixmaps can address.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    /// Build a validated size (both edges in `1..=MAX_EDGE`).
    pub fn new(width: u32, height: u32) -> CarnetResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Check both edges are non-zero and addressable.
    pub fn validate(self) -> CarnetResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CarnetError::validation("card width and height must be > 0"));
        }
        if self.width > Self::MAX_EDGE || self.height > Self::MAX_EDGE {
            return Err(CarnetError::validation(format!(
                "card size {}x{} exceeds {}x{}",
                self.width,
                self.height,
                Self::MAX_EDGE,
                Self::MAX_EDGE
            )));
        }
        Ok(())
    }

    /// Full-surface rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
