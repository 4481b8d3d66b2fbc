/// Drawable surface size in physical pixels.
///
/// The tessellator reads this fresh per gesture event, so a resize between
/// events maps later points against the new basis.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_non_finite_sizes_are_invalid() {
        assert!(Size::new(800.0, 600.0).is_valid());
        assert!(!Size::new(0.0, 600.0).is_valid());
        assert!(!Size::new(800.0, 0.0).is_valid());
        assert!(!Size::new(f32::NAN, 600.0).is_valid());
        assert!(!Size::default().is_valid());
    }
}
