use super::color::Color;

/// Ink and backdrop colors for a signature pad.
///
/// Defaults are white ink on a purple backdrop, which keeps thin fast
/// strokes legible while drawing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InkStyle {
    pub ink: Color,
    pub background: Color,
}

impl Default for InkStyle {
    fn default() -> Self {
        Self {
            ink: Color::from_straight(1.0, 1.0, 1.0, 1.0),
            background: Color::from_straight(0.5, 0.2, 0.8, 1.0),
        }
    }
}
