/// A captured frame: tightly packed RGBA8 rows, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl InkImage {
    /// Wraps a tight RGBA8 buffer; `pixels.len()` must equal
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }
}
