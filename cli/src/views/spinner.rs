//! Pure presentational spinner, parameterized by size.

/// Mirrors the sm/md/lg variants of the web spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerSize {
    Small,
    #[default]
    Medium,
    Large,
}

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    size: SpinnerSize,
}

impl Spinner {
    pub fn new(size: SpinnerSize) -> Self {
        Self { size }
    }

    /// The glyph run for animation step `tick`.
    pub fn frame(&self, tick: usize) -> String {
        let glyph = FRAMES[tick % FRAMES.len()];
        let width = match self.size {
            SpinnerSize::Small => 1,
            SpinnerSize::Medium => 2,
            SpinnerSize::Large => 3,
        };
        std::iter::repeat(glyph).take(width).collect()
    }
}
