//! Rendering options.

/// Options controlling how pages are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Enable LaTeX math: `$..$` and `$$..$$` become MathJax-style
    /// `\(..\)` / `\[..\]` spans.
    pub latex_math: bool,
    /// List members in declaration order instead of sorted by name.
    pub source_order: bool,
}

impl RenderOptions {
    /// Create options with everything disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable LaTeX math rendering.
    #[must_use]
    pub fn with_latex_math(mut self, enabled: bool) -> Self {
        self.latex_math = enabled;
        self
    }

    /// Enable or disable source-order member listing.
    #[must_use]
    pub fn with_source_order(mut self, enabled: bool) -> Self {
        self.source_order = enabled;
        self
    }
}
