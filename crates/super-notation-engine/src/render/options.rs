/// Options for HTML output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit a complete page (doctype, head, body) rather than a fragment.
    pub standalone: bool,

    /// Embed the default stylesheet in a standalone page.
    pub stylesheet: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            standalone: true,
            stylesheet: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the `sn-document` block, for embedding in another page.
    pub fn fragment() -> Self {
        Self {
            standalone: false,
            stylesheet: false,
        }
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_stylesheet(mut self, stylesheet: bool) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}
