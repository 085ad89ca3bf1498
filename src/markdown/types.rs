//! Styled span types produced by the renderer.

/// Display style flags for a run of preview text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub strikethrough: bool,
    /// Link target when the run is part of a hyperlink.
    pub link: Option<String>,
}

impl SpanStyle {
    /// Style with no flags set.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A contiguous run of text tagged with a display style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyledSpan {
    text: String,
    style: SpanStyle,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create an unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::plain())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> &SpanStyle {
        &self.style
    }

    /// Link target, if this span is part of a hyperlink.
    pub fn link(&self) -> Option<&str> {
        self.style.link.as_deref()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// Concatenate the text of a span sequence, dropping all styling.
pub fn plain_text(spans: &[StyledSpan]) -> String {
    spans.iter().map(StyledSpan::text).collect()
}
