//! Live markdown preview rendering.
//!
//! The renderer interprets inline constructs only (emphasis, code spans,
//! links, strikethrough) and never lets one cross a line break. Block-level
//! syntax such as headings, lists, quotes and fences is passed through as
//! literal text.
//!
//! Rendering is a pure function of the input text and the renderer's limits.
//! [`render`] never fails: when the input can't be rendered it returns a
//! single span holding [`FALLBACK_MESSAGE`] so the editor stays usable.

mod scanner;
mod types;

pub use types::{SpanStyle, StyledSpan, plain_text};

use scanner::{SpanSink, scan_line};

/// Text shown in place of the preview when rendering fails.
pub const FALLBACK_MESSAGE: &str = "Error parsing markdown";

/// Reasons the renderer refuses an input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("document is {len} bytes, over the {limit} byte render limit")]
    DocumentTooLarge { len: usize, limit: usize },
    #[error("line {line} is {len} bytes, over the {limit} byte render limit")]
    LineTooLong {
        line: usize,
        len: usize,
        limit: usize,
    },
}

/// Size bounds that keep a render within a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLimits {
    pub max_document_bytes: usize,
    pub max_line_bytes: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: 4 * 1024 * 1024,
            max_line_bytes: 256 * 1024,
        }
    }
}

/// Inline markdown renderer with configurable limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    limits: RenderLimits,
}

impl Renderer {
    pub const fn new(limits: RenderLimits) -> Self {
        Self { limits }
    }

    pub const fn limits(&self) -> RenderLimits {
        self.limits
    }

    /// Render `text` into styled spans.
    ///
    /// Text without markdown, including the empty string, comes back as a
    /// single plain span equal to the input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the document or one of its lines exceeds
    /// the configured limits.
    pub fn try_render(&self, text: &str) -> Result<Vec<StyledSpan>, ParseError> {
        if text.len() > self.limits.max_document_bytes {
            return Err(ParseError::DocumentTooLarge {
                len: text.len(),
                limit: self.limits.max_document_bytes,
            });
        }

        if text.is_empty() {
            return Ok(vec![StyledSpan::plain("")]);
        }

        let mut sink = SpanSink::default();
        for (idx, line) in text.split('\n').enumerate() {
            if line.len() > self.limits.max_line_bytes {
                return Err(ParseError::LineTooLong {
                    line: idx + 1,
                    len: line.len(),
                    limit: self.limits.max_line_bytes,
                });
            }
            if idx > 0 {
                sink.push("\n", &SpanStyle::plain());
            }
            scan_line(line, &mut sink);
        }
        Ok(sink.finish())
    }

    /// Render `text`, replacing any failure with the fallback span.
    pub fn render(&self, text: &str) -> Vec<StyledSpan> {
        self.try_render(text).unwrap_or_else(|err| {
            tracing::warn!(%err, "markdown render failed, showing fallback");
            vec![StyledSpan::plain(FALLBACK_MESSAGE)]
        })
    }
}

/// Render `text` with the default limits. Never fails.
pub fn render(text: &str) -> Vec<StyledSpan> {
    Renderer::default().render(text)
}

/// Render `text` with the default limits.
///
/// # Errors
///
/// Returns [`ParseError`] when the input exceeds [`RenderLimits::default`].
pub fn try_render(text: &str) -> Result<Vec<StyledSpan>, ParseError> {
    Renderer::default().try_render(text)
}
