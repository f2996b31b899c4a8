//! Structural block replacement
//!
//! Conditional-compilation blocks nest (`#if A ... #if B ... #endif ... #endif`),
//! so the end of a block is found by a stack-based scan over marker
//! occurrences rather than a regular expression.

use super::PatchRule;
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::ops::Range;

/// Byte span of a balanced block, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: usize,
    pub end: usize,
}

impl BlockSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Locate the block that begins at the first `start_marker` and ends at the
/// `close` marker balancing it.
///
/// `start_marker` must itself begin with `open`.
pub fn find_balanced_block(
    text: &str,
    start_marker: &str,
    open: &str,
    close: &str,
) -> Result<BlockSpan> {
    let start = text
        .find(start_marker)
        .ok_or_else(|| Error::marker_not_found(start_marker))?;

    let mut stack: Vec<usize> = Vec::new();
    let mut pos = start;

    while pos < text.len() {
        let rest = &text[pos..];
        let next_open = rest.find(open).map(|i| pos + i);
        let Some(next_close) = rest.find(close).map(|i| pos + i) else {
            break;
        };

        match next_open {
            Some(o) if o < next_close => {
                stack.push(o);
                pos = o + open.len();
            }
            _ => {
                if stack.pop().is_none() {
                    break;
                }
                pos = next_close + close.len();
                if stack.is_empty() {
                    return Ok(BlockSpan { start, end: pos });
                }
            }
        }
    }

    Err(Error::unbalanced_block(open, close))
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replaces a balanced block wholesale with a canonical block.
///
/// The file is left alone when the current block already matches the
/// canonical one modulo whitespace, when the start marker is missing, or
/// when the block never closes.
#[derive(Debug, Clone)]
pub struct BalancedBlockRule {
    name: String,
    start_marker: String,
    open: String,
    close: String,
    replacement: String,
}

impl BalancedBlockRule {
    pub fn new(
        name: impl Into<String>,
        start_marker: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_marker: start_marker.into(),
            open: open.into(),
            close: close.into(),
            replacement: replacement.into(),
        }
    }

    /// Block delimited by `#if` / `#endif`
    pub fn conditional(
        name: impl Into<String>,
        start_marker: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self::new(name, start_marker, "#if", "#endif", replacement)
    }
}

impl PatchRule for BalancedBlockRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let span = match find_balanced_block(content, &self.start_marker, &self.open, &self.close)
        {
            Ok(span) => span,
            Err(e) => {
                tracing::warn!(rule = %self.name, error = %e, "Block not located, leaving content as is");
                return Cow::Borrowed(content);
            }
        };

        let current = &content[span.range()];
        if normalize_whitespace(current) == normalize_whitespace(&self.replacement) {
            return Cow::Borrowed(content);
        }

        let mut patched = String::with_capacity(content.len() + self.replacement.len());
        patched.push_str(&content[..span.start]);
        patched.push_str(&self.replacement);
        patched.push_str(&content[span.end..]);
        Cow::Owned(patched)
    }
}
