//! Regex-driven text rules

use super::PatchRule;
use crate::error::Result;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// Global search-and-replace.
///
/// Literal rules escape both sides; pattern rules may reference capture
/// groups (`$1`) in the replacement.
#[derive(Debug, Clone)]
pub struct RegexRule {
    name: String,
    regex: Regex,
    replacement: String,
    expand: bool,
}

impl RegexRule {
    /// Rule from a regular expression and a `$n`-style replacement
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            regex: Regex::new(pattern)?,
            replacement: replacement.into(),
            expand: true,
        })
    }

    /// Rule replacing every occurrence of one literal token with another
    pub fn literal(name: impl Into<String>, from: &str, to: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            regex: Regex::new(&regex::escape(from))?,
            replacement: to.into(),
            expand: false,
        })
    }
}

impl PatchRule for RegexRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        if self.expand {
            self.regex.replace_all(content, self.replacement.as_str())
        } else {
            self.regex.replace_all(content, NoExpand(self.replacement.as_str()))
        }
    }
}

/// Replaces the trimmed text of one capture group in the first match.
///
/// Everything else in the match, including whitespace around the captured
/// value, is preserved.
#[derive(Debug, Clone)]
pub struct CaptureRule {
    name: String,
    regex: Regex,
    group: usize,
    value: String,
}

impl CaptureRule {
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        group: usize,
        value: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            regex: Regex::new(pattern)?,
            group,
            value: value.into(),
        })
    }
}

impl PatchRule for CaptureRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let Some(group) = self
            .regex
            .captures(content)
            .and_then(|caps| caps.get(self.group))
        else {
            return Cow::Borrowed(content);
        };

        let raw = group.as_str();
        let start = group.start() + (raw.len() - raw.trim_start().len());
        let end = group.start() + raw.trim_end().len();
        if start >= end || content[start..end] == self.value {
            return Cow::Borrowed(content);
        }

        let mut patched = String::with_capacity(content.len() + self.value.len());
        patched.push_str(&content[..start]);
        patched.push_str(&self.value);
        patched.push_str(&content[end..]);
        Cow::Owned(patched)
    }
}
