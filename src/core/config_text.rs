//! Generated configuration text.
//!
//! Board layers load a template verbatim and then rewrite parts of it with
//! literal substring replacements. Every replacement is recorded so that
//! re-applying one is a no-op even when the replacement text contains the
//! pattern it replaced.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A pattern that was expected in the text but is not there.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("pattern `{pattern}` not found")]
pub struct MissingPattern {
    pub pattern: String,
}

/// One literal substring replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub pattern: String,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        TextEdit {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Template text plus the edits applied to it so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigText {
    text: String,
    applied: Vec<TextEdit>,
}

impl ConfigText {
    /// Start from unedited template text.
    pub fn new(text: impl Into<String>) -> Self {
        ConfigText {
            text: text.into(),
            applied: Vec::new(),
        }
    }

    /// Render a template with an ordered list of edits.
    pub fn render<P, R>(
        template: impl Into<String>,
        edits: impl IntoIterator<Item = (P, R)>,
    ) -> Result<Self, MissingPattern>
    where
        P: Into<String>,
        R: Into<String>,
    {
        let mut config = ConfigText::new(template);
        for (pattern, replacement) in edits {
            config.apply(TextEdit::new(pattern, replacement))?;
        }
        Ok(config)
    }

    /// Apply an edit, replacing every occurrence of its pattern.
    ///
    /// Returns `Ok(false)` when the identical edit is the last one applied,
    /// so no other edit has touched the text since.
    pub fn apply(&mut self, edit: TextEdit) -> Result<bool, MissingPattern> {
        if self.applied.last() == Some(&edit) {
            return Ok(false);
        }
        if !self.text.contains(&edit.pattern) {
            return Err(MissingPattern {
                pattern: edit.pattern,
            });
        }
        self.text = self.text.replace(&edit.pattern, &edit.replacement);
        self.applied.push(edit);
        Ok(true)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Edits applied so far, in order.
    pub fn edits(&self) -> &[TextEdit] {
        &self.applied
    }
}

impl Serialize for ConfigText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_applies_edits_in_order() {
        let config = ConfigText::render(
            "-mcpu=cortex-m4 -mfpu=fpv4-sp-d16",
            [("cortex-m4", "cortex-m7"), ("fpv4-sp-d16", "fpv5-d16")],
        )
        .unwrap();
        assert_eq!(config.as_str(), "-mcpu=cortex-m7 -mfpu=fpv5-d16");
        assert_eq!(config.edits().len(), 2);
    }

    #[test]
    fn test_missing_pattern_fails_loudly() {
        let err = ConfigText::render("-mcpu=cortex-m3", [("cortex-m4", "cortex-m7")]).unwrap_err();
        assert_eq!(err.pattern, "cortex-m4");
    }

    #[test]
    fn test_reapplying_edit_does_not_double_substitute() {
        // The replacement still contains the pattern.
        let edit = TextEdit::new("\"-nolibc\"", "\"-nolibc\",\n \"-lgnat\"");
        let mut once = ConfigText::new("(\"-nolibc\")");
        assert!(once.apply(edit.clone()).unwrap());

        let mut twice = ConfigText::new("(\"-nolibc\")");
        twice.apply(edit.clone()).unwrap();
        assert!(!twice.apply(edit).unwrap());

        assert_eq!(once.as_str(), twice.as_str());
        assert_eq!(twice.as_str().matches("-lgnat").count(), 1);
    }

    #[test]
    fn test_edit_reapplied_after_revert() {
        let mut config = ConfigText::new("-mcpu=cortex-m4");
        assert!(config.apply(TextEdit::new("cortex-m4", "cortex-m7")).unwrap());
        assert!(config.apply(TextEdit::new("cortex-m7", "cortex-m4")).unwrap());
        assert!(config.apply(TextEdit::new("cortex-m4", "cortex-m7")).unwrap());
        assert_eq!(config.as_str(), "-mcpu=cortex-m7");
        assert_eq!(config.edits().len(), 3);
    }

    #[test]
    fn test_serializes_as_text() {
        let config = ConfigText::render("a b", [("a", "c")]).unwrap();
        assert_eq!(serde_json::to_string(&config).unwrap(), "\"c b\"");
    }
}
