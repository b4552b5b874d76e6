//! Configuration types for POML-to-TOON conversion.
//!
//! All conversion behaviour is controlled through [`ConvertConfig`], built
//! via its [`ConvertConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls, log them, and diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::ConvertError;

/// Configuration for a POML-to-TOON conversion.
///
/// Built via [`ConvertConfig::builder()`] or using
/// [`ConvertConfig::default()`].
///
/// # Example
/// ```rust
/// use poml2toon::ConvertConfig;
///
/// let config = ConvertConfig::builder()
///     .bullet_indent(4)
///     .strict(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.bullet_indent, 4);
/// ```
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Leading spaces before each `- ` list bullet in the output. Range: 0–8. Default: 2.
    ///
    /// Two spaces is the conventional TOON nesting step. The normalizer trims
    /// every line, so this is the only indentation that survives to the
    /// output; raising it deepens the visual nesting of list items without
    /// touching any other line.
    pub bullet_indent: usize,

    /// Banner line emitted in place of an `<example>` opening tag.
    /// Default: `*** Example ***`.
    pub example_banner: String,

    /// Label emitted for `<HumanMessage>` dialogue turns. Default: `User`.
    pub user_label: String,

    /// Label emitted for `<AiMessage>` dialogue turns. Default: `AI`.
    pub ai_label: String,

    /// Fail instead of passing unrecognised markup through. Default: false.
    ///
    /// The converter is deliberately lenient: tags outside the recognised
    /// vocabulary, unterminated comments, and broken attribute quoting all
    /// fall through to the output as-is. Strict mode turns those leftovers
    /// into a [`ConvertError::MalformedMarkup`] so automation can catch a
    /// document that would otherwise ship with raw tag syntax in a prompt.
    pub strict: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            bullet_indent: 2,
            example_banner: "*** Example ***".to_string(),
            user_label: "User".to_string(),
            ai_label: "AI".to_string(),
            strict: false,
        }
    }
}

impl ConvertConfig {
    /// Create a new builder for `ConvertConfig`.
    pub fn builder() -> ConvertConfigBuilder {
        ConvertConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConvertConfig`].
#[derive(Debug)]
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    pub fn bullet_indent(mut self, n: usize) -> Self {
        self.config.bullet_indent = n.min(8);
        self
    }

    pub fn example_banner(mut self, banner: impl Into<String>) -> Self {
        self.config.example_banner = banner.into();
        self
    }

    pub fn user_label(mut self, label: impl Into<String>) -> Self {
        self.config.user_label = label.into();
        self
    }

    pub fn ai_label(mut self, label: impl Into<String>) -> Self {
        self.config.ai_label = label.into();
        self
    }

    pub fn strict(mut self, v: bool) -> Self {
        self.config.strict = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConvertConfig, ConvertError> {
        let c = &self.config;
        if c.bullet_indent > 8 {
            return Err(ConvertError::InvalidConfig(format!(
                "Bullet indent must be 0–8, got {}",
                c.bullet_indent
            )));
        }
        if c.example_banner.trim().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "Example banner must not be empty".into(),
            ));
        }
        if c.user_label.trim().is_empty() || c.ai_label.trim().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "Dialogue labels must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_documented_values() {
        let c = ConvertConfig::default();
        assert_eq!(c.bullet_indent, 2);
        assert_eq!(c.example_banner, "*** Example ***");
        assert_eq!(c.user_label, "User");
        assert_eq!(c.ai_label, "AI");
        assert!(!c.strict);
    }

    #[test]
    fn builder_clamps_indent() {
        let c = ConvertConfig::builder().bullet_indent(99).build().unwrap();
        assert_eq!(c.bullet_indent, 8);
    }

    #[test]
    fn empty_banner_rejected() {
        let result = ConvertConfig::builder().example_banner("   ").build();
        assert!(matches!(result, Err(ConvertError::InvalidConfig(_))));
    }

    #[test]
    fn empty_label_rejected() {
        let result = ConvertConfig::builder().user_label("").build();
        assert!(matches!(result, Err(ConvertError::InvalidConfig(_))));
    }
}
