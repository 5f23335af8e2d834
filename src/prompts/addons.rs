//! Optional instruction fragments appended to an assembled prompt.

use super::Template;

/// Heading placed above the appended fragments.
pub const ADDONS_HEADING: &str = "Add-ons:";

/// An independently toggleable instruction fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddOn {
    /// Ask for a single example when it clarifies the request.
    IncludeExample,
    /// Cap the output length. Only applies to limit-aware templates.
    WordLimit,
    /// Require citations or an explicit unknown-answer statement.
    Citations,
}

impl AddOn {
    /// All add-ons in the order their fragments are emitted.
    pub const ALL: [Self; 3] = [Self::IncludeExample, Self::WordLimit, Self::Citations];

    /// Whether this add-on has any effect on `template`.
    #[must_use]
    pub const fn applies_to(self, template: &Template) -> bool {
        match self {
            Self::IncludeExample | Self::Citations => true,
            Self::WordLimit => template.supports_limit,
        }
    }

    /// Fragment text for this add-on.
    #[must_use]
    pub fn fragment(self, word_limit: u32) -> String {
        match self {
            Self::IncludeExample => {
                "Include one short example only if it removes ambiguity.".to_string()
            }
            Self::WordLimit => format!("Keep the final output under {word_limit} words."),
            Self::Citations => "Cite sources for factual claims, or state explicitly that the answer is unknown.".to_string(),
        }
    }
}

/// Which add-ons the user switched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOnOptions {
    /// Enables [`AddOn::IncludeExample`].
    pub include_example: bool,
    /// Enables [`AddOn::WordLimit`].
    pub enforce_word_limit: bool,
    /// Enables [`AddOn::Citations`].
    pub require_citations: bool,
}

impl AddOnOptions {
    /// No add-ons enabled.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            include_example: false,
            enforce_word_limit: false,
            require_citations: false,
        }
    }

    /// Toggle the example add-on.
    #[must_use]
    pub const fn with_example(mut self, enabled: bool) -> Self {
        self.include_example = enabled;
        self
    }

    /// Toggle the word-limit add-on.
    #[must_use]
    pub const fn with_word_limit(mut self, enabled: bool) -> Self {
        self.enforce_word_limit = enabled;
        self
    }

    /// Toggle the citations add-on.
    #[must_use]
    pub const fn with_citations(mut self, enabled: bool) -> Self {
        self.require_citations = enabled;
        self
    }

    /// Returns true if `addon` is switched on.
    #[must_use]
    pub const fn is_enabled(&self, addon: AddOn) -> bool {
        match addon {
            AddOn::IncludeExample => self.include_example,
            AddOn::WordLimit => self.enforce_word_limit,
            AddOn::Citations => self.require_citations,
        }
    }

    /// Enabled add-ons that apply to `template`, in emission order.
    pub fn applicable<'a>(&'a self, template: &'a Template) -> impl Iterator<Item = AddOn> + 'a {
        AddOn::ALL
            .into_iter()
            .filter(move |addon| self.is_enabled(*addon) && addon.applies_to(template))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::prompts::Mode;

    #[test]
    fn test_word_limit_fragment_formats_plain_integer() {
        assert_eq!(
            AddOn::WordLimit.fragment(90),
            "Keep the final output under 90 words."
        );
    }

    #[test]
    fn test_word_limit_applies_only_to_limit_templates() {
        assert!(AddOn::WordLimit.applies_to(Mode::Shinobi.template()));
        assert!(AddOn::WordLimit.applies_to(Mode::Raikage.template()));
        assert!(!AddOn::WordLimit.applies_to(Mode::CodeTask.template()));
        assert!(!AddOn::WordLimit.applies_to(Mode::QuickRefine.template()));
        assert!(!AddOn::WordLimit.applies_to(Mode::MiniBrief.template()));
    }

    #[test]
    fn test_applicable_keeps_emission_order() {
        let options = AddOnOptions::none()
            .with_citations(true)
            .with_word_limit(true)
            .with_example(true);
        let addons: Vec<AddOn> = options.applicable(Mode::Shinobi.template()).collect();
        assert_eq!(
            addons,
            vec![AddOn::IncludeExample, AddOn::WordLimit, AddOn::Citations]
        );
    }

    #[test]
    fn test_applicable_drops_unsupported() {
        let options = AddOnOptions::none().with_word_limit(true);
        assert_eq!(options.applicable(Mode::CodeTask.template()).count(), 0);
    }

    #[test]
    fn test_none_is_default() {
        assert_eq!(AddOnOptions::none(), AddOnOptions::default());
    }
}
