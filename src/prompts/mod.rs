//! Prompt templates.
//!
//! This module provides the static template catalog, one entry per
//! enhancement [`Mode`], plus the optional add-on fragments.
//!
//! The catalog is plain `'static` data: it is never built at runtime and
//! never mutated. [`Mode::template`] is a table lookup, so a mode always
//! resolves to exactly one [`Template`].
//!
//! # Example
//!
//! ```
//! use promptlab::prompts::{Mode, Placeholder};
//!
//! let template = Mode::Shinobi.template();
//! assert!(template.body.contains(Placeholder::UserPrompt.token()));
//! assert!(template.supports_limit);
//! ```

mod addons;
mod templates;

use std::fmt;
use std::str::FromStr;

pub use addons::{AddOn, AddOnOptions, ADDONS_HEADING};

/// Enhancement mode.
///
/// The set is closed: every variant has a template in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Structured expert prompt design.
    #[default]
    Shinobi,
    /// Execution-focused strategist.
    Raikage,
    /// Light-touch rewrite.
    QuickRefine,
    /// Coding-assistant task prompt.
    CodeTask,
    /// Short brief with a built-in word cap.
    MiniBrief,
}

impl Mode {
    /// Every mode, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Shinobi,
        Self::Raikage,
        Self::QuickRefine,
        Self::CodeTask,
        Self::MiniBrief,
    ];

    /// Returns the mode identifier used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shinobi => "shinobi",
            Self::Raikage => "raikage",
            Self::QuickRefine => "quick-refine",
            Self::CodeTask => "code-task",
            Self::MiniBrief => "mini-brief",
        }
    }

    /// Returns the template governing this mode.
    #[must_use]
    pub fn template(&self) -> &'static Template {
        match self {
            Self::Shinobi => &CATALOG[0],
            Self::Raikage => &CATALOG[1],
            Self::QuickRefine => &CATALOG[2],
            Self::CodeTask => &CATALOG[3],
            Self::MiniBrief => &CATALOG[4],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode '{input}' (expected one of: shinobi, raikage, quick-refine, code-task, mini-brief)")]
pub struct ParseModeError {
    /// The rejected identifier.
    pub input: String,
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ParseModeError { input: s.to_string() })
    }
}

/// A named slot inside a template body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// The user's raw prompt text.
    UserPrompt,
    /// The numeric word limit.
    WordLimit,
}

impl Placeholder {
    /// Every placeholder a template may declare.
    pub const ALL: [Self; 2] = [Self::UserPrompt, Self::WordLimit];

    /// Name between the braces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UserPrompt => "user_prompt",
            Self::WordLimit => "word_limit",
        }
    }

    /// Full token as it appears in a body, e.g. `{user_prompt}`.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::UserPrompt => "{user_prompt}",
            Self::WordLimit => "{word_limit}",
        }
    }

    /// Resolve a name found between braces.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// An immutable instruction blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Mode this template belongs to.
    pub mode: Mode,
    /// Human-readable label.
    pub label: &'static str,
    /// One-line summary shown by `promptlab modes`.
    pub summary: &'static str,
    /// Body with `{placeholder}` slots.
    pub body: &'static str,
    /// Whether the word-limit add-on applies.
    pub supports_limit: bool,
}

impl Template {
    /// Returns true if the body declares `placeholder`.
    #[must_use]
    pub fn declares(&self, placeholder: Placeholder) -> bool {
        self.body.contains(placeholder.token())
    }
}

/// The template catalog, indexed by [`Mode::template`].
pub static CATALOG: [Template; 5] = [
    Template {
        mode: Mode::Shinobi,
        label: "🌀 Shinobi",
        summary: "Structured prompt design: role, task, context, constraints, format",
        body: templates::SHINOBI,
        supports_limit: true,
    },
    Template {
        mode: Mode::Raikage,
        label: "⚡ Raikage",
        summary: "Execution-focused strategist: persona, objective, steps, risks",
        body: templates::RAIKAGE,
        supports_limit: true,
    },
    Template {
        mode: Mode::QuickRefine,
        label: "✏️ Quick refine",
        summary: "Clarify and tighten the prompt without restructuring it",
        body: templates::QUICK_REFINE,
        supports_limit: false,
    },
    Template {
        mode: Mode::CodeTask,
        label: "💻 Code task",
        summary: "Precise coding-assistant prompt with signatures and tests",
        body: templates::CODE_TASK,
        supports_limit: false,
    },
    Template {
        mode: Mode::MiniBrief,
        label: "📝 Mini brief",
        summary: "Goal, audience, key points, and tone within the word limit",
        body: templates::MINI_BRIEF,
        supports_limit: false,
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_catalog_matches_modes() {
        for mode in Mode::ALL {
            assert_eq!(mode.template().mode, mode);
        }
    }

    #[test]
    fn test_every_template_has_one_user_prompt_slot() {
        for mode in Mode::ALL {
            let body = mode.template().body;
            assert_eq!(
                body.matches(Placeholder::UserPrompt.token()).count(),
                1,
                "{mode}"
            );
        }
    }

    #[test]
    fn test_only_mini_brief_declares_word_limit() {
        for mode in Mode::ALL {
            let declares = mode.template().declares(Placeholder::WordLimit);
            assert_eq!(declares, mode == Mode::MiniBrief, "{mode}");
        }
    }

    #[test]
    fn test_templates_use_only_known_placeholders() {
        for mode in Mode::ALL {
            let body = mode.template().body;
            let mut rest = body;
            while let Some(open) = rest.find('{') {
                let after = &rest[open + 1..];
                let close = after.find('}').expect("unterminated placeholder");
                assert!(
                    Placeholder::from_name(&after[..close]).is_some(),
                    "{mode}: unknown placeholder {}",
                    &after[..close]
                );
                rest = &after[close + 1..];
            }
        }
    }

    #[test_case("shinobi", Mode::Shinobi)]
    #[test_case("RAIKAGE", Mode::Raikage)]
    #[test_case("quick-refine", Mode::QuickRefine)]
    #[test_case("code_task", Mode::CodeTask)]
    #[test_case(" mini-brief ", Mode::MiniBrief)]
    fn test_mode_from_str(input: &str, expected: Mode) {
        assert_eq!(input.parse::<Mode>().unwrap(), expected);
    }

    #[test]
    fn test_mode_from_str_unknown() {
        let err = "hokage".parse::<Mode>().unwrap_err();
        assert_eq!(err.input, "hokage");
        assert!(err.to_string().contains("unknown mode 'hokage'"));
    }

    #[test]
    fn test_mode_display_round_trips_through_from_str() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_default_mode_is_shinobi() {
        assert_eq!(Mode::default(), Mode::Shinobi);
    }

    #[test]
    fn test_placeholder_from_name() {
        assert_eq!(
            Placeholder::from_name("user_prompt"),
            Some(Placeholder::UserPrompt)
        );
        assert_eq!(
            Placeholder::from_name("word_limit"),
            Some(Placeholder::WordLimit)
        );
        assert_eq!(Placeholder::from_name("topic"), None);
    }
}
