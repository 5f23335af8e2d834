//! Prompt assembly.
//!
//! [`assemble`] turns raw user text, a [`Mode`], add-on toggles and numeric
//! parameters into the exact text submitted to the completion call.
//!
//! Substitution is a single left-to-right scan over the template body.
//! User text is copied verbatim and never scanned, so a prompt that itself
//! contains `{word_limit}` or `{user_prompt}` comes out unchanged.
//!
//! # Example
//!
//! ```
//! use promptlab::assembler::{assemble, PromptParams};
//! use promptlab::prompts::{AddOnOptions, Mode};
//!
//! let prompt = assemble(
//!     "Write a tagline",
//!     Mode::Raikage,
//!     &AddOnOptions::none().with_word_limit(true),
//!     PromptParams::new(90),
//! )
//! .unwrap();
//! assert!(prompt.as_str().contains("Write a tagline"));
//! assert!(prompt.as_str().contains("under 90 words"));
//! ```

use std::fmt;

use crate::error::ValidationFailure;
use crate::prompts::{AddOn, AddOnOptions, Mode, Placeholder, Template, ADDONS_HEADING};

/// Smallest accepted word limit.
pub const MIN_WORD_LIMIT: u32 = 60;

/// Largest accepted word limit.
pub const MAX_WORD_LIMIT: u32 = 300;

/// Word limit used when none is given.
pub const DEFAULT_WORD_LIMIT: u32 = 120;

/// Numeric parameters substituted into templates and fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptParams {
    /// Word cap for `{word_limit}` and the word-limit add-on.
    pub word_limit: u32,
}

impl PromptParams {
    /// Parameters with the given word limit.
    #[must_use]
    pub const fn new(word_limit: u32) -> Self {
        Self { word_limit }
    }
}

impl Default for PromptParams {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_LIMIT)
    }
}

/// The final text handed to the completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    mode: Mode,
    addons: Vec<AddOn>,
    text: String,
}

impl AssembledPrompt {
    /// Mode whose template produced this prompt.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Add-ons that contributed a fragment.
    #[must_use]
    pub fn addons(&self) -> &[AddOn] {
        &self.addons
    }

    /// The prompt text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the prompt, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for AssembledPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Assemble the prompt for one submission.
///
/// # Errors
///
/// Returns [`ValidationFailure::EmptyInput`] if `raw_input` is empty after
/// trimming, before any template is looked up. Returns
/// [`ValidationFailure::WordLimitOutOfRange`] if the word limit is used by
/// this template or its add-ons and lies outside
/// [`MIN_WORD_LIMIT`]..=[`MAX_WORD_LIMIT`].
pub fn assemble(
    raw_input: &str,
    mode: Mode,
    options: &AddOnOptions,
    params: PromptParams,
) -> Result<AssembledPrompt, ValidationFailure> {
    if raw_input.trim().is_empty() {
        return Err(ValidationFailure::EmptyInput);
    }

    let template = mode.template();
    let addons: Vec<AddOn> = options.applicable(template).collect();

    let uses_limit =
        template.declares(Placeholder::WordLimit) || addons.contains(&AddOn::WordLimit);
    if uses_limit && !(MIN_WORD_LIMIT..=MAX_WORD_LIMIT).contains(&params.word_limit) {
        return Err(ValidationFailure::WordLimitOutOfRange {
            value: params.word_limit,
            min: MIN_WORD_LIMIT,
            max: MAX_WORD_LIMIT,
        });
    }

    let mut text = render(template, raw_input, params.word_limit);

    if !addons.is_empty() {
        text.push_str("\n\n");
        text.push_str(ADDONS_HEADING);
        for addon in &addons {
            text.push_str("\n- ");
            text.push_str(&addon.fragment(params.word_limit));
        }
    }

    tracing::debug!(
        mode = %mode,
        addons = addons.len(),
        prompt_len = text.len(),
        "Prompt assembled"
    );

    Ok(AssembledPrompt { mode, addons, text })
}

/// Substitute placeholders in `template` in one pass.
///
/// Braces that do not form a known placeholder are kept literally.
fn render(template: &Template, user_prompt: &str, word_limit: u32) -> String {
    let body = template.body;
    let mut out = String::with_capacity(body.len() + user_prompt.len());
    let mut rest = body;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let slot = after
            .find('}')
            .and_then(|close| Placeholder::from_name(&after[..close]).map(|p| (p, close)));

        match slot {
            Some((Placeholder::UserPrompt, close)) => {
                out.push_str(user_prompt);
                rest = &after[close + 1..];
            }
            Some((Placeholder::WordLimit, close)) => {
                out.push_str(&word_limit.to_string());
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn no_addons() -> AddOnOptions {
        AddOnOptions::none()
    }

    fn all_addons() -> AddOnOptions {
        AddOnOptions::none()
            .with_example(true)
            .with_word_limit(true)
            .with_citations(true)
    }

    fn any_mode() -> impl Strategy<Value = Mode> {
        prop::sample::select(Mode::ALL.to_vec())
    }

    fn any_options() -> impl Strategy<Value = AddOnOptions> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(e, w, c)| {
            AddOnOptions::none()
                .with_example(e)
                .with_word_limit(w)
                .with_citations(c)
        })
    }

    #[test]
    fn test_structured_mode_without_addons_is_plain_substitution() {
        let prompt = assemble(
            "Explain quantum entanglement",
            Mode::Shinobi,
            &no_addons(),
            PromptParams::default(),
        )
        .unwrap();

        let expected = Mode::Shinobi
            .template()
            .body
            .replace("{user_prompt}", "Explain quantum entanglement");
        assert_eq!(prompt.as_str(), expected);
        assert!(!prompt.as_str().contains(ADDONS_HEADING));
        assert!(prompt.addons().is_empty());
    }

    #[test]
    fn test_word_limit_addon_on_limit_template() {
        let prompt = assemble(
            "Write a tagline",
            Mode::Raikage,
            &no_addons().with_word_limit(true),
            PromptParams::new(90),
        )
        .unwrap();

        let text = prompt.as_str();
        assert!(text.contains("Write a tagline"));
        assert!(text.ends_with("\n\nAdd-ons:\n- Keep the final output under 90 words."));
        assert_eq!(prompt.addons(), &[AddOn::WordLimit]);
    }

    #[test]
    fn test_all_addons_render_as_bullets_in_order() {
        let prompt = assemble(
            "Plan a launch",
            Mode::Shinobi,
            &all_addons(),
            PromptParams::new(150),
        )
        .unwrap();

        let (_, block) = prompt.as_str().split_once("\n\nAdd-ons:\n").unwrap();
        let bullets: Vec<&str> = block.lines().collect();
        assert_eq!(
            bullets,
            vec![
                "- Include one short example only if it removes ambiguity.",
                "- Keep the final output under 150 words.",
                "- Cite sources for factual claims, or state explicitly that the answer is unknown.",
            ]
        );
    }

    #[test]
    fn test_mini_brief_substitutes_word_limit() {
        let prompt = assemble(
            "Team offsite",
            Mode::MiniBrief,
            &no_addons(),
            PromptParams::new(80),
        )
        .unwrap();
        assert!(prompt.as_str().contains("at most 80 words"));
        assert!(prompt.as_str().contains("Team offsite"));
    }

    #[test]
    fn test_empty_and_whitespace_input_rejected() {
        for input in ["", " ", "\n\t  \r\n"] {
            let err = assemble(input, Mode::Shinobi, &all_addons(), PromptParams::default())
                .unwrap_err();
            assert_eq!(err, ValidationFailure::EmptyInput);
        }
    }

    #[test]
    fn test_empty_input_checked_before_word_limit() {
        let err = assemble("  ", Mode::MiniBrief, &no_addons(), PromptParams::new(1)).unwrap_err();
        assert_eq!(err, ValidationFailure::EmptyInput);
    }

    #[test]
    fn test_word_limit_out_of_range_when_used() {
        let err = assemble(
            "Team offsite",
            Mode::MiniBrief,
            &no_addons(),
            PromptParams::new(MAX_WORD_LIMIT + 1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::WordLimitOutOfRange {
                value: MAX_WORD_LIMIT + 1,
                min: MIN_WORD_LIMIT,
                max: MAX_WORD_LIMIT,
            }
        );
    }

    #[test]
    fn test_word_limit_ignored_when_unused() {
        let prompt = assemble(
            "Sort a list",
            Mode::CodeTask,
            &no_addons().with_word_limit(true),
            PromptParams::new(5),
        );
        assert!(prompt.is_ok());
    }

    #[test]
    fn test_input_is_inserted_verbatim() {
        let raw = "  <b>Use {word_limit} & {user_prompt} literally</b>\n";
        let prompt = assemble(raw, Mode::QuickRefine, &no_addons(), PromptParams::default())
            .unwrap();
        assert!(prompt.as_str().contains(raw));
    }

    #[test]
    fn test_render_keeps_unknown_braces() {
        let template = Template {
            mode: Mode::Shinobi,
            label: "test",
            summary: "test",
            body: "json: {\"a\": 1} {topic} {user_prompt} {",
            supports_limit: false,
        };
        assert_eq!(
            render(&template, "X", 100),
            "json: {\"a\": 1} {topic} X {"
        );
    }

    #[test]
    fn test_display_matches_as_str() {
        let prompt = assemble("Hi", Mode::Raikage, &no_addons(), PromptParams::default()).unwrap();
        assert_eq!(prompt.to_string(), prompt.as_str());
        assert_eq!(prompt.mode(), Mode::Raikage);
        assert_eq!(prompt.clone().into_string(), prompt.as_str());
    }

    proptest! {
        #[test]
        fn prop_whitespace_input_never_assembles(
            input in "[ \t\r\n]{0,16}",
            mode in any_mode(),
            options in any_options(),
        ) {
            prop_assert_eq!(
                assemble(&input, mode, &options, PromptParams::default()),
                Err(ValidationFailure::EmptyInput)
            );
        }

        #[test]
        fn prop_no_placeholder_tokens_remain(
            input in "[a-zA-Z0-9 .,!?]{1,64}",
            mode in any_mode(),
            options in any_options(),
            limit in MIN_WORD_LIMIT..=MAX_WORD_LIMIT,
        ) {
            prop_assume!(!input.trim().is_empty());
            let prompt = assemble(&input, mode, &options, PromptParams::new(limit)).unwrap();
            for placeholder in Placeholder::ALL {
                prop_assert!(!prompt.as_str().contains(placeholder.token()));
            }
        }

        #[test]
        fn prop_unsupported_word_limit_is_noop(
            input in "[a-z]{1,32}",
            options in any_options(),
            limit in MIN_WORD_LIMIT..=MAX_WORD_LIMIT,
        ) {
            for mode in Mode::ALL.into_iter().filter(|m| !m.template().supports_limit) {
                let on = assemble(&input, mode, &options.with_word_limit(true), PromptParams::new(limit)).unwrap();
                let off = assemble(&input, mode, &options.with_word_limit(false), PromptParams::new(limit)).unwrap();
                prop_assert_eq!(on.as_str(), off.as_str());
            }
        }

        #[test]
        fn prop_assemble_is_deterministic(
            input in ".{1,64}",
            mode in any_mode(),
            options in any_options(),
            limit in MIN_WORD_LIMIT..=MAX_WORD_LIMIT,
        ) {
            prop_assume!(!input.trim().is_empty());
            let first = assemble(&input, mode, &options, PromptParams::new(limit)).unwrap();
            let second = assemble(&input, mode, &options, PromptParams::new(limit)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
