//! Template bodies for each enhancement mode.
//!
//! Placeholders use `{name}` syntax. Every body contains `{user_prompt}`
//! exactly once; only the mini brief carries `{word_limit}`.

/// Structured expert prompt design.
pub const SHINOBI: &str = r"You are an expert in structured prompt design. Refine the following prompt for clarity, conciseness, and structured output.

Rewrite it using these sections:
1. Role: who the model should act as
2. Task: what must be produced
3. Context: the facts the model needs
4. Constraints: scope, tone, and things to avoid
5. Output format: the exact shape of the answer

Return only the refined prompt.

Prompt to refine:
{user_prompt}";

/// Execution-focused strategist.
pub const RAIKAGE: &str = r"You are a world-class AI strategist specializing in execution-focused prompts. Transform the following prompt for high-impact, expert-level results.

Make the transformed prompt:
- Assign an expert persona with relevant credentials
- State a measurable objective and success criteria
- Break the work into ordered, actionable steps
- Call out risks, trade-offs, and the decision the reader must make
- Demand a concise, skimmable deliverable

Return only the transformed prompt.

Prompt to transform:
{user_prompt}";

/// Light-touch rewrite.
pub const QUICK_REFINE: &str = r"Rewrite the following prompt so it is clear and specific. Keep the author's intent, remove ambiguity, and fix grammar. Return only the rewritten prompt.

Prompt:
{user_prompt}";

/// Coding-assistant task prompt.
pub const CODE_TASK: &str = r"You are a senior software engineer writing a task prompt for a coding assistant. Turn the request below into a precise coding prompt that states:
- The language, framework, and versions involved
- Inputs, outputs, and function signatures
- Expected behavior, including edge cases and error handling
- Acceptance tests the result must pass

Return only the coding prompt.

Request:
{user_prompt}";

/// Short brief with a built-in length cap.
pub const MINI_BRIEF: &str = r"Turn the request below into a mini brief of at most {word_limit} words. Use four labelled lines: Goal, Audience, Key points, Tone. Return only the brief.

Request:
{user_prompt}";
