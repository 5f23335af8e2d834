//! PromptLab
//!
//! Turns a rough user prompt into a structured one by substituting it into
//! a hand-written instructional template, then relays the result to the
//! Google Gemini `generateContent` API.
//!
//! # Features
//!
//! - Five prompt modes with fixed templates
//! - Optional add-on instructions (example, word limit, citations)
//! - Single-pass placeholder substitution that never re-expands user text
//! - One Gemini request per submission, failures surfaced without retry
//! - Environment diagnostics
//!
//! # Quick Start
//!
//! ```bash
//! GEMINI_API_KEY=AIza... promptlab enhance "Explain quantum entanglement" -m raikage
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐  input   ┌───────────┐  prompt  ┌───────────────┐
//! │   CLI    │─────────▶│ PromptLab │─────────▶│ GeminiClient  │──────▶ Gemini API
//! │ (clap)   │◀─────────│ (session) │◀─────────│ (reqwest)     │
//! └──────────┘ outcome  └─────┬─────┘   text   └───────────────┘
//!                             │
//!                             ▼
//!                   assembler + prompts
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod assembler;
pub mod cli;
pub mod config;
pub mod diagnose;
pub mod error;
pub mod gemini;
pub mod lab;
pub mod prompts;
pub mod traits;

#[cfg(test)]
mod test_utils;
