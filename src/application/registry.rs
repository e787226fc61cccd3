//! Prompt Registry - per-intent prompt programs and token budgets.
//!
//! Each extractable intent carries a primary prompt for the first attempt and
//! a terser fallback prompt paired with a smaller token budget for the retry.
//! The built-in prompts are compiled into the binary; a configured prompt
//! directory overrides any of them by file name.

use std::path::Path;

use crate::config::ConfigError;
use crate::domain::Intent;

/// Prompt pair plus token budgets for one intent.
#[derive(Debug, Clone)]
pub struct PromptProgram {
    /// System prompt for the first extraction attempt.
    pub primary: String,
    /// Simplified system prompt for the retry.
    pub fallback: String,
    /// Token budget for the first attempt.
    pub primary_budget: u32,
    /// Token budget for the retry.
    pub fallback_budget: u32,
}

/// Registry of prompt programs for every extractable intent.
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    show_info: PromptProgram,
    booking: PromptProgram,
    cancellation: PromptProgram,
    discount: PromptProgram,
    review: PromptProgram,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptRegistry {
    /// Registry backed by the compiled-in prompt set.
    pub fn builtin() -> Self {
        Self {
            show_info: PromptProgram {
                primary: include_str!("../../prompts/show_info.txt").to_string(),
                fallback: include_str!("../../prompts/show_info_fallback.txt").to_string(),
                primary_budget: 300,
                fallback_budget: 150,
            },
            booking: PromptProgram {
                primary: include_str!("../../prompts/booking.txt").to_string(),
                fallback: include_str!("../../prompts/booking_fallback.txt").to_string(),
                primary_budget: 1000,
                fallback_budget: 600,
            },
            cancellation: PromptProgram {
                primary: include_str!("../../prompts/cancellation.txt").to_string(),
                fallback: include_str!("../../prompts/cancellation_fallback.txt").to_string(),
                primary_budget: 100,
                fallback_budget: 100,
            },
            discount: PromptProgram {
                primary: include_str!("../../prompts/discount.txt").to_string(),
                fallback: include_str!("../../prompts/discount_fallback.txt").to_string(),
                primary_budget: 200,
                fallback_budget: 150,
            },
            review: PromptProgram {
                primary: include_str!("../../prompts/review.txt").to_string(),
                fallback: include_str!("../../prompts/review_fallback.txt").to_string(),
                primary_budget: 300,
                fallback_budget: 200,
            },
        }
    }

    /// Registry with prompts overridden from `dir` where a matching file
    /// exists. Missing files keep the built-in text; unreadable files are an
    /// error.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let mut registry = Self::builtin();

        let slots = [
            (&mut registry.show_info, "show_info"),
            (&mut registry.booking, "booking"),
            (&mut registry.cancellation, "cancellation"),
            (&mut registry.discount, "discount"),
            (&mut registry.review, "review"),
        ];

        for (program, stem) in slots {
            if let Some(text) = read_override(dir, stem)? {
                program.primary = text;
            }
            if let Some(text) = read_override(dir, &format!("{stem}_fallback"))? {
                program.fallback = text;
            }
        }

        Ok(registry)
    }

    /// Prompt program for an extractable intent. `Exit` has no extraction
    /// step and returns `None`.
    pub fn program(&self, intent: Intent) -> Option<&PromptProgram> {
        match intent {
            Intent::ShowInfo => Some(&self.show_info),
            Intent::Booking => Some(&self.booking),
            Intent::Cancellation => Some(&self.cancellation),
            Intent::Discount => Some(&self.discount),
            Intent::Review => Some(&self.review),
            Intent::Exit => None,
        }
    }
}

fn read_override(dir: &Path, stem: &str) -> Result<Option<String>, ConfigError> {
    let path = dir.join(format!("{stem}.txt"));
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(&path)
        .map(Some)
        .map_err(|e| config::ConfigError::Message(format!("{}: {e}", path.display())).into())
}
