//! Terminal subsystem for Konsoli.
//!
//! Provides a command-line interface driven by raw scancodes.
//!
//! # Architecture
//!
//! - `shell`: line editor and the [`Terminal`] that ties decoder, editor and
//!   command table together
//! - `commands`: built-in shell commands and the dispatcher

pub mod commands;
pub mod shell;

pub use commands::{dispatch, Command, CommandContext, BUILTIN_COMMANDS};
pub use shell::{LineBuffer, Terminal, MAX_LINE_LENGTH};

use crate::config;
use konsoli_common::Color;

/// Terminal appearance and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Text shown before every input line. May be empty.
    pub prompt: &'static str,
    /// Foreground of the prompt.
    pub prompt_color: Color,
    /// Foreground of `[KEY]` notices for action keys.
    pub notice_color: Color,
    /// Line buffer slots; at most `line_capacity - 1` characters are kept.
    pub line_capacity: usize,
}

impl TerminalConfig {
    /// Configured prompt, green prompt, yellow notices, one full row of input.
    pub const DEFAULT: TerminalConfig = TerminalConfig {
        prompt: config::PROMPT,
        prompt_color: Color::LightGreen,
        notice_color: Color::Yellow,
        line_capacity: MAX_LINE_LENGTH,
    };

    /// Replaces the prompt text.
    pub const fn with_prompt(mut self, prompt: &'static str) -> Self {
        self.prompt = prompt;
        self
    }

    /// Replaces the prompt color.
    pub const fn with_prompt_color(mut self, color: Color) -> Self {
        self.prompt_color = color;
        self
    }

    /// Replaces the notice color.
    pub const fn with_notice_color(mut self, color: Color) -> Self {
        self.notice_color = color;
        self
    }

    /// Replaces the line capacity.
    pub const fn with_line_capacity(mut self, capacity: usize) -> Self {
        self.line_capacity = capacity;
        self
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_override_single_fields() {
        let config = TerminalConfig::DEFAULT
            .with_prompt("$ ")
            .with_notice_color(Color::Cyan);
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.notice_color, Color::Cyan);
        assert_eq!(config.prompt_color, TerminalConfig::DEFAULT.prompt_color);
        assert_eq!(config.line_capacity, MAX_LINE_LENGTH);
    }
}
