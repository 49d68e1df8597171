use inksac::prelude::*;

use crate::shell::syntax::is_operator;
use crate::shell::tokenizer::is_delimiter;

#[derive(Clone, Copy)]
enum Role {
    Command,
    Operator,
    Variable,
    Flag,
}

fn paint(text: &str, role: Role) -> String {
    let style = match role {
        Role::Command => Style::builder().foreground(Color::Cyan).bold().build(),
        Role::Operator => Style::builder().foreground(Color::Yellow).bold().build(),
        Role::Variable => Style::builder().foreground(Color::Green).build(),
        Role::Flag => Style::builder().foreground(Color::Yellow).build(),
    };
    text.style(style).to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// A highlighter that never emits escape sequences.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colour a command line while keeping its spacing intact.
    ///
    /// The first word of each simple command is cyan, control operators are
    /// yellow, `$` expansions green and `-flags` yellow.
    pub fn highlight_line(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len() * 2);
        let mut command_position = true;
        let mut rest = input;

        while let Some(c) = rest.chars().next() {
            if is_delimiter(c) {
                output.push(c);
                rest = &rest[c.len_utf8()..];
                continue;
            }

            if is_operator(c) {
                let len = rest.find(|ch: char| !is_operator(ch)).unwrap_or(rest.len());
                output.push_str(&paint(&rest[..len], Role::Operator));
                rest = &rest[len..];
                command_position = true;
                continue;
            }

            let len = rest
                .find(|ch: char| is_delimiter(ch) || is_operator(ch))
                .unwrap_or(rest.len());
            let word = &rest[..len];
            let styled = if command_position {
                paint(word, Role::Command)
            } else if word.starts_with('$') {
                paint(word, Role::Variable)
            } else if word.starts_with('-') {
                paint(word, Role::Flag)
            } else {
                word.to_string()
            };
            output.push_str(&styled);
            rest = &rest[len..];
            command_position = false;
        }

        output
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }
}
