use super::tokenizer::is_delimiter;

/// Status recorded when a line is rejected by [`validate`].
pub const SYNTAX_ERROR_STATUS: i32 = 2;

/// Malformed control-operator placement.
///
/// `position` is the 1-based character position of the offending operator
/// character; `token` is the operator text reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Syntax error: \"{token}\" unexpected")]
pub struct SyntaxError {
    pub token: &'static str,
    pub position: usize,
}

#[derive(Debug, Clone, Copy)]
enum Previous {
    Word,
    Operator { ch: char, start: usize, run: usize },
}

pub fn is_operator(c: char) -> bool {
    matches!(c, ';' | '&' | '|')
}

/// Check operator placement for a whole line before any of it runs.
///
/// Accepted operators are `;`, `&&` and `||`, each with a command on both
/// sides.
pub fn validate(line: &str) -> Result<(), SyntaxError> {
    let chars: Vec<char> = line.chars().collect();
    let mut previous: Option<Previous> = None;

    for (index, &c) in chars.iter().enumerate() {
        if is_delimiter(c) {
            continue;
        }

        if !is_operator(c) {
            // A lone `&` or `|` followed by a word.
            if let Some(Previous::Operator { ch, start, run: 1 }) = previous {
                if ch != ';' {
                    return Err(error_at(&chars, start));
                }
            }
            previous = Some(Previous::Word);
            continue;
        }

        previous = match previous {
            None => return Err(error_at(&chars, index)),
            Some(Previous::Word) => Some(Previous::Operator {
                ch: c,
                start: index,
                run: 1,
            }),
            Some(Previous::Operator { ch, start, run }) => {
                let adjacent = index == start + run;
                if c == ch && c != ';' && run == 1 && adjacent {
                    Some(Previous::Operator { ch, start, run: 2 })
                } else {
                    return Err(error_at(&chars, index));
                }
            }
        };
    }

    match previous {
        Some(Previous::Operator { start, .. }) => Err(error_at(&chars, start)),
        _ => Ok(()),
    }
}

fn error_at(chars: &[char], index: usize) -> SyntaxError {
    let error = SyntaxError {
        token: token_at(chars, index),
        position: index + 1,
    };
    tracing::debug!(token = error.token, position = error.position, "syntax error");
    error
}

fn token_at(chars: &[char], index: usize) -> &'static str {
    let previous = index.checked_sub(1).and_then(|i| chars.get(i)).copied();
    let next = chars.get(index + 1).copied();

    match chars.get(index) {
        Some(';') if previous == Some(';') || next == Some(';') => ";;",
        Some(';') => ";",
        Some('&') if next == Some('&') => "&&",
        Some('&') => "&",
        Some('|') if next == Some('|') => "||",
        _ => "|",
    }
}
