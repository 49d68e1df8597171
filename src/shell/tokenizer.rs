/// Characters that separate shell words: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Split one simple command into its argument vector.
///
/// No quoting or escaping is interpreted; an all-delimiter command yields an
/// empty vector.
pub fn tokenize(command: &str) -> Vec<String> {
    command
        .split(is_delimiter)
        .filter(|word| !word.is_empty())
        .map(String::from)
        .collect()
}
