#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOperator {
    Sequence, // ;
    And,      // &&
    Or,       // ||
}

impl PipelineOperator {
    /// Whether the command after this operator runs, given the last status.
    pub fn allows(self, status: i32) -> bool {
        match self {
            PipelineOperator::Sequence => true,
            PipelineOperator::And => status == 0,
            PipelineOperator::Or => status != 0,
        }
    }
}

/// Simple commands of one line in textual order, with the operators joining them.
///
/// `operators[i]` joins `commands[i]` and `commands[i + 1]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pipeline {
    commands: Vec<String>,
    operators: Vec<PipelineOperator>,
}

impl Pipeline {
    /// Split a line that already passed syntax validation.
    pub fn split(line: &str) -> Self {
        let mut commands = Vec::new();
        let mut operators = Vec::new();
        let mut current = String::new();
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            let operator = match c {
                ';' => PipelineOperator::Sequence,
                '&' if chars.peek() == Some(&'&') => {
                    chars.next(); // consume second '&'
                    PipelineOperator::And
                }
                '|' if chars.peek() == Some(&'|') => {
                    chars.next(); // consume second '|'
                    PipelineOperator::Or
                }
                _ => {
                    current.push(c);
                    continue;
                }
            };
            commands.push(std::mem::take(&mut current));
            operators.push(operator);
        }
        commands.push(current);

        Self {
            commands,
            operators,
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn operators(&self) -> &[PipelineOperator] {
        &self.operators
    }

    /// Each command paired with the operator that follows it, if any.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<PipelineOperator>)> + '_ {
        self.commands
            .iter()
            .enumerate()
            .map(|(index, command)| (command.as_str(), self.operators.get(index).copied()))
    }
}

/// Drop a trailing comment.
///
/// A `#` starts a comment at the beginning of the line or after a blank or
/// `;`; elsewhere it is part of a word.
pub fn strip_comment(line: &str) -> &str {
    let mut previous: Option<char> = None;
    for (index, c) in line.char_indices() {
        if c == '#' && previous.map_or(true, |p| matches!(p, ' ' | '\t' | ';')) {
            return &line[..index];
        }
        previous = Some(c);
    }
    line
}
