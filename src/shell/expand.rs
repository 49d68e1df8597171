use std::borrow::Cow;

/// Values visible to `$?`, `$$` and `$NAME` substitution.
pub trait VariableLookup {
    fn last_status(&self) -> i32;
    fn process_id(&self) -> &str;
    fn variable(&self, name: &str) -> Option<&str>;
}

/// One `$...` occurrence: where it starts in the input, how many bytes it
/// spans, and what replaces it.
#[derive(Debug, PartialEq, Eq)]
struct Substitution<'v> {
    start: usize,
    len: usize,
    value: Cow<'v, str>,
}

/// Expand `$?`, `$$` and `$NAME` in one simple command.
///
/// Unset variables expand to nothing; a `$` that starts none of the three
/// forms is kept literally. Input without any substitution is returned
/// borrowed.
pub fn substitute<'a, V: VariableLookup>(input: &'a str, vars: &V) -> Cow<'a, str> {
    if !input.contains('$') {
        return Cow::Borrowed(input);
    }

    let records = collect(input, vars);
    if records.is_empty() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(assemble(input, &records))
}

fn collect<'v, V: VariableLookup>(input: &str, vars: &'v V) -> Vec<Substitution<'v>> {
    let bytes = input.as_bytes();
    let mut records = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] != b'$' {
            index += 1;
            continue;
        }

        match bytes.get(index + 1) {
            Some(b'?') => {
                records.push(Substitution {
                    start: index,
                    len: 2,
                    value: Cow::Owned(vars.last_status().to_string()),
                });
                index += 2;
            }
            Some(b'$') => {
                records.push(Substitution {
                    start: index,
                    len: 2,
                    value: Cow::Borrowed(vars.process_id()),
                });
                index += 2;
            }
            Some(&b) if b.is_ascii_alphabetic() || b == b'_' => {
                let name_len = bytes[index + 1..]
                    .iter()
                    .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
                    .count();
                let name = &input[index + 1..index + 1 + name_len];
                records.push(Substitution {
                    start: index,
                    len: name_len + 1,
                    value: Cow::Borrowed(vars.variable(name).unwrap_or("")),
                });
                index += name_len + 1;
            }
            _ => index += 1,
        }
    }

    records
}

fn assemble(input: &str, records: &[Substitution<'_>]) -> String {
    let replaced: usize = records.iter().map(|r| r.len).sum();
    let inserted: usize = records.iter().map(|r| r.value.len()).sum();
    let mut output = String::with_capacity(input.len() - replaced + inserted);

    let mut cursor = 0;
    for record in records {
        output.push_str(&input[cursor..record.start]);
        output.push_str(&record.value);
        cursor = record.start + record.len;
    }
    output.push_str(&input[cursor..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Vars {
        status: i32,
        pid: String,
        vars: Vec<(&'static str, &'static str)>,
    }

    impl VariableLookup for Vars {
        fn last_status(&self) -> i32 {
            self.status
        }

        fn process_id(&self) -> &str {
            &self.pid
        }

        fn variable(&self, name: &str) -> Option<&str> {
            self.vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
        }
    }

    fn vars() -> Vars {
        Vars {
            status: 127,
            pid: "4242".to_string(),
            vars: vec![("HOME", "/home/hsh"), ("_X1y", "under"), ("EMPTY", "")],
        }
    }

    #[rstest]
    #[case("echo $?", "echo 127")]
    #[case("echo $$", "echo 4242")]
    #[case("cd $HOME/src", "cd /home/hsh/src")]
    #[case("echo $UNSET_VARIABLE end", "echo  end")]
    #[case("echo $EMPTY.", "echo .")]
    #[case("echo $_X1y-z", "echo under-z")]
    #[case("echo $", "echo $")]
    #[case("echo $ x", "echo $ x")]
    #[case("echo $1", "echo $1")]
    #[case("echo ${HOME}", "echo ${HOME}")]
    #[case("echo $$$", "echo 4242$")]
    #[case("$?$?", "127127")]
    #[case("a$HOME$?b", "a/home/hsh127b")]
    fn test_substitute(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(substitute(input, &vars()), expected);
    }

    #[rstest]
    #[case("ls -l /tmp")]
    #[case("echo cost 5$")]
    #[case("")]
    fn test_lines_without_substitution_are_borrowed(#[case] input: &str) {
        let vars = vars();
        let result = substitute(input, &vars);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, input);
    }

    #[test]
    fn test_output_length_is_literals_plus_values() {
        let input = "x$HOME y $? z";
        let vars = vars();
        let result = substitute(input, &vars);
        let literal = input.len() - "$HOME".len() - "$?".len();
        assert_eq!(result.len(), literal + "/home/hsh".len() + "127".len());
    }

    #[test]
    fn test_multibyte_text_around_variables() {
        assert_eq!(substitute("é$HOMEü", &vars()), "é/home/hshü");
    }
}
