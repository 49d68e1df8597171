use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<&'static str, Flag>,
    positionals: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn new(short: &'static str, long: &'static str, description: &'static str) -> Self {
        Self {
            short,
            long,
            description,
            takes_value: false,
            value: None,
        }
    }

    fn with_value(mut self) -> Self {
        self.takes_value = true;
        self
    }

    fn matches(&self, arg: &str) -> bool {
        arg == self.short || arg == self.long
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();
        flags.insert("help", Flag::new("-h", "--help", "Print this help message"));
        flags.insert(
            "version",
            Flag::new("-v", "--version", "Show version information"),
        );
        flags.insert(
            "config",
            Flag::new("-c", "--config", "Source this rc file instead of ~/.hshrc").with_value(),
        );
        flags.insert("quiet", Flag::new("-q", "--quiet", "Suppress warnings"));
        flags.insert(
            "debug",
            Flag::new("-d", "--debug", "Enable debug output on stderr"),
        );

        Flags {
            flags,
            positionals: Vec::new(),
        }
    }

    /// Parse the arguments after the program name.
    ///
    /// Flags must come before the first positional argument; `--` ends
    /// flag parsing.
    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--" {
                self.positionals.extend(iter.cloned());
                break;
            }
            if !arg.starts_with('-') || arg == "-" {
                self.positionals.push(arg.clone());
                self.positionals.extend(iter.cloned());
                break;
            }

            let flag = self
                .flags
                .values_mut()
                .find(|flag| flag.matches(arg))
                .ok_or_else(|| ShellError::FlagError(format!("Illegal option {arg}")))?;

            flag.value = if flag.takes_value {
                let value = iter.next().ok_or_else(|| {
                    ShellError::FlagError(format!("Flag {arg} requires a value"))
                })?;
                Some(value.clone())
            } else {
                Some("true".to_string())
            };
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get_value(name).is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn usage(&self) -> String {
        let mut text = String::from("Usage: hsh [OPTIONS] [SCRIPT]\n\nOptions:\n");
        for flag in self.flags.values() {
            let long = if flag.takes_value {
                format!("{} <PATH>", flag.long)
            } else {
                flag.long.to_string()
            };
            text.push_str(&format!("  {}, {:<17} {}\n", flag.short, long, flag.description));
        }
        text
    }

    pub fn print_help(&self) {
        print!("{}", self.usage());
    }
}
