use super::EnvError;
use std::env;

/// The session's own copy of the environment.
///
/// Insertion order is kept so `env` lists variables the way they were
/// inherited and added. Changes here never touch the process environment;
/// children receive a snapshot through [`EnvVarManager::iter`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvVarManager {
    vars: Vec<(Box<str>, Box<str>)>,
}

impl EnvVarManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the inherited process environment.
    ///
    /// Names or values that are not valid UTF-8 are converted lossily.
    pub fn from_process() -> Self {
        env::vars_os()
            .map(|(name, value)| {
                (
                    name.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() || name.contains('=') || name.contains('\0') {
            return Err(EnvError::InvalidName(name.to_string()));
        }
        if value.contains('\0') {
            return Err(EnvError::InvalidValue("NUL byte in value"));
        }

        match self.vars.iter_mut().find(|(key, _)| key.as_ref() == name) {
            Some((_, existing)) => *existing = value.into(),
            None => self.vars.push((name.into(), value.into())),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value.as_ref())
    }

    pub fn remove(&mut self, name: &str) -> Result<(), EnvError> {
        let index = self
            .vars
            .iter()
            .position(|(key, _)| key.as_ref() == name)
            .ok_or_else(|| EnvError::VarNotFound(name.to_string()))?;
        self.vars.remove(index);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.vars
            .iter()
            .map(|(name, value)| (name.as_ref(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for EnvVarManager {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut manager = Self::new();
        for (name, value) in iter {
            // Entries the shell could never pass to a child are dropped.
            if manager.set(name.as_ref(), value.as_ref()).is_err() {
                tracing::trace!(name = name.as_ref(), "skipping unusable variable");
            }
        }
        manager
    }
}
