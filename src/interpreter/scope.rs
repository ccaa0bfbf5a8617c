use std::fmt::Display;

use rustc_hash::FxHashMap;

/// The single namespace of a program run: variable name to last assigned
/// value. Entries are only ever added or overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalScope {
    variables: FxHashMap<String, i64>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.variables.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Stores `value` under `name`, returning the value it replaced.
    pub fn assign(&mut self, name: &str, value: i64) -> Option<i64> {
        if let Some(slot) = self.variables.get_mut(name) {
            return Some(std::mem::replace(slot, value));
        }
        self.variables.insert(name.to_string(), value);
        None
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.variables
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    /// Variables ordered by name.
    pub fn sorted(&self) -> Vec<(&str, i64)> {
        let mut variables: Vec<_> = self.iter().collect();
        variables.sort_unstable_by_key(|(name, _)| *name);
        variables
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for GlobalScope {
    fn from_iter<T: IntoIterator<Item = (S, i64)>>(iter: T) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// Renders the scope as a two column table sorted by name.
impl Display for GlobalScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variables = self.sorted();
        let name_width = variables
            .iter()
            .map(|(name, _)| name.len())
            .chain(std::iter::once("name".len()))
            .max()
            .unwrap_or_default();
        let value_width = variables
            .iter()
            .map(|(_, value)| value.to_string().len())
            .chain(std::iter::once("value".len()))
            .max()
            .unwrap_or_default();

        writeln!(f, "{:<name_width$} | {:>value_width$}", "name", "value")?;
        writeln!(f, "{:-<name_width$}-+-{:->value_width$}", "", "")?;
        for (name, value) in variables {
            writeln!(f, "{:<name_width$} | {:>value_width$}", name, value)?;
        }
        Ok(())
    }
}
