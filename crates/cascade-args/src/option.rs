use std::fmt;

use crate::registry::Reveal;

/// Validator run on every commit attempt. Returning `false` rejects the value.
pub type SetValueCallback = Box<dyn FnMut(&str) -> bool>;

/// Handler run after a successful commit.
///
/// Returning `true` means the handler revealed new options: it is removed from
/// the option and the parser schedules another pass. Returning `false` keeps it
/// around for later commits.
pub type UnlockCallback = Box<dyn FnMut(&str, &mut Reveal<'_>) -> bool>;

/// A named option with a default, a current value, and its commit callbacks.
///
/// Values are kept in their string form; typed interpretation happens inside
/// the validators registered with [`OptionInfo::on_set`].
pub struct OptionInfo {
    pub(crate) name: String,
    pub(crate) short_name: Option<String>,
    pub(crate) description: String,
    pub(crate) enum_values: Vec<String>,
    pub(crate) default_value: String,
    pub(crate) current_value: Option<String>,
    pub(crate) set_value_callbacks: Vec<SetValueCallback>,
    pub(crate) unlock_callbacks: Vec<UnlockCallback>,
}

fn strip_long(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix("--").unwrap_or(trimmed).to_string()
}

fn strip_short(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix('-').unwrap_or(trimmed).to_string()
}

impl OptionInfo {
    /// Create an option with the given long name (`"verbose"` or `"--verbose"`).
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: strip_long(name.as_ref()),
            short_name: None,
            description: String::new(),
            enum_values: Vec::new(),
            default_value: String::new(),
            current_value: None,
            set_value_callbacks: Vec::new(),
            unlock_callbacks: Vec::new(),
        }
    }

    /// Set the short alias (`"v"` or `"-v"`). An empty alias clears it.
    pub fn short(mut self, alias: impl AsRef<str>) -> Self {
        let alias = strip_short(alias.as_ref());
        self.short_name = if alias.is_empty() { None } else { Some(alias) };
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Value committed when a pass leaves the option untouched.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Allowed values, shown in help output.
    ///
    /// This is a hint only; enforce it with a validator if needed.
    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Append a validator. Validators run in registration order on every commit.
    pub fn on_set<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str) -> bool + 'static,
    {
        self.set_value_callbacks.push(Box::new(callback));
        self
    }

    /// Append an unlock handler. See [`UnlockCallback`].
    pub fn on_unlock<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, &mut Reveal<'_>) -> bool + 'static,
    {
        self.unlock_callbacks.push(Box::new(callback));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn help(&self) -> &str {
        &self.description
    }

    pub fn enum_choices(&self) -> &[String] {
        &self.enum_values
    }

    pub fn default_string(&self) -> &str {
        &self.default_value
    }

    /// The last successfully committed value, if any commit has happened yet.
    pub fn value(&self) -> Option<&str> {
        self.current_value.as_deref()
    }

    /// Number of unlock handlers that have not been consumed yet.
    pub fn pending_unlocks(&self) -> usize {
        self.unlock_callbacks.len()
    }
}

impl fmt::Debug for OptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionInfo")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .field("description", &self.description)
            .field("enum_values", &self.enum_values)
            .field("default_value", &self.default_value)
            .field("current_value", &self.current_value)
            .field("set_value_callbacks", &self.set_value_callbacks.len())
            .field("unlock_callbacks", &self.unlock_callbacks.len())
            .finish()
    }
}

/// Resolve `input` against `choices`.
///
/// An exact match wins. Otherwise `input` must be a substring of exactly one
/// choice; ambiguous or missing matches return `None`.
pub fn find_best_match<'a, S: AsRef<str>>(input: &str, choices: &'a [S]) -> Option<&'a str> {
    if let Some(exact) = choices.iter().find(|c| c.as_ref() == input) {
        return Some(exact.as_ref());
    }

    let mut found: Option<&'a str> = None;
    for choice in choices {
        let choice = choice.as_ref();
        if choice.contains(input) {
            if found.is_some() {
                return None;
            }
            found = Some(choice);
        }
    }
    found
}
