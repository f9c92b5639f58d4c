use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::option::OptionInfo;

/// One line of help output: either a registered option or free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocEntry {
    Option(String),
    Text(String),
}

/// Registration queued by an unlock handler, applied when the pass ends.
pub(crate) enum Deferred {
    Option(OptionInfo),
    Text(String),
}

/// Known options keyed by long name, plus the short alias table.
#[derive(Debug, Default)]
pub struct Registry {
    options: IndexMap<String, OptionInfo>,
    short_names: HashMap<String, String>,
    doc_entries: Vec<DocEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `option`, replacing any option with the same long name.
    ///
    /// The replaced entry (current value and callbacks included) is returned.
    /// A short alias already owned by another option is moved to this one.
    pub fn register(&mut self, option: OptionInfo) -> Option<OptionInfo> {
        let name = option.name.clone();

        if let Some(short) = &option.short_name {
            if let Some(prev) = self.short_names.insert(short.clone(), name.clone()) {
                if prev != name {
                    tracing::warn!(
                        alias = %short,
                        previous = %prev,
                        option = %name,
                        "short alias reassigned"
                    );
                }
            }
        }

        if !self.is_documented(&name) {
            self.doc_entries.push(DocEntry::Option(name.clone()));
        }

        self.options.insert(name, option)
    }

    /// Append a free-text line to the help output.
    pub fn add_doc_string(&mut self, text: impl Into<String>) {
        self.doc_entries.push(DocEntry::Text(text.into()));
    }

    pub fn get(&self, name: &str) -> Option<&OptionInfo> {
        self.options.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut OptionInfo> {
        self.options.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Long name an alias points at, if the alias is known.
    pub fn canonical_name(&self, alias: &str) -> Option<&str> {
        let name = self.short_names.get(alias)?;
        self.options.get_key_value(name).map(|(k, _)| k.as_str())
    }

    /// Look up an option by its short alias.
    pub fn resolve_short(&self, alias: &str) -> Option<&OptionInfo> {
        self.canonical_name(alias).and_then(|name| self.get(name))
    }

    /// Names registered right now, in registration order.
    ///
    /// Used as the "untouched" set at the start of a pass, so it never sees
    /// options revealed during that pass.
    pub fn snapshot(&self) -> IndexSet<String> {
        self.options.keys().cloned().collect()
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionInfo> {
        self.options.values()
    }

    pub fn doc_entries(&self) -> &[DocEntry] {
        &self.doc_entries
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn is_documented(&self, name: &str) -> bool {
        self.doc_entries
            .iter()
            .any(|e| matches!(e, DocEntry::Option(n) if n == name))
    }

    pub(crate) fn merge(&mut self, deferred: Vec<Deferred>) {
        for entry in deferred {
            match entry {
                Deferred::Option(option) => {
                    tracing::debug!(option = %option.name, "registering revealed option");
                    self.register(option);
                }
                Deferred::Text(text) => self.add_doc_string(text),
            }
        }
    }
}

/// Handle passed to unlock handlers.
///
/// Handlers can read the registry as it stood before the current commit and
/// queue new registrations. Queued options become visible at the next pass.
pub struct Reveal<'a> {
    registry: &'a Registry,
    queued: &'a mut Vec<Deferred>,
}

impl<'a> Reveal<'a> {
    pub(crate) fn new(registry: &'a Registry, queued: &'a mut Vec<Deferred>) -> Self {
        Self { registry, queued }
    }

    /// Current value of a registered option.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.registry.get(name).and_then(OptionInfo::value)
    }

    /// Whether `name` is registered or already queued in this pass.
    pub fn has_option(&self, name: &str) -> bool {
        self.registry.contains(name)
            || self
                .queued
                .iter()
                .any(|d| matches!(d, Deferred::Option(o) if o.name == name))
    }

    pub fn add_option(&mut self, option: OptionInfo) {
        self.queued.push(Deferred::Option(option));
    }

    pub fn add_doc_string(&mut self, text: impl Into<String>) {
        self.queued.push(Deferred::Text(text.into()));
    }
}
