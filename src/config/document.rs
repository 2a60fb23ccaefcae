//! In-memory model and text format of the renderer configuration.
//!
//! The file is a flat list of sections:
//!
//! ```text
//! - blur
//! blur: true
//! blur amount: 2.5
//!
//! - rendering
//! quality: 23
//! ```
//!
//! Parsing is lenient: lines that are neither a section header nor a
//! `key: value` entry inside a section are dropped, never reported.

use std::fmt::Write as _;
use tracing::trace;

/// Section header marker.
const SECTION_MARKER: char = '-';

/// Comment marker.
const COMMENT_MARKER: char = '#';

/// Key/value separator.
const ENTRY_SEPARATOR: char = ':';

/// A named group of `key: value` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a value. Existing keys keep their position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove a key, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered mapping of section name to section entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    sections: Vec<Section>,
}

impl Configuration {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration text. Never fails.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::new();
        let mut current: Option<usize> = None;

        for (line_num, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }

            if let Some(rest) = line.strip_prefix(SECTION_MARKER) {
                // A repeated header starts the section over in its first position.
                let idx = config.section_index_or_insert(rest.trim());
                config.sections[idx].entries.clear();
                current = Some(idx);
                continue;
            }

            match (current, line.split_once(ENTRY_SEPARATOR)) {
                (Some(idx), Some((key, value))) => {
                    config.sections[idx].set(key.trim(), value.trim());
                }
                _ => trace!("Skipping unrecognized config line {}: {raw:?}", line_num + 1),
            }
        }

        config
    }

    /// Serialize to the on-disk text format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            let _ = writeln!(out, "{SECTION_MARKER} {}", section.name);
            for (key, value) in section.entries() {
                let _ = writeln!(out, "{key}{ENTRY_SEPARATOR} {value}");
            }
            out.push('\n');
        }
        out
    }

    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Look up a value.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Insert or replace a value, creating the section if needed.
    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        let idx = self.section_index_or_insert(section);
        self.sections[idx].set(key, value);
    }

    /// Remove a value, returning it. Empty sections are kept.
    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        self.sections
            .iter_mut()
            .find(|s| s.name == section)
            .and_then(|s| s.remove(key))
    }

    /// Sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Whether there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return idx;
        }
        self.sections.push(Section::new(name));
        self.sections.len() - 1
    }
}
