// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/parser.rs
//!
//! Binding table parser for keydefaults.lua files
//!
//! The key files are Lua source, but the slice of Lua they actually use is
//! tiny: flat `name = { action = "Combo", ... }` tables of string pairs.
//! This parser deliberately understands only that slice:
//!
//! - no nested tables (a nested `{` truncates the body at the first `}`)
//! - no expressions, only quoted string values
//! - no comment awareness (a commented-out pair still parses)
//!
//! Anything not matching the expected shape is silently skipped. The
//! tolerance is intentional: these files are hand-edited and copied between
//! game installs, and a partial read beats no read.

use regex::Regex;
use std::sync::LazyLock;

/// Matches one flat `name = { ... }` table region. The body is non-greedy,
/// so it ends at the first closing brace.
pub(crate) static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(?P<name>\w+)\s*=\s*\{(?P<body>.*?)\}")
        .expect("table regex is valid")
});

/// Matches one `key = "value"` pair inside a table body.
static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<key>\w+)\s*=\s*"(?P<val>.*?)"\s*,?"#)
        .expect("pair regex is valid")
});

/// One named binding table: action-name to combo-string.
///
/// Action keys are unique case-insensitively; the stored casing is the
/// first occurrence's, the stored value the last occurrence's.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BindingTable {
    name: String,
    entries: Vec<(String, String)>,
}

impl BindingTable {
    /// Table name with its original casing.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive lookup of an action's combo string.
    pub fn get(&self, action: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(action))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates (action, combo-string) pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last-write-wins upsert, case-insensitive on the key.
    fn upsert(&mut self, key: &str, value: &str) {
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }
}

/// All binding tables found in one file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BindingSet {
    tables: Vec<BindingTable>,
}

impl BindingSet {
    /// Iterates tables in file order.
    pub fn tables(&self) -> impl Iterator<Item = &BindingTable> {
        self.tables.iter()
    }

    /// Case-insensitive table lookup.
    pub fn table(&self, name: &str) -> Option<&BindingTable> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// A later table with the same name replaces the earlier one wholesale,
    /// keeping the earlier position and name casing.
    fn upsert_table(&mut self, table: BindingTable) {
        match self
            .tables
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(&table.name))
        {
            Some(existing) => existing.entries = table.entries,
            None => self.tables.push(table),
        }
    }
}

/// Extracts all named tables and their string pairs from raw file text.
///
/// Never fails: unparseable regions are skipped, an input with no tables
/// yields an empty set.
pub fn parse(text: &str) -> BindingSet {
    let mut set = BindingSet::default();

    for caps in TABLE_RE.captures_iter(text) {
        let mut table = BindingTable {
            name: caps["name"].to_string(),
            entries: Vec::new(),
        };
        for pair in PAIR_RE.captures_iter(&caps["body"]) {
            table.upsert(&pair["key"], &pair["val"]);
        }
        set.upsert_table(table);
    }

    set
}
