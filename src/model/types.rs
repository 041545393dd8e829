// Copyright 2025 Lablup Inc. and Jeongkyu Shin
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

//! Canonical model type definitions.

use std::collections::HashMap;

/// Name of the wildcard block whose options apply to every host.
pub const GLOBAL_HOST_NAME: &str = "*";

/// One SSH host stanza in the format-agnostic model.
///
/// Every parser produces a list of these and every serializer consumes one;
/// nothing is retained between conversions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEntry {
    /// Host identifier. The literal `*` denotes the global/wildcard block.
    pub name: String,

    /// Free-text annotation. Comes from leading `#` comments in text form and
    /// from the explicit `Notes` field in YAML/JSON. Empty means none.
    pub notes: String,

    /// Directive name -> value. Keys are unique within an entry; values are
    /// opaque strings (no semantic validation).
    pub options: HashMap<String, String>,

    /// `Prefix` attribute of the YAML group this entry came from.
    /// Informational only; it is never applied to `name`.
    pub group_prefix: Option<String>,
}

impl HostEntry {
    /// Create an empty entry for the given host name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether this entry is the global/wildcard block.
    pub fn is_global(&self) -> bool {
        self.name == GLOBAL_HOST_NAME
    }
}

/// All entries named `*`, in input order.
pub fn global_entries(entries: &[HostEntry]) -> Vec<&HostEntry> {
    entries.iter().filter(|e| e.is_global()).collect()
}

/// All entries not named `*`, in input order.
pub fn normal_entries(entries: &[HostEntry]) -> Vec<&HostEntry> {
    entries.iter().filter(|e| !e.is_global()).collect()
}
