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

//! Grouped YAML document format.
//!
//! The document bundles hosts into named groups with shared defaults:
//!
//! ```yaml
//! global:
//!   ForwardAgent: "yes"
//! default:
//!   Port: "22"
//! Group Web:
//!   Prefix: web-
//!   Common:
//!     User: deploy
//!   Hosts:
//!     frontend:
//!       Notes: edge box
//!       Config:
//!         HostName: 10.0.0.1
//! ```
//!
//! Parsing flattens this against the canonical model, filling each host's
//! missing keys from the group `Common` map and then from the top-level
//! `default` map. A host's own value is never overwritten.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{global_entries, normal_entries, sorted_map, HostEntry, GLOBAL_HOST_NAME};

/// Host body as it appears under a group's `Hosts` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YamlHost {
    #[serde(rename = "Notes", default, skip_serializing_if = "String::is_empty")]
    pub notes: String,

    // `config` accepted on input for compatibility with lenient emitters.
    #[serde(
        rename = "Config",
        alias = "config",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub config: BTreeMap<String, String>,
}

/// One `Group <label>` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Optional name prefix carried onto each member's `group_prefix`.
    /// Never applied to host names.
    #[serde(rename = "Prefix", default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    /// Options applied to every host in the group unless the host sets them.
    #[serde(rename = "Common", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub common: BTreeMap<String, String>,

    #[serde(rename = "Hosts", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hosts: BTreeMap<String, YamlHost>,
}

/// Top-level parsed shape of the grouped document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YamlDocument {
    #[serde(rename = "global", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub global: BTreeMap<String, String>,

    #[serde(rename = "default", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default: BTreeMap<String, String>,

    /// Every remaining top-level key is a group label.
    #[serde(flatten)]
    pub groups: BTreeMap<String, GroupConfig>,
}

impl YamlDocument {
    /// True when the document carries no recognizable section at all.
    /// Used by format detection to reject prose that merely parses.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.default.is_empty() && self.groups.is_empty()
    }
}

/// Parse a grouped YAML document into canonical host entries.
///
/// The `global` map becomes the leading `*` entry. Groups are visited in
/// ascending label order; hosts inherit absent keys from `Common`, then from
/// `default`.
pub fn parse_yaml(input: &str) -> Result<Vec<HostEntry>> {
    let doc: YamlDocument =
        serde_yaml::from_str(input).context("not a recognizable grouped YAML document")?;
    Ok(flatten_document(doc))
}

fn flatten_document(doc: YamlDocument) -> Vec<HostEntry> {
    let mut entries = Vec::new();

    if !doc.global.is_empty() {
        let mut global = HostEntry::new(GLOBAL_HOST_NAME);
        global.options.extend(doc.global);
        entries.push(global);
    }

    // BTreeMap iteration gives ascending group labels.
    for (label, group) in &doc.groups {
        for (host_name, host) in &group.hosts {
            let mut entry = HostEntry::new(host_name.clone());
            entry.notes = host.notes.clone();
            entry
                .options
                .extend(host.config.iter().map(|(k, v)| (k.clone(), v.clone())));

            // Host value wins over Common, Common over default.
            for (key, value) in &group.common {
                entry
                    .options
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
            for (key, value) in &doc.default {
                entry
                    .options
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }

            if !group.prefix.is_empty() {
                entry.group_prefix = Some(group.prefix.clone());
            }

            tracing::trace!("flattened host {host_name} from group {label}");
            entries.push(entry);
        }
    }

    entries
}

/// Serialize canonical entries as a grouped YAML document.
///
/// All `*` entries union into `global` (later entries win per key). Every
/// other entry becomes its own single-host `Group <name>` with its options
/// verbatim; the merge is not re-applied on the way out.
pub fn serialize_yaml(entries: &[HostEntry]) -> Vec<u8> {
    let mut doc = YamlDocument::default();

    for entry in global_entries(entries) {
        for (key, value) in &entry.options {
            doc.global.insert(key.clone(), value.clone());
        }
    }

    for entry in normal_entries(entries) {
        let host = YamlHost {
            notes: entry.notes.clone(),
            config: sorted_map(&entry.options),
        };

        let mut group = GroupConfig::default();
        if let Some(prefix) = &entry.group_prefix {
            group.prefix = prefix.clone();
        }
        group.hosts.insert(entry.name.clone(), host);

        doc.groups.insert(format!("Group {}", entry.name), group);
    }

    match serde_yaml::to_string(&doc) {
        Ok(rendered) => rendered.into_bytes(),
        Err(err) => {
            tracing::warn!("failed to render YAML output: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_only() {
        let input = "global:\n  user: globaluser\n  port: \"22\"\n";
        let entries = parse_yaml(input).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "*");
        assert_eq!(entries[0].options["user"], "globaluser");
        assert_eq!(entries[0].options["port"], "22");
    }

    #[test]
    fn test_parse_merge_precedence() {
        let input = "\
default:
  A: \"1\"
  D: \"4\"
Group servers:
  Common:
    A: \"2\"
    B: \"3\"
  Hosts:
    web:
      Config:
        A: \"9\"
";
        let entries = parse_yaml(input).unwrap();

        assert_eq!(entries.len(), 1);
        let web = &entries[0];
        assert_eq!(web.name, "web");
        // Host wins over Common and default.
        assert_eq!(web.options["A"], "9");
        // Common fills the gap and beats default.
        assert_eq!(web.options["B"], "3");
        // default fills what nothing else set.
        assert_eq!(web.options["D"], "4");
    }

    #[test]
    fn test_parse_groups_in_label_order() {
        let input = "\
Group zeta:
  Hosts:
    z1:
      Config:
        Port: \"1\"
Group alpha:
  Hosts:
    a1:
      Config:
        Port: \"2\"
";
        let entries = parse_yaml(input).unwrap();

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "z1"]);
    }

    #[test]
    fn test_parse_carries_prefix_without_renaming() {
        let input = "\
Group Public:
  Prefix: public-
  Hosts:
    server1:
      Notes: your notes here
      Config:
        HostName: 123.123.123.123
";
        let entries = parse_yaml(input).unwrap();

        assert_eq!(entries[0].name, "server1");
        assert_eq!(entries[0].group_prefix.as_deref(), Some("public-"));
        assert_eq!(entries[0].notes, "your notes here");
    }

    #[test]
    fn test_parse_accepts_lowercase_config_key() {
        let input = "Group g:\n  Hosts:\n    h:\n      config:\n        Port: \"22\"\n";
        let entries = parse_yaml(input).unwrap();

        assert_eq!(entries[0].options["Port"], "22");
    }

    #[test]
    fn test_parse_rejects_malformed_yaml() {
        assert!(parse_yaml("Group g:\n  Hosts: [not a mapping").is_err());
        assert!(parse_yaml("just some prose").is_err());
    }

    #[test]
    fn test_serialize_wildcard_union_into_global() {
        let mut first = HostEntry::new("*");
        first.options.insert("A".to_string(), "1".to_string());
        first.options.insert("B".to_string(), "1".to_string());
        let mut second = HostEntry::new("*");
        second.options.insert("B".to_string(), "2".to_string());

        let rendered = String::from_utf8(serialize_yaml(&[first, second])).unwrap();
        let doc: YamlDocument = serde_yaml::from_str(&rendered).unwrap();

        assert_eq!(doc.global["A"], "1");
        // Later wildcard entries overwrite earlier ones per key.
        assert_eq!(doc.global["B"], "2");
        assert!(doc.groups.is_empty());
    }

    #[test]
    fn test_serialize_one_group_per_host() {
        let mut entry = HostEntry::new("host1");
        entry.notes = "note1".to_string();
        entry.options.insert("key1".to_string(), "value1".to_string());

        let rendered = String::from_utf8(serialize_yaml(&[entry])).unwrap();
        let doc: YamlDocument = serde_yaml::from_str(&rendered).unwrap();

        let group = &doc.groups["Group host1"];
        let host = &group.hosts["host1"];
        assert_eq!(host.notes, "note1");
        assert_eq!(host.config["key1"], "value1");
    }

    #[test]
    fn test_serialize_round_trips_prefix() {
        let mut entry = HostEntry::new("server1");
        entry.group_prefix = Some("public-".to_string());
        entry.options.insert("Port".to_string(), "22".to_string());

        let rendered = String::from_utf8(serialize_yaml(&[entry])).unwrap();
        let reparsed = parse_yaml(&rendered).unwrap();

        assert_eq!(reparsed[0].group_prefix.as_deref(), Some("public-"));
        assert_eq!(reparsed[0].name, "server1");
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let mut entry = HostEntry::new("h");
        for key in ["Zeta", "Alpha", "Mid"] {
            entry.options.insert(key.to_string(), "v".to_string());
        }
        let entries = vec![entry];

        assert_eq!(serialize_yaml(&entries), serialize_yaml(&entries));
    }

    #[test]
    fn test_empty_document_is_empty() {
        let doc: YamlDocument = serde_yaml::from_str("{}").unwrap();
        assert!(doc.is_empty());
    }
}
