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

//! Flat JSON format: an array of `{Name, Notes, Data}` records.
//!
//! The simplest of the three mappings. JSON carries no group or default
//! concept, so records translate one-to-one with canonical entries.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{sorted_map, HostEntry};

/// One host record on the JSON wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonHost {
    #[serde(rename = "Name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "Notes", default, skip_serializing_if = "String::is_empty")]
    pub notes: String,

    #[serde(rename = "Data", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

/// Parse a JSON array of host records into canonical entries, in order.
pub fn parse_json(input: &str) -> Result<Vec<HostEntry>> {
    let records: Vec<JsonHost> =
        serde_json::from_str(input).context("not a JSON array of host records")?;

    Ok(records
        .into_iter()
        .map(|record| {
            let mut entry = HostEntry::new(record.name);
            entry.notes = record.notes;
            entry.options.extend(record.data);
            entry
        })
        .collect())
}

/// Serialize canonical entries as a compact JSON array, entries in the order
/// given and `Data` keys ascending. Empty fields are omitted.
pub fn serialize_json(entries: &[HostEntry]) -> Vec<u8> {
    let records: Vec<JsonHost> = entries
        .iter()
        .map(|entry| JsonHost {
            name: entry.name.clone(),
            notes: entry.notes.clone(),
            data: sorted_map(&entry.options),
        })
        .collect();

    match serde_json::to_vec(&records) {
        Ok(rendered) => rendered,
        Err(err) => {
            tracing::warn!("failed to render JSON output: {err}");
            Vec::new()
        }
    }
}
