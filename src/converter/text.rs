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

//! Native `ssh_config` text format.
//!
//! Parses and emits the `Host <name>` block syntax OpenSSH itself reads.
//! Leading `#` comment blocks are treated as free-text notes on the host
//! that follows them.

use std::fmt::Write as _;

use crate::model::{directives, global_entries, normal_entries, ordered_keys, HostEntry};

/// Keyword that opens a host block. Case-sensitive, as in OpenSSH output.
const HOST_KEYWORD: &str = "Host ";

/// Indentation for directive lines inside a block.
const INDENT: &str = "    ";

/// Parse `ssh_config` text into canonical host entries.
///
/// Entries keep the order their `Host` lines appeared in; duplicate names are
/// not collapsed. Directive lines before the first `Host` line have nothing
/// to attach to and are dropped.
pub fn parse_text(input: &str) -> Vec<HostEntry> {
    let mut entries: Vec<HostEntry> = Vec::new();
    let mut pending_notes: Vec<String> = Vec::new();

    for raw in input.lines() {
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            pending_notes.push(comment.trim().to_string());
            continue;
        }

        if let Some(name) = line.strip_prefix(HOST_KEYWORD) {
            let mut entry = HostEntry::new(name.trim());
            entry.notes = pending_notes.join("\n");
            pending_notes.clear();
            entries.push(entry);
            continue;
        }

        let Some(current) = entries.last_mut() else {
            tracing::debug!("ignoring directive before the first Host block: {line}");
            continue;
        };

        match split_directive(line) {
            Some((key, value)) => {
                current.options.insert(normalize_key(key), value.to_string());
            }
            None => {
                tracing::debug!("skipping malformed directive line: {line}");
            }
        }
    }

    entries
}

/// Split a directive line into key and value at the first whitespace run.
/// Lines without a value are malformed and yield `None`.
fn split_directive(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(|c: char| c.is_whitespace())?;
    let value = rest.trim();
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Fold a directive key through the registry: known directives take their
/// canonical spelling, unknown ones keep the input casing.
fn normalize_key(key: &str) -> String {
    match directives::canonical_name(key) {
        Some(canonical) => canonical.to_string(),
        None => {
            tracing::debug!("unknown directive key: {key}");
            key.to_string()
        }
    }
}

/// Serialize canonical entries back to `ssh_config` text.
///
/// Global (`*`) blocks come first, then normal hosts in input order. Option
/// keys are emitted in ascending order within each block.
pub fn serialize_text(entries: &[HostEntry]) -> Vec<u8> {
    let mut out = String::new();

    let globals = global_entries(entries);
    let normals = normal_entries(entries);
    let needs_separator = !globals.is_empty() && !normals.is_empty();

    for entry in globals {
        write_block(&mut out, entry);
    }

    if needs_separator {
        out.push('\n');
    }

    for entry in normals {
        write_block(&mut out, entry);
        out.push('\n');
    }

    out.into_bytes()
}

fn write_block(out: &mut String, entry: &HostEntry) {
    for note in entry.notes.lines() {
        if note.is_empty() {
            out.push_str("#\n");
        } else {
            let _ = writeln!(out, "# {note}");
        }
    }

    let _ = writeln!(out, "Host {}", entry.name);

    for key in ordered_keys(&entry.options) {
        let _ = writeln!(out, "{INDENT}{key} {}", entry.options[&key]);
    }
}
