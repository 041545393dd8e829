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

//! Format detection and conversion dispatch.
//!
//! The whole engine is a pure function of its input: raw string in, detected
//! format, canonical model, requested serializer, bytes out. No state is
//! kept between calls.

mod json;
mod text;
mod yaml;

pub use json::{parse_json, serialize_json, JsonHost};
pub use text::{parse_text, serialize_text};
pub use yaml::{parse_yaml, serialize_yaml, GroupConfig, YamlDocument, YamlHost};

use std::fmt;

/// Input format classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Text,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Text => "TEXT",
        };
        f.write_str(name)
    }
}

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Yaml,
    Ssh,
    Json,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Yaml => "YAML",
            Target::Ssh => "SSH",
            Target::Json => "JSON",
        };
        f.write_str(name)
    }
}

/// Classify raw input as JSON, YAML, or plain `ssh_config` text.
///
/// JSON is tried strictly before YAML: JSON is a syntactic subset many YAML
/// parsers also accept, so the order is the tie-break. A document that parses
/// as YAML but contains none of the recognized top-level sections is treated
/// as text, so prose never misclassifies.
pub fn detect_format(input: &str) -> Format {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Format::Text;
    }

    if serde_json::from_str::<Vec<JsonHost>>(trimmed).is_ok() {
        return Format::Json;
    }

    match serde_yaml::from_str::<YamlDocument>(trimmed) {
        Ok(doc) if !doc.is_empty() => Format::Yaml,
        _ => Format::Text,
    }
}

/// Convert raw input of a known format into the requested target format.
///
/// Structured inputs that fail to parse degrade to zero entries with a
/// warning; the output is then the target format's empty document. Trailing
/// newlines are trimmed from the final buffer.
pub fn convert(format: Format, input: &str, target: Target) -> Vec<u8> {
    let entries = match format {
        Format::Json => parse_json(input).unwrap_or_else(|err| {
            tracing::warn!("treating unparseable JSON input as empty: {err:#}");
            Vec::new()
        }),
        Format::Yaml => parse_yaml(input).unwrap_or_else(|err| {
            tracing::warn!("treating unparseable YAML input as empty: {err:#}");
            Vec::new()
        }),
        Format::Text => parse_text(input),
    };

    tracing::debug!("parsed {} host entries from {format} input", entries.len());

    let output = match target {
        Target::Yaml => serialize_yaml(&entries),
        Target::Ssh => serialize_text(&entries),
        Target::Json => serialize_json(&entries),
    };

    trim_trailing_newlines(output)
}

fn trim_trailing_newlines(mut buf: Vec<u8>) -> Vec<u8> {
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_empty_is_text() {
        assert_eq!(detect_format(""), Format::Text);
        assert_eq!(detect_format("   \n\t  "), Format::Text);
    }

    #[test]
    fn test_detect_json_array() {
        assert_eq!(detect_format("[]"), Format::Json);
        assert_eq!(
            detect_format(r#"[{"Name":"web","Data":{"Port":"22"}}]"#),
            Format::Json
        );
    }

    #[test]
    fn test_detect_json_beats_yaml() {
        // Valid JSON is also valid YAML; JSON must win the tie-break.
        let input = r#"[{"Name": "web"}]"#;
        assert!(serde_yaml::from_str::<serde_yaml::Value>(input).is_ok());
        assert_eq!(detect_format(input), Format::Json);
    }

    #[test]
    fn test_detect_yaml_document() {
        assert_eq!(
            detect_format("global:\n  User: admin\n"),
            Format::Yaml
        );
        assert_eq!(
            detect_format("Group g:\n  Hosts:\n    h:\n      Config:\n        Port: \"22\"\n"),
            Format::Yaml
        );
    }

    #[test]
    fn test_detect_sectionless_yaml_is_text() {
        // Parses as YAML but has no recognizable section.
        assert_eq!(detect_format("{}"), Format::Text);
    }

    #[test]
    fn test_detect_ssh_text() {
        assert_eq!(
            detect_format("Host example\n    HostName example.com\n"),
            Format::Text
        );
        assert_eq!(detect_format("# just a comment header\n"), Format::Text);
    }

    #[test]
    fn test_convert_empty_input_is_empty_output() {
        assert!(convert(Format::Text, "", Target::Ssh).is_empty());
        assert_eq!(convert(Format::Text, "", Target::Json), b"[]");
    }

    #[test]
    fn test_convert_garbage_structured_input_degrades() {
        let out = convert(Format::Json, "{{{", Target::Json);
        assert_eq!(out, b"[]");

        let out = convert(Format::Yaml, "][", Target::Json);
        assert_eq!(out, b"[]");
    }

    #[test]
    fn test_convert_trims_trailing_newlines() {
        let out = convert(Format::Text, "Host h\n    Port 22\n", Target::Ssh);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Host h\n    Port 22");
    }

    #[test]
    fn test_trim_trailing_newlines() {
        assert_eq!(trim_trailing_newlines(b"abc\r\n\n".to_vec()), b"abc");
        assert_eq!(trim_trailing_newlines(b"\n".to_vec()), b"");
        assert!(trim_trailing_newlines(Vec::new()).is_empty());
    }
}
