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

//! Deterministic option ordering for serializers.
//!
//! Every serializer emits option keys in byte-wise ascending order so that
//! repeated conversions of the same model are byte-identical.

use std::collections::{BTreeMap, HashMap};

/// All keys of an option map, sorted byte-wise ascending.
pub fn ordered_keys(options: &HashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<String> = options.keys().cloned().collect();
    keys.sort();
    keys
}

/// Project an option map into a `BTreeMap`, whose iteration order matches
/// [`ordered_keys`]. Used by the YAML/JSON wire shapes.
pub fn sorted_map(options: &HashMap<String, String>) -> BTreeMap<String, String> {
    options
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_keys_sorts_bytewise() {
        let mut options = HashMap::new();
        options.insert("User".to_string(), "bob".to_string());
        options.insert("Port".to_string(), "22".to_string());
        options.insert("HostName".to_string(), "example.com".to_string());

        assert_eq!(ordered_keys(&options), vec!["HostName", "Port", "User"]);
    }

    #[test]
    fn test_ordered_keys_is_stable() {
        let mut options = HashMap::new();
        for key in ["b", "a", "C", "A"] {
            options.insert(key.to_string(), String::new());
        }

        // Uppercase sorts before lowercase in byte order.
        assert_eq!(ordered_keys(&options), vec!["A", "C", "a", "b"]);
        assert_eq!(ordered_keys(&options), ordered_keys(&options));
    }

    #[test]
    fn test_sorted_map_matches_ordered_keys() {
        let mut options = HashMap::new();
        options.insert("Zeta".to_string(), "1".to_string());
        options.insert("Alpha".to_string(), "2".to_string());

        let keys: Vec<String> = sorted_map(&options).into_keys().collect();
        assert_eq!(keys, ordered_keys(&options));
    }
}
