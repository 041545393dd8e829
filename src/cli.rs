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

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::converter::Target;

#[derive(Parser, Debug)]
#[command(
    name = "sshconv",
    version,
    about = "Convert SSH client configuration between ssh_config, grouped YAML, and flat JSON",
    long_about = "sshconv converts SSH client configuration between the native ssh_config text\nsyntax, a grouped YAML document, and a flat JSON document. The input format is\ndetected automatically; pick exactly one output format flag.\n\nInput comes from stdin when piped, otherwise from --src (default: ~/.ssh,\nscanned recursively with key material excluded).",
    after_help = "EXAMPLES:\n  Convert ~/.ssh to YAML:        sshconv --to-yaml\n  Pipe a config through:         cat ~/.ssh/config | sshconv --to-json\n  Convert a YAML file back:      sshconv --to-ssh -s hosts.yaml -d ssh_config\n  Inspect detection decisions:   sshconv --to-yaml -vv"
)]
pub struct Cli {
    #[arg(long, help = "Convert SSH config (text/JSON) to YAML")]
    pub to_yaml: bool,

    #[arg(long, help = "Convert SSH config (YAML/JSON) to ssh_config text")]
    pub to_ssh: bool,

    #[arg(long, help = "Convert SSH config (YAML/text) to JSON")]
    pub to_json: bool,

    #[arg(
        short = 's',
        long,
        help = "Source file or directory path (non-pipeline mode) [default: ~/.ssh]"
    )]
    pub src: Option<PathBuf>,

    #[arg(
        short = 'd',
        long,
        help = "Destination file path (non-pipeline mode); prints to stdout when omitted"
    )]
    pub dest: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

impl Cli {
    /// Resolve the output format flags into a single target.
    ///
    /// No flag selects YAML; more than one is a caller error, rejected here
    /// so the conversion engine only ever sees a single valid target.
    pub fn target(&self) -> Result<Target> {
        match (self.to_yaml, self.to_ssh, self.to_json) {
            (false, false, false) | (true, false, false) => Ok(Target::Yaml),
            (false, true, false) => Ok(Target::Ssh),
            (false, false, true) => Ok(Target::Json),
            _ => anyhow::bail!("specify exactly one of --to-yaml, --to-ssh, or --to-json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults_to_yaml() {
        let cli = Cli::parse_from(["sshconv"]);
        assert_eq!(cli.target().unwrap(), Target::Yaml);
    }

    #[test]
    fn test_target_single_flag() {
        let cli = Cli::parse_from(["sshconv", "--to-ssh"]);
        assert_eq!(cli.target().unwrap(), Target::Ssh);

        let cli = Cli::parse_from(["sshconv", "--to-json"]);
        assert_eq!(cli.target().unwrap(), Target::Json);
    }

    #[test]
    fn test_target_rejects_multiple_flags() {
        let cli = Cli::parse_from(["sshconv", "--to-ssh", "--to-json"]);
        assert!(cli.target().is_err());
    }

    #[test]
    fn test_paths_parse() {
        let cli = Cli::parse_from(["sshconv", "--to-yaml", "-s", "in.conf", "-d", "out.yaml"]);
        assert_eq!(cli.src.as_deref(), Some(std::path::Path::new("in.conf")));
        assert_eq!(cli.dest.as_deref(), Some(std::path::Path::new("out.yaml")));
    }
}
