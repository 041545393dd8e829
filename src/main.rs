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

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write as _;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use sshconv::{
    cli::Cli,
    converter::{convert, detect_format},
    utils::{gather_source, init_logging, save_output},
};

/// Read the whole of stdin as the conversion input.
async fn read_stdin() -> Result<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("failed to read from stdin")?;
    Ok(input)
}

/// Source path to scan when none was given: the user's ~/.ssh directory.
fn default_source() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine the user home directory")?;
    Ok(home.join(".ssh"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let target = cli.target()?;

    // Pipe mode: read stdin, always write stdout.
    let pipe_mode = !atty::is(atty::Stream::Stdin);

    let raw = if pipe_mode {
        read_stdin().await?
    } else {
        let src = match &cli.src {
            Some(src) => src.clone(),
            None => default_source()?,
        };
        gather_source(&src).await?
    };

    let format = detect_format(&raw);
    tracing::debug!("detected input format: {format}, target: {target}");

    let output = convert(format, &raw, target);

    match &cli.dest {
        Some(dest) if !pipe_mode => {
            save_output(dest, &output).await?;
            println!("File has been saved successfully");
            println!("File path: {}", dest.display());
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&output)?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
