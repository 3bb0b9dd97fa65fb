use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use astpack_encoder::{EncodeStats, encode_with_stats};

use super::input::{
    CommandError, ConfigOverrides, display_path, exit_with, load_tree, resolve_config,
};

pub struct EncodeArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub stats: bool,
}

pub fn run(args: EncodeArgs) {
    if args.output.is_none() && io::stdout().is_terminal() {
        exit_with(CommandError::TerminalOutput);
    }

    let (bytes, stats) = match encode_input(&args) {
        Ok(result) => result,
        Err(err) => exit_with(err),
    };

    let written = match &args.output {
        Some(path) => fs::write(path, &bytes).map_err(|source| CommandError::Write {
            path: display_path(path),
            source,
        }),
        None => io::stdout()
            .lock()
            .write_all(&bytes)
            .map_err(|source| CommandError::Write {
                path: "<stdout>".to_string(),
                source,
            }),
    };
    if let Err(err) = written {
        exit_with(err);
    }

    if args.stats {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => eprintln!("{json}"),
            Err(err) => eprintln!("warning: could not render stats: {err}"),
        }
    }
}

/// Load, configure and encode. Everything except the final write.
pub fn encode_input(args: &EncodeArgs) -> Result<(Vec<u8>, EncodeStats), CommandError> {
    let config = resolve_config(args.config.as_deref(), &args.overrides)?;
    let tree = load_tree(&args.input)?;

    let mut stats = EncodeStats::new();
    let bytes = encode_with_stats(&tree, &config, &mut stats)?;
    tracing::info!(
        input = %display_path(&args.input),
        bytes = bytes.len(),
        objects = stats.objects,
        merged = stats.objects_merged,
        "encoded"
    );
    Ok((bytes, stats))
}
