//! Loading trees and encoder configs from disk or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use astpack_core::Tree;
use astpack_encoder::{EncodeError, EncoderConfig};
use astpack_format::IntEncoding;

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: String,
        source: serde_json::Error,
    },

    #[error("refusing to write a binary artifact to a terminal (use -o FILE)")]
    TerminalOutput,

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Flag values layered on top of the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub fixed_width: bool,
    pub no_dedup: bool,
    pub unordered: bool,
    pub max_size: Option<usize>,
}

/// Read a JSON document and build a tree from it. `-` reads stdin.
pub fn load_tree(path: &Path) -> Result<Tree, CommandError> {
    let text = read_text(path)?;
    let json: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| CommandError::Json {
            path: display_path(path),
            source,
        })?;
    tracing::debug!(path = %display_path(path), bytes = text.len(), "input loaded");
    Ok(Tree::from_json(&json))
}

/// Load the config file, if any, then apply flag overrides.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<EncoderConfig, CommandError> {
    let mut config = match path {
        Some(path) => {
            let text = read_text(path)?;
            serde_json::from_str(&text).map_err(|source| CommandError::Config {
                path: display_path(path),
                source,
            })?
        }
        None => EncoderConfig::default(),
    };

    if overrides.fixed_width {
        config.int_encoding = IntEncoding::Fixed32;
    }
    if overrides.no_dedup {
        config.dedup = false;
    }
    if overrides.unordered {
        config.ordered = false;
    }
    if overrides.max_size.is_some() {
        config.max_size = overrides.max_size;
    }
    Ok(config)
}

fn read_text(path: &Path) -> Result<String, CommandError> {
    let read_err = |source| CommandError::Read {
        path: display_path(path),
        source,
    };

    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(read_err)
}

pub fn display_path(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Report a command failure the way every command does and exit.
pub fn exit_with(err: CommandError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
