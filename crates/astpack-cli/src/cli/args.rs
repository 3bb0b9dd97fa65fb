//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so `encode` and `dump` can share the
//! same definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// JSON tree to encode (positional, `-` for stdin).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("INPUT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON tree file (- for stdin)")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write the artifact to FILE instead of stdout")
}

/// Encoder config file (--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON encoder config; flags override its values")
}

/// Fixed-width varuint32 slots (--fixed-width).
pub fn fixed_width_arg() -> Arg {
    Arg::new("fixed_width")
        .long("fixed-width")
        .action(ArgAction::SetTrue)
        .help("Write varuint32 slots as fixed 4-byte integers")
}

/// Skip structural dedup (--no-dedup).
pub fn no_dedup_arg() -> Arg {
    Arg::new("no_dedup")
        .long("no-dedup")
        .action(ArgAction::SetTrue)
        .help("Keep structurally identical objects as separate entries")
}

/// Finalize tables in hash order (--unordered).
pub fn unordered_arg() -> Arg {
    Arg::new("unordered")
        .long("unordered")
        .action(ArgAction::SetTrue)
        .help("Do not sort tables by discovery order (output is not reproducible)")
}

/// Artifact size cap (--max-size).
pub fn max_size_arg() -> Arg {
    Arg::new("max_size")
        .long("max-size")
        .value_name("BYTES")
        .value_parser(value_parser!(usize))
        .help("Fail if the artifact would exceed BYTES")
}

/// Print encode statistics (--stats).
pub fn stats_arg() -> Arg {
    Arg::new("stats")
        .long("stats")
        .action(ArgAction::SetTrue)
        .help("Print encode statistics as JSON to stderr")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v info, -vv debug, -vvv trace)")
}
