use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::dump::DumpArgs;
use crate::commands::encode::EncodeArgs;
use crate::commands::input::ConfigOverrides;

pub struct EncodeParams {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub fixed_width: bool,
    pub no_dedup: bool,
    pub unordered: bool,
    pub max_size: Option<usize>,
    pub stats: bool,
}

impl EncodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: input_path(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            config: m.get_one::<PathBuf>("config").cloned(),
            fixed_width: m.get_flag("fixed_width"),
            no_dedup: m.get_flag("no_dedup"),
            unordered: m.get_flag("unordered"),
            max_size: m.get_one::<usize>("max_size").copied(),
            stats: m.get_flag("stats"),
        }
    }
}

impl From<EncodeParams> for EncodeArgs {
    fn from(p: EncodeParams) -> Self {
        Self {
            input: p.input,
            output: p.output,
            config: p.config,
            overrides: ConfigOverrides {
                fixed_width: p.fixed_width,
                no_dedup: p.no_dedup,
                unordered: p.unordered,
                max_size: p.max_size,
            },
            stats: p.stats,
        }
    }
}

pub struct DumpParams {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub no_dedup: bool,
    pub unordered: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: input_path(m),
            config: m.get_one::<PathBuf>("config").cloned(),
            no_dedup: m.get_flag("no_dedup"),
            unordered: m.get_flag("unordered"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: p.input,
            config: p.config,
            overrides: ConfigOverrides {
                no_dedup: p.no_dedup,
                unordered: p.unordered,
                ..ConfigOverrides::default()
            },
        }
    }
}

/// Log filter directive for a `-v` count.
pub fn verbosity_filter(count: u8) -> &'static str {
    match count {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Falls back to stdin.
fn input_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("input")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}
