use std::path::PathBuf;

use astpack_encoder::{EncodeStats, build_module, dump};

use super::input::{CommandError, ConfigOverrides, exit_with, load_tree, resolve_config};

pub struct DumpArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

pub fn run(args: DumpArgs) {
    match render(&args) {
        Ok(text) => print!("{text}"),
        Err(err) => exit_with(err),
    }
}

pub fn render(args: &DumpArgs) -> Result<String, CommandError> {
    let config = resolve_config(args.config.as_deref(), &args.overrides)?;
    let tree = load_tree(&args.input)?;

    let mut module = build_module(&tree, &config, &mut EncodeStats::new())?;
    Ok(dump(&mut module, config.ordered)?)
}
