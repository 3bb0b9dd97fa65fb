//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("astpack")
        .about("Compact, deduplicating binary encoding of syntax trees")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(encode_command())
        .subcommand(dump_command())
}

/// Encode a JSON tree into an artifact.
pub fn encode_command() -> Command {
    Command::new("encode")
        .about("Encode a JSON tree into a binary artifact")
        .override_usage(
            "\
  astpack encode <INPUT> -o <FILE>
  astpack encode <INPUT> > out.bin",
        )
        .after_help(
            r#"EXAMPLES:
  astpack encode ast.json -o ast.bin            # default encoding
  astpack encode ast.json -o ast.bin --stats    # with counters on stderr
  astpack encode - --fixed-width > ast.bin      # stdin, fixed-width ints
  astpack encode ast.json -o ast.bin -vv        # debug logging"#,
        )
        .arg(input_arg())
        .arg(output_arg())
        .arg(config_arg())
        .arg(fixed_width_arg())
        .arg(no_dedup_arg())
        .arg(unordered_arg())
        .arg(max_size_arg())
        .arg(stats_arg())
}

/// Show the tables an artifact would contain.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the string, shape, object and array tables")
        .override_usage("  astpack dump <INPUT>")
        .after_help(
            r#"EXAMPLES:
  astpack dump ast.json               # tables after dedup
  astpack dump ast.json --no-dedup    # every object as discovered"#,
        )
        .arg(input_arg())
        .arg(config_arg())
        .arg(no_dedup_arg())
        .arg(unordered_arg())
}
