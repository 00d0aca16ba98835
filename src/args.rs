use clap::{value_parser, Arg, ArgAction, Command};

/// Parse an integer written in decimal or with a `0x` prefix
fn parse_int_auto<T: TryFrom<u64>>(input: &str) -> Result<T, String> {
    let input = input.trim();
    let value = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex_digits) => u64::from_str_radix(hex_digits, 16),
        None => input.parse::<u64>(),
    }
    .map_err(|e| format!("Invalid number {:?}: {}", input, e))?;

    T::try_from(value).map_err(|_| format!("Number {} is out of range", value))
}

fn message_arg() -> Arg {
    Arg::new("message")
        .help("File holding the message (at most k bytes)")
        .required(true)
        .index(1)
}

fn ecc_arg() -> Arg {
    Arg::new("ecc")
        .help("File holding the raw ecc block (n-k bytes)")
        .required(true)
        .index(2)
}

/// Command-line definition for the `eccman` binary
pub fn build_cli() -> Command {
    Command::new("eccman")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reed-Solomon ECC manager: encode, repair and check messages")
        .arg_required_else_help(true)
        .arg(
            Arg::new("n")
                .short('n')
                .long("n")
                .help("Codeword length (message + ecc), at most 255")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("255")
                .global(true),
        )
        .arg(
            Arg::new("k")
                .short('k')
                .long("k")
                .help("Message length")
                .value_name("K")
                .value_parser(value_parser!(usize))
                .default_value("223")
                .global(true),
        )
        .arg(
            Arg::new("variant")
                .short('a')
                .long("variant")
                .visible_alias("ecc-algo")
                .help("Codec variant: 1-4 or reference, reference-fast, performance-compatible, performance-standalone")
                .value_name("VARIANT")
                .default_value("1")
                .global(true),
        )
        .arg(
            Arg::new("prim")
                .long("prim")
                .help("Primitive polynomial for the standalone variant (default 0x187)")
                .value_name("POLY")
                .value_parser(parse_int_auto::<u16>)
                .global(true),
        )
        .arg(
            Arg::new("generator")
                .long("generator")
                .help("Field generator for the standalone variant (default 2)")
                .value_name("ELEMENT")
                .value_parser(parse_int_auto::<u8>)
                .global(true),
        )
        .arg(
            Arg::new("fcr")
                .long("fcr")
                .help("First consecutive root for the standalone variant (default 120)")
                .value_name("FCR")
                .value_parser(parse_int_auto::<u8>)
                .global(true),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .help("Number of CPU threads for batch work (0 = auto-detect)")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("0")
                .global(true),
        )
        .arg(
            Arg::new("no-parallel")
                .long("no-parallel")
                .help("Disable all parallel processing")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("encode")
                .visible_alias("e")
                .about("Compute the ecc block of a message")
                .arg(message_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Write the raw ecc block here instead of printing hex")
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            Command::new("decode")
                .visible_alias("d")
                .about("Repair a message using its ecc block")
                .arg(message_arg())
                .arg(ecc_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Where to write the repaired message")
                        .value_name("FILE")
                        .required(true),
                )
                .arg(
                    Arg::new("ecc-output")
                        .long("ecc-output")
                        .help("Where to write the repaired ecc block")
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            Command::new("check")
                .visible_alias("c")
                .about("Detect errors in a message and its ecc block")
                .arg(message_arg())
                .arg(ecc_arg()),
        )
        .subcommand(
            Command::new("verify")
                .visible_alias("v")
                .about("Verify that message + ecc is a valid codeword (reference variants)")
                .arg(message_arg())
                .arg(ecc_arg()),
        )
        .subcommand(Command::new("describe").about("Print the field parameters in effect"))
}

pub fn parse_args() -> clap::ArgMatches {
    build_cli().get_matches()
}
