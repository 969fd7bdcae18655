use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the registered output formats from tei-graph's registry.
// We need to duplicate this here since build scripts can't access the library.
const OUTPUT_FORMATS: &[&str] = &["json", "cypher", "summary"];

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("tei-graph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert TEI editions into labeled property graphs")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("convert")
                .arg(input_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(OUTPUT_FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("inspect").arg(input_arg()));

    generate_to(Bash, &mut cmd, "tei-graph", &outdir)?;
    generate_to(Zsh, &mut cmd, "tei-graph", &outdir)?;
    generate_to(Fish, &mut cmd, "tei-graph", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
