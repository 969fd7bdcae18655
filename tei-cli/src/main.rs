// Command-line interface for tei-graph
//
// This binary converts TEI edition files into property graphs. The conversion itself lives in
// the tei-graph crate; this crate only reads files, layers configuration and picks the output
// format.
//
// Usage:
//  tei-graph <input> [--to <format>] [--output <file>]          - Convert (default command)
//  tei-graph convert <input> [--to <format>] [--output <file>]  - Same as above (explicit)
//  tei-graph inspect <input>                                    - Print node/relationship counts
//  tei-graph --list-formats                                     - List output formats
//
// The output format is taken from --to, then from the extension of --output, then from the
// `output.format` configuration key.
//
// Extra Parameters:
//
// Configuration keys can be overridden with --extra-<parameter-name> <value>:
//  --extra-pretty, --extra-split                  (output.pretty, output.split)
//  --extra-max-depth <n>                          (convert.max_depth)
//  --extra-ignore-elements <a,b,...>              (convert.ignore.elements)
//  --extra-ignore-subtrees <a,b,...>              (convert.ignore.subtrees)
//  --extra-ignore-trees <a,b,...>                 (convert.ignore.trees)
// Any other extra parameter is handed to the output format as is.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use tei_config::{ConfigError, Loader, TeiConfig};
use tei_graph::{ConvertOptions, Converter, FormatRegistry, GraphElement};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args
                .get(i + 1)
                .map(|next| !next.starts_with('-'))
                .unwrap_or(false);

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("tei-graph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert TEI editions into labeled property graphs")
        .long_about(
            "tei-graph walks a TEI edition (transliteration, vocalisation, notes, translations)\n\
            and emits its nodes and relationships for loading into a graph database.\n\n\
            Commands:\n  \
            - convert: Convert a document to a graph format (default command)\n  \
            - inspect: Print node and relationship counts\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration keys or pass format options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            tei-graph tablet.xml                          # JSON to stdout\n  \
            tei-graph tablet.xml --to cypher -o out.cql   # Cypher script\n  \
            tei-graph tablet.xml --extra-split            # JSON with separate node/relationship arrays\n  \
            tei-graph inspect tablet.xml                  # Counts by label",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a tei.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document to a graph format (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format (json, cypher, summary)")
                        .long_help(
                            "Output format to write.\n\n\
                            If not specified, the format is detected from the --output extension,\n\
                            falling back to the output.format configuration key.",
                        )
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print node and relationship counts by label")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // Without a subcommand the first positional is the input file: inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !matches!(cleaned_args[1].as_str(), "convert" | "inspect" | "help")
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_tracing(matches.get_count("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &mut extra_params,
    );

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let to = resolve_format(sub_matches.get_one::<String>("to"), output, &config);
            handle_convert_command(input, &to, output, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            handle_inspect_command(input, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required_arg<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    match matches.get_one::<String>(id) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument <{id}>");
            std::process::exit(2);
        }
    }
}

fn resolve_format(explicit: Option<&String>, output: Option<&str>, config: &TeiConfig) -> String {
    if let Some(format) = explicit {
        return format.clone();
    }
    output
        .and_then(|path| FormatRegistry::default().detect_format_from_filename(path))
        .unwrap_or_else(|| config.output.format.clone())
}

fn read_and_convert(input: &str, config: &TeiConfig) -> Vec<GraphElement> {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let options = ConvertOptions::from(&config.convert);
    debug!(?options, "converting {input}");
    let elements = Converter::new(options).convert(&source).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    info!(elements = elements.len(), "converted {input}");
    elements
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &TeiConfig,
) {
    let registry = FormatRegistry::default();
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let elements = read_and_convert(input, config);

    let mut format_options = HashMap::new();
    if to == "json" {
        format_options.insert("pretty".to_string(), config.output.pretty.to_string());
        format_options.insert("split".to_string(), config.output.split.to_string());
    }
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let mut result = registry
        .serialize_with_options(&elements, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
    if !result.ends_with('\n') {
        result.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            info!("wrote {path}");
        }
        None => print!("{result}"),
    }
}

/// Handle the inspect command
fn handle_inspect_command(input: &str, config: &TeiConfig) {
    let elements = read_and_convert(input, config);
    let summary = FormatRegistry::default()
        .serialize(&elements, "summary")
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
    print!("{summary}");
}

fn handle_list_formats_command() {
    println!("Output formats:");
    for (name, description) in FormatRegistry::default().describe_formats() {
        println!("  {name:<10} {description}");
    }
}

fn load_cli_config(explicit_path: Option<&str>, extra_params: &mut HashMap<String, String>) -> TeiConfig {
    let loader = Loader::new().with_optional_file("tei.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    let loader = apply_config_overrides(loader, extra_params).unwrap_or_else(|err| {
        eprintln!("Invalid configuration override: {err}");
        std::process::exit(1);
    });

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Move configuration-backed extra parameters into loader overrides.
fn apply_config_overrides(
    mut loader: Loader,
    extra_params: &mut HashMap<String, String>,
) -> Result<Loader, ConfigError> {
    if let Some(raw) = extra_params.remove("pretty") {
        loader = loader.set_override("output.pretty", parse_bool_arg("pretty", &raw))?;
    }
    if let Some(raw) = extra_params.remove("split") {
        loader = loader.set_override("output.split", parse_bool_arg("split", &raw))?;
    }
    if let Some(raw) = extra_params.remove("max-depth") {
        let depth: u64 = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid value '{raw}' for --extra-max-depth, expected a number");
            std::process::exit(1);
        });
        loader = loader.set_override("convert.max_depth", depth)?;
    }
    for (flag, key) in [
        ("ignore-elements", "convert.ignore.elements"),
        ("ignore-subtrees", "convert.ignore.subtrees"),
        ("ignore-trees", "convert.ignore.trees"),
    ] {
        if let Some(raw) = extra_params.remove(flag) {
            loader = loader.set_override(key, parse_list_arg(&raw))?;
        }
    }
    Ok(loader)
}

fn parse_list_arg(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "true")
        .map(str::to_string)
        .collect()
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
