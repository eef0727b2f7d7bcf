mod debug_report;

use gazex::{build, lookup_verbose, read_gazetteers};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

const DEFAULT_INPUT: &str = "Atlantic City of Georgia";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let pairs = match read_gazetteers(&config.dict) {
        Ok(pairs) => pairs,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let index = match build(pairs) {
        Ok(index) => index,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let tokens: Vec<&str> = config.input.split_whitespace().collect();
    let res = match lookup_verbose(&index, &tokens) {
        Ok(res) => res,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    debug_report::print_run(&tokens, index.len(), &res, config.color);
}

struct CliConfig {
    dict: PathBuf,
    input: String,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut dict: Option<PathBuf> = None;
    let mut input: Option<String> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("gazex {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--dict" | "-d" => {
                let value = args.next().ok_or_else(|| "error: --dict expects a value".to_string())?;
                dict = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            other if !other.starts_with('-') => {
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(other.to_string());
            }
            other => return Err(format!("error: unrecognized argument '{other}'")),
        }
    }

    let dict = dict.ok_or_else(|| "error: --dict <DIR> is required (try --help)".to_string())?;

    Ok(CliConfig { dict, input: input.unwrap_or_else(|| DEFAULT_INPUT.to_string()), color })
}

fn print_help() {
    println!(
        "gazex — gazetteer span matcher

USAGE:
    gazex --dict <DIR> [OPTIONS] [INPUT]

ARGS:
    [INPUT]               Sentence to match (whitespace-tokenized)
                          [default: \"{DEFAULT_INPUT}\"]

OPTIONS:
    -d, --dict <DIR>      Gazetteer directory (one <label>.txt per category)
    -i, --input <TEXT>    Sentence to match
        --color           Force colored output
        --no-color        Disable colored output
    -h, --help            Print help
    -V, --version         Print version

Set GAZEX_DEBUG=1 for scan/extraction/resolution traces."
    );
}
