//! Think Stream Headless Runner
//!
//! Reads model output from stdin or a file, replays it through the stream
//! parser in fixed-size chunks and prints the separated main and reasoning
//! content.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use think_stream::app::{Config, OutputFormat};
use think_stream::headless::{self, HeadlessError};
use think_stream::parser::MarkerPair;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments, applied on top of the config file
#[derive(Default)]
struct Args {
    input_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    chunk_size: Option<usize>,
    preset: Option<String>,
    open: Option<String>,
    close: Option<String>,
    format: Option<OutputFormat>,
    help: bool,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "-f" | "--file" => {
                i += 1;
                if i < argv.len() {
                    args.input_file = Some(PathBuf::from(&argv[i]));
                }
            },
            "--config" => {
                i += 1;
                if i < argv.len() {
                    args.config_file = Some(PathBuf::from(&argv[i]));
                }
            },
            "-c" | "--chunk-size" => {
                i += 1;
                if i < argv.len() {
                    args.chunk_size = argv[i].parse().ok();
                }
            },
            "-m" | "--markers" => {
                i += 1;
                if i < argv.len() {
                    args.preset = Some(argv[i].clone());
                }
            },
            "--open" => {
                i += 1;
                if i < argv.len() {
                    args.open = Some(argv[i].clone());
                }
            },
            "--close" => {
                i += 1;
                if i < argv.len() {
                    args.close = Some(argv[i].clone());
                }
            },
            "-j" | "--json" => {
                args.format = Some(OutputFormat::Json);
            },
            "-t" | "--text" => {
                args.format = Some(OutputFormat::Text);
            },
            "-h" | "--help" => {
                args.help = true;
            },
            other => {
                // Treat as input file if no flag
                if args.input_file.is_none() && !other.starts_with('-') {
                    args.input_file = Some(PathBuf::from(other));
                }
            },
        }
        i += 1;
    }

    args
}

fn resolve(args: &Args) -> Result<(Config, MarkerPair), HeadlessError> {
    let mut config = match &args.config_file {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(name) = &args.preset {
        config.markers = (&MarkerPair::preset(name)?).into();
    }
    if let Some(open) = &args.open {
        config.markers.open = open.clone();
    }
    if let Some(close) = &args.close {
        config.markers.close = close.clone();
    }

    let markers = config.marker_pair()?;
    Ok((config, markers))
}

fn read_input(path: Option<&PathBuf>) -> Result<String, HeadlessError> {
    let data = match path {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data)?;
            data
        },
    };
    Ok(String::from_utf8_lossy(&data).into_owned())
}

fn execute(args: &Args) -> Result<(), HeadlessError> {
    let (config, markers) = resolve(args)?;
    let input = read_input(args.input_file.as_ref())?;

    tracing::info!(
        bytes = input.len(),
        chunk_size = config.chunk_size,
        open = markers.open(),
        close = markers.close(),
        "replaying stream"
    );
    let transcript = headless::run(&markers, &input, config.chunk_size);

    match config.format {
        OutputFormat::Text => print!("{}", transcript.to_text()),
        OutputFormat::Json => println!("{}", transcript.to_json()?),
    }
    Ok(())
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = parse_args();
    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn print_help() {
    println!("Think Stream Headless Runner");
    println!();
    println!("Usage: think-headless [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -f, --file <PATH>        Read input from file");
    println!("  -c, --chunk-size <N>     Characters per chunk, 0 for one chunk (default: 16)");
    println!("  -m, --markers <PRESET>   Marker preset: think, pipe-think, bracket-think, thought");
    println!("      --open <MARKER>      Custom open marker");
    println!("      --close <MARKER>     Custom close marker");
    println!("      --config <PATH>      Load settings from a JSON config file");
    println!("  -j, --json               Output transcript as JSON");
    println!("  -t, --text               Output report as text (default)");
    println!("  -h, --help               Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  echo 'Hi <think>plan</think>there' | think-headless -c 3");
    println!("  think-headless -m bracket-think --json capture.txt");
}
