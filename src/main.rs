use clap::Parser;
use leadsheet::{format_document, parse_content, Config, Key, LeadSheetError, OutputFormat};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "leadsheet")]
#[command(about = "Parse, transpose and render chord-over-lyrics lead sheets", version)]
struct Args {
    /// Lead sheet to read
    input: PathBuf,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transpose up by this many semitones
    #[arg(long, conflicts_with = "down")]
    up: Option<u16>,

    /// Transpose down by this many semitones
    #[arg(long)]
    down: Option<u16>,

    /// Render chords as scale-degree numerals in this key
    #[arg(short, long, value_name = "KEY")]
    numerals: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leadsheet=warn")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), LeadSheetError> {
    let mut config = match &args.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded config from {:?}", path);
            config
        }
        None => Config::default(),
    };

    // Flags override the config file
    if let Some(up) = args.up {
        config.transpose = i32::from(up);
    }
    if let Some(down) = args.down {
        config.transpose = -i32::from(down);
    }
    if let Some(key) = &args.numerals {
        config.numerals_key = Some(Key::parse(key)?);
    }
    if let Some(format) = args.format {
        config.format = format;
    }

    let source = fs::read_to_string(&args.input).map_err(|e| LeadSheetError::Io {
        path: args.input.display().to_string(),
        message: e.to_string(),
    })?;

    let mut doc = parse_content(&source)?;
    info!("Parsed {} lines from {:?}", doc.lines.len(), args.input);

    config.apply(&mut doc);
    let output = format_document(&doc, config.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", output)).map_err(|e| LeadSheetError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            info!("Wrote output to {:?}", path);
        }
        None => {
            println!("{}", output);
        }
    }
    Ok(())
}
