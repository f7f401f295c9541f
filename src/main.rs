use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{debug, error, info};
use morlus::converter::Converter;
use morlus::dialect::{
    CodeType, ConvertArgs, DEFAULT_SEPARATOR, Dialect, Direction, KanaPreference, Language,
};
use morlus::errors::Result;
use morlus::output::{self, OConversion, OError};
use morlus::table::LoadOptions;
use std::io::{self, Read, Write};
use std::{error, fs, process};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Dataset file (tab-separated)
    dataset: String,
    /// Plain text language
    #[arg(short, long, default_value_t = Language::Jp)]
    language: Language,
    /// Kana column used for Japanese text
    #[arg(short, long, default_value_t = KanaPreference::Hiragana)]
    kana: KanaPreference,
    /// Code standard
    #[arg(short, long, default_value_t = CodeType::V7)]
    code: CodeType,
    /// Dialect file (JSON), overrides language, kana and code
    #[arg(long)]
    dialect_file: Option<String>,
    /// Conversion direction
    #[arg(short, long, default_value_t = Direction::ToCode)]
    direction: Direction,
    /// String placed between codes
    #[arg(short, long, default_value = DEFAULT_SEPARATOR)]
    separator: String,
    /// Name columns COL_0, COL_1, ... instead of reading the header row
    #[arg(long)]
    positional: bool,
    /// Text to convert
    #[arg(short, long, conflicts_with = "infile")]
    text: Option<String>,
    /// Input file (default: standard input)
    #[arg(short, long)]
    infile: Option<String>,
    /// Output file (default: standard output)
    #[arg(short, long)]
    outfile: Option<String>,
    /// Write a JSON report instead of plain text
    #[arg(long)]
    json: bool,
    /// Produce compact JSON files
    #[arg(long, requires = "json")]
    compact: bool,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn get_dialect(args: &Args) -> Result<Dialect> {
    match &args.dialect_file {
        Some(filename) => {
            info!(target: "morlus", "dialect: {filename}");
            Dialect::from_path(filename)
        }
        None => {
            info!(
                target: "morlus",
                "dialect: {} {} ({})",
                args.language,
                args.code,
                args.kana
            );
            Ok(Dialect::preset(args.language, args.code, args.kana))
        }
    }
}

fn read_input(args: &Args) -> Result<String> {
    let text = match (&args.text, &args.infile) {
        (Some(text), _) => text.clone(),
        (None, Some(filename)) => {
            info!(target: "morlus", "read: {filename}");
            fs::read_to_string(filename)?
        }
        (None, None) => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(text.trim().to_owned())
}

fn write_output(args: &Args, report: &OConversion) -> Result<()> {
    let mut writer: Box<dyn Write> = match &args.outfile {
        Some(filename) => {
            info!(target: "morlus", "write: {filename}");
            Box::new(io::BufWriter::new(fs::File::create(filename)?))
        }
        None => Box::new(io::stdout().lock()),
    };
    if !args.json {
        writeln!(writer, "{}", report.output)?;
    } else if args.compact {
        serde_json::to_writer(&mut writer, report)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, report)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn process(args: &Args) -> Result<()> {
    let options = if args.positional {
        LoadOptions::positional()
    } else {
        LoadOptions::default()
    };
    let mut converter = Converter::new();
    converter.load_file(&args.dataset, &options)?;
    let convert_args = ConvertArgs {
        dialect: get_dialect(args)?,
        direction: args.direction,
        separator: args.separator.clone(),
    };
    let input = read_input(args)?;
    debug!(target: "morlus", "input: {}", output::preview(&input, 40));
    let result = converter.convert(&convert_args, &input)?;
    write_output(args, &OConversion::new(&convert_args, &input, result))
}

fn store_error(error_file: &str, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            match &args.error_file {
                Some(filename) => match store_error(filename, &*e) {
                    Ok(()) => {
                        info!(target: "morlus", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "morlus", "{e}");
                        error!(target: "morlus", "{e2}");
                    }
                },
                None => error!(target: "morlus", "{e}"),
            }
            process::exit(1);
        }
    }
}
