use anyhow::{Context, Result};
use clap::Parser;
use cliclack::log;
use morlus::converter::Converter;
use morlus::dialect::{
    CodeType, ConvertArgs, DEFAULT_SEPARATOR, Dialect, Direction, KanaPreference, Language,
};
use morlus::errors::NoTableLoaded;
use morlus::table::LoadOptions;

/// Convert text interactively
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Dataset file (tab-separated)
    dataset: Option<String>,
    /// Name columns COL_0, COL_1, ... instead of reading the header row
    #[arg(long)]
    positional: bool,
}

#[derive(Clone, PartialEq, Eq)]
enum Action {
    Convert,
    Settings,
    Load,
    Quit,
}

struct Settings {
    language: Language,
    kana: KanaPreference,
    code: CodeType,
    direction: Direction,
    separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: Language::Jp,
            kana: KanaPreference::Hiragana,
            code: CodeType::V7,
            direction: Direction::ToCode,
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }
}

impl Settings {
    fn convert_args(&self) -> ConvertArgs {
        ConvertArgs {
            dialect: Dialect::preset(self.language, self.code, self.kana),
            direction: self.direction,
            separator: self.separator.clone(),
        }
    }

    fn describe(&self) -> String {
        let language = match self.language {
            Language::Jp => format!("Japanese ({})", self.kana),
            Language::Us => "Latin".to_owned(),
        };
        let code = match self.code {
            CodeType::V7 => "V7 code",
            CodeType::Morse => "standard morse",
        };
        let direction = match self.direction {
            Direction::ToCode => "text → code",
            Direction::ToText => "code → text",
        };
        format!(
            "{language}, {code}, {direction}\nseparator: '{}'",
            self.separator
        )
    }
}

fn load(converter: &mut Converter, path: &str, options: &LoadOptions) -> Result<()> {
    match converter.load_file(path, options) {
        Ok(()) => {
            let rows = converter.table().map_or(0, |t| t.len());
            log::success(format!("Loaded {path} ({rows} rows)"))?;
        }
        Err(e) => {
            log::error(format!("{e}"))?;
            if converter.is_loaded() {
                log::info("Keeping the previously loaded dataset")?;
            }
        }
    }
    Ok(())
}

fn change_settings(settings: &mut Settings) -> Result<()> {
    settings.language = cliclack::select("Plain text language?")
        .initial_value(settings.language)
        .item(Language::Jp, "Japanese", "")
        .item(Language::Us, "Latin", "")
        .interact()?;
    if settings.language == Language::Jp {
        settings.kana = cliclack::select("Decode kana as?")
            .initial_value(settings.kana)
            .item(KanaPreference::Hiragana, "Hiragana", "")
            .item(KanaPreference::Katakana, "Katakana", "")
            .interact()?;
    }
    settings.code = cliclack::select("Code standard?")
        .initial_value(settings.code)
        .item(CodeType::V7, "V7 code", "")
        .item(CodeType::Morse, "Standard morse", "")
        .interact()?;
    settings.direction = cliclack::select("Direction?")
        .initial_value(settings.direction)
        .item(Direction::ToCode, "Text → code", "")
        .item(Direction::ToText, "Code → text", "")
        .interact()?;
    settings.separator = cliclack::input("Separator between codes")
        .default_input(&settings.separator)
        .interact()?;
    Ok(())
}

fn convert(converter: &Converter, settings: &Settings) -> Result<()> {
    let text: String = cliclack::input("Text to convert").interact()?;
    let text = text.trim();
    match converter.convert(&settings.convert_args(), text) {
        Ok(output) => {
            let options = textwrap::Options::new(70).break_words(true);
            cliclack::note("Result", textwrap::fill(&output, &options))?;
        }
        Err(e) if e.downcast_ref::<NoTableLoaded>().is_some() => {
            log::warning("Load a dataset first")?;
        }
        Err(e) => log::error(format!("{e}"))?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let options = if args.positional {
        LoadOptions::positional()
    } else {
        LoadOptions::default()
    };
    cliclack::intro("morlus").context("cannot start interactive session")?;
    let mut converter = Converter::new();
    if let Some(path) = &args.dataset {
        load(&mut converter, path, &options)?;
    }
    let mut settings = Settings::default();
    loop {
        cliclack::note("Settings", settings.describe())?;
        let mut items = vec![];
        if converter.is_loaded() {
            items.push((Action::Convert, "Convert text", ""));
        }
        items.push((Action::Settings, "Change settings", ""));
        items.push((Action::Load, "Load a dataset", ""));
        items.push((Action::Quit, "Quit", ""));
        let choice = cliclack::select("Action?").items(&items).interact()?;
        match choice {
            Action::Quit => break,
            Action::Convert => convert(&converter, &settings)?,
            Action::Settings => change_settings(&mut settings)?,
            Action::Load => {
                let path: String = cliclack::input("Dataset file")
                    .default_input(args.dataset.as_deref().unwrap_or(""))
                    .interact()?;
                load(&mut converter, &path, &options)?;
            }
        }
    }
    cliclack::outro("Bye!")?;
    Ok(())
}
