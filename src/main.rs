use cardify::{
    CardInput, CardifyConfig, LayoutMode, PipelineBuilder, PipelineError, TagPlacement, ThemeName,
    split_cards,
};
use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};

/// Atomic markdown index cards, rendered for print.
#[derive(Parser)]
#[command(name = "cardify", version, about)]
struct Cli {
    /// Settings file (JSON). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print length metrics, tags and atomicity for each card.
    Check {
        files: Vec<PathBuf>,
        /// Treat lines containing only `---` as card separators.
        #[arg(long)]
        split: bool,
    },
    /// Render cards into a PDF.
    Render {
        files: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
        /// Draw cut lines around every card.
        #[arg(long)]
        borders: bool,
        /// Mark each card "F" or "B" in its corner.
        #[arg(long)]
        side_indicator: bool,
        #[arg(long)]
        split: bool,
    },
    /// Write cards back out as plain markdown.
    Export {
        files: Vec<PathBuf>,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum)]
        tags: Option<TagsArg>,
        #[arg(long)]
        split: bool,
    },
    /// Write a settings file with every option at its default.
    InitConfig {
        #[arg(default_value = "cardify.json")]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Single,
    Batch,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

#[derive(Clone, Copy, ValueEnum)]
enum TagsArg {
    Inline,
    Appended,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let mut config = match &cli.config {
        Some(path) => CardifyConfig::load(path)?,
        None => CardifyConfig::default(),
    };

    match cli.command {
        Command::Check { files, split } => {
            let pipeline = PipelineBuilder::new().with_config(config).build()?;
            let inputs = read_cards(&files, split)?;
            let cards = pipeline.validate_all(&inputs);
            let budget = pipeline.budget();
            for (idx, card) in cards.iter().enumerate() {
                let metrics = card.length_metrics();
                println!(
                    "card {}: {}/{} chars, {}/{} lines, {} [{}]",
                    idx + 1,
                    metrics.char_count,
                    budget.max_chars,
                    metrics.line_count,
                    budget.max_lines,
                    if card.is_atomic() { "atomic" } else { "NOT ATOMIC" },
                    card.tags().iter().join(", ")
                );
            }
            let over = cards.iter().filter(|c| !c.is_atomic()).count();
            if over > 0 {
                log::warn!("{} of {} card(s) exceed the budget.", over, cards.len());
            }
        }
        Command::Render {
            files,
            output,
            mode,
            theme,
            borders,
            side_indicator,
            split,
        } => {
            if let Some(theme) = theme {
                config.theme = match theme {
                    ThemeArg::Light => ThemeName::Light,
                    ThemeArg::Dark => ThemeName::Dark,
                };
            }
            config.draw_borders |= borders;
            config.show_side_indicator |= side_indicator;
            let mut builder = PipelineBuilder::new().with_config(config);
            if let Some(mode) = mode {
                builder = builder.with_mode(match mode {
                    ModeArg::Single => LayoutMode::SingleCard,
                    ModeArg::Batch => LayoutMode::BatchGrid,
                });
            }
            let pipeline = builder.build()?;

            let inputs = read_cards(&files, split)?;
            let result = pipeline.generate(&inputs)?;
            fs::write(&output, &result.pdf)?;

            log::info!(
                "Wrote {} page(s) to {}.",
                result.page_count,
                output.display()
            );
            if !result.overflowed.is_empty() {
                log::warn!(
                    "Text overflows on card(s) {}; shorten or split them.",
                    result.overflowed.iter().map(|i| i + 1).join(", ")
                );
            }
        }
        Command::Export {
            files,
            output,
            tags,
            split,
        } => {
            if let Some(tags) = tags {
                config.tag_placement = match tags {
                    TagsArg::Inline => TagPlacement::Inline,
                    TagsArg::Appended => TagPlacement::Appended,
                };
            }
            let pipeline = PipelineBuilder::new().with_config(config).build()?;
            let inputs = read_cards(&files, split)?;
            let markdown = pipeline
                .validate_all(&inputs)
                .iter()
                .map(|card| pipeline.export_markdown(card))
                .join("\n---\n\n");
            match output {
                Some(path) => fs::write(path, markdown)?,
                None => print!("{}", markdown),
            }
        }
        Command::InitConfig { path, force } => {
            if path.exists() && !force {
                return Err(PipelineError::Config(format!(
                    "'{}' already exists; pass --force to overwrite it",
                    path.display()
                )));
            }
            config.save(&path)?;
            log::info!("Wrote default settings to {}.", path.display());
        }
    }
    Ok(())
}

fn read_cards(files: &[PathBuf], split: bool) -> Result<Vec<CardInput>, PipelineError> {
    if files.is_empty() {
        return Err(PipelineError::Config("no card files given".to_string()));
    }
    let mut inputs = Vec::new();
    for path in files {
        let text = read_file(path)?;
        if split {
            inputs.extend(split_cards(&text).iter().map(|card| CardInput::from_markdown(card)));
        } else {
            inputs.push(CardInput::from_markdown(&text));
        }
    }
    log::debug!("Read {} card(s) from {} file(s).", inputs.len(), files.len());
    Ok(inputs)
}

fn read_file(path: &Path) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|e| {
        PipelineError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read '{}': {}", path.display(), e),
        ))
    })
}
