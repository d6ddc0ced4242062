#![deny(unsafe_code)]
//! CLI binary for the gradient-studio CSS gradient editor.
//!
//! Subcommands:
//! - `css` prints (and optionally copies) the export snippet
//! - `png` rasterizes the gradient to a PNG file
//! - `presets` lists the preset gallery
//! - `history` lists, saves, shows, or deletes saved gradients

mod clipboard;
mod config;
mod error;
mod select;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use gradient_studio_core::history::{load_history, save_history, unix_millis};
use gradient_studio_core::preset::PRESETS;
use gradient_studio_core::{css, Command as EditorCommand, Editor, ExportFormat, FileStorage, History};
use gradient_studio_raster::snapshot;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clipboard::SystemClipboard;
use config::Config;
use error::CliError;
use select::GradientArgs;

#[derive(Parser)]
#[command(name = "gradient-studio", version, about = "CSS gradient editor and exporter")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log debug detail to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./gradient-studio.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding saved gradients.
    #[arg(long, global = true, value_name = "DIR")]
    history_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the export snippet for a gradient.
    Css {
        #[command(flatten)]
        gradient: GradientArgs,

        /// Export format: css, tailwind, react, or js.
        #[arg(short, long)]
        format: Option<String>,

        /// Also copy the snippet to the system clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Rasterize a gradient and write a PNG.
    Png {
        #[command(flatten)]
        gradient: GradientArgs,

        /// Image width in pixels.
        #[arg(short = 'W', long)]
        width: Option<u32>,

        /// Image height in pixels.
        #[arg(short = 'H', long)]
        height: Option<u32>,

        /// Output file path.
        #[arg(short, long, default_value = snapshot::DEFAULT_FILE_NAME)]
        output: PathBuf,
    },
    /// List the preset gallery.
    Presets,
    /// Manage saved gradients.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved gradients, newest first.
    List,
    /// Save a gradient to the front of the history.
    Save {
        #[command(flatten)]
        gradient: GradientArgs,
    },
    /// Print the export snippet of a saved gradient.
    Show {
        index: usize,

        #[arg(short, long)]
        format: Option<String>,
    },
    /// Delete a saved gradient.
    Delete { index: usize },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn resolve_format(flag: Option<&str>, config: &Config) -> ExportFormat {
    flag.map_or_else(|| config.export_format(), ExportFormat::from_tag)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let history_dir = cli.history_dir.unwrap_or_else(|| config.history_dir.clone());
    let mut storage = FileStorage::new(history_dir);
    let history = load_history(&storage);

    match cli.command {
        Command::Css {
            gradient,
            format,
            copy,
        } => {
            let mut editor = gradient.editor(history)?;
            editor.dispatch(EditorCommand::SetFormat(resolve_format(format.as_deref(), &config)));
            let output = editor.output();

            // Copying can block on Linux, so text mode prints first.
            let mut clipboard = SystemClipboard::new();
            if cli.json {
                let notice = copy.then(|| editor.copy_output(&mut clipboard));
                print_json(&serde_json::json!({
                    "format": editor.format().tag(),
                    "css": editor.css(),
                    "output": output,
                    "notice": notice.as_ref().map(|n| n.message()),
                }))?;
            } else {
                println!("{output}");
                if copy {
                    eprintln!("{}", editor.copy_output(&mut clipboard));
                }
            }
            if let Some(e) = clipboard.take_error() {
                return Err(CliError::Clipboard(e));
            }
        }
        Command::Png {
            gradient,
            width,
            height,
            output,
        } => {
            let editor = gradient.editor(history)?;
            let width = width.unwrap_or(config.width);
            let height = height.unwrap_or(config.height);
            snapshot::write_png(editor.spec(), width, height, &output)?;

            if cli.json {
                print_json(&serde_json::json!({
                    "css": editor.css(),
                    "width": width,
                    "height": height,
                    "output": output.display().to_string(),
                }))?;
            } else {
                eprintln!("wrote {width}x{height} gradient -> {}", output.display());
            }
        }
        Command::Presets => {
            if cli.json {
                let presets: Vec<_> = PRESETS
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "name": p.name,
                            "colors": p.colors,
                            "css": css::to_css(&p.spec()),
                        })
                    })
                    .collect();
                print_json(&serde_json::Value::from(presets))?;
            } else {
                for preset in &PRESETS {
                    println!("{:<10} {}", preset.name, css::to_css(&preset.spec()));
                }
            }
        }
        Command::History { action } => run_history(action, history, &mut storage, cli.json, &config)?,
    }

    Ok(())
}

fn run_history(
    action: HistoryAction,
    history: History,
    storage: &mut FileStorage,
    json: bool,
    config: &Config,
) -> Result<(), CliError> {
    match action {
        HistoryAction::List => {
            if json {
                let entries: Vec<_> = history
                    .entries()
                    .iter()
                    .enumerate()
                    .map(|(index, saved)| {
                        serde_json::json!({
                            "index": index,
                            "createdAt": saved.created_at,
                            "css": css::to_css(&saved.spec),
                        })
                    })
                    .collect();
                print_json(&serde_json::Value::from(entries))?;
            } else if history.is_empty() {
                eprintln!("no saved gradients");
            } else {
                for (index, saved) in history.entries().iter().enumerate() {
                    println!("{index:>2}  {}", css::to_css(&saved.spec));
                }
            }
        }
        HistoryAction::Save { gradient } => {
            let mut editor = gradient.editor(history)?;
            let outcome = editor.dispatch(EditorCommand::Save {
                created_at: unix_millis(),
            });
            if outcome.history_changed {
                save_history(editor.history(), storage)?;
            }
            report(&editor, outcome.notice.as_ref().map(|n| n.message()), json)?;
        }
        HistoryAction::Show { index, format } => {
            let spec = history.get(index)?.spec.clone();
            let mut editor = Editor::new(history, unix_millis()).with_spec(spec);
            editor.dispatch(EditorCommand::SetFormat(resolve_format(format.as_deref(), config)));
            if json {
                print_json(&serde_json::json!({
                    "index": index,
                    "format": editor.format().tag(),
                    "css": editor.css(),
                    "output": editor.output(),
                }))?;
            } else {
                println!("{}", editor.output());
            }
        }
        HistoryAction::Delete { index } => {
            history.get(index)?;
            let mut editor = Editor::new(history, unix_millis());
            let outcome = editor.dispatch(EditorCommand::DeleteSaved(index));
            if outcome.history_changed {
                save_history(editor.history(), storage)?;
            }
            report(&editor, outcome.notice.as_ref().map(|n| n.message()), json)?;
        }
    }
    Ok(())
}

fn report(editor: &Editor, notice: Option<&str>, json: bool) -> Result<(), CliError> {
    if json {
        print_json(&serde_json::json!({
            "notice": notice,
            "saved": editor.history().len(),
        }))
    } else {
        if let Some(notice) = notice {
            eprintln!("{notice}");
        }
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
