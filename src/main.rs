use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use sketchpage::config::Config;
use sketchpage::export::{self, TextExportConfig};
use sketchpage::input::{DrawingSession, SessionSettings};
use sketchpage::replay::ReplayScript;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchpage")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SKETCHPAGE_GIT_HASH"), ")"),
    about = "Freehand drawing surface with pan/zoom, pen styles and snapshot undo"
)]
struct Cli {
    /// Replay recorded pointer and toolbar input from a JSON script
    #[arg(long, short = 'r', value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Write the finished page to a PNG file
    #[arg(long, short = 'o', value_name = "PNG", requires = "replay")]
    output: Option<PathBuf>,

    /// Write the converted text to a file
    #[arg(long, value_name = "PATH", requires = "replay")]
    text_out: Option<PathBuf>,

    /// Save the converted text to the configured export directory
    #[arg(long, action = ArgAction::SetTrue, requires = "replay")]
    save_text: bool,

    /// Copy the converted text to the Wayland clipboard
    #[arg(long, action = ArgAction::SetTrue, requires = "replay")]
    copy_text: bool,

    /// Print the converted text to stdout
    #[arg(long, action = ArgAction::SetTrue, requires = "replay")]
    print_text: bool,

    /// Use a config file other than ~/.config/sketchpage/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the documented default config and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "replay")]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::get_config_path()?,
        };
        Config::create_default_file(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let Some(script_path) = cli.replay.as_deref() else {
        print_usage();
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let script = ReplayScript::load(script_path)?;

    let mut session = DrawingSession::new(SessionSettings::from_config(&config));
    if !session.initialize_surface() {
        return Err(anyhow!("Drawing surface could not be created"));
    }
    script.apply(&mut session);

    if let Some(output) = &cli.output {
        let surface = session
            .surface()
            .context("Drawing surface disappeared during replay")?;
        surface
            .write_png(output)
            .with_context(|| format!("Failed to write page to {}", output.display()))?;
    }

    let text = session.converted_text();

    if cli.print_text {
        print!("{text}");
    }

    if let Some(path) = &cli.text_out {
        export::write_text_to(path, text)
            .with_context(|| format!("Failed to write text to {}", path.display()))?;
        log::info!("Converted text written to {}", path.display());
    }

    if cli.save_text {
        let saved = export::save_text(text, &TextExportConfig::from(&config.export))
            .context("Failed to save converted text")?;
        println!("Saved converted text to {}", saved.display());
    }

    if cli.copy_text {
        export::copy_text_to_clipboard(text).context("Failed to copy converted text")?;
        log::info!("Converted text copied to clipboard");
    }

    Ok(())
}

fn print_usage() {
    println!("sketchpage: Freehand drawing surface with pan/zoom, pen styles and snapshot undo");
    println!();
    println!("Usage:");
    println!("  sketchpage --replay input.json --output page.png   Replay input and save the page");
    println!("  sketchpage --replay input.json --print-text        Replay input and print the text");
    println!("  sketchpage --init-config                           Write the default config");
    println!("  sketchpage --help                                  Show help");
    println!();
    println!("Replay scripts are JSON:");
    println!(
        r#"  {{ "actions": [ {{ "action": "pointer_down", "x": 10, "y": 10 }}, {{ "action": "pointer_up" }} ] }}"#
    );
    println!();
    println!("Set RUST_LOG=info to see stroke and history events.");
}
