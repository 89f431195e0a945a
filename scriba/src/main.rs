//! Scriba CLI - remote audio transcription and transcript exports
mod fmt;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize as _;
use scriba_core::export::{self, ExportKind};
use scriba_core::{
    parse_video_url, passphrase_digest, playback, AppConfig, SessionState, Transcript,
};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::fmt::LevelFormatter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_env_filter(EnvFilter::builder().parse("info")?)
            .event_format(LevelFormatter)
            .with_writer(std::io::stderr)
            .init();
    }
    debug!("Command line arguments: {:?}", cli);

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command);
    }

    // Handle transcription (default behavior)
    let Some(audio_file) = cli.audio_file.clone() else {
        error!("No audio file specified. Please provide an .mp3 file to transcribe.");
        process::exit(1);
    };

    if !audio_file.exists() {
        error!("Audio file not found: {}", audio_file.display());
        process::exit(1);
    }

    let mut config = AppConfig::from_env();
    if let Some(ref url) = cli.base_url {
        config = config.with_api_url(url.clone());
    }
    if let Some(ref model) = cli.model {
        config = config.with_model(model.clone());
    }

    let Some(api_key) = cli.api_key.clone().or_else(|| config.api_key.clone()) else {
        error!(
            "No API key. Set {} or pass {}.",
            "OPENAI_API_KEY".cyan(),
            "--api-key".cyan()
        );
        process::exit(1);
    };

    let file_name = audio_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio.mp3".to_string());
    let audio = std::fs::read(&audio_file)?;

    let mut session = SessionState::new();
    session.unlock_with(api_key);

    if cli.verbose {
        println!("{}", "Scriba - Audio Transcription".blue().bold());
        println!("Endpoint: {}", config.api_url);
        println!("Model: {}", config.model);
        println!();
    }

    let spinner = transcription_spinner();
    let invoked = match scriba_core::process_upload(
        &mut session,
        audio,
        &file_name,
        cli.word_timestamps,
        &config,
    )
    .await
    {
        Ok(invoked) => invoked,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Transcription failed: {}", e);
            process::exit(1);
        }
    };
    spinner.finish_and_clear();

    if !invoked {
        info!("File already transcribed in this session, reusing stored transcript");
    }

    // Prepare output content
    let output_content = match cli.output {
        OutputFormat::Text => session.text.clone(),
        OutputFormat::Json => {
            let transcript = Transcript {
                text: session.text.clone(),
                words: session.words.clone(),
                segments: session.segments.clone(),
            };
            serde_json::to_string_pretty(&transcript)?
        }
        OutputFormat::Html => export::html_document(&file_name, &session.segments),
    };

    // Write output to file or stdout
    if let Some(ref output_file) = cli.output_file {
        std::fs::write(output_file, &output_content)?;
        println!(
            "{} Output written to: {}",
            "Success:".green().bold(),
            output_file.display()
        );
    } else {
        println!("{}", output_content);
    }

    // Write the full export set if requested
    if let Some(ref dir) = cli.export_dir {
        std::fs::create_dir_all(dir)?;
        write_all_exports(dir, &file_name, &session)?;
    }

    // Synchronized playback page
    if let Some(ref url) = cli.video_url {
        write_playback_page(
            cli.export_dir.as_deref(),
            &file_name,
            &session.segments,
            url,
            0,
            None,
        )?;
    }

    if cli.verbose {
        println!();
        println!("{}", "Transcription Summary:".green().bold());
        println!("Segments: {}", session.segments.len());
        println!("Words: {}", session.words.len());
        println!("Characters: {}", session.text.len());
    }

    Ok(())
}

const ABOUT: &str = "Transcribe audio through a speech-to-text API and export synced transcripts";

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = ABOUT)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the .mp3 file to transcribe (when no subcommand)
    #[arg(value_name = "AUDIO_FILE")]
    audio_file: Option<PathBuf>,

    /// Request word-level timestamps in addition to segments
    #[arg(long)]
    word_timestamps: bool,

    /// Output format: text, json, html
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'f', long = "output-file")]
    output_file: Option<PathBuf>,

    /// Write the full export set (_text.txt, _words.json, _segments.json, .html) here
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// YouTube URL; also writes a synchronized playback page
    #[arg(long)]
    video_url: Option<String>,

    /// Transcription model (default: whisper-1 or STT_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// API base URL (default: https://api.openai.com/v1 or STT_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// API key (default: OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a synchronized playback page from exported segment JSON
    Playback {
        /// Path to a *_segments.json export (richer records are filtered)
        #[arg(long)]
        segments: PathBuf,

        /// YouTube watch or embed URL
        #[arg(long)]
        url: String,

        /// Initial player offset in seconds
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Output file path (default: playback.html)
        #[arg(short = 'f', long = "output-file")]
        output_file: Option<PathBuf>,
    },
    /// Operator passphrase helpers
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommands {
    /// Print the digest to store in PWD_HASH
    Hash {
        /// The passphrase to hash
        #[arg(value_name = "PASSPHRASE")]
        passphrase: String,

        /// Salt to prepend (default: PWD_SALT)
        #[arg(long)]
        salt: Option<String>,
    },
    /// Check a passphrase against PWD_SALT / PWD_HASH
    Check {
        /// The passphrase to check
        #[arg(value_name = "PASSPHRASE")]
        passphrase: String,
    },
}

/// Output format options
#[derive(Clone, Debug, clap::ValueEnum)]
enum OutputFormat {
    /// Plain transcript text
    Text,
    /// JSON with words and segments
    Json,
    /// Standalone HTML transcript document
    Html,
}

fn transcription_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Transcribing audio...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn write_all_exports(dir: &Path, file_name: &str, session: &SessionState) -> anyhow::Result<()> {
    for kind in [
        ExportKind::Text,
        ExportKind::Words,
        ExportKind::Segments,
        ExportKind::Html,
    ] {
        match export::write_export(dir, file_name, kind, session)? {
            Some(path) => println!(
                "{} {} export: {}",
                "Success:".green().bold(),
                kind,
                path.display()
            ),
            None => debug!("nothing to export for {}", kind),
        }
    }
    Ok(())
}

fn write_playback_page(
    dir: Option<&Path>,
    title: &str,
    segments: &[scriba_core::TranscriptSegment],
    url: &str,
    offset: u64,
    output_file: Option<&Path>,
) -> anyhow::Result<()> {
    let Some(video) = parse_video_url(url) else {
        warn!("Not a recognized YouTube URL, playback page omitted: {}", url);
        return Ok(());
    };
    if segments.is_empty() {
        warn!("No segments available, playback page omitted");
        return Ok(());
    }
    let html = playback::playback_document(title, segments, &video, offset);
    let path = match output_file {
        Some(path) => path.to_path_buf(),
        None => dir
            .unwrap_or_else(|| Path::new("."))
            .join(format!("{}_playback.html", title)),
    };
    std::fs::write(&path, html)?;
    println!(
        "{} Playback page: {}",
        "Success:".green().bold(),
        path.display()
    );
    Ok(())
}

/// Handle subcommands
fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Playback {
            segments,
            url,
            offset,
            output_file,
        } => {
            let raw = std::fs::read_to_string(&segments)?;
            let parsed = export::parse_segments_json(&raw)
                .map_err(|e| anyhow::anyhow!("Invalid segments JSON {}: {}", segments.display(), e))?;

            let mut session = SessionState::new();
            session.load_segments(parsed);
            session.set_video_offset(offset);

            if parse_video_url(&url).is_none() {
                error!("Not a recognized YouTube URL: {}", url);
                process::exit(1);
            }
            let title = segments
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "playback".to_string());
            let output_file = output_file.unwrap_or_else(|| PathBuf::from("playback.html"));
            write_playback_page(
                None,
                &title,
                &session.segments,
                &url,
                session.video_offset,
                Some(&output_file),
            )?;
            Ok(())
        }
        Commands::Auth { command } => handle_auth_command(command),
    }
}

/// Handle passphrase subcommands
fn handle_auth_command(command: AuthCommands) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    match command {
        AuthCommands::Hash { passphrase, salt } => {
            let Some(salt) = salt.or_else(|| config.password_salt.clone()) else {
                error!("No salt. Set {} or pass {}.", "PWD_SALT".cyan(), "--salt".cyan());
                process::exit(1);
            };
            println!("{}", passphrase_digest(&salt, &passphrase));
            Ok(())
        }
        AuthCommands::Check { passphrase } => {
            let (Some(salt), Some(hash)) =
                (config.password_salt.clone(), config.password_hash.clone())
            else {
                error!(
                    "Both {} and {} must be set to check a passphrase.",
                    "PWD_SALT".cyan(),
                    "PWD_HASH".cyan()
                );
                process::exit(1);
            };
            if passphrase_digest(&salt, &passphrase) == hash.to_lowercase() {
                println!("{} Passphrase accepted.", "Success:".green().bold());
                Ok(())
            } else {
                println!("{} Passphrase rejected.", "Error:".red().bold());
                process::exit(1);
            }
        }
    }
}
