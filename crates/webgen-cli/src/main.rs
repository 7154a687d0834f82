use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use webgen_client::GenerationClient;
use webgen_core::export;
use webgen_core::{Session, SessionEvent, WebgenConfig};

/// webgen — describe a website, let Gemini write it, browse and preview the files.
///
/// Without --export an interactive terminal UI starts. With --export and a
/// description, one project is generated and packed into a zip without a UI.
#[derive(Parser, Debug)]
#[command(name = "webgen", version, about)]
struct Cli {
    /// Description of the website to generate (pre-fills the TUI).
    #[arg(short, long)]
    description: Option<String>,

    /// Generate without the TUI and write the project archive into this directory.
    #[arg(long, value_name = "DIR", requires = "description")]
    export: Option<PathBuf>,

    /// With --export, also write the files out as a plain folder.
    #[arg(long, requires = "export")]
    unpack: bool,

    /// Config file to use instead of ~/.config/webgen/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let headless = cli.export.is_some();

    init_logging(cli.verbose, headless);

    let config = match cli.config {
        Some(ref path) => WebgenConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => WebgenConfig::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            WebgenConfig::default()
        }),
    };

    tracing::info!("Starting webgen v{}", env!("CARGO_PKG_VERSION"));

    if let (Some(parent), Some(description)) = (cli.export.as_deref(), cli.description.as_deref())
    {
        return run_headless(&config, description, parent, cli.unpack).await;
    }

    let mut app = webgen_tui::App::new(config);
    if let Some(description) = cli.description {
        app.set_initial_description(description);
    }
    app.run().await?;

    tracing::info!("webgen exited cleanly");
    Ok(())
}

fn init_logging(verbose: u8, headless: bool) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    // Log to a file to avoid corrupting the TUI output. If the log file
    // can't be opened, discard logs rather than polluting the alternate screen.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("webgen");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("webgen.log"));

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }
}

/// One generation without a UI: generate, pack the archive, write
/// `preview.html` beside it. Any failure becomes a non-zero exit.
async fn run_headless(
    config: &WebgenConfig,
    description: &str,
    parent: &Path,
    unpack: bool,
) -> Result<()> {
    let session = Session::new();
    session.request_generation(description)?;

    let client = GenerationClient::from_config(config)?;
    eprintln!("Generating with {}...", client.model());

    let session = session.apply(SessionEvent::GenerationStarted);
    let project = client.generate(description).await?;
    let session = session.apply(SessionEvent::GenerationSucceeded(project));
    let files = session.store().files();

    let archive = export::export_project(files, parent, &config.export.project_name)?;
    println!("{}", archive.display());

    if unpack {
        let dir = export::export_directory(files, parent, &config.export.project_name)?;
        println!("{}", dir.display());
    }

    let preview = session.preview(&config.preview.css_framework_url);
    if let Some(html) = preview.html() {
        let preview_path = parent.join("preview.html");
        export::write_document(&preview_path, html)?;
        eprintln!("Preview: {}", preview_path.display());
    }

    eprintln!(
        "Exported {} files to {}",
        session.store().len(),
        archive.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_requires_description() {
        assert!(Cli::try_parse_from(["webgen", "--export", "out"]).is_err());
        let cli = Cli::try_parse_from(["webgen", "--export", "out", "-d", "a blog", "-vv"]).unwrap();
        assert_eq!(cli.export, Some(PathBuf::from("out")));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.unpack);
    }

    #[test]
    fn unpack_requires_export() {
        assert!(Cli::try_parse_from(["webgen", "-d", "a blog", "--unpack"]).is_err());
        let cli =
            Cli::try_parse_from(["webgen", "--export", "out", "-d", "a blog", "--unpack"]).unwrap();
        assert!(cli.unpack);
    }

    #[tokio::test]
    async fn headless_rejects_blank_description() {
        let tmp = std::env::temp_dir();
        let err = run_headless(&WebgenConfig::default(), "   ", &tmp, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("project description"));
    }
}
