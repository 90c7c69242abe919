//! Markupbook command-line front end

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use markupbook::core::config::AppConfig;
use markupbook::Notebook;

#[derive(Parser)]
#[command(
    name = "markupbook",
    about = "Edit the pages of a single-file markdown notebook",
    version
)]
struct Cli {
    /// Notebook directory (overrides config and MARKUPBOOK_DIR)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List page titles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a page's content
    Show { title: String },

    /// Replace a page's title and content
    #[command(group(ArgGroup::new("body").required(true).args(["html", "file"])))]
    Save {
        old_title: String,
        new_title: String,

        /// New content
        #[arg(long)]
        html: Option<String>,

        /// Read new content from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Only save if the notebook still has this ETag
        #[arg(long)]
        if_match: Option<String>,
    },

    /// Print the notebook ETag
    Etag,

    /// Append a new page
    New { title: String },

    /// Rename a page, keeping its content
    Rename { old_title: String, new_title: String },

    /// Commit the notebook into git
    Commit {
        #[arg(short, long)]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else {
        tracing_subscriber::filter::LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    }
    .with_env();
    if let Some(dir) = cli.dir {
        config.notebook_dir = dir;
    }
    tracing::debug!("Using notebook dir: {}", config.notebook_dir.display());

    let notebook = Notebook::new(config);
    run(&notebook, cli.command)
}

fn run(notebook: &Notebook, command: Commands) -> Result<()> {
    match command {
        Commands::List { json } => {
            let pages = notebook.list_pages()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else {
                for title in pages {
                    println!("{title}");
                }
            }
        }
        Commands::Show { title } => {
            print!("{}", notebook.load_page(&title)?);
        }
        Commands::Save {
            old_title,
            new_title,
            html,
            file,
            if_match,
        } => {
            let html = match (html, file) {
                (Some(html), _) => html,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?,
                (None, None) => anyhow::bail!("either --html or --file is required"),
            };
            notebook.save_page(&old_title, &new_title, &html, if_match.as_deref())?;
        }
        Commands::Etag => {
            println!("{}", notebook.etag()?);
        }
        Commands::New { title } => {
            notebook.new_page(&title)?;
        }
        Commands::Rename {
            old_title,
            new_title,
        } => {
            notebook.rename_page(&old_title, &new_title)?;
        }
        Commands::Commit { message } => {
            println!("{}", notebook.snapshot(&message)?);
        }
    }
    Ok(())
}
