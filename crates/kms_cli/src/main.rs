//! `kms` command-line front end.
//!
//! # Responsibility
//! - Translate commands into repository calls and print the results.
//! - Resolve config file, flags and defaults into one `KmsConfig`.
//!
//! # Invariants
//! - All state changes go through `ArticleRepository`.
//! - Failures are printed to stderr with a non-zero exit code, never panics.

mod render;

use clap::{Args, Parser, Subcommand};
use kms_core::{
    init_logging, parse_tag_input, write_export, ArticleInput, ArticleRepository, ArticleStatus,
    BrowseSession, CategoryFilter, KmsConfig, SqliteKvStore, StatusFilter,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "kms", version, about = "Knowledge-base admin tool")]
struct Cli {
    /// SQLite file holding the knowledge base.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one page of articles.
    List {
        /// `all` or a category id.
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Search titles, content and tags.
    Search { query: String },
    /// List articles by status (`all|published|draft`).
    Status { filter: StatusFilter },
    /// Print one article without counting a view.
    Show { id: u64 },
    /// Print one article and count the view.
    View { id: u64 },
    /// Create an article.
    Create(ArticleArgs),
    /// Replace an article's editable fields.
    Update {
        id: u64,
        #[command(flatten)]
        fields: ArticleArgs,
    },
    /// Delete an article.
    Delete {
        id: u64,
        /// Confirm the deletion; it cannot be undone.
        #[arg(long)]
        yes: bool,
    },
    /// Dashboard counters.
    Stats,
    /// Categories with article counts.
    Categories,
    /// Write all articles to `knowledge-base-articles.json`.
    Export {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Debug, Args)]
struct ArticleArgs {
    #[arg(long)]
    title: String,
    /// Category id.
    #[arg(long)]
    category: Option<u64>,
    #[arg(long)]
    content: String,
    /// Comma-separated tags.
    #[arg(long, default_value = "")]
    tags: String,
    #[arg(long, default_value = "draft")]
    status: ArticleStatus,
}

impl ArticleArgs {
    fn to_input(&self) -> ArticleInput {
        ArticleInput {
            title: self.title.clone(),
            category_id: self.category,
            content: self.content.clone(),
            tags: parse_tag_input(&self.tags),
            status: self.status,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<KmsConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => KmsConfig::load(path)?,
        None => KmsConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&cli)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        kms_core::core_version()
    );

    let store = SqliteKvStore::open(&config.db_path)?;
    let mut repo = ArticleRepository::load(store);

    match cli.command {
        Command::List {
            category,
            page,
            page_size,
        } => {
            let mut session = BrowseSession::new(page_size.unwrap_or(config.page_size));
            session.filter_by_category(category);
            session.go_to_page(page);
            println!(
                "{}",
                render::page(&session.current_listing(&repo), &session.pagination(&repo))
            );
        }
        Command::Search { query } => match repo.search(&query) {
            Some(hits) => println!("{}", render::article_rows(&hits)),
            None => {
                let session = BrowseSession::new(config.page_size);
                println!(
                    "{}",
                    render::page(&session.current_listing(&repo), &session.pagination(&repo))
                );
            }
        },
        Command::Status { filter } => {
            println!("{}", render::article_rows(&repo.filter_by_status(filter)));
        }
        Command::Show { id } => match repo.get_by_id(id) {
            Some(article) => println!("{}", render::article_detail(article)),
            None => return Err(kms_core::RepoError::NotFound(id).into()),
        },
        Command::View { id } => {
            let article = repo.view(id)?;
            println!("{}", render::article_detail(&article));
        }
        Command::Create(fields) => {
            let article = repo.create(&fields.to_input())?;
            println!("Article created successfully (id {})", article.id);
        }
        Command::Update { id, fields } => {
            repo.update(id, &fields.to_input())?;
            println!("Article updated successfully (id {id})");
        }
        Command::Delete { id, yes } => {
            if !yes {
                return Err("refusing to delete without --yes; this action cannot be undone".into());
            }
            repo.delete(id)?;
            println!("Article deleted successfully (id {id})");
        }
        Command::Stats => println!("{}", render::stats(&repo.stats())),
        Command::Categories => println!("{}", render::categories(repo.categories())),
        Command::Export { dir } => {
            let path = write_export(&dir, repo.articles())?;
            println!("Articles exported to {}", path.display());
        }
    }

    Ok(())
}
