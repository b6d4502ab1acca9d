#[macro_use]
extern crate log;

mod catalog;
mod content;
mod shelf;

use clap::{Parser, Subcommand};
use omniread::infrastructure::{
    config::Config,
    database,
    domain::repositories::{
        history::HistoryRepositoryImpl, library::LibraryRepositoryImpl, store::SqliteStore,
    },
};
use omniread_catalog::AniList;
use omniread_lib::prelude::{LibraryStatus, SourceTag};
use serde::Serialize;

#[derive(Parser)]
#[clap(version, about = "Browse, read and track works through an OmniRead relay")]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
    #[clap(subcommand)]
    subcmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Trending works from the catalog
    Trending {
        #[clap(long, default_value_t = 1)]
        page: i64,
        #[clap(long, default_value_t = 20)]
        per_page: i64,
    },
    Search {
        query: String,
    },
    /// Catalog details of a work
    Info {
        id: i64,
    },
    /// Chapters of a work, from the primary source or the fallback
    Chapters {
        id: i64,
    },
    Pages {
        chapter_id: String,
        #[clap(long, default_value = "mangadex")]
        source: SourceTag,
    },
    Library {
        #[clap(subcommand)]
        cmd: LibraryCommand,
    },
    History {
        #[clap(subcommand)]
        cmd: HistoryCommand,
    },
}

#[derive(Subcommand)]
enum LibraryCommand {
    List,
    Add {
        id: i64,
        #[clap(long, default_value = "reading")]
        status: LibraryStatus,
    },
    Remove {
        id: i64,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    List,
    Record {
        id: i64,
        chapter_id: String,
        page: usize,
    },
}

fn print<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let opts: Opts = Opts::parse();
    let config = Config::open(opts.config)?;
    debug!("config: {:?}", config);

    let anilist = AniList::new(config.anilist_endpoint.clone());

    match opts.subcmd {
        Command::Trending { page, per_page } => catalog::trending(&anilist, page, per_page).await?,
        Command::Search { query } => catalog::search(&anilist, &query).await?,
        Command::Info { id } => catalog::info(&anilist, id).await?,
        Command::Chapters { id } => {
            let work = catalog::work(&anilist, id).await?;
            let store = open_store(&config).await?;
            content::chapters(&config, store, &work).await?;
        }
        Command::Pages { chapter_id, source } => {
            let store = open_store(&config).await?;
            content::pages(&config, store, chapter_id, source).await?;
        }
        Command::Library { cmd } => {
            let repo = LibraryRepositoryImpl::new(open_store(&config).await?);
            match cmd {
                LibraryCommand::List => shelf::library(repo).await?,
                LibraryCommand::Add { id, status } => {
                    let work = catalog::work(&anilist, id).await?;
                    shelf::add(repo, work, status).await?;
                }
                LibraryCommand::Remove { id } => shelf::remove(repo, id).await?,
            }
        }
        Command::History { cmd } => {
            let repo = HistoryRepositoryImpl::new(open_store(&config).await?);
            match cmd {
                HistoryCommand::List => shelf::history(repo).await?,
                HistoryCommand::Record {
                    id,
                    chapter_id,
                    page,
                } => shelf::record(repo, id, chapter_id, page).await?,
            }
        }
    }

    Ok(())
}

async fn open_store(config: &Config) -> Result<SqliteStore, anyhow::Error> {
    let pool = database::establish_connection(&config.database_path, config.create_database).await?;

    Ok(SqliteStore::new(pool))
}
