mod config;
mod failure_log;
mod selection;
mod tag_list;

use std::path::PathBuf;
use std::time::Duration;

use anilist::AnilistClient;
use clap::Parser;
use resolver::{
    fetch_season, ingest, resolve_genre_code, Ingestor, Orchestrator, Season, SonarrIngestor,
};
use sonarr::SonarrClient;
use throttle::RateGovernor;
use tmdb::TmdbClient;

use crate::config::Settings;
use crate::tag_list::TagListStyle;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "anime-season")]
#[command(version = env!("APP_VERSION"))]
#[command(about = "Bulk add a season of anime to Sonarr", long_about = None)]
#[command(after_help = "Configure the tool with config.toml.")]
struct Cli {
    /// Year of the anime season
    year: Option<i32>,

    /// Season of the year (winter, spring, summer, fall)
    season: Option<Season>,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Print AniList genres and tags, then exit
    #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "fancy")]
    tag_list: Option<TagListStyle>,

    /// Add every resolved title without asking
    #[arg(long)]
    select_all: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let http = http_client()?;

    if let Some(style) = cli.tag_list {
        let vocabulary = AnilistClient::new(http).vocabulary().await?;
        print!("{}", tag_list::render(&vocabulary, style));
        return Ok(());
    }

    let (Some(year), Some(season)) = (cli.year, cli.season) else {
        eprintln!("Error: use --help to see usage.");
        std::process::exit(1);
    };

    let settings = Settings::load(&cli.config).await?;
    settings.validate()?;

    run(http, &settings, year, season, cli.select_all).await
}

fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("anime-season/", env!("APP_VERSION")))
        .build()
}

async fn run(
    http: reqwest::Client,
    settings: &Settings,
    year: i32,
    season: Season,
    select_all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = AnilistClient::new(http.clone());
    let target = TmdbClient::new(http.clone(), settings.tmdb.api_key.as_str()).with_governor(
        RateGovernor::new("tmdb")
            .with_min_interval(Duration::from_millis(settings.tmdb.cooldown_ms)),
    );

    println!(
        "===== Anime Season For Sonarr =====\nYear: {}\nSeason: {}\n\nSearching...\n",
        year,
        season.label()
    );

    let genre_code = resolve_genre_code(&target, &settings.script.genre).await?;
    let titles = fetch_season(&source, &settings.season_query(year, season)).await?;

    let report = Orchestrator::new(&source, &target, genre_code)
        .with_countries(settings.script.target_countries.iter().cloned())
        .with_max_chain_depth(settings.script.max_chain_depth)
        .run(titles)
        .await;

    for failed in &report.failed {
        println!("{}", failed.reason);
    }
    if settings.script.log && !report.failed.is_empty() {
        failure_log::append(&settings.script.log_file, year, season, &report.failed).await?;
    }

    if report.succeeded.is_empty() {
        eprintln!(
            "The search concluded with no anime that has a TVDB ID, so nothing can get added to Sonarr."
        );
        std::process::exit(1);
    }

    let sonarr = SonarrClient::new(
        http,
        settings.sonarr.base_url.as_str(),
        settings.sonarr.api_key.as_str(),
    );
    let ingestor = SonarrIngestor::new(sonarr, settings.add_options());
    let existing = match ingestor.existing_ids().await {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("-----\n{}\nCan't connect to Sonarr. Possible fix: check the URL and API key.", e);
            std::process::exit(1);
        }
    };

    let selected = if select_all || settings.script.select_all {
        println!("Select all enabled. Adding all shows...");
        report.secondary_ids()
    } else {
        selection::select(&report.succeeded, &existing, settings.script.romaji)?
    };

    let outcome = ingest(&ingestor, &selected).await?;
    println!("{}", outcome);
    Ok(())
}
