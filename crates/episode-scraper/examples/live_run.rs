use std::sync::Arc;

use futures::{pin_mut, TryStreamExt};

use episode_scraper::{EpisodeBot, PageFetcher, PodcastClient, ScrapeConfig, SqliteEpisodeStore};

/// Usage: live_run <podcast-url> [scrape-limit] [db-path]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "episode_scraper=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let podcast_url = args
        .next()
        .unwrap_or_else(|| "https://decoding-the-gurus.captivate.fm".to_string());
    let scrape_limit = args.next().map(|s| s.parse::<usize>()).transpose()?;
    let db_path = args.next().unwrap_or_else(|| "episodes.sqlite".to_string());

    let mut config = ScrapeConfig::new(podcast_url);
    config.scrape_limit = scrape_limit;

    let fetcher: Arc<dyn PageFetcher> = Arc::new(PodcastClient::new()?);
    let store = Arc::new(SqliteEpisodeStore::open(&db_path)?);
    let bot = EpisodeBot::new(config, fetcher, store.clone())?;

    println!("Scraping {} into {}\n", bot.config().podcast_url, db_path);

    let new_episodes = bot.run();
    pin_mut!(new_episodes);
    while let Some(ep) = new_episodes.try_next().await? {
        println!("  #{} {} [{}]", ep.number, ep.title, ep.date);
        for (label, href) in &ep.links {
            println!("      {label}: {href}");
        }
    }

    println!("\n{} episodes stored in total.", store.count()?);
    Ok(())
}
