use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use webcms::application::{CmsApi, PageEditingService, SiteService};
use webcms::infrastructure::{
    init_tracing, AppConfig, SqlitePageRepository, SqliteSiteSettingsRepository,
};

/// Serves JSON requests from stdin, one per line, answering each on stdout.
#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config.log_filter);

    let pages = SqlitePageRepository::new_with_path(&config.database)
        .with_context(|| format!("Failed to open page store {}", config.database.display()))?;
    let settings =
        SqliteSiteSettingsRepository::new_with_path(&config.database, &config.default_site_name)
            .with_context(|| {
                format!(
                    "Failed to open site settings {}",
                    config.database.display()
                )
            })?;

    let mut api = CmsApi::new(PageEditingService::new(pages), SiteService::new(settings));

    info!(
        "Serving requests on stdin (database: {}, in-memory: {})",
        config.database.display(),
        config.is_in_memory()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read request")? {
        if line.trim().is_empty() {
            continue;
        }

        let today = chrono::Local::now().date_naive();
        let response = api.handle_json(&line, today);

        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}
