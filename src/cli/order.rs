use std::path::PathBuf;

use anyhow::Context;
use comedor_menu::{WeeklyMenu, compute_order};
use comedor_recipe::{Catalog, CatalogStore, SqliteCatalogStore, merge_preloaded};
use comedor_report::{Report, order_workbook, save};
use comedor_shared::DayFilter;

use crate::config::Config;

/// Stored catalog merged with the preload, read only.
async fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    crate::migrate::run_migrations(&pool).await?;

    let stored = SqliteCatalogStore::new(pool.clone()).load().await?;
    pool.close().await;

    let preloaded = crate::preload::load_preloaded(config.preload.path.as_deref()).await;

    Ok(Catalog::new(merge_preloaded(preloaded, stored)))
}

/// Compute an order offline from a menu file and write the Pedido sheet.
pub async fn order(
    config: Config,
    menu_path: PathBuf,
    headcount: u32,
    filter: DayFilter,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let document = tokio::fs::read(&menu_path)
        .await
        .with_context(|| format!("Failed to read menu {}", menu_path.display()))?;
    let menu: WeeklyMenu = serde_json::from_slice(&document)
        .with_context(|| format!("Invalid menu {}", menu_path.display()))?;

    let catalog = load_catalog(&config).await?;
    let lines = compute_order(&menu, &catalog, headcount, filter);

    for line in &lines {
        println!("{}\t{}\t{}", line.name, line.quantity, line.unit);
    }

    let out = out.unwrap_or_else(|| PathBuf::from(Report::Order.file_name()));
    save(order_workbook(&lines)?, &out)?;

    tracing::info!(
        headcount,
        day = %filter,
        lines = lines.len(),
        "Order exported to {}",
        out.display()
    );

    Ok(())
}

/// Print the merged catalog as JSON.
pub async fn recipes(config: Config) -> anyhow::Result<()> {
    let catalog = load_catalog(&config).await?;
    println!("{}", serde_json::to_string_pretty(catalog.recipes())?);
    Ok(())
}
