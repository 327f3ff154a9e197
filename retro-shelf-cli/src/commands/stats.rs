use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use retro_shelf_catalog::Category;

use crate::CliError;

use super::format_price;

pub(crate) fn run_stats(conn: &Connection) -> Result<(), CliError> {
    log::info!(
        "{}",
        "Collection".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    let mut total_spend = 0.0;
    for category in Category::ITEMS {
        let items = retro_shelf_db::store::get_items(conn, category)?;
        let wishlist = items.iter().filter(|i| i.is_wishlist).count();
        let owned = items.len() - wishlist;
        total_spend += items
            .iter()
            .filter(|i| !i.is_wishlist)
            .map(|i| i.price)
            .sum::<f64>();

        log::info!(
            "  {:<11} {:>5} owned, {:>4} on the wishlist",
            format!("{category}:"),
            owned,
            wishlist,
        );
    }

    let platforms = retro_shelf_db::registry::list(conn)?;
    log::info!("  {:<11} {:>5}", "platforms:", platforms.len());
    log::info!("  {:<11} {:>9}", "spent:", format_price(total_spend));

    let settings = retro_shelf_sync::SyncSettings::load();
    crate::log_blank();
    match &settings.last_sync_timestamp {
        Some(ts) => log::info!("  Last sync: {ts}"),
        None => log::info!(
            "  Last sync: {}",
            "never".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    if let Some(err) = &settings.last_push_error {
        log::warn!(
            "  {} Last push failed: {err}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }

    Ok(())
}
