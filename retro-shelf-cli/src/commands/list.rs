use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use retro_shelf_catalog::{Category, Item};

use crate::CliError;

use super::format_price;

pub(crate) fn run_list(
    conn: &Connection,
    category: Option<Category>,
    platform: Option<String>,
    wishlist: bool,
    title: Option<String>,
) -> Result<(), CliError> {
    let categories: Vec<Category> = match category {
        Some(c) => {
            if !Category::ITEMS.contains(&c) {
                return Err(CliError::other(format!("'{c}' does not hold items")));
            }
            vec![c]
        }
        None => Category::ITEMS.to_vec(),
    };

    let platform_filter = platform.map(|p| p.to_lowercase());
    let title_filter = title.map(|t| t.to_lowercase());

    let mut shown = 0usize;
    for cat in categories {
        let mut items = retro_shelf_db::store::get_items(conn, cat)?;
        items.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));

        let matching: Vec<&Item> = items
            .iter()
            .filter(|item| {
                platform_filter
                    .as_deref()
                    .is_none_or(|p| item.platform.to_lowercase() == p)
                    && (!wishlist || item.is_wishlist)
                    && title_filter
                        .as_deref()
                        .is_none_or(|t| item.title.to_lowercase().contains(t))
            })
            .collect();

        if matching.is_empty() {
            continue;
        }

        log::info!(
            "{}",
            cat.as_str().if_supports_color(Stdout, |t| t.bold()),
        );
        for item in &matching {
            let mut flags = String::new();
            if item.is_wishlist {
                flags.push_str(" [wishlist]");
            }
            if item.is_validated {
                flags.push_str(" [\u{2714}]");
            }

            log::info!(
                "  {:<40} {:<16} {:>9}{} {}",
                item.title.if_supports_color(Stdout, |t| t.bold()),
                item.platform.if_supports_color(Stdout, |t| t.cyan()),
                format_price(item.price),
                flags,
                item.id
                    .as_deref()
                    .unwrap_or("-")
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        shown += matching.len();
        crate::log_blank();
    }

    if shown == 0 {
        log::info!(
            "{}",
            "No matching items.".if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        log::info!("{shown} item(s)");
    }

    Ok(())
}
