//! # Galley Demo
//!
//! Seeds a store with the sample restaurant and walks through the admin
//! operations, printing the dashboard before and after.
//!
//! ## Usage
//! ```bash
//! # Defaults (500ms confirmation, 10% failure rate)
//! cargo run -p galley-store --bin galley
//!
//! # Toggle a specific item with a custom config
//! cargo run -p galley-store --bin galley -- --item 4 --config ./galley.toml
//!
//! # Force a rollback
//! GALLEY_FAILURE_PROBABILITY=1 cargo run -p galley-store --bin galley
//! ```

use std::env;
use std::path::PathBuf;

use chrono::Utc;
use galley_core::{MenuCategory, Money, NewMenuItem, OrderStatus};
use galley_store::{GalleyConfig, RestaurantStore, SeedData, StoreServices, ToggleOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut item_id = String::from("3");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--item" | "-i" => {
                if i + 1 < args.len() {
                    item_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Galley Restaurant Admin Demo");
                println!();
                println!("Usage: galley [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -i, --item <ID>      Menu item to toggle (default: 3)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = GalleyConfig::load_or_default(config_path);
    init_tracing(&config.logging.filter);

    let store = RestaurantStore::new(
        SeedData::sample(Utc::now()),
        StoreServices::system(),
        config.store_settings(),
    );

    println!("Galley Restaurant Admin");
    println!("=======================");
    println!("{}", serde_json::to_string_pretty(&store.dashboard())?);
    println!();

    let added = store.add_menu_item(NewMenuItem {
        name: "Arancini".to_string(),
        description: "Fried risotto balls with mozzarella".to_string(),
        category: MenuCategory::Appetizer,
        price: Money::from_cents(950),
        ingredients: galley_core::parse_ingredients("arborio rice, mozzarella, breadcrumbs"),
        is_available: true,
        preparation_time: 15,
        image_url: String::new(),
    });
    println!("Added {} ({}) at {}", added.name, added.id, added.price);

    let order = store.update_order_status("ord-1", OrderStatus::Preparing)?;
    println!("{} is now {}", order.order_number, order.status);

    let pending = store.toggle_availability(&item_id)?;
    if let Some(item) = store.menu_item(&item_id) {
        println!(
            "Toggled {} → available: {} (confirming...)",
            item.name, item.is_available
        );
    }

    match pending.outcome().await? {
        ToggleOutcome::Committed => println!("✓ Availability confirmed"),
        ToggleOutcome::RolledBack => println!("⚠ Confirmation failed, menu restored"),
    }

    let stats = store.compute_stats();
    info!(?stats, "Final stats");
    println!();
    println!("Orders:     {} ({} pending)", stats.total_orders, stats.pending_orders);
    println!("Revenue:    {}", stats.total_revenue);
    println!("Menu items: {} ({} available)", stats.menu_items, stats.available_items);

    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(configured: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
