//! # Seed Data Generator
//!
//! Populates the database with development data for the cafe POS.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p cafe-db --bin seed
//!
//! # Specify database path
//! cargo run -p cafe-db --bin seed -- --db ./data/cafe.db
//! ```
//!
//! ## Generated Data
//! - Three staff accounts: one OWNER, one MANAGER, one WORKER
//! - A cafe menu (coffees, teas, pastries, sandwiches)
//! - A handful of percentage discounts

use chrono::Utc;
use std::env;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use cafe_core::{Discount, Item, Money, Role, User};
use cafe_db::{Database, DbConfig};

/// Staff accounts, one per role.
const STAFF: &[(&str, Role)] = &[
    ("owner", Role::Owner),
    ("manager", Role::Manager),
    ("worker", Role::Worker),
];

/// Menu items with prices in cents.
const MENU: &[(&str, i64)] = &[
    ("Espresso", 250),
    ("Double Espresso", 350),
    ("Americano", 300),
    ("Cappuccino", 400),
    ("Flat White", 425),
    ("Latte", 450),
    ("Mocha", 475),
    ("Cold Brew", 425),
    ("Filter Coffee", 275),
    ("Hot Chocolate", 375),
    ("English Breakfast Tea", 275),
    ("Green Tea", 275),
    ("Chai Latte", 400),
    ("Iced Tea", 300),
    ("Croissant", 325),
    ("Pain au Chocolat", 375),
    ("Blueberry Muffin", 350),
    ("Banana Bread", 325),
    ("Cheesecake Slice", 550),
    ("Chocolate Brownie", 400),
    ("Ham & Cheese Toastie", 650),
    ("Veggie Panini", 625),
    ("Chicken Club Sandwich", 750),
    ("Soup of the Day", 550),
    ("Fruit Salad", 450),
];

/// Discounts as (name, percent).
const DISCOUNTS: &[(&str, f64)] = &[
    ("Student", 10.0),
    ("Staff Friends & Family", 15.0),
    ("Happy Hour", 20.0),
    ("Loyalty Card", 5.0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./cafe_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cafe POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./cafe_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Cafe POS Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Skip if already seeded
    let existing = db.users().list().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} users", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding staff accounts...");
    for (username, role) in STAFF {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            role: *role,
            created_at: Utc::now(),
        };
        db.users().insert(&user).await?;
        println!("  {} ({})", user.username, user.role);
    }

    println!();
    println!("Seeding menu...");
    for (name, price_cents) in MENU {
        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_cents: *price_cents,
            available: true,
            created_at: now,
            updated_at: now,
        };
        db.items().insert(&item).await?;
    }
    println!("  {} items", MENU.len());

    println!();
    println!("Seeding discounts...");
    for (name, percent) in DISCOUNTS {
        let discount = Discount {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            percent_bps: Money::bps_from_percent(*percent),
            active: true,
        };
        db.discounts().insert(&discount).await?;
        println!("  {} ({}%)", name, percent);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
