//! Schema migration runner for FeeDesk.
//!
//! Reads `DATABASE_URL`. Usage:
//!   migrator up      - apply pending migrations
//!   migrator down    - roll back the last migration
//!   migrator status  - list applied and pending migrations
//!   migrator fresh   - drop everything and re-apply

use feedesk_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
