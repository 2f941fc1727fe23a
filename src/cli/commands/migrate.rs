//! Apply database migrations command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    store.ping().await?;
    println!("Database ready at {}", config.general.database_path);
    Ok(())
}
