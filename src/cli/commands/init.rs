//! Create default config command handler

use std::path::Path;

use crate::config::Config;

pub fn cmd_init(path: &Path) -> anyhow::Result<()> {
    if Config::create_default_if_missing(path)? {
        println!("Created default config at {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(())
}
