use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;

fn config_path(path: Option<&str>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(PathBuf::from(path)),
        None => Config::config_file(),
    }
}

pub fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(&PathBuf::from(path)),
        None => Config::load(),
    }
}

pub async fn show_config(path: Option<&str>) -> Result<()> {
    let config = load_config(path)?;
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration");
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn init_config(path: Option<&str>, force: bool) -> Result<()> {
    let config_file = config_path(path)?;

    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config::default();
    match path {
        Some(_) => config.save_to(&config_file)?,
        None => config.save()?,
    }

    println!("✓ Configuration initialized at: {}", config_file.display());
    println!();
    println!("Set data.use_mock = true to start in mock mode.");

    Ok(())
}
