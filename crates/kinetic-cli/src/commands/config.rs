use std::path::Path;

use anyhow::{bail, Context, Result};

use kinetic_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, default: bool) -> Result<()> {
    if default {
        print!("{}", AppConfig::default().to_toml()?);
        return Ok(());
    }

    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    println!("# {}", source);
    print!("{}", config.to_toml()?);

    Ok(())
}

/// Write the built-in defaults to `path`
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists, pass --force to overwrite it", path.display());
    }

    AppConfig::default()
        .save_to(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "Wrote default configuration");
    println!("Wrote {}", path.display());

    Ok(())
}
