use anyhow::{Context, Result, bail};
use std::path::Path;
use testrun_core::{Config, config::CONFIG_FILE_NAMES};
use tracing::info;

pub fn init_command(project_root: &Path, force: bool, dry_run: bool) -> Result<()> {
    if !project_root.is_dir() {
        bail!("Directory does not exist: {}", project_root.display());
    }

    let config_path = project_root.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config already exists at: {} (use --force to overwrite)",
            config_path.display()
        );
    }

    if dry_run {
        println!("Would create config: {}", config_path.display());
        return Ok(());
    }

    Config::starter()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    info!("Wrote starter config");
    println!("✅ Created config: {}", config_path.display());

    Ok(())
}
