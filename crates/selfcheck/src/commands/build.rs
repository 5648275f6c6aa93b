//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use selfcheck_static::StaticBuilder;

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = ConfigFile::load(config_path)?.build_config(output, minify);
    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages with {} assessments in {}ms",
        result.pages,
        result.assessments,
        result.duration_ms
    );

    if let Some(script) = &result.script {
        tracing::info!("Client entry: {}", script);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
