use std::path::PathBuf;

use anyhow::Context;
use vitrine::{ShowcaseApp, ShowcaseConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ShowcaseConfig::resolve(config_path.as_deref())
        .context("Failed to load configuration")?;
    log::debug!("{:?}", config);

    ShowcaseApp::new(config)?.run()
}
