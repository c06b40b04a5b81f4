use anyhow::{Context, Result};
use client::{Controller, FileTokenStore, Session, TodoApi};
use shared::config::ClientConfig;
use tracing::debug;

use crate::display;

/// Builds a controller whose session lives in the configured token file and
/// whose status changes are printed as they happen.
pub fn open_controller(config: &ClientConfig) -> Result<Controller<FileTokenStore>> {
    let store = config
        .session_path
        .clone()
        .map_or_else(FileTokenStore::at_default_path, FileTokenStore::new);
    debug!(path = %store.path().display(), "opening session");

    let session = Session::init(store).context("failed to open the stored session")?;
    let api = TodoApi::new(config.base_url.clone(), session)
        .context("failed to create the API client")?;

    Ok(Controller::new(api).with_status_listener(display::print_status))
}
