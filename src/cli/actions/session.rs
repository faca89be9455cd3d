use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result};
use tracing::info;

/// Store `user_id` as the current session.
/// # Errors
/// Returns an error if the session file cannot be written.
pub fn save(globals: &GlobalArgs, user_id: &str) -> Result<()> {
    let store = globals.store();

    store
        .save(user_id)
        .with_context(|| format!("failed to save session to {}", store.path().display()))?;

    info!("session saved to {}", store.path().display());

    Ok(())
}
