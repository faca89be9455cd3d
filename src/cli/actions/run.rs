use crate::cli::{
    actions::{session, users, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::List(page) => users::list(globals, page).await,
        Action::View { uid } => users::view(globals, &uid).await,
        Action::Me => users::me(globals).await,
        Action::Search { name, page } => users::search(globals, &name, page).await,
        Action::Update(args) => users::update(globals, args).await,
        Action::Session { user_id } => session::save(globals, &user_id),
    }
}
