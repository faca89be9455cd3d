use crate::cli::globals::GlobalArgs;
use crate::syft::{Page, SigningKey, UserUpdate};
use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Serialize;

#[derive(Debug)]
pub struct UpdateArgs {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub institution: String,
    pub website: String,
}

impl From<UpdateArgs> for UserUpdate {
    fn from(args: UpdateArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            password: args.password,
            institution: args.institution,
            website: args.website,
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

/// # Errors
/// Returns an error if the call fails.
pub async fn list(globals: &GlobalArgs, page: Page) -> Result<()> {
    let users = globals.client()?.get_all_users(page).await?;

    print_json(&users)
}

/// # Errors
/// Returns an error if the node or signing key are missing, or the lookup fails.
pub async fn view(globals: &GlobalArgs, uid: &str) -> Result<()> {
    let node_id = globals
        .node_id
        .as_deref()
        .context("missing required argument: --node-id")?;

    let signing_key = globals
        .signing_key
        .clone()
        .map(SigningKey::from)
        .context("missing required argument: --signing-key")?;

    let user = globals
        .client()?
        .get_user(uid, &signing_key, node_id)
        .await
        .with_context(|| format!("failed to get user {uid}"))?;

    print_json(&user)
}

/// # Errors
/// Returns an error if the session has no user id or the call fails.
pub async fn me(globals: &GlobalArgs) -> Result<()> {
    let user = globals.client()?.get_self().await?;

    print_json(&user)
}

/// # Errors
/// Returns an error if the call fails.
pub async fn search(globals: &GlobalArgs, name: &str, page: Page) -> Result<()> {
    let users = globals
        .client()?
        .search_users_by_name(name, page)
        .await?;

    print_json(&users)
}

/// # Errors
/// Returns an error if the session has no user id or the call fails.
pub async fn update(globals: &GlobalArgs, args: UpdateArgs) -> Result<()> {
    let result = globals
        .client()?
        .update_current_user(args.into())
        .await?;

    print_json(&result)
}
