use crate::cli::{
    actions::Action,
    commands::{ARG_PAGE_INDEX, ARG_PAGE_SIZE},
};
use crate::syft::Page;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

fn page(matches: &clap::ArgMatches) -> Page {
    Page::new(
        matches.get_one::<u64>(ARG_PAGE_SIZE).copied().unwrap_or(0),
        matches.get_one::<u64>(ARG_PAGE_INDEX).copied().unwrap_or(0),
    )
}

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: {name}"))
}

/// # Errors
/// Returns an error if the subcommand or one of its required arguments is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("list", sub_m)) => Ok(Action::List(page(sub_m))),
        Some(("view", sub_m)) => Ok(Action::View {
            uid: required(sub_m, "uid")?,
        }),
        Some(("me", _)) => Ok(Action::Me),
        Some(("search", sub_m)) => Ok(Action::Search {
            name: required(sub_m, "name")?,
            page: page(sub_m),
        }),
        Some(("update", sub_m)) => Ok(Action::update(
            required(sub_m, "name")?,
            required(sub_m, "email")?,
            SecretString::from(required(sub_m, "password")?),
            required(sub_m, "institution")?,
            required(sub_m, "website")?,
        )),
        Some(("session", sub_m)) => Ok(Action::Session {
            user_id: required(sub_m, "user-id")?,
        }),
        _ => Err(anyhow!("missing subcommand")),
    }
}
