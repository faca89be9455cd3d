pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_URL: &str = "url";
pub const ARG_NODE_ID: &str = "node-id";
pub const ARG_SIGNING_KEY: &str = "signing-key";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_PAGE_SIZE: &str = "page-size";
pub const ARG_PAGE_INDEX: &str = "page-index";

pub const DEFAULT_SESSION_FILE: &str = ".syft-session.json";

fn page_args() -> [Arg; 2] {
    [
        Arg::new(ARG_PAGE_SIZE)
            .long("page-size")
            .help("Users per page, 0 for the node default")
            .default_value("0")
            .value_parser(clap::value_parser!(u64)),
        Arg::new(ARG_PAGE_INDEX)
            .long("page-index")
            .help("Page to fetch, starting at 0")
            .default_value("0")
            .value_parser(clap::value_parser!(u64)),
    ]
}

fn update_command() -> Command {
    let field = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .help(help)
            .required(true)
            .allow_hyphen_values(true)
    };

    Command::new("update")
        .about("Update the user of the current session")
        .arg(field("name", "Display name"))
        .arg(field("email", "Email address"))
        .arg(
            field("password", "New password")
                .env("SYFT_PASSWORD")
                .hide_env_values(true),
        )
        .arg(field("institution", "Institution"))
        .arg(field("website", "Website"))
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("syft-users")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_URL)
                .short('u')
                .long("url")
                .help("Node base URL, example: http://localhost:8080")
                .env("SYFT_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_NODE_ID)
                .long("node-id")
                .help("Uid of the node calls are routed to")
                .env("SYFT_NODE_ID")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SIGNING_KEY)
                .long("signing-key")
                .help("Key used to sign calls")
                .env("SYFT_SIGNING_KEY")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long("session-file")
                .help("File holding the current session")
                .env("SYFT_SESSION_FILE")
                .default_value(DEFAULT_SESSION_FILE)
                .global(true),
        )
        .subcommand(
            Command::new("list")
                .about("List users")
                .args(page_args()),
        )
        .subcommand(
            Command::new("view")
                .about("Show a user by uid")
                .arg(Arg::new("uid").help("User uid").required(true)),
        )
        .subcommand(Command::new("me").about("Show the user of the current session"))
        .subcommand(
            Command::new("search")
                .about("Search users by name")
                .arg(Arg::new("name").help("Name to look for").required(true))
                .args(page_args()),
        )
        .subcommand(update_command())
        .subcommand(
            Command::new("session")
                .about("Store the user id of the current session")
                .arg(Arg::new("user-id").help("User uid").required(true)),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYFT_ENV: [(&str, Option<&str>); 7] = [
        ("SYFT_URL", None),
        ("SYFT_NODE_ID", None),
        ("SYFT_SIGNING_KEY", None),
        ("SYFT_SESSION_FILE", None),
        ("SYFT_PASSWORD", None),
        ("SYFT_LOG_LEVEL", None),
        ("RUST_LOG", None),
    ];

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "syft-users");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_globals_from_args() {
        temp_env::with_vars(SYFT_ENV, || {
            let matches = new().get_matches_from(vec![
                "syft-users",
                "--url",
                "http://localhost:8080",
                "--node-id",
                "node-1",
                "--signing-key",
                "key",
                "me",
            ]);

            assert_eq!(
                matches.get_one::<String>(ARG_URL).map(String::as_str),
                Some("http://localhost:8080")
            );
            assert_eq!(
                matches.get_one::<String>(ARG_NODE_ID).map(String::as_str),
                Some("node-1")
            );
            assert_eq!(
                matches.get_one::<String>(ARG_SIGNING_KEY).map(String::as_str),
                Some("key")
            );
            assert_eq!(
                matches.get_one::<String>(ARG_SESSION_FILE).map(String::as_str),
                Some(DEFAULT_SESSION_FILE)
            );
        });
    }

    #[test]
    fn test_globals_after_subcommand() {
        temp_env::with_vars(SYFT_ENV, || {
            let matches =
                new().get_matches_from(vec!["syft-users", "me", "--url", "https://node.tld"]);

            assert_eq!(
                matches.get_one::<String>(ARG_URL).map(String::as_str),
                Some("https://node.tld")
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("SYFT_URL", Some("https://node.tld")),
                ("SYFT_NODE_ID", Some("node-env")),
                ("SYFT_SIGNING_KEY", Some("key-env")),
                ("SYFT_SESSION_FILE", Some("/tmp/session.json")),
                ("SYFT_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["syft-users", "me"]);

                assert_eq!(
                    matches.get_one::<String>(ARG_URL).map(String::as_str),
                    Some("https://node.tld")
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_NODE_ID).map(String::as_str),
                    Some("node-env")
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_SESSION_FILE).map(String::as_str),
                    Some("/tmp/session.json")
                );
                assert_eq!(
                    matches
                        .get_one::<u8>(logging::ARG_VERBOSITY)
                        .copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_page_defaults() {
        temp_env::with_vars(SYFT_ENV, || {
            let matches = new().get_matches_from(vec!["syft-users", "list"]);
            let list = matches.subcommand_matches("list");

            assert_eq!(
                list.and_then(|m| m.get_one::<u64>(ARG_PAGE_SIZE)).copied(),
                Some(0)
            );
            assert_eq!(
                list.and_then(|m| m.get_one::<u64>(ARG_PAGE_INDEX)).copied(),
                Some(0)
            );
        });
    }

    #[test]
    fn test_search_with_page() {
        temp_env::with_vars(SYFT_ENV, || {
            let matches = new().get_matches_from(vec![
                "syft-users",
                "search",
                "Jane",
                "--page-size",
                "10",
                "--page-index",
                "2",
            ]);
            let search = matches.subcommand_matches("search");

            assert_eq!(
                search
                    .and_then(|m| m.get_one::<String>("name"))
                    .map(String::as_str),
                Some("Jane")
            );
            assert_eq!(
                search.and_then(|m| m.get_one::<u64>(ARG_PAGE_SIZE)).copied(),
                Some(10)
            );
            assert_eq!(
                search.and_then(|m| m.get_one::<u64>(ARG_PAGE_INDEX)).copied(),
                Some(2)
            );
        });
    }

    #[test]
    fn test_update_accepts_empty_values() {
        temp_env::with_vars(SYFT_ENV, || {
            let result = new().try_get_matches_from(vec![
                "syft-users",
                "update",
                "--name",
                "",
                "--email",
                "",
                "--password",
                "",
                "--institution",
                "",
                "--website",
                "",
            ]);

            assert!(result.is_ok());
        });
    }

    #[test]
    fn test_update_requires_every_field() {
        temp_env::with_vars(SYFT_ENV, || {
            let result =
                new().try_get_matches_from(vec!["syft-users", "update", "--name", "Jane"]);

            assert!(result.is_err());
        });
    }

    #[test]
    fn test_update_password_from_env() {
        temp_env::with_vars([("SYFT_PASSWORD", Some("from-env"))], || {
            let matches = new().get_matches_from(vec![
                "syft-users",
                "update",
                "--name",
                "Jane",
                "--email",
                "jane@openmined.org",
                "--institution",
                "OpenMined",
                "--website",
                "https://openmined.org",
            ]);

            assert_eq!(
                matches
                    .subcommand_matches("update")
                    .and_then(|m| m.get_one::<String>("password"))
                    .map(String::as_str),
                Some("from-env")
            );
        });
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("SYFT_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["syft-users", "me"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("SYFT_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["syft-users".to_string(), "me".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}
