use crate::cli::commands::{
    ARG_NODE_ID, ARG_SESSION_FILE, ARG_SIGNING_KEY, ARG_URL, DEFAULT_SESSION_FILE,
};
use crate::syft::{FileStore, HttpDispatcher, SigningKey, UserClient};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub url: Option<String>,
    pub node_id: Option<String>,
    pub signing_key: Option<SecretString>,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            node_id: None,
            signing_key: None,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }

    #[must_use]
    pub fn from_matches(matches: &clap::ArgMatches) -> Self {
        Self {
            url: matches.get_one::<String>(ARG_URL).cloned(),
            node_id: matches.get_one::<String>(ARG_NODE_ID).cloned(),
            signing_key: matches
                .get_one::<String>(ARG_SIGNING_KEY)
                .cloned()
                .map(SecretString::from),
            session_file: matches
                .get_one::<String>(ARG_SESSION_FILE)
                .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from),
        }
    }

    pub fn set_signing_key(&mut self, signing_key: SecretString) {
        self.signing_key = Some(signing_key);
    }

    #[must_use]
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.session_file)
    }

    /// # Errors
    /// Returns an error if no node URL was given or it is not a valid http(s) URL.
    pub fn dispatcher(&self) -> Result<HttpDispatcher> {
        let url = self
            .url
            .as_deref()
            .context("missing required argument: --url")?;

        let mut dispatcher =
            HttpDispatcher::new(url).with_context(|| format!("invalid node URL: {url}"))?;

        if let Some(node_id) = &self.node_id {
            dispatcher = dispatcher.with_node_id(node_id.clone());
        }

        if let Some(signing_key) = &self.signing_key {
            dispatcher = dispatcher.with_signing_key(SigningKey::from(signing_key.clone()));
        }

        Ok(dispatcher)
    }

    /// # Errors
    /// Returns an error if the dispatcher cannot be built.
    pub fn client(&self) -> Result<UserClient<HttpDispatcher, FileStore>> {
        Ok(UserClient::new(self.dispatcher()?, self.store()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(Some("http://localhost:8080".to_string()));
        assert_eq!(args.url.as_deref(), Some("http://localhost:8080"));
        assert!(args.signing_key.is_none());
        assert_eq!(args.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    }

    #[test]
    fn test_set_signing_key() {
        let mut args = GlobalArgs::new(None);
        args.set_signing_key(SecretString::from("key".to_string()));
        assert_eq!(
            args.signing_key.as_ref().map(|key| key.expose_secret()),
            Some("key")
        );
    }

    #[test]
    fn test_dispatcher_requires_url() {
        let args = GlobalArgs::new(None);
        let err = args.dispatcher().err().map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("missing required argument: --url"));
    }

    #[test]
    fn test_dispatcher_endpoint() -> Result<()> {
        let args = GlobalArgs::new(Some("http://localhost:8080".to_string()));
        let dispatcher = args.dispatcher()?;
        assert_eq!(
            dispatcher.endpoint().as_str(),
            "http://localhost:8080/api/v2/api_call"
        );
        Ok(())
    }

    #[test]
    fn test_dispatcher_rejects_bad_url() {
        let args = GlobalArgs::new(Some("localhost".to_string()));
        assert!(args.dispatcher().is_err());
    }
}
