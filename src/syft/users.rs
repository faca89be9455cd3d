//! User service operations of a node.
//!
//! Every operation is one round trip through the [`SyftCall`] primitive. Only
//! [`UserClient::get_user`] reshapes the response; the others hand back the
//! decoded response untouched and let failures propagate unchanged.

use crate::syft::{
    call::{CallRequest, SigningKey, SyftCall},
    error::UserError,
    storage::SessionStore,
    tagged::{make_syft_uid, SyftType, SyftUid, Tagged},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, error, instrument};

pub mod path {
    pub const GET_ALL: &str = "user.get_all";
    pub const VIEW: &str = "user.view";
    pub const SEARCH: &str = "user.search";
    pub const UPDATE: &str = "user.update";
}

/// Pagination forwarded as-is; `0` for both means the node's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_size: u64,
    pub page_index: u64,
}

impl Page {
    #[must_use]
    pub const fn new(page_size: u64, page_index: u64) -> Self {
        Self {
            page_size,
            page_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearch {
    pub name: String,
}

impl SyftType for UserSearch {
    const FQN: &'static str = "syft.service.user.user.UserSearch";
}

#[derive(Debug, Serialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
    pub institution: String,
    pub website: String,
}

impl SyftType for UserUpdate {
    const FQN: &'static str = "syft.service.user.user.UserUpdate";
}

impl Default for UserUpdate {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: SecretString::from(String::new()),
            institution: String::new(),
            website: String::new(),
        }
    }
}

fn expose_password<S: Serializer>(
    password: &SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

/// Role of a user on a node.
///
/// Nodes send the numeric level, the enum name (`ServiceRole.ADMIN`) or the
/// display name (`Data Scientist`). Anything else is kept as sent in
/// [`ServiceRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRole {
    None,
    Guest,
    DataScientist,
    DataOwner,
    Admin,
    Other(Value),
}

impl ServiceRole {
    #[must_use]
    pub const fn value(&self) -> Option<u64> {
        match self {
            Self::None => Some(0),
            Self::Guest => Some(1),
            Self::DataScientist => Some(2),
            Self::DataOwner => Some(32),
            Self::Admin => Some(128),
            Self::Other(_) => None,
        }
    }

    #[must_use]
    pub fn from_value(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Guest),
            2 => Some(Self::DataScientist),
            32 => Some(Self::DataOwner),
            128 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Accepts `ADMIN`, `admin`, `ServiceRole.ADMIN` and `Data Owner`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("ServiceRole.").unwrap_or(name);

        match name.to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "NONE" => Some(Self::None),
            "GUEST" => Some(Self::Guest),
            "DATA_SCIENTIST" => Some(Self::DataScientist),
            "DATA_OWNER" | "OWNER" => Some(Self::DataOwner),
            "ADMIN" | "ADMINISTRATOR" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl Serialize for ServiceRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let name = match self {
            Self::None => "NONE",
            Self::Guest => "GUEST",
            Self::DataScientist => "DATA_SCIENTIST",
            Self::DataOwner => "DATA_OWNER",
            Self::Admin => "ADMIN",
            Self::Other(value) => return value.serialize(serializer),
        };

        serializer.serialize_str(name)
    }
}

impl<'de> Deserialize<'de> for ServiceRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let known = match &value {
            Value::Number(number) => number.as_u64().and_then(Self::from_value),
            Value::String(name) => Self::from_name(name),
            _ => None,
        };

        Ok(known.unwrap_or(Self::Other(value)))
    }
}

/// Flat view of a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub uid: String,
    pub email: String,
    pub role: ServiceRole,
    pub website: Option<String>,
    pub institution: Option<String>,
}

#[derive(Deserialize)]
struct RoleValue {
    value: ServiceRole,
}

// Shape of `user.view` responses.
#[derive(Deserialize)]
struct RemoteUserView {
    id: SyftUid,
    email: String,
    role: RoleValue,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    institution: Option<String>,
}

impl UserView {
    /// Reshape a `user.view` response.
    /// # Errors
    /// Returns an error if a field is missing or has an unexpected shape.
    pub fn from_remote(user: Value) -> Result<Self, UserError> {
        let user: RemoteUserView =
            serde_json::from_value(user).map_err(|e| UserError::Decode(e.to_string()))?;

        Ok(Self {
            uid: user.id.value,
            email: user.email,
            role: user.role.value,
            website: user.website,
            institution: user.institution,
        })
    }
}

#[derive(Serialize)]
struct ViewPayload {
    uid: Tagged<SyftUid>,
}

#[derive(Serialize)]
struct SearchPayload {
    user_search: Tagged<UserSearch>,
    #[serde(flatten)]
    page: Page,
}

#[derive(Serialize)]
struct UpdatePayload {
    uid: Tagged<SyftUid>,
    user_update: Tagged<UserUpdate>,
}

#[derive(Debug)]
pub struct UserClient<C, S> {
    caller: C,
    store: S,
}

impl<C: SyftCall, S: SessionStore> UserClient<C, S> {
    #[must_use]
    pub const fn new(caller: C, store: S) -> Self {
        Self { caller, store }
    }

    pub const fn caller(&self) -> &C {
        &self.caller
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// List users, one page at a time.
    /// # Errors
    /// Returns the call error unchanged.
    #[instrument(skip(self))]
    pub async fn get_all_users(&self, page: Page) -> Result<Value, UserError> {
        let request = CallRequest::with_payload(path::GET_ALL, &page)?;

        Ok(self.caller.call(request).await?)
    }

    /// Look up a user on `node_id`, signing the call with `signing_key`.
    ///
    /// Every failure is logged before it is returned, so callers that only
    /// care about success can discard the error with `.ok()`.
    /// # Errors
    /// Returns an error if the call fails or the record cannot be reshaped.
    #[instrument(skip(self, signing_key))]
    pub async fn get_user(
        &self,
        uid: &str,
        signing_key: &SigningKey,
        node_id: &str,
    ) -> Result<UserView, UserError> {
        let result = self.view_user(uid, signing_key, node_id).await;

        if let Err(err) = &result {
            error!("Failed to get user {}: {}", uid, err);
        }

        result
    }

    async fn view_user(
        &self,
        uid: &str,
        signing_key: &SigningKey,
        node_id: &str,
    ) -> Result<UserView, UserError> {
        let payload = ViewPayload {
            uid: make_syft_uid(uid),
        };
        let request = CallRequest::with_payload(path::VIEW, &payload)?
            .node_id(node_id)
            .signing_key(signing_key);

        let user = self.caller.call(request).await?;

        debug!(user = %user, "user.view response");

        UserView::from_remote(user)
    }

    /// View the user of the current session.
    /// # Errors
    /// Returns an error if the session has no user id, or the call error unchanged.
    #[instrument(skip(self))]
    pub async fn get_self(&self) -> Result<Value, UserError> {
        let payload = ViewPayload {
            uid: make_syft_uid(self.store.user_id()?),
        };
        let request = CallRequest::with_payload(path::VIEW, &payload)?;

        Ok(self.caller.call(request).await?)
    }

    /// Search users by name.
    /// # Errors
    /// Returns the call error unchanged.
    #[instrument(skip(self))]
    pub async fn search_users_by_name(&self, name: &str, page: Page) -> Result<Value, UserError> {
        let payload = SearchPayload {
            user_search: Tagged::new(UserSearch {
                name: name.to_string(),
            }),
            page,
        };
        let request = CallRequest::with_payload(path::SEARCH, &payload)?;

        Ok(self.caller.call(request).await?)
    }

    /// Update the user of the current session. Every field is sent, empty or not.
    /// # Errors
    /// Returns an error if the session has no user id, or the call error unchanged.
    #[instrument(skip(self))]
    pub async fn update_current_user(&self, update: UserUpdate) -> Result<Value, UserError> {
        let payload = UpdatePayload {
            uid: make_syft_uid(self.store.user_id()?),
            user_update: Tagged::new(update),
        };
        let request = CallRequest::with_payload(path::UPDATE, &payload)?;

        Ok(self.caller.call(request).await?)
    }
}
