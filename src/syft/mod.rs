pub mod call;
pub mod error;
pub mod http;
pub mod storage;
pub mod tagged;
pub mod users;

pub use self::call::{CallRequest, SigningKey, SyftCall};
pub use self::error::{CallError, StorageError, UserError};
pub use self::http::HttpDispatcher;
pub use self::storage::{FileStore, MemoryStore, SessionStore};
pub use self::tagged::{make_syft_uid, SyftType, SyftUid, Tagged};
pub use self::users::{Page, ServiceRole, UserClient, UserSearch, UserUpdate, UserView};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
