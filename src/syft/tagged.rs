//! Tagged payload values.
//!
//! The remote side rebuilds typed objects from plain JSON by looking at the
//! `fqn` (fully-qualified name) that travels next to the raw fields.

use serde::{Deserialize, Serialize};

/// A payload type with a fully-qualified name known to the remote schema registry.
pub trait SyftType {
    const FQN: &'static str;
}

/// `T`'s fields flattened beside the `fqn` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagged<T> {
    #[serde(flatten)]
    pub inner: T,
    pub fqn: String,
}

impl<T: SyftType> Tagged<T> {
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            fqn: T::FQN.to_string(),
        }
    }
}

impl<T> Tagged<T> {
    pub fn into_inner(self) -> T {
        self.inner
    }
}

/// Raw identifier of a remote object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyftUid {
    pub value: String,
}

impl SyftType for SyftUid {
    const FQN: &'static str = "syft.types.uid.UID";
}

/// Wrap a raw id in its tagged envelope. The id is forwarded as-is.
#[must_use]
pub fn make_syft_uid(id: impl Into<String>) -> Tagged<SyftUid> {
    Tagged::new(SyftUid { value: id.into() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_make_syft_uid() -> Result<(), serde_json::Error> {
        let uid = make_syft_uid("6e7d1f3b0a3c4c5a9e2b3f4a5b6c7d8e");
        assert_eq!(
            serde_json::to_value(&uid)?,
            json!({
                "value": "6e7d1f3b0a3c4c5a9e2b3f4a5b6c7d8e",
                "fqn": "syft.types.uid.UID"
            })
        );
        Ok(())
    }

    #[test]
    fn test_make_syft_uid_keeps_malformed_ids() {
        assert_eq!(make_syft_uid("").inner.value, "");
        assert_eq!(make_syft_uid(" not a uid ").inner.value, " not a uid ");
    }

    #[test]
    fn test_tagged_flattens_fields() -> Result<(), serde_json::Error> {
        #[derive(Serialize)]
        struct Probe {
            name: String,
            size: u32,
        }

        impl SyftType for Probe {
            const FQN: &'static str = "syft.test.Probe";
        }

        let tagged = Tagged::new(Probe {
            name: "alice".to_string(),
            size: 3,
        });
        assert_eq!(
            serde_json::to_value(&tagged)?,
            json!({"name": "alice", "size": 3, "fqn": "syft.test.Probe"})
        );
        Ok(())
    }

    #[test]
    fn test_tagged_deserialize() -> Result<(), serde_json::Error> {
        let uid: Tagged<SyftUid> =
            serde_json::from_value(json!({"value": "abc", "fqn": "syft.types.uid.UID"}))?;
        assert_eq!(uid.fqn, SyftUid::FQN);
        assert_eq!(uid.into_inner().value, "abc");
        Ok(())
    }
}
