//! Common entity metadata and the [`Entity`] trait.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identity, revision, and timestamp fields shared by every entity.
///
/// Serialized inline with the entity using the store's field names
/// (`_id`, `_rev`, `created`, `updated`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
    /// Document id, unique within its kind.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Revision token owned by the store.
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    /// Creation time (epoch milliseconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    /// Last update time (epoch milliseconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
}

impl EntityMeta {
    /// Creates metadata with a known id.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Returns the id when it is present and not blank.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

/// A record of the canonical model.
///
/// Implemented by every kind-specific struct so the identity resolver and the
/// merge engine can treat all kinds uniformly.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Returns the shared metadata.
    fn meta(&self) -> &EntityMeta;

    /// Returns the shared metadata mutably.
    fn meta_mut(&mut self) -> &mut EntityMeta;

    /// Checks the record's structure.
    ///
    /// Returns a human readable reason when the record cannot be stored.
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Implements [`Entity`] for a struct with a `meta: EntityMeta` field.
macro_rules! impl_entity {
    ($ty:ty) => {
        impl $crate::models::Entity for $ty {
            fn meta(&self) -> &$crate::models::EntityMeta {
                &self.meta
            }

            fn meta_mut(&mut self) -> &mut $crate::models::EntityMeta {
                &mut self.meta
            }
        }
    };
    ($ty:ty, $validate:expr) => {
        impl $crate::models::Entity for $ty {
            fn meta(&self) -> &$crate::models::EntityMeta {
                &self.meta
            }

            fn meta_mut(&mut self) -> &mut $crate::models::EntityMeta {
                &mut self.meta
            }

            fn validate(&self) -> std::result::Result<(), String> {
                let check: fn(&Self) -> std::result::Result<(), String> = $validate;
                check(self)
            }
        }
    };
}

pub(crate) use impl_entity;

/// Returns an error message when a required string field is blank.
pub(crate) fn require(field: &str, value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}
