//! Revision tokens.
//!
//! A revision is `"<generation>-<hash>"`: the generation counts writes to the
//! document and the hash is the first 16 hex characters of the SHA-256 of the
//! document body without its `_rev` field. Only stores mint revisions.

use sha2::{Digest, Sha256};
use std::fmt;

use super::{Document, RevisionStamp};
use crate::models::EntityKind;
use crate::{Error, Result};

/// Length of the hash part of a revision.
const HASH_LEN: usize = 16;

/// A parsed revision token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Number of writes that produced this revision.
    pub generation: u64,
    /// Content hash prefix.
    pub hash: String,
}

impl Revision {
    /// Parses a revision token.
    ///
    /// Returns `None` for tokens not minted by a store.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let (generation, hash) = token.split_once('-')?;
        let generation = generation.parse().ok()?;
        if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self {
            generation,
            hash: hash.to_string(),
        })
    }

    /// Mints the revision following `previous` for `document`.
    #[must_use]
    pub fn next(previous: Option<&str>, document: &Document) -> Self {
        let generation = previous
            .and_then(Self::parse)
            .map_or(1, |rev| rev.generation.saturating_add(1));
        Self {
            generation,
            hash: content_hash(document),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.generation, self.hash)
    }
}

/// Hashes the document body, ignoring its revision.
#[must_use]
pub fn content_hash(document: &Document) -> String {
    // serde_json maps are sorted, so the serialization is canonical
    let body = serde_json::to_vec(&document.body_without_rev()).unwrap_or_default();
    let digest = Sha256::digest(&body);
    let mut hash = hex::encode(digest);
    hash.truncate(HASH_LEN);
    hash
}

/// Checks a write against the current revision and stamps the next one.
///
/// `current` is the stored revision, `None` when the document does not exist.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] when the document has no id and
/// [`Error::RevisionConflict`] when its `_rev` does not match `current`.
pub(crate) fn stamp_write(
    kind: EntityKind,
    current: Option<&str>,
    mut document: Document,
) -> Result<(Document, RevisionStamp)> {
    let Some(id) = document
        .id()
        .filter(|id| !id.trim().is_empty())
        .map(str::to_string)
    else {
        return Err(Error::MalformedRecord {
            kind: kind.to_string(),
            id: String::new(),
            message: "document has no _id".to_string(),
        });
    };

    let matches = match (current, document.rev()) {
        (None, None) => true,
        (Some(stored), Some(given)) => stored == given,
        _ => false,
    };
    if !matches {
        return Err(Error::RevisionConflict {
            kind: kind.to_string(),
            id,
        });
    }

    let rev = Revision::next(current, &document).to_string();
    document.set_rev(Some(rev.clone()));
    Ok((
        document,
        RevisionStamp {
            id,
            rev,
            old_rev: current.map(str::to_string),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn test_first_revision_is_generation_one() {
        let rev = Revision::next(None, &doc(json!({"_id": "a"})));
        assert_eq!(rev.generation, 1);
        assert_eq!(rev.hash.len(), HASH_LEN);
    }

    #[test]
    fn test_generation_increments() {
        let d = doc(json!({"_id": "a", "name": "x"}));
        let first = Revision::next(None, &d).to_string();
        let second = Revision::next(Some(&first), &d);
        assert_eq!(second.generation, 2);
        assert_ne!(first, second.to_string());
    }

    #[test]
    fn test_hash_ignores_rev() {
        let mut a = doc(json!({"_id": "a", "name": "x"}));
        let b = a.clone();
        a.set_rev(Some("7-deadbeef".to_string()));
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn test_stamp_write_rules() {
        let fresh = doc(json!({"_id": "a"}));
        let (stored, stamp) = stamp_write(EntityKind::Request, None, fresh.clone()).unwrap();
        assert_eq!(stored.rev(), Some(stamp.rev.as_str()));
        assert!(stamp.old_rev.is_none());

        // existing document written without its revision
        assert!(matches!(
            stamp_write(EntityKind::Request, Some(&stamp.rev), fresh),
            Err(Error::RevisionConflict { .. })
        ));

        // forwarding the current revision succeeds
        let (_, next) = stamp_write(EntityKind::Request, Some(&stamp.rev), stored).unwrap();
        assert_eq!(next.old_rev.as_deref(), Some(stamp.rev.as_str()));
        assert!(next.rev.starts_with("2-"));

        assert!(matches!(
            stamp_write(EntityKind::Request, None, doc(json!({"name": "x"}))),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Revision::parse("3-00ff"),
            Some(Revision {
                generation: 3,
                hash: "00ff".to_string()
            })
        );
        assert!(Revision::parse("abc").is_none());
        assert!(Revision::parse("x-00ff").is_none());
        assert!(Revision::parse("1-zz").is_none());
    }
}
