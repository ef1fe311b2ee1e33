//! Ordered, resumable listings.
//!
//! Listings are ordered by a kind-specific natural key with the document id as
//! tie breaker. The continuation token records the last position returned and
//! a hint of how many documents remain.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use super::Document;
use crate::models::{EntityKind, SortKey};
use crate::{Error, Result};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 25;
/// Largest page a listing returns.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Options for listing documents of a kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of items (0 means the default page size).
    pub limit: usize,
    /// Token returned by the previous page.
    pub page_token: Option<String>,
    /// Case-insensitive substring matched against string fields.
    pub filter: Option<String>,
    /// Reverse the natural order.
    pub descending: bool,
}

impl ListOptions {
    /// Creates options with a page size.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Sets the continuation token.
    #[must_use]
    pub fn page_token(mut self, token: Option<String>) -> Self {
        self.page_token = token;
        self
    }

    /// Sets the text filter.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Reverses the order.
    #[must_use]
    pub const fn descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    /// Returns the effective page size.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Documents on this page.
    pub items: Vec<Document>,
    /// Token for the next page; `None` at the end.
    pub next_page_token: Option<String>,
}

/// Decoded continuation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken {
    /// Sort key of the last returned item.
    #[serde(rename = "k")]
    pub key: String,
    /// Id of the last returned item.
    #[serde(rename = "i")]
    pub id: String,
    /// Number of matching items after the last returned one.
    #[serde(rename = "r")]
    pub remaining: usize,
}

impl PageToken {
    /// Encodes the token as URL-safe base64 JSON.
    #[must_use]
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decodes a token produced by [`PageToken::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for malformed tokens.
    pub fn decode(token: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| Error::InvalidInput(format!("invalid page token: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::InvalidInput(format!("invalid page token: {e}")))
    }
}

/// Returns the natural sort key of a document.
///
/// Numeric keys are rendered so that string order matches numeric order.
#[must_use]
pub fn sort_key(kind: EntityKind, document: &Document) -> String {
    match kind.sort_key() {
        SortKey::Id => String::new(),
        SortKey::Time => {
            let time = document
                .get_i64("time")
                .or_else(|| document.get_i64("created"))
                .unwrap_or(0);
            format!("{:020}", i128::from(time) - i128::from(i64::MIN))
        },
        SortKey::Order => {
            let order = document.get_i64("order").unwrap_or(0);
            let name = document.get_str("name").unwrap_or_default().to_lowercase();
            format!("{:020}|{name}", i128::from(order) - i128::from(i64::MIN))
        },
    }
}

/// Orders, filters, and slices the documents of one kind.
///
/// Shared by all backends so listings behave identically.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the page token is malformed.
pub fn paginate(kind: EntityKind, documents: Vec<Document>, options: &ListOptions) -> Result<Page> {
    let after = options
        .page_token
        .as_deref()
        .filter(|token| !token.trim().is_empty())
        .map(PageToken::decode)
        .transpose()?;
    let needle = options
        .filter
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);

    let mut keyed: Vec<(String, String, Document)> = documents
        .into_iter()
        .filter(|doc| needle.as_deref().is_none_or(|n| doc.matches_text(n)))
        .map(|doc| {
            let key = sort_key(kind, &doc);
            let id = doc.id().unwrap_or_default().to_string();
            (key, id, doc)
        })
        .collect();

    keyed.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    if options.descending {
        keyed.reverse();
    }

    if let Some(token) = after {
        let position = (token.key, token.id);
        keyed.retain(|(key, id, _)| {
            let current = (key.clone(), id.clone());
            if options.descending {
                current < position
            } else {
                current > position
            }
        });
    }

    let limit = options.effective_limit();
    let total = keyed.len();
    let mut items = Vec::with_capacity(limit.min(total));
    let mut last = None;
    for (key, id, doc) in keyed.into_iter().take(limit) {
        last = Some((key, id));
        items.push(doc);
    }

    let remaining = total.saturating_sub(items.len());
    let next_page_token = match last {
        Some((key, id)) if remaining > 0 => Some(
            PageToken {
                key,
                id,
                remaining,
            }
            .encode(),
        ),
        _ => None,
    };

    Ok(Page {
        items,
        next_page_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn docs(ids: &[&str]) -> Vec<Document> {
        ids.iter()
            .map(|id| Document::from_value(json!({"_id": id, "url": format!("https://{id}")})).unwrap())
            .collect()
    }

    fn ids(page: &Page) -> Vec<String> {
        page.items
            .iter()
            .map(|d| d.id().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_pages_resume_until_end() {
        let all = docs(&["c", "a", "e", "b", "d"]);
        let first = paginate(EntityKind::Request, all.clone(), &ListOptions::with_limit(2)).unwrap();
        assert_eq!(ids(&first), vec!["a", "b"]);
        let token = first.next_page_token.clone().unwrap();
        assert_eq!(PageToken::decode(&token).unwrap().remaining, 3);

        let second = paginate(
            EntityKind::Request,
            all.clone(),
            &ListOptions::with_limit(2).page_token(Some(token)),
        )
        .unwrap();
        assert_eq!(ids(&second), vec!["c", "d"]);

        let third = paginate(
            EntityKind::Request,
            all,
            &ListOptions::with_limit(2).page_token(second.next_page_token),
        )
        .unwrap();
        assert_eq!(ids(&third), vec!["e"]);
        assert!(third.next_page_token.is_none());
    }

    #[test]
    fn test_exact_fit_has_no_token() {
        let page = paginate(EntityKind::Request, docs(&["a", "b"]), &ListOptions::with_limit(2)).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_descending() {
        let page = paginate(
            EntityKind::Request,
            docs(&["a", "b", "c"]),
            &ListOptions::with_limit(2).descending(true),
        )
        .unwrap();
        assert_eq!(ids(&page), vec!["c", "b"]);
        let rest = paginate(
            EntityKind::Request,
            docs(&["a", "b", "c"]),
            &ListOptions::with_limit(2)
                .descending(true)
                .page_token(page.next_page_token),
        )
        .unwrap();
        assert_eq!(ids(&rest), vec!["a"]);
    }

    #[test]
    fn test_time_order_for_history() {
        let all = vec![
            Document::from_value(json!({"_id": "x", "created": 300})).unwrap(),
            Document::from_value(json!({"_id": "y", "created": 100})).unwrap(),
            Document::from_value(json!({"_id": "z", "time": 200})).unwrap(),
        ];
        let page = paginate(EntityKind::History, all, &ListOptions::default()).unwrap();
        assert_eq!(ids(&page), vec!["y", "z", "x"]);
    }

    #[test]
    fn test_filter() {
        let page = paginate(
            EntityKind::Request,
            docs(&["alpha", "beta"]),
            &ListOptions::default().filter("ALP"),
        )
        .unwrap();
        assert_eq!(ids(&page), vec!["alpha"]);
    }

    #[test]
    fn test_bad_token() {
        let result = paginate(
            EntityKind::Request,
            docs(&["a"]),
            &ListOptions::default().page_token(Some("!!!".to_string())),
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(ListOptions::with_limit(0).effective_limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(ListOptions::with_limit(5000).effective_limit(), MAX_PAGE_SIZE);
    }
}
