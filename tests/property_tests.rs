//! Property-based tests for identity resolution and listings.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Resolved links are never duplicated on either side
//! - Every in-range link is reflected on both the project and the request
//! - Paging through a listing yields every document exactly once
//! - Revision generations grow with every write

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;
use restvault::import::{IdentityResolver, NormalizedExport, ProjectLink};
use restvault::models::{CanonicalExport, EntityKind, Project, Request};
use restvault::storage::{Document, DocumentStore, ListOptions, MemoryStore, Revision};
use serde_json::json;

fn export_with(projects: usize, requests: usize, existing: &[String]) -> CanonicalExport {
    let mut export = CanonicalExport::new();
    for i in 0..projects {
        let mut project = Project::new(format!("project {i}"));
        project.requests = existing.to_vec();
        export.projects.push(project);
    }
    for i in 0..requests {
        export
            .requests
            .push(Request::saved(format!("https://example.com/{i}")));
    }
    export
}

fn has_duplicates(values: &[String]) -> bool {
    let unique: HashSet<&String> = values.iter().collect();
    unique.len() != values.len()
}

proptest! {
    /// Property: resolution never produces duplicate links, however often a
    /// link is repeated.
    #[test]
    fn prop_resolver_never_duplicates_links(
        projects in 1usize..5,
        requests in 1usize..8,
        links in prop::collection::vec((0usize..6, 0usize..10), 0..40),
        existing in prop::collection::vec("[a-z]{1,4}", 0..4),
    ) {
        let normalized = NormalizedExport {
            export: export_with(projects, requests, &existing),
            links: links.iter().map(|&(p, r)| ProjectLink::saved(p, r)).collect(),
        };
        let resolved = IdentityResolver::new().resolve(normalized);

        for project in &resolved.projects {
            prop_assert!(!has_duplicates(&project.requests) || has_duplicates(&existing));
        }
        for request in &resolved.requests {
            prop_assert!(!has_duplicates(&request.projects));
        }
    }

    /// Property: every in-range link is visible from both sides.
    #[test]
    fn prop_resolver_links_both_ways(
        projects in 1usize..5,
        requests in 1usize..8,
        links in prop::collection::vec((0usize..5, 0usize..8), 0..20),
    ) {
        let normalized = NormalizedExport {
            export: export_with(projects, requests, &[]),
            links: links.iter().map(|&(p, r)| ProjectLink::saved(p, r)).collect(),
        };
        let resolved = IdentityResolver::new().resolve(normalized);

        for &(p, r) in links.iter().filter(|&&(p, r)| p < projects && r < requests) {
            let project = &resolved.projects[p];
            let request = &resolved.requests[r];
            let project_id = project.meta.id.clone().unwrap();
            let request_id = request.meta.id.clone().unwrap();
            prop_assert!(project.requests.contains(&request_id));
            prop_assert!(request.projects.contains(&project_id));
        }
    }

    /// Property: following page tokens visits every document exactly once,
    /// in either direction.
    #[test]
    fn prop_pages_cover_every_document_once(
        ids in prop::collection::btree_set("[a-z0-9]{1,8}", 0..60),
        limit in 1usize..12,
        descending in any::<bool>(),
    ) {
        let store = MemoryStore::new();
        for id in &ids {
            let doc = Document::from_value(json!({"_id": id, "url": format!("https://{id}")})).unwrap();
            store.put(EntityKind::Request, doc).unwrap();
        }

        let mut seen = Vec::new();
        let mut token = None;
        loop {
            let options = ListOptions::with_limit(limit)
                .page_token(token.take())
                .descending(descending);
            let page = store.list(EntityKind::Request, &options).unwrap();
            prop_assert!(page.items.len() <= limit);
            seen.extend(page.items.iter().map(|d| d.id().unwrap().to_string()));
            match page.next_page_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        let mut expected: Vec<String> = ids.iter().cloned().collect();
        if descending {
            expected.reverse();
        }
        prop_assert_eq!(&seen, &expected);
        let unique: BTreeSet<&String> = seen.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
    }

    /// Property: each accepted write advances the generation by one.
    #[test]
    fn prop_generation_counts_writes(names in prop::collection::vec("[a-z]{0,6}", 1..10)) {
        let store = MemoryStore::new();
        let mut rev: Option<String> = None;
        for (i, name) in names.iter().enumerate() {
            let mut doc = Document::from_value(json!({"_id": "p", "name": name})).unwrap();
            doc.set_rev(rev.clone());
            let stamp = store.put(EntityKind::Project, doc).unwrap();
            let parsed = Revision::parse(&stamp.rev).unwrap();
            prop_assert_eq!(parsed.generation, i as u64 + 1);
            prop_assert_eq!(stamp.old_rev, rev);
            rev = Some(stamp.rev);
        }
    }
}
