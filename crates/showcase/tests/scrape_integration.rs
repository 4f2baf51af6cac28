//! Integration tests for the full scrape pipeline.
//!
//! These drive the orchestrator end to end through the mock transport:
//! pagination, link extraction and classification, per-author aggregation,
//! repository enrichment, and the replace-then-write output directory.
//!
//! Key scenarios tested:
//! - Authors without links never produce records or files
//! - Record order follows first-link discovery across pages
//! - Repository links gain stats attributed by owner/name
//! - The output directory is replaced wholesale on every run

use std::sync::Arc;

use serde_json::{Value, json};

use showcase::transport::testing::MockTransport;
use showcase::{DiscussionCoords, LinkType, ScrapeOptions, Scraper, ShowcaseRecord};

fn coords() -> DiscussionCoords {
    DiscussionCoords {
        organization: "acme".to_string(),
        repository: "site".to_string(),
        discussion_number: 2022,
    }
}

fn page_variables(after: Value) -> Value {
    json!({
        "owner": "acme",
        "repo": "site",
        "number": 2022,
        "first": 100,
        "after": after,
    })
}

fn comments_page(nodes: Value, end_cursor: Value, has_next_page: bool) -> Value {
    json!({
        "repository": {
            "discussion": {
                "comments": {
                    "pageInfo": { "endCursor": end_cursor, "hasNextPage": has_next_page },
                    "nodes": nodes,
                }
            }
        }
    })
}

fn comment(author: &str, body_html: &str) -> Value {
    json!({ "author": { "login": author }, "bodyHTML": body_html })
}

fn stats_response(owner: &str, name: &str, stars: u64) -> Value {
    json!({
        "repository": {
            "name": name,
            "description": format!("{name} by {owner}"),
            "url": format!("https://github.com/{owner}/{name}"),
            "owner": { "login": owner, "avatarUrl": format!("https://avatars.example/{owner}") },
            "stargazerCount": stars,
            "forkCount": 7,
            "issues": { "totalCount": 2 },
            "pullRequests": { "totalCount": 1 },
            "discussions": { "totalCount": 3 },
            "mentionableUsers": { "totalCount": 5 },
        }
    })
}

/// Three comments: alice posts two links, bob posts none, carol posts one.
/// The output holds records for alice and carol, in that order; bob is
/// absent entirely.
#[tokio::test]
async fn showcase_run_writes_one_record_per_linked_author() {
    let transport = MockTransport::new();
    transport.push_data(
        page_variables(Value::Null),
        comments_page(
            json!([
                comment(
                    "alice",
                    r#"<p><a href="https://github.com/alice/widget">widget</a>
                       and a <a href="https://widget.example.com">demo</a></p>"#,
                ),
                comment("bob", "<p>love these!</p>"),
                comment("carol", r#"<a href="https://github.com/carol">my profile</a>"#),
            ]),
            Value::Null,
            false,
        ),
    );
    transport.push_data(
        json!({ "owner": "alice", "name": "widget" }),
        stats_response("alice", "widget", 120),
    );

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("showcase");
    let scraper = Scraper::new(Arc::new(transport), &root);

    let records = scraper
        .run(&coords(), ScrapeOptions::default())
        .await
        .expect("scrape should succeed");

    let authors: Vec<&str> = records.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, vec!["alice", "carol"]);

    // alice: repo link enriched, external link untouched.
    assert_eq!(records[0].links[0].link_type, LinkType::GithubRepo);
    let stats = records[0].links[0].stats.as_ref().expect("enriched");
    assert_eq!(stats.name, "widget");
    assert_eq!(stats.owner_login, "alice");
    assert_eq!(stats.star_count, 120);
    assert_eq!(records[0].links[1].link_type, LinkType::Unknown);
    assert!(records[0].links[1].stats.is_none());

    // carol: profile link, no stats.
    assert_eq!(records[1].links[0].link_type, LinkType::GithubUser);

    // One file per record, parseable back into the same record.
    let on_disk: ShowcaseRecord =
        serde_json::from_str(&std::fs::read_to_string(root.join("alice.json")).unwrap()).unwrap();
    assert_eq!(on_disk, records[0]);
    assert!(root.join("carol.json").exists());
    assert!(!root.join("bob.json").exists());
}

/// An author whose submissions span non-adjacent comments on different
/// pages gets a single record with links in comment order.
#[tokio::test]
async fn showcase_run_merges_author_links_across_pages() {
    let transport = MockTransport::new();
    transport.push_data(
        page_variables(Value::Null),
        comments_page(
            json!([
                comment("dave", r#"<a href="https://github.com/dave/alpha">alpha</a>"#),
                comment("erin", r#"<a href="https://github.com/erin/beta">beta</a>"#),
            ]),
            json!("cursor-1"),
            true,
        ),
    );
    transport.push_data(
        page_variables(json!("cursor-1")),
        comments_page(
            json!([comment("dave", r#"<a href="https://github.com/dave/gamma">gamma</a>"#)]),
            Value::Null,
            false,
        ),
    );
    transport.push_data(
        json!({ "owner": "dave", "name": "alpha" }),
        stats_response("dave", "alpha", 1),
    );
    transport.push_data(
        json!({ "owner": "erin", "name": "beta" }),
        stats_response("erin", "beta", 2),
    );
    transport.push_data(
        json!({ "owner": "dave", "name": "gamma" }),
        stats_response("dave", "gamma", 3),
    );

    let dir = tempfile::tempdir().unwrap();
    let scraper = Scraper::new(Arc::new(transport), dir.path().join("showcase"));

    let records = scraper
        .run(&coords(), ScrapeOptions::default())
        .await
        .expect("scrape should succeed");

    let authors: Vec<&str> = records.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, vec!["dave", "erin"]);

    let dave_urls: Vec<&str> = records[0].links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(
        dave_urls,
        vec!["https://github.com/dave/alpha", "https://github.com/dave/gamma"]
    );

    // Concurrent enrichment still attributes stats by owner/name.
    assert_eq!(records[0].links[0].stats.as_ref().unwrap().star_count, 1);
    assert_eq!(records[0].links[1].stats.as_ref().unwrap().star_count, 3);
    assert_eq!(records[1].links[0].stats.as_ref().unwrap().star_count, 2);
}

/// A rerun against a discussion whose comments changed replaces the output
/// directory, so records for removed authors disappear.
#[tokio::test]
async fn showcase_rerun_drops_records_for_removed_comments() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("showcase");

    let first = MockTransport::new();
    first.push_data(
        page_variables(Value::Null),
        comments_page(
            json!([
                comment("alice", r#"<a href="https://a.example">a</a>"#),
                comment("bob", r#"<a href="https://b.example">b</a>"#),
            ]),
            Value::Null,
            false,
        ),
    );
    Scraper::new(Arc::new(first), &root)
        .run(&coords(), ScrapeOptions::default())
        .await
        .expect("first run");
    assert!(root.join("bob.json").exists());

    // bob deleted his comment before the second run.
    let second = MockTransport::new();
    second.push_data(
        page_variables(Value::Null),
        comments_page(
            json!([comment("alice", r#"<a href="https://a.example">a</a>"#)]),
            Value::Null,
            false,
        ),
    );
    Scraper::new(Arc::new(second), &root)
        .run(&coords(), ScrapeOptions::default())
        .await
        .expect("second run");

    assert!(root.join("alice.json").exists());
    assert!(!root.join("bob.json").exists());
}

/// A failing page query aborts the run before anything is written.
#[tokio::test]
async fn showcase_run_fails_fast_on_page_error() {
    let transport = MockTransport::new();
    transport.push_error(page_variables(Value::Null), "502 from upstream");

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("showcase");
    let scraper = Scraper::new(Arc::new(transport), &root);

    scraper
        .run(&coords(), ScrapeOptions::default())
        .await
        .expect_err("page failure should abort");

    assert!(!root.exists());
}
