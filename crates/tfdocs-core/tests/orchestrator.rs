#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod common;

use std::collections::HashSet;

use chrono::{Duration, Utc};
use common::{FakeRepo, client_for, request_count};
use tfdocs_core::cache::{CacheStore, FileStore, MemoryStore};
use tfdocs_core::enumerator::EnumerationStrategy;
use tfdocs_core::orchestrator::{LoadMode, Orchestrator, ProviderSet};
use tfdocs_core::{Entity, Error};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn two_provider_server() -> MockServer {
    let server = MockServer::start().await;
    FakeRepo::current("hashicorp", "aws").mount(&server).await;
    FakeRepo::legacy("DataDog", "datadog").mount(&server).await;
    server
}

fn orchestrator(server: &MockServer) -> Orchestrator<MemoryStore> {
    Orchestrator::new(
        client_for(server),
        EnumerationStrategy::DirectListing,
        MemoryStore::default(),
    )
}

fn titles(entities: &[Entity]) -> HashSet<(String, String)> {
    entities
        .iter()
        .map(|e| (e.title(), e.kind.slug().to_string()))
        .collect()
}

#[tokio::test]
async fn failing_provider_does_not_abort_siblings() {
    let server = two_provider_server().await;
    let identifiers: Vec<String> = ["hashicorp/aws", "hashicorp/nope", "broken", "DataDog/datadog"]
        .into_iter()
        .map(String::from)
        .collect();

    let report = orchestrator(&server).fetch_all(&identifiers).await;

    assert_eq!(report.entities.len(), 6);
    // Grouped by provider, in input order
    let owners: Vec<&str> = report
        .entities
        .iter()
        .map(|e| e.provider.owner.as_str())
        .collect();
    assert_eq!(owners, ["hashicorp", "hashicorp", "hashicorp", "DataDog", "DataDog", "DataDog"]);

    let failed: Vec<&str> = report
        .failures
        .iter()
        .map(|f| f.identifier.as_str())
        .collect();
    assert_eq!(failed, ["hashicorp/nope", "broken"]);
    assert!(matches!(report.failures[0].error, Error::NotFound(_)));
    assert!(matches!(report.failures[1].error, Error::MalformedInput(_)));
}

#[tokio::test]
async fn enumeration_failure_is_collected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/DataDog/terraform-provider-datadog/contents/website/docs/r"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    FakeRepo::current("hashicorp", "aws").mount(&server).await;
    FakeRepo::legacy("DataDog", "datadog").mount(&server).await;

    let set = ProviderSet::parse("hashicorp/aws,DataDog/datadog");
    let outcome = orchestrator(&server).load(&set, LoadMode::PreferCache).await;

    assert_eq!(outcome.entities.len(), 3);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].identifier, "DataDog/datadog");
    assert!(matches!(outcome.failures[0].error, Error::Enumeration { .. }));
}

#[tokio::test]
async fn cache_hit_makes_no_remote_call() {
    let server = two_provider_server().await;
    let orchestrator = orchestrator(&server);
    let set = ProviderSet::parse("hashicorp/aws,DataDog/datadog");

    let first = orchestrator.load(&set, LoadMode::PreferCache).await;
    assert!(!first.from_cache);
    let calls = request_count(&server).await;
    assert!(calls > 0);

    let second = orchestrator.load(&set, LoadMode::PreferCache).await;
    assert!(second.from_cache);
    assert_eq!(second.entities, first.entities);
    assert_eq!(request_count(&server).await, calls);
}

#[tokio::test]
async fn expired_record_triggers_refetch() {
    let server = two_provider_server().await;
    let orchestrator = orchestrator(&server);
    let set = ProviderSet::parse("hashicorp/aws");
    let now = Utc::now();

    orchestrator.load_at(&set, LoadMode::PreferCache, now).await;
    let calls = request_count(&server).await;

    let fresh = orchestrator
        .load_at(&set, LoadMode::PreferCache, now + Duration::hours(23))
        .await;
    assert!(fresh.from_cache);
    assert_eq!(request_count(&server).await, calls);

    let stale = orchestrator
        .load_at(&set, LoadMode::PreferCache, now + Duration::hours(25))
        .await;
    assert!(!stale.from_cache);
    assert_eq!(request_count(&server).await, calls * 2);
}

#[tokio::test]
async fn different_input_string_misses() {
    let server = two_provider_server().await;
    let orchestrator = orchestrator(&server);

    orchestrator
        .load(&ProviderSet::parse("hashicorp/aws,DataDog/datadog"), LoadMode::PreferCache)
        .await;

    // Same providers, different order: a different key
    let reordered = orchestrator
        .load(&ProviderSet::parse("DataDog/datadog,hashicorp/aws"), LoadMode::PreferCache)
        .await;
    assert!(!reordered.from_cache);
    assert_eq!(reordered.entities.len(), 6);
}

#[tokio::test]
async fn reload_bypasses_and_overwrites_cache() {
    let server = two_provider_server().await;
    let orchestrator = orchestrator(&server);
    let set = ProviderSet::parse("hashicorp/aws");

    orchestrator.load(&set, LoadMode::PreferCache).await;
    let calls = request_count(&server).await;

    let reloaded = orchestrator.load(&set, LoadMode::Reload).await;
    assert!(!reloaded.from_cache);
    assert_eq!(request_count(&server).await, calls * 2);

    let cached = orchestrator.load(&set, LoadMode::PreferCache).await;
    assert!(cached.from_cache);
    assert_eq!(cached.entities, reloaded.entities);
}

#[tokio::test]
async fn repeated_runs_are_set_equal() {
    let server = two_provider_server().await;
    let orchestrator = orchestrator(&server);
    let set = ProviderSet::parse("hashicorp/aws,DataDog/datadog");

    let first = orchestrator.load(&set, LoadMode::Reload).await;
    let second = orchestrator.load(&set, LoadMode::Reload).await;

    assert_eq!(titles(&first.entities), titles(&second.entities));
    assert!(titles(&first.entities).contains(&("aws_instance".to_string(), "resource".to_string())));
    assert!(titles(&first.entities).contains(&("datadog_role".to_string(), "data-source".to_string())));
}

#[tokio::test]
async fn total_failure_is_not_cached() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let orchestrator = orchestrator(&server);
    let set = ProviderSet::parse("hashicorp/nope");

    let outcome = orchestrator.load(&set, LoadMode::PreferCache).await;
    assert!(outcome.entities.is_empty());
    assert_eq!(outcome.failures.len(), 1);
    assert!(orchestrator.cache().inner().get(set.key())?.is_none());

    // Retried on the next load instead of serving an empty record
    let again = orchestrator.load(&set, LoadMode::PreferCache).await;
    assert!(!again.from_cache);
    Ok(())
}

#[tokio::test]
async fn tree_walk_orchestration_matches_direct_listing() {
    let server = two_provider_server().await;
    let set = ProviderSet::parse("hashicorp/aws,DataDog/datadog");

    let direct = orchestrator(&server).load(&set, LoadMode::Reload).await;
    let walked = Orchestrator::new(
        client_for(&server),
        EnumerationStrategy::TreeWalk,
        MemoryStore::default(),
    )
    .load(&set, LoadMode::Reload)
    .await;

    assert!(walked.failures.is_empty());
    let urls = |entities: &[Entity]| -> HashSet<String> {
        entities.iter().map(|e| e.raw_content_url.clone()).collect()
    };
    assert_eq!(urls(&direct.entities), urls(&walked.entities));
}

#[tokio::test]
async fn file_cache_survives_a_new_orchestrator() {
    let server = two_provider_server().await;
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let set = ProviderSet::parse("hashicorp/aws");

    let build = || {
        Orchestrator::new(
            client_for(&server),
            EnumerationStrategy::DirectListing,
            FileStore::new(temp_dir.path()),
        )
    };

    let first = build().load(&set, LoadMode::PreferCache).await;
    let calls = request_count(&server).await;

    let second = build().load(&set, LoadMode::PreferCache).await;
    assert!(second.from_cache);
    assert_eq!(second.entities, first.entities);
    assert_eq!(request_count(&server).await, calls);
}
