//! End-to-end tests for the healthy C → B → A chain.

use uuid::Uuid;

mod common;

#[tokio::test]
async fn test_correlation_id_propagates_through_chain() {
    let chain = common::start_chain().await;

    let (status, body) = common::get_json(
        &format!("http://{}/process?msg=hello", chain.root),
        Some("trace-abc-123"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["service_c"], "ok");
    assert_eq!(body["correlation_id"], "trace-abc-123");

    let middle = &body["downstream"];
    assert_eq!(middle["service_b"], "ok");
    assert_eq!(middle["correlation_id"], "trace-abc-123");

    let leaf = &middle["service_a"];
    assert_eq!(leaf["echo"], "hello");
    assert_eq!(leaf["correlation_id"], "trace-abc-123");

    chain.shutdown.trigger();
}

#[tokio::test]
async fn test_generated_id_is_uuid_and_shared_by_every_hop() {
    let chain = common::start_chain().await;
    let url = format!("http://{}/process?msg=x", chain.root);

    let (_, first) = common::get_json(&url, None).await;
    let (_, second) = common::get_json(&url, None).await;

    let id = first["correlation_id"].as_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok(), "not a UUID: {}", id);
    assert_eq!(first["downstream"]["correlation_id"], id);
    assert_eq!(first["downstream"]["service_a"]["correlation_id"], id);

    assert_ne!(first["correlation_id"], second["correlation_id"]);

    chain.shutdown.trigger();
}

#[tokio::test]
async fn test_middle_forwards_header_and_message() {
    let shutdown = service_chain::Shutdown::new();
    let (leaf, seen) = common::start_capturing_backend().await;
    let middle = common::start_service(
        common::config_for(service_chain::ServiceRole::Middle, Some(leaf), 1_000),
        &shutdown,
    )
    .await;

    let (status, body) = common::get_json(
        &format!("http://{}/call-echo?msg=hi%20there", middle),
        Some("abc"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["service_a"]["correlation_id"], "abc");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].correlation_id.as_deref(), Some("abc"));
    assert!(seen[0].target.starts_with("/echo?msg=hi"), "target was {}", seen[0].target);

    shutdown.trigger();
}

#[tokio::test]
async fn test_root_forwards_header_and_message() {
    let shutdown = service_chain::Shutdown::new();
    let (middle, seen) = common::start_capturing_backend().await;
    let root = common::start_service(
        common::config_for(service_chain::ServiceRole::Root, Some(middle), 2_000),
        &shutdown,
    )
    .await;

    let (status, body) = common::get_json(
        &format!("http://{}/process?msg=from-root", root),
        Some("root-trace-7"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["service_c"], "ok");
    assert_eq!(body["correlation_id"], "root-trace-7");
    assert_eq!(body["downstream"]["correlation_id"], "root-trace-7");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].correlation_id.as_deref(), Some("root-trace-7"));
    assert!(
        seen[0].target.starts_with("/call-echo?msg=from-root"),
        "target was {}",
        seen[0].target
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_ascii_id_is_forwarded_unchanged() {
    let shutdown = service_chain::Shutdown::new();
    let (leaf, seen) = common::start_capturing_backend().await;
    let middle = common::start_service(
        common::config_for(service_chain::ServiceRole::Middle, Some(leaf), 1_000),
        &shutdown,
    )
    .await;

    let (status, body) = common::get_json_with_raw_id(
        &format!("http://{}/call-echo?msg=x", middle),
        "req-café".as_bytes(),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["correlation_id"], "req-café");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].correlation_id.as_deref(), Some("req-café"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_leaf_echo_is_idempotent() {
    let chain = common::start_chain().await;
    let url = format!("http://{}/echo?msg=hello", chain.leaf);

    for _ in 0..3 {
        let (status, body) = common::get_json(&url, Some("fixed")).await;
        assert_eq!(status, 200);
        assert_eq!(body, serde_json::json!({"echo": "hello", "correlation_id": "fixed"}));
    }

    chain.shutdown.trigger();
}

#[tokio::test]
async fn test_missing_msg_equals_empty_msg() {
    let chain = common::start_chain().await;

    for addr_path in [
        format!("{}/echo", chain.leaf),
        format!("{}/call-echo", chain.middle),
        format!("{}/process", chain.root),
    ] {
        let (_, omitted) = common::get_json(&format!("http://{}", addr_path), Some("same")).await;
        let (_, empty) = common::get_json(&format!("http://{}?msg=", addr_path), Some("same")).await;
        assert_eq!(omitted, empty, "differs at {}", addr_path);
    }

    let (_, body) = common::get_json(&format!("http://{}/process", chain.root), None).await;
    assert_eq!(body["downstream"]["service_a"]["echo"], "");

    chain.shutdown.trigger();
}

#[tokio::test]
async fn test_health_endpoints() {
    let chain = common::start_chain().await;

    for addr in [chain.leaf, chain.middle, chain.root] {
        let (status, body) = common::get_json(&format!("http://{}/health", addr), None).await;
        assert_eq!(status, 200);
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }

    chain.shutdown.trigger();
}
