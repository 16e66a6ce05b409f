//! 按名称查找测试

mod common;

use std::sync::Arc;

use acs_client::{AcsClient, AcsError, AsyncOptions};
use common::ScriptedTransport;

const POOLS: &str = r#"{"liststoragepoolsresponse":{"count":3,"storagepool":[
    {"id":"p1","name":"primary"},
    {"id":"p2","name":"primary-backup"},
    {"id":"p3","name":"Primary"}
]}}"#;

#[tokio::test]
async fn test_get_by_name_exact_match() {
    let transport = Arc::new(ScriptedTransport::new().reply(POOLS));
    let client = AcsClient::with_transport(transport.clone(), AsyncOptions::default());

    let id = client
        .storage_pool()
        .get_id_by_name("primary")
        .await
        .unwrap();
    assert_eq!(id, "p1");

    let submits = transport.submits.lock().unwrap();
    assert_eq!(submits[0].0, "listStoragePools");
    assert_eq!(submits[0].1.get("name"), Some("primary"));
}

#[tokio::test]
async fn test_get_by_name_rejects_fuzzy_match() {
    let transport = Arc::new(ScriptedTransport::new().reply(
        r#"{"liststoragepoolsresponse":{"count":1,"storagepool":[{"id":"p2","name":"primary-backup"}]}}"#,
    ));
    let client = AcsClient::with_transport(transport, AsyncOptions::default());

    let err = client
        .storage_pool()
        .get_by_name("primary")
        .await
        .unwrap_err();
    assert!(matches!(err, AcsError::NotFound(_)));
}

#[tokio::test]
async fn test_get_by_name_empty_list() {
    let transport = Arc::new(ScriptedTransport::new().reply(r#"{"listvirtualmachinesresponse":{}}"#));
    let client = AcsClient::with_transport(transport, AsyncOptions::default());

    let err = client
        .virtual_machine()
        .get_by_name("web-01")
        .await
        .unwrap_err();
    assert!(matches!(err, AcsError::NotFound(_)));
}

#[tokio::test]
async fn test_get_by_name_ambiguous() {
    let transport = Arc::new(ScriptedTransport::new().reply(
        r#"{"listsystemvmsresponse":{"count":2,"systemvm":[
            {"id":"s1","name":"v-1-VM"},
            {"id":"s2","name":"v-1-VM"}
        ]}}"#,
    ));
    let client = AcsClient::with_transport(transport, AsyncOptions::default());

    let err = client.system_vm().get_by_name("v-1-VM").await.unwrap_err();
    assert!(matches!(err, AcsError::AmbiguousName(ref name, 2) if name == "v-1-VM"));
}

#[tokio::test]
async fn test_get_nsx_controller_by_name() {
    let transport = Arc::new(ScriptedTransport::new().reply(
        r#"{"listnsxcontrollersresponse":{"count":1,"nsxController":[
            {"nsxprovideruuid":"u-1","name":"nsx-a","hostname":"10.0.0.9"}
        ]}}"#,
    ));
    let client = AcsClient::with_transport(transport, AsyncOptions::default());

    let controller = client.nsx().get_controller_by_name("nsx-a").await.unwrap();
    assert_eq!(controller.uuid, "u-1");
    assert_eq!(controller.hostname, "10.0.0.9");
}
