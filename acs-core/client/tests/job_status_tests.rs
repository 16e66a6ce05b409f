//! 默认任务查询实现测试
//!
//! 传输层只实现 `submit`，任务状态通过 `queryAsyncJobResult` 查询

mod common;

use std::sync::Arc;

use acs_client::api::virtual_machine::DestroyVirtualMachineParams;
use acs_client::{AcsClient, AcsError, AsyncOptions, JobStatus, Transport, Verb};
use common::SubmitOnlyTransport;
use serde_json::json;

const DESTROY_J1: &str = r#"{"destroyvirtualmachineresponse":{"jobid":"J1"}}"#;
const PENDING_J1: &str = r#"{"queryasyncjobresultresponse":{"jobid":"J1","jobstatus":0}}"#;
const DONE_J1: &str = r#"{"queryasyncjobresultresponse":{"jobid":"J1","jobstatus":1,"jobresultcode":0,"jobresulttype":"object","jobresult":{"virtualmachine":{"id":"vm1","success":"true","ostypeid":105}}}}"#;
const FAILED_J1: &str = r#"{"queryasyncjobresultresponse":{"jobid":"J1","jobstatus":2,"jobresultcode":530,"jobresulttype":"object","jobresult":{"errorcode":530,"errortext":"vm is locked"}}}"#;

fn query_call() -> (String, Verb, Option<String>) {
    ("queryAsyncJobResult".to_string(), Verb::Read, Some("J1".to_string()))
}

#[tokio::test]
async fn test_poll_job_status_sends_query() {
    let transport = SubmitOnlyTransport::new(&[PENDING_J1]);

    let status = transport.poll_job_status("J1").await.unwrap();

    assert_eq!(status, JobStatus::Pending);
    assert_eq!(transport.calls(), vec![query_call()]);
}

#[tokio::test(start_paused = true)]
async fn test_destroy_waits_through_default_poll() {
    let transport = Arc::new(SubmitOnlyTransport::new(&[DESTROY_J1, PENDING_J1, DONE_J1]));
    let client = AcsClient::with_transport(transport.clone(), AsyncOptions::default());

    let vm = client
        .virtual_machine()
        .destroy(DestroyVirtualMachineParams::new("vm1"))
        .await
        .unwrap();

    assert_eq!(vm.id, "vm1");
    assert_eq!(vm.success, Some(true));
    assert_eq!(vm.os_type_id, "105");
    assert_eq!(
        transport.calls(),
        vec![
            ("destroyVirtualMachine".to_string(), Verb::Write, None),
            query_call(),
            query_call(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_job_through_default_poll() {
    let transport = Arc::new(SubmitOnlyTransport::new(&[DESTROY_J1, FAILED_J1]));
    let client = AcsClient::with_transport(transport.clone(), AsyncOptions::default());

    let err = client
        .execute(&DestroyVirtualMachineParams::new("vm1"))
        .await
        .unwrap_err();

    match err {
        AcsError::JobFailed { job_id, failure } => {
            assert_eq!(job_id, "J1");
            assert_eq!(failure.error_code, Some(530));
            assert_eq!(failure.error_text, "vm is locked");
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(
        transport.calls(),
        vec![
            ("destroyVirtualMachine".to_string(), Verb::Write, None),
            query_call(),
        ]
    );
}

#[tokio::test]
async fn test_poll_job_status_succeeded_payload() {
    let transport = SubmitOnlyTransport::new(&[DONE_J1]);

    let status = transport.poll_job_status("J1").await.unwrap();

    assert_eq!(
        status,
        JobStatus::Succeeded(json!({
            "virtualmachine": { "id": "vm1", "success": "true", "ostypeid": 105 }
        }))
    );
}
