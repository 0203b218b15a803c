use crate::{
    Envelope, OpenExternalResponse, ServerState, StartOutcome, StatusReport, SupervisorEvent,
};

use googletest::assert_that;
use googletest::prelude::eq;
use rfs_config::ServerConfig;
use serde_json::json;

#[test]
fn given_started_outcome_then_camel_case_with_url_and_credentials() {
    let outcome = StartOutcome::started(&ServerConfig::default());

    let value = serde_json::to_value(&outcome).unwrap();

    assert_that!(value["success"], eq(&json!(true)));
    assert_that!(value["message"], eq(&json!("Service started successfully")));
    assert_that!(value["serviceUrl"], eq(&json!("http://127.0.0.1:9000/")));
    assert_that!(
        value["defaultCredentials"],
        eq(&json!({ "username": "rustfsadmin", "password": "rustfsadmin" }))
    );
}

#[test]
fn given_failed_outcome_then_optional_fields_omitted() {
    let value = serde_json::to_value(StartOutcome::failed("nope")).unwrap();

    assert_that!(value, eq(&json!({ "success": false, "message": "nope" })));
}

#[test]
fn given_status_report_then_is_running_and_pid() {
    assert_that!(
        serde_json::to_value(StatusReport::running(42)).unwrap(),
        eq(&json!({ "isRunning": true, "pid": 42 }))
    );
    assert_that!(
        serde_json::to_value(StatusReport::stopped()).unwrap(),
        eq(&json!({ "isRunning": false, "pid": null }))
    );
}

#[test]
fn given_envelopes_then_success_and_message() {
    assert_that!(
        serde_json::to_value(Envelope::stopped()).unwrap(),
        eq(&json!({ "success": true, "message": "Service stopped successfully" }))
    );
    assert_that!(Envelope::failed("x").success, eq(false));
}

#[test]
fn given_open_external_success_then_error_omitted() {
    let response = OpenExternalResponse {
        success: true,
        error: None,
    };

    assert_that!(
        serde_json::to_value(response).unwrap(),
        eq(&json!({ "success": true }))
    );
}

#[test]
fn given_state_and_events_then_tagged_snake_case() {
    assert_that!(
        serde_json::to_value(ServerState::Running { pid: 7 }).unwrap(),
        eq(&json!({ "state": "running", "pid": 7 }))
    );
    assert_that!(
        serde_json::to_value(SupervisorEvent::ProcessStopped { exit_code: None }).unwrap(),
        eq(&json!({ "kind": "process_stopped", "exit_code": null }))
    );
}
