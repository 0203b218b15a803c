use crate::events::{
    EVENT_ERROR, EVENT_READY, EVENT_STDERR, EVENT_STOPPED, ready_message, webview_event,
};

use rfs_config::Credentials;
use rfs_supervisor::SupervisorEvent;
use serde_json::json;

fn credentials() -> Credentials {
    Credentials {
        username: "rustfsadmin".into(),
        password: "secret".into(),
    }
}

#[test]
fn test_stderr_event_carries_line() {
    let (name, payload) = webview_event(&SupervisorEvent::Stderr {
        line: "disk warming up".into(),
    });

    assert_eq!(name, EVENT_STDERR);
    assert_eq!(payload, json!("disk warming up"));
}

#[test]
fn test_process_error_event_carries_message() {
    let (name, payload) = webview_event(&SupervisorEvent::ProcessError {
        message: "spawn failed".into(),
    });

    assert_eq!(name, EVENT_ERROR);
    assert_eq!(payload, json!("spawn failed"));
}

#[test]
fn test_stopped_event_carries_exit_code_or_null() {
    let (name, payload) = webview_event(&SupervisorEvent::ProcessStopped {
        exit_code: Some(3),
    });
    assert_eq!(name, EVENT_STOPPED);
    assert_eq!(payload, json!(3));

    let (_, killed) = webview_event(&SupervisorEvent::ProcessStopped { exit_code: None });
    assert_eq!(killed, json!(null));
}

#[test]
fn test_ready_event_carries_url_and_credentials() {
    let (name, payload) = webview_event(&SupervisorEvent::ServiceReady {
        service_url: "http://127.0.0.1:9000/".into(),
        credentials: credentials(),
    });

    assert_eq!(name, EVENT_READY);
    assert_eq!(
        payload,
        json!({
            "serviceUrl": "http://127.0.0.1:9000/",
            "defaultCredentials": { "username": "rustfsadmin", "password": "secret" },
        })
    );
}

#[test]
fn test_event_names_match_frontend() {
    assert_eq!(EVENT_STDERR, "rustfs-stderr");
    assert_eq!(EVENT_ERROR, "rustfs-error");
    assert_eq!(EVENT_STOPPED, "rustfs-stopped");
    assert_eq!(EVENT_READY, "rustfs-ready");
}

#[test]
fn test_ready_message_lists_url_and_credentials() {
    let message = ready_message("http://127.0.0.1:9000/", &credentials());

    assert!(message.contains("http://127.0.0.1:9000/"));
    assert!(message.contains("Username: rustfsadmin"));
    assert!(message.contains("Password: secret"));
}
