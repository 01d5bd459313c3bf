//! End-to-end tests driving the daemon binary over stdio.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::{contains, is_empty};
use serde_json::json;

use quill_protocol::codes;
use quill_protocol::{Message, MessageReader, Request};

fn request_frame() -> Vec<u8> {
    Message::from(Request::new(13, "test/method", Some(json!({"foo": "bar"}))))
        .serialize()
        .expect("serialize failed")
}

#[test]
fn answers_request_with_internal_error_frame() {
    let mut command = cargo_bin_cmd!("quilld");
    let assert = command
        .write_stdin(request_frame())
        .assert()
        .success()
        .stderr(is_empty());

    let output = assert.get_output();
    let mut reader = MessageReader::new(&output.stdout[..]);
    let reply = reader
        .read_message()
        .expect("reply failed to parse")
        .expect("reply missing");
    let Message::Response(response) = reply else {
        panic!("expected a response, got {reply:?}");
    };
    assert_eq!(response.id, 13);
    assert!(response.result.is_none());
    let error = response.error.as_ref().expect("error object missing");
    assert_eq!(error.code, codes::INTERNAL_ERROR);
    assert_eq!(error.message, "test/method not implemented");
    assert_eq!(error.data, Some(json!({"foo": "bar"})));
    assert!(reader.read_message().expect("trailing read failed").is_none());
}

#[test]
fn recovers_after_malformed_frame_and_logs_to_file() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let log_path = dir.path().join("quilld.log");

    let mut input = b"BadHeader\r\n\r\n".to_vec();
    input.extend_from_slice(&request_frame());

    let mut command = cargo_bin_cmd!("quilld");
    let assert = command
        .arg("--verbose")
        .arg("--log-format")
        .arg("compact")
        .arg("--log-file")
        .arg(&log_path)
        .write_stdin(input)
        .assert()
        .success()
        .stderr(contains("server error"));

    let output = assert.get_output();
    let mut reader = MessageReader::new(&output.stdout[..]);
    let reply = reader
        .read_message()
        .expect("reply failed to parse")
        .expect("reply missing");
    assert!(matches!(reply, Message::Response(_)));
    assert!(reader.read_message().expect("trailing read failed").is_none());

    let log = std::fs::read_to_string(&log_path).expect("log file unreadable");
    assert!(log.contains("starting server"));
    assert!(log.contains("server error"));
}
