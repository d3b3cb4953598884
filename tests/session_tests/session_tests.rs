//! Tests for Session
//!
//! These tests verify:
//! - Open/close lifecycle and greeting consumption
//! - Command exchange with success and failure outcomes
//! - Timeout faulting and recovery by reopening
//! - Connection errors and broken streams

#[path = "../common/mod.rs"]
mod common;

use std::time::{Duration, Instant};

use common::{unused_port, Reply, StubConsole, GREETING};
use emuconsole::{Config, ConsoleError, Outcome, Response, Session, SessionState};

const SHORT: Duration = Duration::from_millis(300);
const LONG: Duration = Duration::from_secs(2);

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_new_session_is_closed() {
    let session = Session::new(Config::default());
    assert_eq!(session.state(), SessionState::Closed);
    assert!(!session.is_open());
    assert!(session.greeting().is_none());
    assert_eq!(session.endpoint().to_string(), "localhost:5554");
}

#[test]
fn test_execute_on_closed_session_rejected() {
    let mut session = Session::new(Config::default());
    let result = session.execute(&["avd", "status"], LONG);
    assert!(matches!(
        result,
        Err(ConsoleError::NotConnected { state: SessionState::Closed })
    ));
}

#[test]
fn test_open_consumes_greeting() {
    let stub = StubConsole::start(GREETING, vec![]);
    let mut session = Session::new(stub.config());

    session.open().unwrap();

    assert_eq!(session.state(), SessionState::Open);
    let greeting = session.greeting().unwrap();
    assert!(greeting.starts_with("Android Console: Authentication required"));
    assert!(greeting.ends_with(".emulator_console_auth_token'"));

    session.close();
    assert!(stub.join().is_empty());
}

#[test]
fn test_open_greeting_in_fragments() {
    let greeting = Reply::Chunks(
        vec![b"Android Console: ", b"hello\r\n", b"O", b"K\r", b"\n"],
        Duration::from_millis(20),
    );
    let stub = StubConsole::start_with(greeting, vec![Reply::Send(b"OK\r\n")]);
    let mut session = Session::connect(stub.config()).unwrap();

    assert_eq!(session.greeting(), Some("Android Console: hello"));

    let response = session.execute(&["auth", "t"], LONG).unwrap();
    assert_eq!(response, Response::success(""));

    session.close();
    stub.join();
}

#[test]
fn test_first_command_sees_no_greeting_bytes() {
    let stub = StubConsole::start(GREETING, vec![Reply::Send(b"OK\r\n")]);
    let mut session = Session::connect(stub.config()).unwrap();

    let response = session.execute(&["auth", "mytoken"], LONG).unwrap();
    assert_eq!(response.body, "");

    session.close();
    stub.join();
}

#[test]
fn test_close_twice_is_noop() {
    let stub = StubConsole::start(GREETING, vec![]);
    let mut session = Session::connect(stub.config()).unwrap();

    session.close();
    session.close();
    assert_eq!(session.state(), SessionState::Closed);

    // Closing a never-opened session is fine too
    let mut fresh = Session::new(Config::default());
    fresh.close();
    fresh.close();

    stub.join();
}

#[test]
fn test_execute_after_close_rejected() {
    let stub = StubConsole::start(GREETING, vec![]);
    let mut session = Session::connect(stub.config()).unwrap();
    session.close();

    let result = session.execute(&["avd", "status"], LONG);
    assert!(matches!(result, Err(ConsoleError::NotConnected { .. })));
    stub.join();
}

// =============================================================================
// Command Exchange Tests
// =============================================================================

#[test]
fn test_execute_success_and_failure() {
    let stub = StubConsole::start(
        GREETING,
        vec![
            Reply::Send(b"OK\r\n"),
            Reply::Send(b"running\r\nOK\r\n"),
            Reply::Send(b"KO: unknown command\r\n"),
        ],
    );
    let mut session = Session::connect(stub.config()).unwrap();

    let auth = session.execute(&["auth", "mytoken"], LONG).unwrap();
    assert_eq!(auth.outcome, Outcome::Success);

    let status = session.execute(&["avd", "status"], LONG).unwrap();
    assert_eq!(status, Response::success("running"));

    // A KO reply is an outcome, and the session stays usable
    let bogus = session.execute(&["bogus"], LONG).unwrap();
    assert_eq!(bogus, Response::failure("unknown command"));
    assert!(session.is_open());

    session.close();
    let lines = stub.join();
    assert_eq!(lines, vec!["auth mytoken\n", "avd status\n", "bogus\n"]);
}

#[test]
fn test_execute_response_in_fragments() {
    let reply = Reply::Chunks(
        vec![b"line one\r", b"\nline two\r\n", b"OK", b"\r\n"],
        Duration::from_millis(20),
    );
    let stub = StubConsole::start(GREETING, vec![reply]);
    let mut session = Session::connect(stub.config()).unwrap();

    let response = session.execute(&["avd", "snapshot", "list"], LONG).unwrap();
    assert_eq!(response, Response::success("line one\r\nline two"));

    session.close();
    stub.join();
}

#[test]
fn test_execute_default_uses_configured_timeout() {
    let stub = StubConsole::start(GREETING, vec![Reply::Send(b"OK\r\n")]);
    let mut session = Session::connect(stub.config()).unwrap();

    let response = session.execute_default(&["network", "status"]).unwrap();
    assert!(response.is_success());

    session.close();
    stub.join();
}

#[test]
fn test_encoding_error_keeps_session_open() {
    let stub = StubConsole::start(GREETING, vec![Reply::Send(b"OK\r\n")]);
    let mut session = Session::connect(stub.config()).unwrap();

    let result = session.execute(&["avd", "name", "ünïcode"], LONG);
    assert!(matches!(result, Err(ConsoleError::Encoding { .. })));
    assert!(session.is_open());

    // Nothing was written for the rejected command
    let response = session.execute(&["avd", "name"], LONG).unwrap();
    assert!(response.is_success());

    session.close();
    assert_eq!(stub.join(), vec!["avd name\n"]);
}

#[test]
fn test_logging_switches_do_not_change_results() {
    let stub = StubConsole::start(
        GREETING,
        vec![Reply::Send(b"a\r\nOK\r\n"), Reply::Send(b"b\r\nOK\r\n")],
    );
    let mut session = Session::connect(stub.config()).unwrap();

    session.enable_logging_command(true).enable_logging_output(true);
    let first = session.execute(&["avd", "name"], LONG).unwrap();

    session.enable_logging_command(false).enable_logging_output(false);
    let second = session.execute(&["avd", "name"], LONG).unwrap();

    assert_eq!(first, Response::success("a"));
    assert_eq!(second, Response::success("b"));

    session.close();
    stub.join();
}

// =============================================================================
// Timeout and Fault Tests
// =============================================================================

#[test]
fn test_timeout_faults_session() {
    let stub = StubConsole::start(GREETING, vec![Reply::Silent]);
    let mut session = Session::connect(stub.config()).unwrap();

    let started = Instant::now();
    let result = session.execute(&["avd", "status"], SHORT);
    assert!(matches!(result, Err(ConsoleError::Timeout(d)) if d == SHORT));
    assert!(started.elapsed() >= SHORT);
    assert_eq!(session.state(), SessionState::Faulted);

    // Every later command fails fast without I/O
    for _ in 0..3 {
        let result = session.execute(&["avd", "status"], LONG);
        assert!(matches!(
            result,
            Err(ConsoleError::NotConnected { state: SessionState::Faulted })
        ));
    }

    session.close();
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(stub.join(), vec!["avd status\n"]);
}

#[test]
fn test_timeout_on_partial_response() {
    let stub = StubConsole::start(GREETING, vec![Reply::Send(b"half a resp")]);
    let mut session = Session::connect(stub.config()).unwrap();

    let result = session.execute(&["avd", "status"], SHORT);
    assert!(matches!(result, Err(ConsoleError::Timeout(_))));
    assert_eq!(session.state(), SessionState::Faulted);

    session.close();
    stub.join();
}

#[test]
fn test_reopen_after_timeout() {
    let stub = StubConsole::start_many(vec![
        (Reply::Send(GREETING), vec![Reply::Silent]),
        (Reply::Send(GREETING), vec![Reply::Send(b"OK\r\n")]),
    ]);
    let mut session = Session::connect(stub.config()).unwrap();

    assert!(session.execute(&["avd", "status"], SHORT).is_err());
    assert_eq!(session.state(), SessionState::Faulted);

    session.close();
    session.open().unwrap();
    assert!(session.is_open());
    assert!(session.execute(&["avd", "status"], LONG).unwrap().is_success());

    session.close();
    assert_eq!(stub.join(), vec!["avd status\n", "avd status\n"]);
}

#[test]
fn test_open_while_open_replaces_connection() {
    let stub = StubConsole::start_many(vec![
        (Reply::Send(b"first\r\nOK\r\n"), vec![]),
        (Reply::Send(b"second\r\nOK\r\n"), vec![]),
    ]);
    let mut session = Session::connect(stub.config()).unwrap();
    assert_eq!(session.greeting(), Some("first"));

    session.open().unwrap();
    assert_eq!(session.greeting(), Some("second"));

    session.close();
    stub.join();
}

#[test]
fn test_hangup_faults_session() {
    let stub = StubConsole::start(GREETING, vec![Reply::Hangup]);
    let mut session = Session::connect(stub.config()).unwrap();

    let result = session.execute(&["kill"], LONG);
    assert!(matches!(
        result,
        Err(ConsoleError::ConnectionClosed) | Err(ConsoleError::Io(_))
    ));
    assert_eq!(session.state(), SessionState::Faulted);

    session.close();
    stub.join();
}

#[test]
fn test_oversized_response_is_protocol_error() {
    let stub = StubConsole::start(
        GREETING,
        vec![Reply::Send(&[b'x'; 8192])],
    );
    let config = Config {
        max_response_size: 1024,
        read_chunk_size: 512,
        ..stub.config()
    };
    let mut session = Session::connect(config).unwrap();

    let result = session.execute(&["avd", "status"], LONG);
    assert!(matches!(result, Err(ConsoleError::Protocol(_))));
    assert_eq!(session.state(), SessionState::Faulted);

    session.close();
    stub.join();
}

// =============================================================================
// Open Failure Tests
// =============================================================================

#[test]
fn test_connect_refused() {
    let config = Config::builder()
        .host("127.0.0.1")
        .port(unused_port())
        .connect_timeout_ms(1_000)
        .build();
    let mut session = Session::new(config);

    let result = session.open();
    assert!(matches!(result, Err(ConsoleError::Connect { .. })));
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn test_greeting_without_marker_is_protocol_error() {
    let stub = StubConsole::start(b"Android Console: no marker here\r\n", vec![]);
    let config = Config {
        greeting_timeout_ms: 300,
        ..stub.config()
    };
    let mut session = Session::new(config);

    let result = session.open();
    assert!(matches!(result, Err(ConsoleError::Protocol(_))));
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.greeting().is_none());

    stub.join();
}

#[test]
fn test_greeting_hangup_leaves_session_closed() {
    let stub = StubConsole::start_with(Reply::Hangup, vec![]);
    let mut session = Session::new(stub.config());

    let result = session.open();
    assert!(matches!(
        result,
        Err(ConsoleError::ConnectionClosed) | Err(ConsoleError::Io(_))
    ));
    assert_eq!(session.state(), SessionState::Closed);

    stub.join();
}

#[test]
fn test_invalid_config_rejected_on_open() {
    let config = Config::builder().host("").build();
    let mut session = Session::new(config);

    assert!(matches!(session.open(), Err(ConsoleError::Config(_))));
    assert_eq!(session.state(), SessionState::Closed);
}
