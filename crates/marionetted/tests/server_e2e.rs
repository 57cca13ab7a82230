//! End-to-end tests driving a live server over TCP.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use marionette_config::ServerEndpoint;
use marionette_engine::{
    ApplicationBlueprint, ControlBlueprint, Desktop, WindowBlueprint,
};
use marionetted::Server;

const APP_PATH: &str = "/opt/demo/notepad";

fn demo_desktop() -> Desktop {
    let mut desktop = Desktop::new();
    desktop.install(
        ApplicationBlueprint::new(APP_PATH).window(
            WindowBlueprint::new("Notepad")
                .control(ControlBlueprint::button("ok_button", "OK"))
                .control(ControlBlueprint::text_box("body")),
        ),
    );
    desktop
}

/// A server running on an ephemeral port in a background thread.
struct ServerHarness {
    addr: SocketAddr,
    finished: mpsc::Receiver<()>,
}

impl ServerHarness {
    fn start() -> Self {
        let endpoint = ServerEndpoint::new("127.0.0.1", 0);
        let server = Server::bind(&endpoint, demo_desktop()).expect("bind server");
        let addr = server.local_addr().expect("local addr");
        let (sender, finished) = mpsc::channel();
        thread::spawn(move || {
            server.run().expect("server run");
            let _ = sender.send(());
        });
        Self { addr, finished }
    }

    fn request(&self, method: &str, path_and_query: &str) -> (u16, String) {
        let mut stream = TcpStream::connect(self.addr).expect("connect");
        let request = format!(
            "{method} {path_and_query} HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n"
        );
        stream.write_all(request.as_bytes()).expect("send request");
        let mut response = String::new();
        stream.read_to_string(&mut response).expect("read response");

        let status = response
            .strip_prefix("HTTP/1.1 ")
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|code| code.parse().ok())
            .expect("status code");
        let body = response
            .split_once("\r\n\r\n")
            .map(|(_, body)| body.to_owned())
            .unwrap_or_default();
        (status, body)
    }

    fn get(&self, query: &str) -> (u16, String) {
        self.request("GET", &format!("/?{query}"))
    }

    /// Waits for the accept loop to wind down.
    fn wait_for_shutdown(&self) {
        self.finished
            .recv_timeout(Duration::from_secs(5))
            .expect("server should stop");
    }
}

/// Boots a session: launch, open the main window, find the button.
fn open_session(server: &ServerHarness) -> (String, String, String) {
    let (status, app) = server.get(&format!("command=launch&1={APP_PATH}"));
    assert_eq!(status, 200);
    let (status, window) = server.get(&format!("command=getwindow&ref={app}&1=Notepad"));
    assert_eq!(status, 200);
    let (status, button) = server.get(&format!(
        "command=getbutton&ref={window}&by=automationid&1=ok_button"
    ));
    assert_eq!(status, 200);
    (app, window, button)
}

#[test]
fn click_on_a_supported_target_answers_empty() {
    let server = ServerHarness::start();
    let (_, _, button) = open_session(&server);
    let (status, body) = server.get(&format!("command=click&ref={button}"));
    assert_eq!(status, 200);
    assert_eq!(body, "");
}

#[test]
fn entered_text_reads_back() {
    let server = ServerHarness::start();
    let (_, window, _) = open_session(&server);
    let (status, text_box) = server.get(&format!(
        "command=gettextbox&ref={window}&by=automationid&1=body"
    ));
    assert_eq!(status, 200);

    let (status, _) = server.get(&format!("command=entertext&ref={text_box}&1=hello"));
    assert_eq!(status, 200);
    let (status, body) = server.get(&format!("command=gettext&ref={text_box}"));
    assert_eq!(status, 200);
    assert_eq!(body, "hello");
}

#[test]
fn close_invalidates_the_handle() {
    let server = ServerHarness::start();
    let (_, window, _) = open_session(&server);
    let (status, _) = server.get(&format!("command=close&ref={window}"));
    assert_eq!(status, 200);

    let (status, body) = server.get(&format!("command=click&ref={window}"));
    assert_eq!(status, 400);
    assert_eq!(body, "Invalid ref id");
}

#[test]
fn discovery_mints_distinct_positive_handles() {
    let server = ServerHarness::start();
    let (app, window, button) = open_session(&server);
    assert_eq!(app, "1");
    let window_handle: u64 = window.parse().expect("window handle");
    let button_handle: u64 = button.parse().expect("button handle");
    assert!(window_handle > 1);
    assert!(button_handle > window_handle);
}

#[test]
fn ping_answers_pong_and_the_loop_continues() {
    let server = ServerHarness::start();
    let (status, body) = server.get("command=ping");
    assert_eq!(status, 200);
    assert_eq!(body, "pong");

    // The probe left no state behind; the next session still gets handle 1.
    let (status, app) = server.get(&format!("command=launch&1={APP_PATH}"));
    assert_eq!(status, 200);
    assert_eq!(app, "1");
}

#[test]
fn quit_stops_the_service() {
    let server = ServerHarness::start();
    let (status, body) = server.get("command=quit");
    assert_eq!(status, 200);
    assert_eq!(body, "Bye bye!");
    server.wait_for_shutdown();
}

#[test]
fn quit_with_a_ref_is_an_ordinary_unknown_command() {
    let server = ServerHarness::start();
    let (status, body) = server.get("command=quit&ref=1");
    assert_eq!(status, 400);
    assert_eq!(body, "Unknown command - 'quit'");

    // The loop is still alive.
    let (status, _) = server.get("command=ping");
    assert_eq!(status, 200);
}

#[test]
fn request_without_a_command_is_rejected() {
    let server = ServerHarness::start();
    let (status, body) = server.get("ref=1");
    assert_eq!(status, 400);
    assert_eq!(body, "Expected a command, found none");
}

#[test]
fn unknown_command_does_not_require_a_ref() {
    let server = ServerHarness::start();
    let (status, body) = server.get("command=teleport");
    assert_eq!(status, 400);
    assert_eq!(body, "Unknown command - 'teleport'");
}

#[test]
fn missing_positional_parameter_names_the_ordinal() {
    let server = ServerHarness::start();
    let (status, body) = server.get("command=launch");
    assert_eq!(status, 400);
    assert!(body.contains('1'), "body should name the ordinal: {body}");
    assert!(body.contains("application path"));
}

#[test]
fn wrong_kind_target_is_rejected_with_the_command_name() {
    let server = ServerHarness::start();
    let (status, app) = server.get(&format!("command=launch&1={APP_PATH}"));
    assert_eq!(status, 200);
    let (status, body) = server.get(&format!("command=click&ref={app}"));
    assert_eq!(status, 400);
    assert_eq!(body, "'click' is not valid for the specified target");
}

#[test]
fn non_get_requests_apply_side_effects_without_a_body() {
    let server = ServerHarness::start();
    let (status, body) = server.request("POST", &format!("/?command=launch&1={APP_PATH}"));
    assert_eq!(status, 200);
    assert_eq!(body, "", "non-GET responses carry no body");

    // The launch still happened: handle 1 resolves.
    let (status, window) = server.get("command=getwindow&ref=1&1=Notepad");
    assert_eq!(status, 200);
    assert!(!window.is_empty());
}

#[test]
fn malformed_requests_do_not_kill_the_loop() {
    let server = ServerHarness::start();
    let mut stream = TcpStream::connect(server.addr).expect("connect");
    stream
        .write_all(b"this is not http\r\n\r\n")
        .expect("send garbage");
    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read response");
    assert!(response.starts_with("HTTP/1.1 400"));

    let (status, _) = server.get("command=ping");
    assert_eq!(status, 200);
}

#[cfg(unix)]
#[test]
fn watchdog_quits_the_server_once_the_parent_is_gone() {
    let server = ServerHarness::start();
    let mut child = std::process::Command::new("true")
        .spawn()
        .expect("spawn child");
    let pid = i32::try_from(child.id()).expect("pid fits");
    child.wait().expect("wait for child");

    let endpoint = ServerEndpoint::new("127.0.0.1", server.addr.port());
    marionetted::watch_parent(pid, endpoint);
    server.wait_for_shutdown();
}
