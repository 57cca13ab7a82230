//! The per-request dispatch state machine.
//!
//! Each request walks four states: command lookup, target resolution
//! (skipped for bootstrap commands), handler invocation, and response
//! mapping. Exactly one wire response is produced per request, on this
//! single control path, and this is the only place failure values are
//! turned into HTTP statuses and bodies.

use marionette_engine::Desktop;
use tracing::{debug, warn};

use crate::registry::{Handle, ObjectRegistry};
use crate::transport::WireResponse;

use super::context::CommandContext;
use super::errors::CommandError;
use super::params::RequestParams;
use super::table;
use super::target::{Target, UiObject};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Routes commands to their handlers and maps outcomes to wire responses.
#[derive(Debug, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Creates a new dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes one command against the registry and engine, producing the
    /// response to write back.
    pub fn dispatch(
        &self,
        command: &str,
        params: &RequestParams,
        registry: &mut ObjectRegistry<UiObject>,
        desktop: &mut Desktop,
    ) -> WireResponse {
        let Some(spec) = table::lookup(command) else {
            let error = CommandError::UnknownCommand {
                command: command.to_owned(),
            };
            warn!(target: DISPATCH_TARGET, command, "unknown command");
            return WireResponse::new(error.http_status(), error.response_body(command));
        };

        let result = if spec.needs_target {
            match resolve_target(params, registry) {
                Ok(target) => {
                    debug!(
                        target: DISPATCH_TARGET,
                        command,
                        handle = %target.handle,
                        kind = target.object.kind_name(),
                        "dispatching command"
                    );
                    let mut ctx = CommandContext::with_target(registry, desktop, params, target);
                    (spec.run)(&mut ctx)
                }
                Err(error) => Err(error),
            }
        } else {
            debug!(target: DISPATCH_TARGET, command, "dispatching bootstrap command");
            let mut ctx = CommandContext::new(registry, desktop, params);
            (spec.run)(&mut ctx)
        };

        match result {
            Ok(outcome) => WireResponse::new(200, outcome.body()),
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    command,
                    error = %error,
                    "command failed"
                );
                WireResponse::new(error.http_status(), error.response_body(command))
            }
        }
    }
}

/// Resolves the `ref` parameter to the object it names.
fn resolve_target(
    params: &RequestParams,
    registry: &ObjectRegistry<UiObject>,
) -> Result<Target, CommandError> {
    let raw = params.named("ref").ok_or(CommandError::MissingRef)?;
    let id: i64 = raw.parse().map_err(|_| CommandError::RefNotNumeric)?;
    let handle = u64::try_from(id)
        .map(Handle::from_wire)
        .map_err(|_| CommandError::UnknownRef)?;
    let object = registry
        .get(handle)
        .map_err(|_| CommandError::UnknownRef)?
        .clone();
    Ok(Target { handle, object })
}

#[cfg(test)]
mod tests {
    use marionette_engine::{
        ApplicationBlueprint, ControlBlueprint, Desktop, WindowBlueprint,
    };
    use rstest::{fixture, rstest};

    use super::*;

    const APP_PATH: &str = "/opt/demo/notepad";

    struct World {
        registry: ObjectRegistry<UiObject>,
        desktop: Desktop,
        dispatcher: Dispatcher,
    }

    impl World {
        fn send(&mut self, command: &str, query: &str) -> WireResponse {
            let params = RequestParams::from_query(query);
            self.dispatcher
                .dispatch(command, &params, &mut self.registry, &mut self.desktop)
        }
    }

    #[fixture]
    fn world() -> World {
        let mut desktop = Desktop::new();
        desktop.install(
            ApplicationBlueprint::new(APP_PATH).window(
                WindowBlueprint::new("Notepad")
                    .control(ControlBlueprint::button("ok_button", "OK"))
                    .control(ControlBlueprint::text_box("body")),
            ),
        );
        World {
            registry: ObjectRegistry::new(),
            desktop,
            dispatcher: Dispatcher::new(),
        }
    }

    /// Launches the app and opens its window, returning the window handle.
    fn open_window(world: &mut World) -> String {
        let launched = world.send("launch", &format!("command=launch&1={APP_PATH}"));
        assert_eq!(launched.status(), 200);
        let app = launched.body().to_owned();
        let window = world.send("getwindow", &format!("ref={app}&1=Notepad"));
        assert_eq!(window.status(), 200);
        window.body().to_owned()
    }

    #[rstest]
    fn unknown_command_is_rejected_without_a_ref(mut world: World) {
        let response = world.send("teleport", "command=teleport");
        assert_eq!(response.status(), 400);
        assert_eq!(response.body(), "Unknown command - 'teleport'");
    }

    #[rstest]
    fn missing_ref_is_reported(mut world: World) {
        let response = world.send("click", "command=click");
        assert_eq!(response.status(), 400);
        assert_eq!(response.body(), "Expected ref id, found none");
    }

    #[rstest]
    fn non_numeric_ref_is_reported(mut world: World) {
        let response = world.send("click", "command=click&ref=first");
        assert_eq!(response.status(), 400);
        assert_eq!(response.body(), "Ref id should be a number");
    }

    #[rstest]
    #[case("7")]
    #[case("-3")]
    #[case("0")]
    fn unregistered_ref_is_reported(mut world: World, #[case] handle: &str) {
        let response = world.send("click", &format!("command=click&ref={handle}"));
        assert_eq!(response.status(), 400);
        assert_eq!(response.body(), "Invalid ref id");
    }

    #[rstest]
    fn launch_mints_the_first_handle(mut world: World) {
        let response = world.send("launch", &format!("command=launch&1={APP_PATH}"));
        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "1");
    }

    #[rstest]
    fn launch_without_path_names_the_parameter(mut world: World) {
        let response = world.send("launch", "command=launch");
        assert_eq!(response.status(), 400);
        assert!(response.body().contains('1'));
        assert!(response.body().contains("application path"));
    }

    #[rstest]
    fn launch_of_unknown_program_is_unclassified(mut world: World) {
        let response = world.send("launch", "command=launch&1=/bin/missing");
        assert_eq!(response.status(), 500);
        assert_eq!(response.body(), "no installed application at '/bin/missing'");
    }

    #[rstest]
    fn wrong_kind_target_names_the_command(mut world: World) {
        world.send("launch", &format!("command=launch&1={APP_PATH}"));
        // Handle 1 is the application; click needs a window or control.
        let response = world.send("click", "command=click&ref=1");
        assert_eq!(response.status(), 400);
        assert_eq!(
            response.body(),
            "'click' is not valid for the specified target"
        );
    }

    #[rstest]
    fn discovery_returns_fresh_handles(mut world: World) {
        let window = open_window(&mut world);
        let button = world.send(
            "getbutton",
            &format!("ref={window}&by=automationid&1=ok_button"),
        );
        assert_eq!(button.status(), 200);
        assert_ne!(button.body(), window);
        let clicked = world.send("click", &format!("ref={}", button.body()));
        assert_eq!(clicked.status(), 200);
        assert_eq!(clicked.body(), "");
    }

    #[rstest]
    fn entered_text_reads_back(mut world: World) {
        let window = open_window(&mut world);
        let found = world.send(
            "gettextbox",
            &format!("ref={window}&by=automationid&1=body"),
        );
        let text_box = found.body().to_owned();
        let entered = world.send("entertext", &format!("ref={text_box}&1=hello"));
        assert_eq!(entered.status(), 200);
        let read = world.send("gettext", &format!("ref={text_box}"));
        assert_eq!(read.status(), 200);
        assert_eq!(read.body(), "hello");
    }

    #[rstest]
    fn close_releases_the_handle(mut world: World) {
        let window = open_window(&mut world);
        let closed = world.send("close", &format!("ref={window}"));
        assert_eq!(closed.status(), 200);
        let reuse = world.send("click", &format!("ref={window}"));
        assert_eq!(reuse.status(), 400);
        assert_eq!(reuse.body(), "Invalid ref id");
    }

    #[rstest]
    fn finder_without_by_names_the_parameter(mut world: World) {
        let window = open_window(&mut world);
        let response = world.send("getbutton", &format!("ref={window}"));
        assert_eq!(response.status(), 400);
        assert_eq!(response.body(), "Expected parameter 'by', found none");
    }

    #[rstest]
    fn finder_with_unknown_by_is_invalid_input(mut world: World) {
        let window = open_window(&mut world);
        let response = world.send("getbutton", &format!("ref={window}&by=role&1=ok"));
        assert_eq!(response.status(), 400);
        assert_eq!(response.body(), "Incorrect value for 'by'");
    }
}
