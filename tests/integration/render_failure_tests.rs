use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use serial_test::serial;
use sparse_view::{initialize, registry, Error, MountError, MountPoint, State, TestMount, Value};

/// Accepts the first render, then behaves as if the host removed the element.
struct DetachingMount {
    attached: bool,
    contents: Arc<Mutex<String>>,
}

impl MountPoint for DetachingMount {
    fn replace_contents(&mut self, markup: String) -> Result<(), MountError> {
        if !self.attached {
            return Err(MountError::new("element detached"));
        }
        *self.contents.lock().unwrap() = markup;
        self.attached = false;
        Ok(())
    }
}

#[test]
#[serial]
fn given_a_detached_mount_when_written_should_commit_and_report_mount_error() {
    let contents = Arc::new(Mutex::new(String::new()));
    let mount = DetachingMount {
        attached: true,
        contents: contents.clone(),
    };

    let app = initialize(
        mount,
        |state: &State, _: &State| format!("<p>{}</p>", state["n"]),
        State::new().with("n", 1i64),
    )
    .unwrap();

    let err = app.state.set("n", 2i64).unwrap_err();

    assert!(matches!(err, Error::Mount(_)));
    assert_eq!(err.to_string(), "mount point rejected the rendered markup: element detached");
    assert_eq!(app.state.get("n"), Some(Value::from(2i64)));
    assert_eq!(*contents.lock().unwrap(), "<p>1</p>");
}

#[test]
#[serial]
fn given_a_failing_initial_render_should_not_register_instance() {
    let (previous, _mount) = super::given_initial_form();

    let result = initialize(
        DetachingMount {
            attached: false,
            contents: Arc::new(Mutex::new(String::new())),
        },
        |_: &State, _: &State| String::from("never shown"),
        State::new(),
    );

    assert!(matches!(result, Err(Error::Mount(_))));
    assert!(registry::active().unwrap().ptr_eq(&previous.state));
}

#[test]
#[serial]
fn given_a_view_writing_state_during_render_should_reject_the_nested_write() {
    let mount = TestMount::new();

    let app = initialize(
        mount.clone(),
        |state: &State, _: &State| {
            if !state["echo"].is_truthy() {
                return String::from("idle");
            }
            let nested = registry::active().map(|handle| handle.set("echo", false));
            match nested {
                Some(Err(Error::ReentrantWrite { key })) => format!("rejected {key}"),
                Some(Err(other)) => format!("failed: {other}"),
                Some(Ok(())) => String::from("accepted"),
                None => String::from("no instance"),
            }
        },
        State::new().with("echo", false),
    )
    .unwrap();

    app.state.set("echo", true).unwrap();

    assert_eq!(mount.contents().as_deref(), Some("rejected echo"));
    assert_eq!(app.state.get("echo"), Some(Value::Bool(true)));
    assert_eq!(mount.count(), 2);
}

#[test]
#[serial]
fn given_a_panicking_view_should_propagate_and_leave_a_stale_view() {
    let mount = TestMount::new();

    let app = initialize(
        mount.clone(),
        |state: &State, _: &State| {
            let count = state["count"].as_int().expect("count must be an integer");
            format!("<p>{count}</p>")
        },
        State::new().with("count", 0i64),
    )
    .unwrap();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| app.state.set("count", "many")));

    assert!(outcome.is_err());
    assert_eq!(app.state.get("count"), Some(Value::from("many")));
    assert_eq!(mount.contents().as_deref(), Some("<p>0</p>"));

    // The instance stays usable once the state is valid again.
    app.state.set("count", 3i64).unwrap();
    assert_eq!(mount.contents().as_deref(), Some("<p>3</p>"));
}
