use serial_test::serial;
use sparse_view::{registry, Error, Value};

use super::given_initial_form;

#[test]
#[serial]
fn given_initial_form_should_bind_input_to_global_state() {
    let (_app, mount) = given_initial_form();

    assert_eq!(
        mount.contents().unwrap(),
        "<form class=\"\"><input value=\"world\" \
         oninput=\"sparse.state.name = event.target.value\">\
         <p>Hello world</p><ul></ul></form>"
    );
}

#[test]
#[serial]
fn given_initialized_form_should_register_its_state_as_active() {
    let (app, _mount) = given_initial_form();

    let active = registry::active().unwrap();
    assert!(active.ptr_eq(&app.state));
}

#[test]
#[serial]
fn given_an_input_event_when_dispatched_should_write_and_render() {
    let (app, mount) = given_initial_form();

    registry::dispatch_input(&registry::input_handler("name"), "there").unwrap();

    assert_eq!(app.state.get("name"), Some(Value::from("there")));
    assert_eq!(mount.count(), 2);
    assert!(mount
        .contents()
        .unwrap()
        .starts_with("<form class=\" edited\"><input value=\"there\""));
}

#[test]
#[serial]
fn given_a_second_instance_should_replace_global_reference() {
    let (first, first_mount) = given_initial_form();
    let stale_markup = first_mount.contents().unwrap();

    let (second, second_mount) = given_initial_form();

    assert!(registry::active().unwrap().ptr_eq(&second.state));

    // The first instance's markup still carries the global handler; evaluating it
    // now writes into the second instance.
    let handler = stale_markup
        .split("oninput=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap();
    registry::dispatch_input(handler, "late").unwrap();

    assert_eq!(first.state.get("name"), Some(Value::from("world")));
    assert_eq!(second.state.get("name"), Some(Value::from("late")));
    assert_eq!(first_mount.count(), 1);
    assert_eq!(second_mount.count(), 2);
}

#[test]
#[serial]
fn given_no_active_instance_when_dispatched_should_fail() {
    let (_app, _mount) = given_initial_form();
    registry::clear();

    let err = registry::dispatch_input(&registry::input_handler("name"), "x").unwrap_err();

    assert!(matches!(err, Error::NoActiveInstance));
}

#[test]
#[serial]
fn given_a_foreign_handler_when_dispatched_should_fail_without_writing() {
    let (app, mount) = given_initial_form();

    let err = registry::dispatch_input("alert(1)", "x").unwrap_err();

    assert!(matches!(err, Error::UnrecognizedHandler(ref h) if h == "alert(1)"));
    assert_eq!(app.state.get("name"), Some(Value::from("world")));
    assert_eq!(mount.count(), 1);
}
