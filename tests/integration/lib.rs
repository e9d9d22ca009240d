mod form_view;

use sparse_view::{initialize, Sparse, State, TestMount};
pub(crate) use form_view::*;

mod inline_binding_tests;
mod render_failure_tests;

pub(crate) fn create_integration_test(initial_state: State) -> (Sparse, TestMount) {
    let mount = TestMount::new();
    let app = initialize(mount.clone(), form_view, initial_state)
        .expect("initial render into a test mount cannot fail");

    (app, mount)
}

pub(crate) fn given_initial_form() -> (Sparse, TestMount) {
    create_integration_test(initial_form_state())
}
