use sparse_view::{html, map_list, registry, State};

/// A small form: a bound name input, a greeting, and the list of submitted names.
pub(crate) fn form_view(state: &State, prev: &State) -> String {
    let names = state["names"].as_list().unwrap_or_default();
    let edited = if state["name"] != prev["name"] { " edited" } else { "" };

    html!(
        "<form class=\"", edited, "\"><input ", registry::bind_input(state, "name"),
        "><p>Hello ", state["name"], "</p><ul>",
        map_list(names, |name, i| format!("<li data-i=\"{i}\">{name}</li>")), "</ul></form>"
    )
}

pub(crate) fn initial_form_state() -> State {
    State::new()
        .with("name", "world")
        .with("names", Vec::<&str>::new())
}
