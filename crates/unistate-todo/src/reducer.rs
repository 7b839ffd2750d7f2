use unistate_model::{fields, ModelError};

use crate::actions::TodoAction;
use crate::state::{Todo, TodoList};

/// Reducer - pure function that produces new state from current state + action
///
/// Actions that would not change anything (an empty title, an out-of-range
/// index, nothing to remove) hand back the very same state so observers can
/// skip work on an identity check.
pub fn reduce(state: &TodoList, action: &TodoAction) -> Result<TodoList, ModelError> {
    match action {
        TodoAction::Add(add) => {
            let title = add.title().as_str().map(str::trim).unwrap_or_default();
            if title.is_empty() {
                log::debug!("Ignoring todo with empty title");
                return Ok(state.clone());
            }
            let mut todos = state.todos();
            todos.push(Todo::titled(title)?);
            state.with_todos(todos)
        }
        TodoAction::Toggle(toggle) => {
            let index = toggle
                .index()
                .as_int()
                .and_then(|i| usize::try_from(i).ok());
            let mut todos = state.todos();
            match index.filter(|&i| i < todos.len()) {
                Some(i) => {
                    todos[i] = todos[i].toggled()?;
                    state.with_todos(todos)
                }
                None => {
                    log::debug!("No todo at index {}", toggle.index());
                    Ok(state.clone())
                }
            }
        }
        TodoAction::RemoveDone(_) => {
            let todos = state.todos();
            let open: Vec<Todo> = todos.iter().filter(|t| !t.is_done()).cloned().collect();
            if open.len() == todos.len() {
                return Ok(state.clone());
            }
            state.with_todos(open)
        }
        TodoAction::ToggleShowDone(_) => {
            state.update(fields! { show_done: !state.showing_done() })
        }
    }
}
