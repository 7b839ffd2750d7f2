//! Actions
//!
//! Each payload is its own action type; `TodoAction` is the closed set the
//! reducer matches on.

use unistate_model::{action, fields, Action, ModelError};

action! {
    /// Append a todo
    pub struct AddTodo { title }
}

action! {
    /// Flip the completion flag of the todo at `index`
    pub struct ToggleTodo { index }
}

action! {
    /// Drop every completed todo
    pub struct RemoveDone {}
}

action! {
    /// Show or hide completed todos
    pub struct ToggleShowDone {}
}

/// Root action enum
#[derive(Debug, Clone, PartialEq)]
pub enum TodoAction {
    Add(AddTodo),
    Toggle(ToggleTodo),
    RemoveDone(RemoveDone),
    ToggleShowDone(ToggleShowDone),
}

impl TodoAction {
    pub fn add(title: &str) -> Result<Self, ModelError> {
        AddTodo::new(fields! { title: title }).map(Self::Add)
    }

    pub fn toggle(index: i64) -> Result<Self, ModelError> {
        ToggleTodo::new(fields! { index: index }).map(Self::Toggle)
    }

    pub fn remove_done() -> Self {
        Self::RemoveDone(RemoveDone::default())
    }

    pub fn toggle_show_done() -> Self {
        Self::ToggleShowDone(ToggleShowDone::default())
    }

    /// Name of the wrapped action type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(a) => a.name(),
            Self::Toggle(a) => a.name(),
            Self::RemoveDone(a) => a.name(),
            Self::ToggleShowDone(a) => a.name(),
        }
    }
}
