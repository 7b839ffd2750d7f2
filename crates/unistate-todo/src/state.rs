//! Application state
//!
//! The whole state is a tree of immutable records. Reducers derive new trees
//! with `update`; untouched items keep sharing storage with the previous tree.

use unistate_model::{fields, record, ModelError, Value};

use crate::config::AppConfig;

record! {
    /// A single todo entry
    pub struct Todo {
        /// Text of the entry
        title,
        /// Completion flag
        done,
    }
}

impl Todo {
    pub fn titled(title: &str) -> Result<Self, ModelError> {
        Self::new(fields! { title: title, done: false })
    }

    pub fn text(&self) -> &str {
        self.title().as_str().unwrap_or_default()
    }

    pub fn is_done(&self) -> bool {
        self.done().as_bool().unwrap_or(false)
    }

    /// Same todo with its completion flag flipped
    pub fn toggled(&self) -> Result<Self, ModelError> {
        self.update(fields! { done: !self.is_done() })
    }
}

record! {
    /// Root application state
    pub struct TodoList {
        /// List of `Todo` records
        items,
        /// Whether completed todos are rendered
        show_done,
    }
}

impl TodoList {
    pub fn from_config(config: &AppConfig) -> Result<Self, ModelError> {
        let todos = config
            .initial_todos
            .iter()
            .map(|title| Todo::titled(title))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(fields! {
            items: Value::list(todos),
            show_done: config.show_done,
        })
    }

    /// Decoded todo items, in order
    pub fn todos(&self) -> Vec<Todo> {
        self.items()
            .as_list()
            .unwrap_or_default()
            .iter()
            .filter_map(|item| match Todo::try_from(item.clone()) {
                Ok(todo) => Some(todo),
                Err(e) => {
                    log::warn!("Skipping malformed todo item: {}", e);
                    None
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items().as_list().map_or(0, <[Value]>::len)
    }

    pub fn showing_done(&self) -> bool {
        self.show_done().as_bool().unwrap_or(true)
    }

    /// Same list holding `todos` instead
    pub fn with_todos(&self, todos: Vec<Todo>) -> Result<Self, ModelError> {
        self.update(fields! { items: Value::list(todos) })
    }
}
