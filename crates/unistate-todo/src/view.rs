//! Plain-text rendering of the todo list.

use std::io::{self, Write};

use crate::state::TodoList;

/// Render the list, one numbered line per visible todo plus a summary line.
///
/// Numbers are positions in the full list, so they stay valid for `toggle`
/// while completed todos are hidden.
pub fn render<W: Write>(state: &TodoList, out: &mut W) -> io::Result<()> {
    let todos = state.todos();
    let done = todos.iter().filter(|t| t.is_done()).count();

    if todos.is_empty() {
        writeln!(out, "  (nothing to do)")?;
    }

    for (index, todo) in todos.iter().enumerate() {
        if todo.is_done() && !state.showing_done() {
            continue;
        }
        let mark = if todo.is_done() { 'x' } else { ' ' };
        writeln!(out, "{:>3}. [{}] {}", index, mark, todo.text())?;
    }

    let hidden = if state.showing_done() || done == 0 {
        String::new()
    } else {
        format!(" ({} hidden)", done)
    };
    writeln!(out, "{} open, {} done{}", todos.len() - done, done, hidden)?;
    out.flush()
}

pub fn render_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "commands:")?;
    writeln!(out, "  add <title>   add a todo")?;
    writeln!(out, "  toggle <n>    mark todo n done / not done")?;
    writeln!(out, "  clean         remove completed todos")?;
    writeln!(out, "  filter        show / hide completed todos")?;
    writeln!(out, "  help          show this help")?;
    writeln!(out, "  quit          exit")?;
    out.flush()
}
