use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use unistate_model::SameRef;
use unistate_store::Store;

mod actions;
mod commands;
mod config;
mod logger;
mod reducer;
mod state;
mod view;

use commands::Command;
use config::AppConfig;
use state::TodoList;

fn main() -> Result<()> {
    let log_file = logger::init()?;

    log::info!("Starting unistate-todo, logging to {}", log_file.display());

    let config = AppConfig::load();
    let initial = TodoList::from_config(&config).context("Failed to build initial state")?;
    log::info!("Starting with {} todo(s)", initial.len());

    let mut store = Store::with_fallible_reducer(initial, reducer::reduce);

    // Re-render only when the reducer produced a new state
    store.try_on_dispatch(|old: &TodoList, new: &TodoList| {
        if old.same_ref(new) {
            log::debug!("State unchanged, skipping render");
            return Ok(());
        }
        view::render(new, &mut io::stdout())
    });
    store.on_dispatch(|_, new: &TodoList| log::trace!("State: {:?}", new));

    view::render(store.state(), &mut io::stdout())?;

    let result = run_app(&mut store, &config);

    if let Err(err) = &result {
        log::error!("Exiting with error: {:#}", err);
    }
    log::info!("Exiting unistate-todo");
    result
}

fn run_app(store: &mut Store<TodoList, actions::TodoAction>, config: &AppConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{}", config.prompt)?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            // EOF
            writeln!(stdout)?;
            return Ok(());
        }

        match commands::parse(&line)? {
            Command::Dispatch(action) => {
                log::debug!("Action {}: {:?}", action.name(), action);
                if let Err(e) = store.dispatch(action).map_err(anyhow::Error::new) {
                    log::error!("Dispatch failed: {:#}", e);
                    eprintln!("error: {:#}", e);
                }
            }
            Command::Help => view::render_help(&mut stdout)?,
            Command::Quit => return Ok(()),
            Command::Nothing => {}
            Command::Invalid(message) => eprintln!("{}", message),
        }
    }
}
