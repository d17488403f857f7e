//! Line-oriented terminal front end. Reads commands from stdin, forwards them
//! to the [`SessionManager`] and re-renders the page after each one.

pub mod command;
pub mod render;

use anyhow::Result;
use chrono::Local;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::manager::{SessionManager, ViewError};

pub use command::Command;

const ENABLE_LOGS: bool = true;

use crate::log_debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies one command to the page.
pub async fn execute(manager: &SessionManager, command: Command) -> Result<Flow, ViewError> {
    log_debug!("command: {:?}", command);
    let quit = matches!(command, Command::Quit);
    match command {
        Command::Help | Command::Quit => {}
        Command::Refresh => {
            manager.refresh().await?;
        }
        Command::Search(q) => {
            manager.set_search(q).await?;
        }
        Command::Sort(field) => {
            manager.set_sort_by(field).await?;
        }
        Command::Order(order) => {
            manager.set_order(order).await?;
        }
        Command::Limit(limit) => {
            manager.set_page_size(limit).await?;
        }
        Command::Next => {
            manager.next_page().await?;
        }
        Command::Prev => {
            manager.prev_page().await?;
        }
        Command::Page(page) => {
            manager.go_to_page(page).await?;
        }
        Command::NewField(field, value) => manager.edit_create_form(field, value).await,
        Command::NewClear => manager.clear_create_form().await,
        Command::NewSubmit => manager.submit_create().await?,
        Command::Open(id) => manager.open_detail(id).await?,
        Command::Edit => manager.begin_edit().await?,
        Command::Set(field, value) => manager.edit_draft(field, value).await?,
        Command::Save => manager.save_draft().await?,
        Command::Cancel => manager.cancel_edit().await?,
        Command::Close => manager.close_detail().await,
        Command::Delete(id) => manager.request_delete(id).await?,
        Command::Confirm => manager.confirm_delete().await?,
        Command::Abort => manager.cancel_delete().await,
    }

    Ok(if quit { Flow::Quit } else { Flow::Continue })
}

/// Validation and request failures already produced a notice; only the
/// remaining errors need to be printed on their own.
fn needs_own_message(err: &ViewError) -> bool {
    !matches!(err, ViewError::Validation(_) | ViewError::Request(_))
}

async fn print_page(manager: &SessionManager, color: bool) -> Result<()> {
    let mut out = String::new();
    for notice in manager.take_notices().await {
        out.push_str(&render::render_notice(&notice, color));
        out.push('\n');
    }
    out.push_str(&render::render_page(&manager.snapshot().await, &Local, color));
    write_out(&out).await
}

async fn write_out(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

async fn prompt() -> Result<()> {
    write_out("> ").await
}

/// Runs until `quit` or end of input.
pub async fn run_loop(manager: SessionManager, color: bool) -> Result<()> {
    print_page(&manager, color).await?;
    prompt().await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            prompt().await?;
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                write_out(&format!("{message}\n")).await?;
                prompt().await?;
                continue;
            }
        };

        if command == Command::Help {
            write_out(&format!("{}\n", command::HELP)).await?;
            prompt().await?;
            continue;
        }

        match execute(&manager, command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) if needs_own_message(&err) => write_out(&format!("{err}\n")).await?,
            Err(_) => {}
        }

        print_page(&manager, color).await?;
        prompt().await?;
    }

    Ok(())
}
