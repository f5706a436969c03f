//! Main loop of the interactive browser: draw, read a key, apply it.

use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyEventKind};
use std::path::Path;
use tracing::debug;

use crate::browser::{view, Action, Browser};
use crate::error::SaveError;
use crate::output::{save_tree, suggest_free_path, SaveTarget};
use crate::render::render_text;
use crate::terminal::Tui;

/// Run the browser until the user quits. Blocks on terminal input.
pub fn run(terminal: &mut Tui, browser: &mut Browser, target: &SaveTarget) -> Result<()> {
    loop {
        terminal.draw(|frame| view::draw(frame, browser))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match browser.handle_key(key) {
                Action::Quit => break,
                Action::Save => {
                    let message = save_from_browser(browser, target);
                    browser.set_status(message);
                }
                Action::SaveAs(dest) => {
                    let message = save_to_path(browser, &dest);
                    browser.set_status(message);
                }
                Action::None => {}
            },
            // The next draw picks up the new size.
            Event::Resize(w, h) => debug!(w, h, "resize"),
            _ => {}
        }
    }
    Ok(())
}

/// Render the current flags and save them to the target's destination;
/// returns the status line to show.
pub fn save_from_browser(browser: &mut Browser, target: &SaveTarget) -> String {
    let tree = browser.tree();
    let dest = target.resolve(&tree.node(tree.root()).name, Local::now().naive_local());
    save_to_path(browser, &dest)
}

/// Render the current flags and save them to `dest`.
///
/// A failed save leaves the tree untouched and opens the file name prompt:
/// a taken name is replaced by a free `-N` suggestion, any other failure
/// keeps the rejected path so the user can edit it.
pub fn save_to_path(browser: &mut Browser, dest: &Path) -> String {
    let text = render_text(browser.tree(), browser.root_path());

    match save_tree(&text, dest) {
        Ok(()) => format!(" Saved to {}", dest.display()),
        Err(e @ SaveError::DestinationConflict { .. }) => {
            debug!(error = %e, "save rejected");
            browser.prompt_save_as(&suggest_free_path(dest));
            format!(" {e}. Enter saves under the name below, Esc cancels")
        }
        Err(e) => {
            let detail = std::error::Error::source(&e)
                .map(|source| format!(": {source}"))
                .unwrap_or_default();
            debug!(error = %e, detail = %detail, "save failed");
            browser.prompt_save_as(dest);
            format!(" {e}{detail}")
        }
    }
}
