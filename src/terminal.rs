//! Terminal management: raw mode RAII guard, panic hook, and window title.

use crossterm::{cursor, execute, queue, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout, Write};
use std::path::Path;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// RAII guard owning the ratatui terminal; restores terminal state on drop.
pub struct TerminalGuard {
    pub terminal: Tui,
}

impl TerminalGuard {
    /// Enter alternate screen and raw mode, hide the cursor.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();
        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(TerminalGuard { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore() {
    let _ = terminal::disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = queue!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = stdout.flush();
}

/// Restore the terminal before the default panic message is printed.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        default_hook(info);
    }));
}

/// Get the current terminal size, falling back to (80, 24) if unavailable.
pub fn terminal_size() -> (u16, u16) {
    terminal::size().unwrap_or((80, 24))
}

/// Set the window title to "ProjectMap: <dir>", fitted to `max_cols`.
pub fn set_title(path: &Path, max_cols: usize) {
    if let Some(title) = build_terminal_title(path, max_cols) {
        let _ = execute!(io::stdout(), terminal::SetTitle(title));
    }
}

/// Build a title from the directory name only, truncated with a middle
/// ellipsis so it does not exceed `max_cols` characters.
pub fn build_terminal_title(path: &Path, max_cols: usize) -> Option<String> {
    if max_cols == 0 {
        return None;
    }

    let display = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    let raw_title = format!("ProjectMap: {}", display);
    let sanitized = sanitize_title(&raw_title);
    Some(truncate_middle(&sanitized, max_cols))
}

/// Remove control characters that might interfere with terminal behavior.
fn sanitize_title(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}

/// Truncate in the middle with "..." so the char count does not exceed `max_cols`.
fn truncate_middle(input: &str, max_cols: usize) -> String {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= max_cols {
        return input.to_string();
    }
    if max_cols <= 3 {
        return ".".repeat(max_cols);
    }

    let keep = max_cols - 3;
    let prefix_len = keep / 2 + keep % 2;
    let suffix_len = keep / 2;

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();
    format!("{prefix}...{suffix}")
}
