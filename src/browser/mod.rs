//! Interactive tree browser: selection, view expansion, and collapse toggling.

pub mod view;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::tree::{NodeDetails, NodeId, Tree};

const PAGE: usize = 10;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Save,
    /// Save to a path the user typed into the file name prompt.
    SaveAs(PathBuf),
    Quit,
}

/// A visible row in the tree pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    pub depth: usize,
}

/// Browser state over an owned tree.
pub struct Browser {
    tree: Tree,
    root_path: PathBuf,
    expanded: HashSet<NodeId>,
    rows: Vec<Row>,
    list_state: ListState,
    status: Option<String>,
    use_color: bool,
    /// Edit buffer of the file name prompt, when it is open.
    save_as: Option<String>,
}

impl Browser {
    /// Open a browser with the root expanded and selected.
    pub fn new(tree: Tree, root_path: PathBuf, use_color: bool) -> Self {
        let mut expanded = HashSet::new();
        expanded.insert(tree.root());
        let mut browser = Self {
            tree,
            root_path,
            expanded,
            rows: Vec::new(),
            list_state: ListState::default().with_selected(Some(0)),
            status: None,
            use_color,
            save_as: None,
        };
        browser.rebuild_rows();
        browser
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn selected_index(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn selected(&self) -> NodeId {
        self.rows
            .get(self.selected_index())
            .map(|r| r.id)
            .unwrap_or_else(|| self.tree.root())
    }

    pub fn details(&self) -> NodeDetails {
        self.tree.details(self.selected())
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    /// Whether `id` has children the view can show.
    pub fn is_expandable(&self, id: NodeId) -> bool {
        let node = self.tree.node(id);
        node.is_dir && !node.is_symlink && !node.children().is_empty()
    }

    pub(crate) fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    /// Open the file name prompt pre-filled with `suggested`.
    pub fn prompt_save_as(&mut self, suggested: &Path) {
        self.save_as = Some(suggested.to_string_lossy().into_owned());
    }

    /// Current text of the file name prompt, if it is open.
    pub fn save_as_input(&self) -> Option<&str> {
        self.save_as.as_deref()
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        if self.save_as.is_some() {
            return self.handle_prompt_key(key);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('s') => return Action::Save,
            KeyCode::Up | KeyCode::Char('k') => self.move_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(1),
            KeyCode::PageUp => self.move_up(PAGE),
            KeyCode::PageDown => self.move_down(PAGE),
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(self.rows.len().saturating_sub(1)),
            KeyCode::Right | KeyCode::Char('l') => self.expand_selected(),
            KeyCode::Left | KeyCode::Char('h') => self.fold_selected(),
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('x') => self.toggle_selected(),
            _ => {}
        }
        Action::None
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Action {
        let Some(input) = self.save_as.as_mut() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.save_as = None;
                self.status = Some("Save cancelled".to_string());
            }
            KeyCode::Enter => {
                let name = input.trim();
                if !name.is_empty() {
                    let dest = PathBuf::from(name);
                    self.save_as = None;
                    return Action::SaveAs(dest);
                }
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
        Action::None
    }

    fn select(&mut self, index: usize) {
        let last = self.rows.len().saturating_sub(1);
        self.list_state.select(Some(index.min(last)));
    }

    fn move_up(&mut self, by: usize) {
        self.select(self.selected_index().saturating_sub(by));
    }

    fn move_down(&mut self, by: usize) {
        self.select(self.selected_index().saturating_add(by));
    }

    fn expand_selected(&mut self) {
        let id = self.selected();
        if !self.is_expandable(id) {
            return;
        }
        if self.expanded.insert(id) {
            self.rebuild_rows();
        } else {
            self.move_down(1);
        }
    }

    fn fold_selected(&mut self) {
        let id = self.selected();
        if self.is_expandable(id) && self.expanded.remove(&id) {
            self.rebuild_rows();
            self.select_node(id);
        } else if let Some(parent) = self.tree.parent(id) {
            self.select_node(parent);
        }
    }

    fn toggle_selected(&mut self) {
        let id = self.selected();
        if !self.tree.node(id).is_dir {
            return;
        }
        let skip = self.tree.toggle_skip(id);
        let name = &self.tree.node(id).name;
        self.status = Some(if skip {
            format!("{name}: collapsed [×]")
        } else {
            format!("{name}: expanded in output")
        });
    }

    fn select_node(&mut self, id: NodeId) {
        if let Some(index) = self.rows.iter().position(|r| r.id == id) {
            self.select(index);
        }
    }

    /// Recompute visible rows from the expansion set, keeping the selected node
    /// selected when it is still visible.
    fn rebuild_rows(&mut self) {
        let selected = self.rows.get(self.selected_index()).map(|r| r.id);

        let mut rows = Vec::new();
        let mut stack = vec![Row {
            id: self.tree.root(),
            depth: 0,
        }];
        while let Some(row) = stack.pop() {
            rows.push(row);
            if self.expanded.contains(&row.id) && self.is_expandable(row.id) {
                for &child in self.tree.children(row.id).iter().rev() {
                    stack.push(Row {
                        id: child,
                        depth: row.depth + 1,
                    });
                }
            }
        }
        self.rows = rows;

        match selected {
            Some(id) => self.select_node(id),
            None => self.select(0),
        }
    }
}
