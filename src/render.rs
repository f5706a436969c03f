//! Text rendering of a flagged tree into the saved ASCII-art listing.

use crate::tree::{Node, NodeId, Tree};
use std::path::Path;

/// Legend lines written at the top of every listing.
pub const LEGEND: [&str; 3] = [
    "   [×] - folder the user chose not to expand",
    "   [→] - symbolic link or junction (not expanded)",
    "   A folder name without a trailing / means the folder is empty.",
];

const SKIP_MARK: &str = "[×] ";
const SYMLINK_MARK: &str = " [→]";
const SEPARATOR: char = '/';

const BRANCH: &str = "\u{251c}\u{2500} "; // ├─
const CORNER: &str = "\u{2514}\u{2500} "; // └─
const PIPE: &str = "\u{2502}  "; // │
const BLANK: &str = "   ";

/// Render the full listing as lines, legend first.
pub fn render_lines(tree: &Tree, root_path: &Path) -> Vec<String> {
    let mut lines: Vec<String> = LEGEND.iter().map(|l| l.to_string()).collect();
    lines.push(format!("ROOT: {}", root_path.display()));

    let root = tree.node(tree.root());
    if root.is_dir && !root.has_children && root.children().is_empty() {
        // A childless root never shows a separator.
        lines.push(decorate(root, false));
    } else {
        lines.push(format_node_line(root));
    }

    if descends(root) {
        render_children(tree, tree.root(), &mut lines);
    }
    lines
}

/// Render the full listing as `\n`-joined text, without a trailing newline.
pub fn render_text(tree: &Tree, root_path: &Path) -> String {
    render_lines(tree, root_path).join("\n")
}

/// Format one node without its connector: skip mark, name, separator, symlink mark.
pub fn format_node_line(node: &Node) -> String {
    if !node.is_dir {
        return node.name.clone();
    }
    decorate(node, shows_children(node))
}

fn decorate(node: &Node, separator: bool) -> String {
    let mut line = String::with_capacity(node.name.len() + 10);
    if node.skip() {
        line.push_str(SKIP_MARK);
    }
    line.push_str(&node.name);
    if separator {
        line.push(SEPARATOR);
    }
    if node.is_symlink {
        line.push_str(SYMLINK_MARK);
    }
    line
}

/// Whether a directory counts as non-empty for display.
fn shows_children(node: &Node) -> bool {
    if node.is_symlink {
        node.has_children
    } else {
        !node.children().is_empty()
    }
}

fn descends(node: &Node) -> bool {
    node.is_dir && !node.is_symlink && !node.skip() && !node.children().is_empty()
}

/// Depth-first rendering with an explicit stack of `(node, indent, is_last)`.
fn render_children(tree: &Tree, parent: NodeId, lines: &mut Vec<String>) {
    let mut stack: Vec<(NodeId, String, bool)> = Vec::new();
    push_siblings(&mut stack, tree.children(parent), "");

    while let Some((id, indent, is_last)) = stack.pop() {
        let node = tree.node(id);
        let connector = if is_last { CORNER } else { BRANCH };
        lines.push(format!("{indent}{connector}{}", format_node_line(node)));

        if descends(node) {
            let continuation = if is_last { BLANK } else { PIPE };
            let child_indent = format!("{indent}{continuation}");
            push_siblings(&mut stack, node.children(), &child_indent);
        }
    }
}

fn push_siblings(stack: &mut Vec<(NodeId, String, bool)>, siblings: &[NodeId], indent: &str) {
    let count = siblings.len();
    for (i, &id) in siblings.iter().enumerate().rev() {
        stack.push((id, indent.to_string(), i + 1 == count));
    }
}
