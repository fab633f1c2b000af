use chrono::{DateTime, Utc};
use colored::Colorize;
use mandelnote::index::walk;
use mandelnote::notebook::Notebook;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const INDENT: &str = "  ";
const CURRENT_MARKER: &str = "▸";

pub(super) fn print_notebook(nb: &Notebook, existed: bool) {
    print_header(nb);
    println!();

    if !existed {
        if let Some(path) = nb.file() {
            println!("{}", format!("New notebook, not saved yet: {}", path.display()).dimmed());
        }
    }

    if nb.is_empty() {
        println!("No cards yet.");
        return;
    }
    print_outline(nb);
}

fn print_header(nb: &Notebook) {
    let meta = nb.metadata();
    let title = if meta.title.is_empty() {
        "Untitled notebook"
    } else {
        meta.title.as_str()
    };

    if meta.author.is_empty() {
        println!("{}", title.bold());
    } else {
        println!("{} {}", title.bold(), format!("by {}", meta.author).dimmed());
    }
    if !meta.description.is_empty() {
        println!("{}", meta.description);
    }

    let mut details = vec![format!("modified {}", format_time_ago(meta.modified))];
    match meta.latest_revision() {
        Some(revision) => details.push(format!(
            "{} revision(s), latest: {}",
            meta.revisions.len(),
            revision.message
        )),
        None => details.push("no revisions".to_string()),
    }
    details.push(format!("{} card(s)", nb.len()));
    println!("{}", details.join(" · ").dimmed());
}

fn print_outline(nb: &Notebook) {
    let tree = nb.get_tree();
    for node in walk(&tree) {
        let indent = INDENT.repeat(node.depth - 1);
        let marker = if node.current { CURRENT_MARKER } else { " " };
        let path = format!("{}. ", node.path);

        let prefix_width = indent.width() + marker.width() + 1 + path.width();
        let available = LINE_WIDTH.saturating_sub(prefix_width);
        let title = truncate_to_width(&node.title, available);
        let preview_width = available.saturating_sub(title.width() + 1);
        let preview = node.body.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        let preview = truncate_to_width(preview, preview_width);

        let path_colored = if node.current {
            path.yellow()
        } else {
            path.normal()
        };
        println!(
            "{}{} {}{} {}",
            indent,
            marker.yellow(),
            path_colored,
            title.bold(),
            preview.dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
