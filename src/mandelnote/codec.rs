//! # Text format
//!
//! A notebook is stored as Markdown with a YAML metadata block:
//!
//! ```text
//! ---
//! title: My notebook
//! author: ...
//! ---
//!
//! # Top-level card
//!
//! Body text.
//!
//! ## Child card
//!
//! More body text.
//! ```
//!
//! The number of `#` characters in a heading is the card's depth. Cards are
//! written in document order (each card, then its children, then the next
//! sibling), so the heading structure alone rebuilds the tree.
//!
//! Parsing normalizes bodies: blank lines before the first body line and after
//! the last one are dropped, blank lines in between are kept. A body line that
//! starts with `#` is read as a heading, so such lines do not survive a round
//! trip.

use crate::error::{NotebookError, Result};
use crate::model::Metadata;
use crate::notebook::Notebook;
use tracing::debug;

/// Line that opens and closes the metadata block.
pub const DELIMITER: &str = "---\n";
pub const HEADING_MARKER: char = '#';

/// YAML for the notebook's metadata block.
pub fn marshal_header(nb: &Notebook) -> Result<String> {
    Ok(serde_yaml::to_string(nb.metadata())?)
}

/// Markdown for every card, in document order.
pub fn marshal_body(nb: &Notebook) -> String {
    let tree = nb.tree();
    let mut out = String::new();
    for (id, depth) in tree.preorder() {
        let card = tree.card(id);
        out.push_str(&format!(
            "\n{} {}\n\n{}\n",
            HEADING_MARKER.to_string().repeat(depth),
            card.title(),
            card.body()
        ));
    }
    out
}

/// The complete file contents for a notebook.
pub fn marshal(nb: &Notebook) -> Result<String> {
    let header = marshal_header(nb)?;
    Ok(format!(
        "{}{}\n{}{}",
        DELIMITER,
        header,
        DELIMITER,
        marshal_body(nb)
    ))
}

/// Rebuilds a notebook from file contents. The cursor is placed on the first
/// top-level card and the result is not dirty.
pub fn unmarshal(contents: &str) -> Result<Notebook> {
    let (header, body) = split_document(contents).ok_or(NotebookError::MissingMetadata)?;

    let metadata = if header.trim().is_empty() {
        Metadata::default()
    } else {
        serde_yaml::from_str(header)?
    };

    let mut nb = Notebook::from_metadata(metadata);
    parse_body(&mut nb, body)?;
    nb.rewind();
    debug!(cards = nb.len(), "parsed notebook");
    Ok(nb)
}

/// Splits the document on the first two delimiter lines into the metadata
/// block and the body. Anything before the opening delimiter is ignored.
fn split_document(contents: &str) -> Option<(&str, &str)> {
    let line_starts = std::iter::once(0).chain(contents.match_indices('\n').map(|(i, _)| i + 1));
    let mut delimiters = line_starts.filter(|&i| contents[i..].starts_with(DELIMITER));

    let open = delimiters.next()?;
    let close = delimiters.next()?;
    Some((
        &contents[open + DELIMITER.len()..close],
        &contents[close + DELIMITER.len()..],
    ))
}

fn parse_body(nb: &mut Notebook, body: &str) -> Result<()> {
    let mut depth = 1;
    let mut seen_heading = false;

    for line in body.split('\n') {
        if line.starts_with(HEADING_MARKER) {
            trim_current_body(nb);
            let (level, title) = parse_heading(line)?;

            if !seen_heading && level != 1 {
                return Err(NotebookError::BadFirstDepth(line.to_string()));
            }
            seen_heading = true;

            if level == depth {
                nb.add_card(title, "", false);
            } else if level == depth + 1 {
                nb.add_card(title, "", true);
                depth += 1;
            } else if level < depth {
                while depth > level {
                    nb.exit();
                    depth -= 1;
                }
                nb.add_card(title, "", false);
            } else {
                return Err(NotebookError::DepthJump(line.to_string()));
            }
            continue;
        }

        if line.is_empty() && nb.get_card().1.is_empty() {
            continue;
        }
        if !seen_heading {
            return Err(NotebookError::BodyWithoutHeader);
        }
        if let Some(current) = nb.current_body_mut() {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }

    trim_current_body(nb);
    Ok(())
}

/// Splits `## Title` into its depth and title.
fn parse_heading(line: &str) -> Result<(usize, &str)> {
    match line.split_once(' ') {
        Some((marker, title)) if marker.chars().all(|c| c == HEADING_MARKER) => {
            Ok((marker.len(), title))
        }
        _ => Err(NotebookError::MalformedHeading(line.to_string())),
    }
}

fn trim_current_body(nb: &mut Notebook) {
    if let Some(body) = nb.current_body_mut() {
        let trimmed = body.trim_end_matches('\n').len();
        body.truncate(trimmed);
    }
}
