//! Presentation Layer
//!
//! Renders one aligned line per entry: the name (directories get a trailing
//! `/`), padding to a shared column, then the comment flattened onto one line.
//! Output goes to any [`Write`] sink so callers and tests choose where it lands.

use crate::types::CommentMap;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Rendering knobs.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Columns between the longest name and the comment column.
    pub spacing: usize,
    /// Colorize names and comments.
    pub color: bool,
    /// Skip entries without an annotation.
    pub filter_uncommented: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            spacing: 2,
            color: false,
            filter_uncommented: false,
        }
    }
}

/// One entry as emitted by `--format json`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntryView {
    pub name: String,
    pub is_dir: bool,
    pub comment: Option<String>,
}

pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Write the listing for `entries` (names relative to `base_dir`) to `out`.
    ///
    /// The column is computed once from every entry, including ones that end up
    /// filtered out, so filtered and full listings line up the same way.
    pub fn render(
        &self,
        out: &mut dyn Write,
        entries: &[String],
        comments: &CommentMap,
        base_dir: &Path,
    ) -> io::Result<()> {
        let column = column_width(entries) + self.options.spacing;
        for entry in entries {
            let comment = comments.get(entry);
            if self.options.filter_uncommented && comment.is_none() {
                continue;
            }
            let is_dir = base_dir.join(entry).is_dir();
            let line = self.format_line(entry, is_dir, comment.unwrap_or(""), column);
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Format a single line, padding the name out to `column`.
    ///
    /// A directory's `/` is printed ahead of the padding, so its comment lands
    /// one column further right than a file's.
    pub fn format_line(&self, name: &str, is_dir: bool, comment: &str, column: usize) -> String {
        let comment = flatten(comment);
        let pad = " ".repeat(column.saturating_sub(name.chars().count()));
        if is_dir {
            if self.options.color {
                format!(
                    "{}{}{}",
                    format!("{}/", name).bright_cyan(),
                    pad,
                    comment.yellow()
                )
            } else {
                format!("{}/{}{}", name, pad, comment)
            }
        } else if self.options.color {
            format!("{}{}{}", name.bright_green(), pad, comment.yellow())
        } else {
            format!("{}{}{}", name, pad, comment)
        }
    }

    /// Entries as structured views, honoring `filter_uncommented`.
    pub fn views(&self, entries: &[String], comments: &CommentMap, base_dir: &Path) -> Vec<EntryView> {
        entries
            .iter()
            .filter(|entry| !self.options.filter_uncommented || comments.contains(entry))
            .map(|entry| EntryView {
                name: entry.clone(),
                is_dir: base_dir.join(entry).is_dir(),
                comment: comments.get(entry).map(|c| c.trim_end_matches(['\r', '\n']).to_string()),
            })
            .collect()
    }
}

/// Length in characters of the longest entry name; 0 for none.
pub fn column_width(entries: &[String]) -> usize {
    entries
        .iter()
        .map(|entry| entry.chars().count())
        .max()
        .unwrap_or(0)
}

/// Replace each line break (`\r\n`, `\n` or `\r`) with a single space.
pub fn flatten(comment: &str) -> String {
    comment.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
