// src/compact.rs

//! Shrinks a rendered SVG document without changing what it draws.
//!
//! Two passes run in a fixed order:
//!
//! 1. **Grouping.** Element lines are bucketed by their exact `fill` value.
//!    Each bucket becomes one `<g fill="...">` container and its members
//!    lose their own `fill` attribute. This pass reads the per-element
//!    `fill` attributes, so it must see the document before any textual
//!    rewriting.
//! 2. **Minimization.** A fixed list of global string rewrites, each of
//!    which is lossless under SVG's attribute defaults.

use indexmap::IndexMap;
use log::debug;

/// Textual rewrites applied, in order, to the whole grouped document.
///
/// Color names are anchored on the attribute quote so that a longer value
/// such as `#f00abc` is left alone.
const REWRITES: &[(&str, &str)] = &[
    ("\n", ""),
    (" />", "/>"),
    ("  ", " "),
    // Zero is the default for all four, so the attribute can go.
    (" x=\"0\"", ""),
    (" y=\"0\"", ""),
    (" width=\"0\"", ""),
    (" height=\"0\"", ""),
    ("> <", "><"),
    ("=\"#f00\"", "=\"red\""),
    ("=\"#ff0000\"", "=\"red\""),
    ("=\"#ffffff\"", "=\"white\""),
    ("=\"#000000\"", "=\"black\""),
];

/// Runs grouping and then minimization over a rendered document.
pub fn compact(document: &str) -> String {
    let lines: Vec<String> = document.split('\n').map(str::to_owned).collect();
    let grouped = group_by_fill(lines).join("\n");
    let minimized = minimize(&grouped);
    debug!(
        "Compacted document from {} to {} bytes",
        document.len(),
        minimized.len()
    );
    minimized
}

/// Returns the `fill` value of an element line, or `None` for lines that
/// carry no fill and for envelope or group lines.
pub fn fill_color(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("<svg") || trimmed.starts_with("<g") || trimmed.starts_with("<?") {
        return None;
    }
    let start = line.find(" fill=\"")? + " fill=\"".len();
    let len = line[start..].find('"')?;
    Some(&line[start..start + len]).filter(|fill| !fill.is_empty())
}

/// Moves every line that has a fill color into a `<g>` container shared
/// with all other lines of the same color.
///
/// Member lines are blanked in place. The concatenated groups, ordered by
/// the first appearance of each color, replace the first member line. The
/// number of elements is unchanged; only their nesting is.
pub fn group_by_fill(mut lines: Vec<String>) -> Vec<String> {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut first_member = None;

    for (i, line) in lines.iter_mut().enumerate() {
        let Some(fill) = fill_color(line).map(str::to_owned) else {
            continue;
        };
        first_member.get_or_insert(i);
        groups.entry(fill).or_default().push(std::mem::take(line));
    }

    let Some(at) = first_member else {
        return lines;
    };

    let mut contents = String::new();
    for (fill, members) in &groups {
        let attribute = format!(" fill=\"{}\"", fill);
        contents.push_str(&format!("<g fill=\"{}\">", fill));
        for member in members {
            contents.push_str(&member.replacen(&attribute, "", 1));
        }
        contents.push_str("</g>");
    }
    debug!("Grouped element lines into {} fill groups", groups.len());

    lines[at] = contents;
    lines
}

/// Applies every rewrite in `REWRITES`, in order, to the whole text.
pub fn minimize(document: &str) -> String {
    REWRITES
        .iter()
        .fold(document.to_owned(), |text, (from, to)| text.replace(from, to))
}
