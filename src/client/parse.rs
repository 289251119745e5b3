//! Best-effort extraction of result rows from the site's search page. The
//! page layout is undocumented and drifts; everything here works on isolated
//! `box_torrent` fragments and class-name anchors so a markup change stays
//! contained in this module.

use super::{Category, TorrentSummary};

/// At most this many rows are taken from one category page.
pub const ROWS_PER_CATEGORY: usize = 10;

const ROW_MARKER: &str = "box_torrent";

/// Splits a search page into row fragments and parses up to
/// [`ROWS_PER_CATEGORY`] of them. Rows that do not yield a numeric id are
/// dropped silently.
pub fn parse_rows(html: &str, category: Category, base_url: &str) -> Vec<TorrentSummary> {
    row_fragments(html)
        .into_iter()
        .filter_map(|fragment| parse_row(fragment, category, base_url))
        .take(ROWS_PER_CATEGORY)
        .collect()
}

/// Parses one row fragment. The row is discarded unless its detail link
/// carries a numeric `id=`; every other missing field falls back to a
/// sentinel (`"Unknown"` size, zero counts, empty upload date).
pub fn parse_row(fragment: &str, category: Category, base_url: &str) -> Option<TorrentSummary> {
    let anchor = cell(fragment, "torrent_txt")?;
    let href = attr(anchor, "href")?;
    let id = id_from_href(href)?;

    let title = match attr(anchor, "title") {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => tag_text(anchor, "<a").unwrap_or_default().trim().to_string(),
    };

    let size = cell_text(fragment, "box_meret2").unwrap_or_else(|| "Unknown".to_string());
    let seeders = cell_number(fragment, "box_s2");
    let leechers = cell_number(fragment, "box_l2");
    let uploaded = cell_text(fragment, "box_feltoltve2").unwrap_or_default();

    Some(TorrentSummary {
        id,
        title,
        category,
        size,
        seeders,
        leechers,
        uploaded,
        url: absolute_url(base_url, href),
    })
}

fn row_fragments(html: &str) -> Vec<&str> {
    let mut fragments = vec![];
    let mut rest = html;
    while let Some(start) = rest.find(ROW_MARKER) {
        rest = &rest[start + ROW_MARKER.len()..];
        let end = rest.find(ROW_MARKER).unwrap_or(rest.len());
        fragments.push(&rest[..end]);
    }
    fragments
}

/// The slice from the first occurrence of `class` to the next `box_`-classed
/// cell, i.e. roughly one table cell.
fn cell<'a>(fragment: &'a str, class: &str) -> Option<&'a str> {
    let start = fragment.find(class)?;
    let rest = &fragment[start + class.len()..];
    // skip the rest of the opening tag the class attribute sits in
    let rest = &rest[rest.find('>')? + 1..];
    let end = rest.find("class=\"box_").unwrap_or(rest.len());
    Some(&rest[..end])
}

fn cell_text(fragment: &str, class: &str) -> Option<String> {
    let text = strip_tags(cell(fragment, class)?);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn cell_number(fragment: &str, class: &str) -> u32 {
    cell_text(fragment, class)
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0)
}

/// Value of `name="…"` within `element`.
fn attr<'a>(element: &'a str, name: &str) -> Option<&'a str> {
    let pat = format!("{name}=\"");
    let start = element.find(&pat)? + pat.len();
    let rest = &element[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// Text content of the first `open`-tag element, e.g. the link text of the
/// first `<a …>text</a>`.
fn tag_text<'a>(element: &'a str, open: &str) -> Option<&'a str> {
    let start = element.find(open)?;
    let rest = &element[start..];
    let body = &rest[rest.find('>')? + 1..];
    let end = body.find('<')?;
    Some(&body[..end])
}

fn id_from_href(href: &str) -> Option<String> {
    let start = href.find("id=")? + 3;
    let digits: String = href[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}
