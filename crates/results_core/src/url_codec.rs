//! Mapping between [`ViewState`] and the listing's path representation.
//!
//! Paths are relative to the listing's base path: `2020/`, `2020/05/?page=2`,
//! `?page=3`, or `/` when nothing is selected.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::{ViewState, FIRST_PAGE, NO_FILTER};

/// Filter dimensions that appear in the path, in path order.
pub const URL_DIMENSIONS: [&str; 3] = ["year", "month", "topic"];
pub const PAGE_SEGMENT: &str = "page";

const ROOT: &str = "/";
const JSON_SUFFIX: &str = ".json";

/// Characters that cannot appear literally inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSegment {
    pub name: &'static str,
    pub included: bool,
    pub value: String,
}

/// Builds the ordered segment list for a state. Order never follows the order in
/// which filters were selected.
pub fn segments(state: &ViewState) -> Vec<UrlSegment> {
    let filter = &state.filter.data;
    let current = state.pagination.data.current.max(FIRST_PAGE);

    let mut segments: Vec<UrlSegment> = URL_DIMENSIONS
        .iter()
        .map(|&name| {
            let value = filter.get(name);
            UrlSegment {
                name,
                included: value != NO_FILTER,
                value: escape_segment(value),
            }
        })
        .collect();
    segments.push(UrlSegment {
        name: PAGE_SEGMENT,
        included: current != FIRST_PAGE,
        value: format!("?page={current}"),
    });
    segments
}

/// Encodes a state as a path. The page query is never followed by a slash.
pub fn encode(state: &ViewState) -> String {
    let segments = segments(state);
    let with_page = segments
        .iter()
        .any(|segment| segment.name == PAGE_SEGMENT && segment.included);

    let mut path = segments
        .iter()
        .filter(|segment| segment.included)
        .map(|segment| segment.value.as_str())
        .collect::<Vec<_>>()
        .join("/");
    if !with_page {
        path.push('/');
    }
    path
}

/// Address-bar URL for an encoded path under `base_path`.
pub fn page_url(base_path: &str, path: &str) -> String {
    let mut url = base_path.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    if path != ROOT {
        url.push_str(path);
    }
    url
}

/// Data URL path for an encoded path: `<page path without trailing slash>.json<query>`.
pub fn content_path(base_path: &str, path: &str) -> String {
    let url = page_url(base_path, path);
    let (pathname, query) = match url.find('?') {
        Some(idx) => url.split_at(idx),
        None => (url.as_str(), ""),
    };
    // A bare `/` base keeps its slash so the document stays on the origin's root.
    let pathname = match pathname.strip_suffix('/') {
        Some("") | None => pathname,
        Some(stripped) => stripped,
    };
    format!("{pathname}{JSON_SUFFIX}{query}")
}

/// Prefix of `pathname` up to and including `base_segment`, if the segment occurs.
pub fn relative_base_url<'a>(pathname: &'a str, base_segment: &str) -> Option<&'a str> {
    pathname
        .find(base_segment)
        .map(|idx| &pathname[..idx + base_segment.len()])
}

/// Decoded non-empty path components of an encoded path, without the page query.
pub fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|part| !part.is_empty() && !part.starts_with('?'))
        .map(|part| percent_decode_str(part).decode_utf8_lossy().into_owned())
        .collect()
}

fn escape_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}
