use crate::state::CrawlVariant;
use std::path::{Path, PathBuf};
use url::Url;

/// Maps a crawled URL to the local file it is stored in
///
/// # Mapping Steps
///
/// 1. Parse the URL; take the host (with port, if any), the path and the query
/// 2. Replace every `.` in the host with `_` and drop the scheme and fragment
/// 3. Without a query, strip one trailing `/` (the URL answered with a page, so it is a file)
/// 4. With a non-empty query, replace `?` and `&` with `-`, `=` with `_`, and append `.html`
/// 5. If the last path segment has no `.`, append `.html`
/// 6. Place the result under `{local_root}/{variant}/`
///
/// The path is taken in its parsed form: `.` and `..` segments are resolved
/// and never climb above the host directory, and characters outside the URL
/// grammar stay percent-encoded (`/café` maps to `caf%C3%A9.html`).
///
/// Query parameters are not sorted, so the same parameters in a different
/// order map to a different file. Fragments are dropped, so URLs that differ
/// only by fragment map to the same file.
///
/// # Examples
///
/// ```
/// use mirrorline::url::map_path;
/// use mirrorline::CrawlVariant;
/// use std::path::{Path, PathBuf};
///
/// let path = map_path(
///     Path::new("data/run1"),
///     "http://www.example.com/a/b/index.php?id=1000&lang=en",
///     CrawlVariant::Default,
/// )
/// .unwrap();
/// assert_eq!(
///     path,
///     PathBuf::from("data/run1/DEFAULT/www_example_com/a/b/index.php-id_1000-lang_en.html")
/// );
/// ```
pub fn map_path(
    local_root: &Path,
    url: &str,
    variant: CrawlVariant,
) -> Result<PathBuf, url::ParseError> {
    let parsed = Url::parse(url)?;

    let host = parsed.host_str().unwrap_or_default().replace('.', "_");
    let netloc = match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    };

    let mut file = format!("{}{}", netloc, parsed.path());

    // An empty query (`/page?`) maps like no query at all
    match parsed.query().filter(|query| !query.is_empty()) {
        Some(query) => {
            file.push('?');
            file.push_str(query);
            file = file.replace(['?', '&'], "-").replace('=', "_");
            file.push_str(".html");
        }
        None => {
            if file.ends_with('/') {
                file.pop();
            }
        }
    }

    let last_segment = file.rsplit('/').next().unwrap_or_default();
    if !last_segment.contains('.') {
        file.push_str(".html");
    }

    Ok(local_root.join(variant.name()).join(file))
}
