//! Page-based list walking.

use std::future::Future;

use futures::{stream, Stream};
use reqwest::{header::HeaderMap, Url};

/// Items requested per page.
pub const PAGE_SIZE: u32 = 300;
/// Page requested first.
pub const FIRST_PAGE: u32 = 1;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Next page to fetch, if the platform announced one.
    pub next_page: Option<u32>,
}

/// Walk a page-based list, starting at [`FIRST_PAGE`] and following next-page markers.
///
/// Each stream item is the content of one page. Pages are only requested
/// when polled, so consumers can stop early.
pub fn paginate<T, E, F, Fut>(fetch: F) -> impl Stream<Item = Result<Vec<T>, E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    stream::try_unfold((fetch, Some(FIRST_PAGE)), |(mut fetch, cursor)| async move {
        let Some(page) = cursor else {
            return Ok(None);
        };

        let Page { items, next_page } = fetch(page).await?;
        Ok(Some((items, (fetch, next_page))))
    })
}

/// Extract the next page number from a `Link` header.
pub(crate) fn next_page_from_headers(headers: &HeaderMap) -> Option<u32> {
    let link = headers.get(reqwest::header::LINK)?.to_str().ok()?;

    link.split(',')
        .map(str::trim)
        .find(|part| part.contains(r#"rel="next""#))
        .and_then(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            Url::parse(part.get(start..end)?).ok()
        })
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
        .filter(|page| *page > 0)
}
