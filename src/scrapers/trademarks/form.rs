//! Advanced search form body and request headers.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE,
    COOKIE, ORIGIN, REFERER,
};

use super::super::SearchResult;
use super::token::XSRF_COOKIE;
use crate::config::Endpoints;

/// Browser navigation headers sent verbatim with the search POST.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "sec-ch-ua",
        r#""Chromium";v="128", "Not;A=Brand";v="24", "DuckDuckGo";v="128""#,
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""Windows""#),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "same-origin"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// Form fields of the advanced search: part-match on the keyword, owner-name
/// search, AND-combined. Every other field keeps the form's empty default.
pub fn search_form(keyword: &str, token: &str) -> Vec<(&'static str, String)> {
    let fields: [(&'static str, &str); 29] = [
        ("_csrf", token),
        ("wv[0]", keyword),
        ("wt[0]", "PART"),
        ("weOp[0]", "AND"),
        ("wv[1]", ""),
        ("wt[1]", "PART"),
        ("weOp[1]", "AND"),
        ("wrOp", "AND"),
        ("_sw", "on"),
        ("classList", ""),
        ("ct", "A"),
        ("status", ""),
        ("dateType", "LODGEMENT_DATE"),
        ("fromDate", ""),
        ("toDate", ""),
        ("ia", ""),
        ("gsd", ""),
        ("endo", ""),
        ("nameField[0]", "OWNER"),
        ("name[0]", ""),
        ("attorney", ""),
        ("oAcn", ""),
        ("idList", ""),
        ("ir", ""),
        ("publicationFromDate", ""),
        ("publicationToDate", ""),
        ("i", ""),
        ("c", ""),
        ("originalSegment", ""),
    ];
    fields
        .into_iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect()
}

/// Headers of the search POST. The token travels as the XSRF cookie.
pub fn search_headers(token: &str, endpoints: &Endpoints) -> SearchResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-AU,en;q=0.9,en-GB;q=0.8,en-US;q=0.7"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("{}={}", XSRF_COOKIE, token))?,
    );
    headers.insert(ORIGIN, HeaderValue::from_str(endpoints.base_url())?);
    headers.insert(REFERER, HeaderValue::from_str(&endpoints.advanced_search())?);
    for &(name, value) in BROWSER_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    Ok(headers)
}
