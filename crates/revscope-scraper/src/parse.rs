//! Field extraction from review-site profile, review and friend pages.
//!
//! Extraction is pattern based and shallow: it pulls raw strings
//! out of known class names and leaves all interpretation (ratings, cities,
//! place tags) to the profile engine. Missing optional pieces come back as
//! empty strings so a single odd review never fails a whole page.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use revscope_core::RawReview;

const PROFILE_INFO_CLASS: &str = "user-profile_info";
const PHOTO_CLASS: &str = "photo-box-img";

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1>").expect("valid h1 regex"));
static H3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h3\b[^>]*>(.*?)</h3>").expect("valid h3 regex"));
static REVIEW_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<li\b[^>]*class="[^"]*\breview-count\b[^"]*"[^>]*>.*?<strong\b[^>]*>\s*([\d,]+)\s*</strong>"#)
        .expect("valid review-count regex")
});
static FRIEND_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<li\b[^>]*class="[^"]*\bfriend-count\b[^"]*"[^>]*>.*?<strong\b[^>]*>\s*([\d,]+)\s*</strong>"#)
        .expect("valid friend-count regex")
});
static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid img regex"));
static SRC_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bsrc\s*=\s*"([^"]+)""#).expect("valid src regex"));
static FRIEND_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*class="[^"]*\buser-display-name\b[^"]*"[^>]*>"#)
        .expect("valid friend anchor regex")
});
static HREF_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bhref\s*=\s*"([^"]+)""#).expect("valid href regex"));
static REVIEW_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<div\b[^>]*class="(?:[^"]*\s)?review(?:\s[^"]*)?""#)
        .expect("valid review block regex")
});
static REVIEW_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<p\b[^>]*\blang="en"[^>]*>(.*?)</p>"#).expect("valid review text regex")
});
static PLACES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span\b[^>]*class="[^"]*\bcategory-str-list\b[^"]*"[^>]*>(.*?)</span>"#)
        .expect("valid category regex")
});
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<address\b[^>]*>(.*?)</address>").expect("valid address regex")
});
static RATING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\btitle\s*=\s*"([^"]*star rating[^"]*)""#).expect("valid rating regex")
});
static BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid br regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid tag regex"));

/// The user's display name, read from the first `h1` of the profile info block.
///
/// `None` means the page is not a profile page.
#[must_use]
pub fn extract_name(html: &str) -> Option<String> {
    let info = profile_info_section(html)?;
    capture_text(&H1_RE, info).filter(|name| !name.is_empty())
}

/// The hometown line (`h3`) of the profile info block.
#[must_use]
pub fn extract_hometown(html: &str) -> Option<String> {
    let info = profile_info_section(html)?;
    capture_text(&H3_RE, info)
}

#[must_use]
pub fn extract_review_count(html: &str) -> Option<usize> {
    capture_count(&REVIEW_COUNT_RE, html)
}

#[must_use]
pub fn extract_friend_count(html: &str) -> Option<usize> {
    capture_count(&FRIEND_COUNT_RE, html)
}

/// The `src` of the first `photo-box-img` image.
#[must_use]
pub fn extract_profile_picture(html: &str) -> Option<String> {
    IMG_TAG_RE
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| tag.contains(PHOTO_CLASS))
        .find_map(|tag| SRC_ATTR_RE.captures(tag))
        .and_then(|cap| cap.get(1))
        .map(|m| decode_entities(m.as_str().trim()))
}

/// Friend user ids from the `user-display-name` anchors of a friends page,
/// in page order with duplicates removed.
#[must_use]
pub fn extract_friend_ids(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    FRIEND_ANCHOR_RE
        .find_iter(html)
        .filter_map(|m| HREF_ATTR_RE.captures(m.as_str()))
        .filter_map(|cap| cap.get(1).map(|h| decode_entities(h.as_str())))
        .filter_map(|href| user_id_from_href(&href))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Raw review tuples from a reviews page, in page order (most recent first).
///
/// Blocks without English review text are not reviews and are skipped.
#[must_use]
pub fn extract_reviews(html: &str) -> Vec<RawReview> {
    review_blocks(html)
        .into_iter()
        .filter_map(|block| {
            let text = capture_text(&REVIEW_TEXT_RE, block).filter(|t| !t.is_empty())?;
            let raw_places = capture_text(&PLACES_RE, block).unwrap_or_default();
            let raw_location = ADDRESS_RE
                .captures(block)
                .and_then(|cap| cap.get(1))
                .map(|m| split_lines(m.as_str()))
                .unwrap_or_default();
            let raw_rating = RATING_RE
                .captures(block)
                .and_then(|cap| cap.get(1))
                .map(|m| decode_entities(m.as_str().trim()))
                .unwrap_or_default();
            Some(RawReview {
                text,
                raw_places,
                raw_location,
                raw_rating,
            })
        })
        .collect()
}

fn profile_info_section(html: &str) -> Option<&str> {
    html.find(PROFILE_INFO_CLASS).map(|pos| &html[pos..])
}

fn review_blocks(html: &str) -> Vec<&str> {
    let starts: Vec<usize> = REVIEW_START_RE.find_iter(html).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            &html[start..end]
        })
        .collect()
}

fn capture_text(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| clean_text(m.as_str()))
}

fn capture_count(re: &Regex, html: &str) -> Option<usize> {
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse::<usize>().ok())
}

fn user_id_from_href(href: &str) -> Option<String> {
    let query = href.split_once('?').map_or(href, |(_, q)| q);
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("userid="))
        .map(|id| id.split('#').next().unwrap_or(id).to_owned())
        .filter(|id| !id.is_empty())
}

/// Strips tags, turns `<br>` into newlines, decodes common entities and trims.
fn clean_text(fragment: &str) -> String {
    let with_breaks = BR_RE.replace_all(fragment, "\n");
    let stripped = TAG_RE.replace_all(&with_breaks, "");
    decode_entities(stripped.trim())
}

fn split_lines(fragment: &str) -> Vec<String> {
    BR_RE
        .split(fragment)
        .map(|piece| decode_entities(TAG_RE.replace_all(piece, "").trim()))
        .filter(|line| !line.is_empty())
        .collect()
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
