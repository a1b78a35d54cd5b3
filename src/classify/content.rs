//! Response classification.
//!
//! Turns a final (non-redirect) response into a status: first by status code,
//! then by what the body looks like.

use log::debug;
use once_cell::sync::Lazy;
use scraper::{Html, Node, Selector};

use crate::classify::patterns::{find_phrase, ContentPatterns};
use crate::config::{CLOUDFLARE_EDGE_ERROR_CODES, HEADER_CF_MITIGATED};
use crate::fetch::HttpResponse;
use crate::status::DomainStatus;

// Elements whose text never renders
const HIDDEN_ELEMENTS: &[&str] = &["head", "noscript", "script", "style", "template"];

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("Failed to parse script selector - this is a bug"));

/// What a page shows versus what it only runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Rendered text with every whitespace character removed
    pub visible: String,
    /// Concatenated inline script bodies and external script references
    pub script: String,
}

/// Splits an HTML body into visible text and script content.
///
/// Visible text is every text node outside `<head>`, `<noscript>`,
/// `<script>`, `<style>` and `<template>`, with entities decoded and all
/// whitespace (non-breaking spaces included) removed. Script content is
/// collected from the whole document, head included. A `<script src=…>`
/// with no inline code counts as script content.
pub fn extract_page_text(body: &str) -> PageText {
    let document = Html::parse_document(body);

    let mut script = String::new();
    for element in document.select(&SCRIPT_SELECTOR) {
        let inline: String = element.text().collect();
        let inline = inline.trim();
        if !inline.is_empty() {
            script.push_str(inline);
        } else if let Some(src) = element.value().attr("src") {
            script.push_str(src.trim());
        }
    }

    let mut visible = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            visible.extend(text.chars().filter(|c| !c.is_whitespace()));
        }
    }

    PageText { visible, script }
}

/// Classifies a final response by status code, then by content.
///
/// # Returns
///
/// - `ServerError` for 5xx and Cloudflare edge codes
/// - `ClientError` for 4xx
/// - otherwise the verdict of `classify_content`
pub fn classify_response(response: &HttpResponse, patterns: &ContentPatterns) -> DomainStatus {
    let code = response.status;
    if code >= 500 || CLOUDFLARE_EDGE_ERROR_CODES.contains(&code) {
        return DomainStatus::ServerError;
    }
    if (400..=499).contains(&code) {
        return DomainStatus::ClientError;
    }
    classify_content(response, patterns)
}

/// Classifies a structurally successful response by its body.
///
/// Order: empty/JS-only, then Cloudflare error and WAF signatures, then
/// placeholder phrases. The first match wins.
pub fn classify_content(response: &HttpResponse, patterns: &ContentPatterns) -> DomainStatus {
    let body = &response.body_prefix;

    let text = extract_page_text(body);
    if text.visible.is_empty() {
        return if text.script.is_empty() {
            debug!("Body has no visible text and no script");
            DomainStatus::EmptyPage
        } else {
            debug!("Body has only script ({} bytes)", text.script.len());
            DomainStatus::JsOnly
        };
    }

    let lower = body.to_lowercase();

    if let Some(marker) = find_phrase(&lower, patterns.cloudflare_error_markers) {
        if let Some(phrase) = find_phrase(&lower, patterns.cloudflare_error_phrases) {
            debug!("Cloudflare error page ({marker}, {phrase})");
            return DomainStatus::ServerError;
        }
    }

    if let Some(identifier) = find_phrase(&lower, patterns.cloudflare_challenge_identifiers) {
        debug!("Cloudflare challenge page ({identifier})");
        return DomainStatus::Protected;
    }
    if let Some(phrase) = find_phrase(&lower, patterns.waf_phrases) {
        debug!("WAF page ({phrase})");
        return DomainStatus::Protected;
    }
    if response.headers.contains_key(HEADER_CF_MITIGATED) {
        debug!("Response carries {HEADER_CF_MITIGATED}");
        return DomainStatus::Protected;
    }

    if let Some(phrase) = find_phrase(&lower, patterns.placeholder_phrases) {
        debug!("Placeholder page ({phrase})");
        return DomainStatus::Placeholder;
    }

    DomainStatus::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn classify(status: u16, body: &str) -> DomainStatus {
        classify_response(&HttpResponse::new(status, body), &ContentPatterns::default())
    }

    #[test]
    fn test_extract_visible_text() {
        let text = extract_page_text(
            "<html><head><title>Docs</title></head><body>\n  <p>Hello  world</p></body></html>",
        );
        assert_eq!(text.visible, "Helloworld");
        assert!(text.script.is_empty());
    }

    #[test]
    fn test_extract_ignores_noscript_style_and_comments() {
        let text = extract_page_text(
            "<body><noscript>Enable JS</noscript><style>p{color:red}</style><!-- note --></body>",
        );
        assert_eq!(text.visible, "");
    }

    #[test]
    fn test_extract_script_content_from_head() {
        let text = extract_page_text(
            "<html><head><script>window.location='https://x.example'</script></head><body></body></html>",
        );
        assert_eq!(text.visible, "");
        assert_eq!(text.script, "window.location='https://x.example'");
    }

    #[test]
    fn test_external_script_counts_as_script() {
        let text = extract_page_text(
            r#"<body><div id="root"></div><script src="/app.js"></script></body>"#,
        );
        assert_eq!(text.visible, "");
        assert!(text.script.contains("/app.js"));
    }

    #[test]
    fn test_angle_bracket_in_attribute_is_not_text() {
        let body = r#"<html><body><img alt="1 > 0" src="/logo.png"></body></html>"#;
        assert_eq!(extract_page_text(body).visible, "");
        assert_eq!(classify(200, body), DomainStatus::EmptyPage);
    }

    #[test]
    fn test_space_entities_are_whitespace() {
        let body = "<html><body>&#160;&#xA0;&nbsp;</body></html>";
        assert_eq!(extract_page_text(body).visible, "");
        assert_eq!(classify(200, body), DomainStatus::EmptyPage);
    }

    #[test]
    fn test_entities_are_decoded() {
        let text = extract_page_text("<body><p>Fish &amp; Chips</p></body>");
        assert_eq!(text.visible, "Fish&Chips");
    }

    #[test]
    fn test_header_element_is_not_head() {
        let text = extract_page_text("<body><header>Menu</header></body>");
        assert_eq!(text.visible, "Menu");
    }

    #[test]
    fn test_valid_page() {
        assert_eq!(
            classify(200, "<html><body>Welcome</body></html>"),
            DomainStatus::Valid
        );
    }

    #[test]
    fn test_empty_page() {
        assert_eq!(classify(200, ""), DomainStatus::EmptyPage);
        assert_eq!(
            classify(200, "<html><head><title>x</title></head>\n<body> </body></html>"),
            DomainStatus::EmptyPage
        );
    }

    #[test]
    fn test_js_only_page() {
        assert_eq!(
            classify(
                200,
                "<html><head></head><body><script>location.href='/app'</script></body></html>"
            ),
            DomainStatus::JsOnly
        );
    }

    #[test]
    fn test_parked_page() {
        assert_eq!(
            classify(200, "<html><body><h1>This domain is parked</h1></body></html>"),
            DomainStatus::Placeholder
        );
    }

    #[test]
    fn test_default_server_page() {
        assert_eq!(
            classify(200, "<html><body><h1>Welcome to nginx!</h1></body></html>"),
            DomainStatus::Placeholder
        );
    }

    #[test]
    fn test_cloudflare_error_page_is_server_error() {
        let body = r#"<html><body><div id="cf-wrapper"><div id="cf-error-details">
            <h1>Error 521</h1><p>Web server is down</p></div></div></body></html>"#;
        assert_eq!(classify(200, body), DomainStatus::ServerError);
    }

    #[test]
    fn test_cloudflare_error_wins_over_challenge_identifiers() {
        let body = r#"<body><div class="cf-error-details">Error 522 Connection timed out
            <a href="https://challenges.cloudflare.com">more</a></div></body>"#;
        assert_eq!(classify(200, body), DomainStatus::ServerError);
    }

    #[test]
    fn test_cloudflare_marker_without_error_phrase_is_not_server_error() {
        let body = r#"<body><div id="cf-wrapper">Attention Required! | Cloudflare</div></body>"#;
        assert_eq!(classify(200, body), DomainStatus::Protected);
    }

    #[test]
    fn test_waf_page() {
        assert_eq!(
            classify(
                200,
                "<body><h2>Checking your browser before accessing docs.example</h2></body>"
            ),
            DomainStatus::Protected
        );
    }

    #[test]
    fn test_waf_wins_over_placeholder() {
        let body = "<body>Verify you are human. This domain is parked.</body>";
        assert_eq!(classify(200, body), DomainStatus::Protected);
    }

    #[test]
    fn test_cf_mitigated_header_is_protected() {
        let mut response = HttpResponse::new(200, "<body>One moment</body>");
        response
            .headers
            .insert("cf-mitigated", HeaderValue::from_static("challenge"));
        assert_eq!(
            classify_response(&response, &ContentPatterns::default()),
            DomainStatus::Protected
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            classify(200, "<body>BUY THIS DOMAIN today</body>"),
            DomainStatus::Placeholder
        );
    }

    #[test]
    fn test_status_code_boundaries() {
        assert_eq!(classify(399, "<body>ok</body>"), DomainStatus::Valid);
        assert_eq!(classify(400, "<body>ok</body>"), DomainStatus::ClientError);
        assert_eq!(classify(499, "<body>ok</body>"), DomainStatus::ClientError);
        assert_eq!(classify(500, "<body>ok</body>"), DomainStatus::ServerError);
        assert_eq!(classify(521, ""), DomainStatus::ServerError);
        assert_eq!(classify(599, ""), DomainStatus::ServerError);
    }

    #[test]
    fn test_error_status_skips_content_checks() {
        // A parked page served with 404 is still a client error
        assert_eq!(
            classify(404, "<body>This domain is parked</body>"),
            DomainStatus::ClientError
        );
    }

    #[test]
    fn test_custom_patterns() {
        let patterns = ContentPatterns {
            placeholder_phrases: &["under construction"],
            ..ContentPatterns::default()
        };
        let response = HttpResponse::new(200, "<body>Under Construction</body>");
        assert_eq!(
            classify_response(&response, &patterns),
            DomainStatus::Placeholder
        );

        let parked = HttpResponse::new(200, "<body>This domain is parked</body>");
        assert_eq!(classify_response(&parked, &patterns), DomainStatus::Valid);
    }
}
