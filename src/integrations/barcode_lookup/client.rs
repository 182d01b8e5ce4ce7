// src/integrations/barcode_lookup/client.rs
//
// barcodelookup.com product page scrape.
//
// The page carries the product name in several places depending on layout;
// an ordered list of extraction rules is tried until one yields a usable
// candidate. When the site's markup changes, the rules stop matching and
// the source degrades to not_found rather than returning garbage.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;

use crate::domain::lookup::{
    FailureKind, LookupSource, ProductSource, ResolvedProduct, SourceFailure,
};
use crate::integrations::transport::HttpTransport;

/// Literal the site renders for unknown barcodes. Checked before any
/// extraction rule runs.
const NOT_FOUND_MARKER: &str = "Barcode Doesn't Exist in Our Database";

/// Shorter token used by the candidate validity filter
const NOT_FOUND_TOKEN: &str = "Barcode Doesn't Exist";

/// Site branding that leaks into meta descriptions and titles
const SITE_BRANDING: &str = "Barcode Lookup";

/// The page serves different (name-less) content without a plausible
/// desktop browser header set.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "de-DE,de;q=0.9,en-US;q=0.8,en;q=0.7"),
    ("Accept-Encoding", "gzip, deflate, br"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "none"),
    ("Sec-Fetch-User", "?1"),
    ("Cache-Control", "max-age=0"),
    ("Referer", "https://www.google.com/"),
];

// ============================================================================
// EXTRACTION RULES (DETERMINISTIC, ORDERED)
// ============================================================================

/// Ordered name-extraction rules for the product page HTML.
/// Rule order is load-bearing: earlier rules capture cleaner text.
pub struct ExtractionRules {
    name_patterns: Vec<Regex>,
    fallback_pattern: Regex,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            name_patterns: vec![
                // Meta description: text between the country/category prefix and the trailing period
                Regex::new(r#"<meta name="description" content="[^-]+-\s*([^.]+)\.""#).unwrap(),
                // Product title heading
                Regex::new(r#"<h4 class="product-title">([^<]+)</h4>"#).unwrap(),
                // Meta description: text after a pipe separator
                Regex::new(r#"<meta name="description" content="[^"]*?\|\s*([^"]+)""#).unwrap(),
                // H1 heading, with an optional "EAN <digits> |" prefix stripped
                Regex::new(r#"<h1[^>]*>(?:EAN\s+\d+\s*\|\s*)?([^<]+)</h1>"#).unwrap(),
                // Free text between "EAN <digits> -" and a pipe
                Regex::new(r#"EAN\s+\d+\s*-\s*([^|]+)\|"#).unwrap(),
            ],
            // Last resort: the description preamble up to the next period
            fallback_pattern: Regex::new(
                r#"content="Barcode Lookup provides info on EAN \d+ - ([^.]+)\."#,
            )
            .unwrap(),
        }
    }
}

impl ExtractionRules {
    /// Extract a product name from the page HTML, or None when no rule
    /// yields a valid candidate.
    pub fn extract_name(&self, html: &str) -> Option<String> {
        for pattern in &self.name_patterns {
            if let Some(captures) = pattern.captures(html) {
                if let Some(candidate) = captures.get(1) {
                    let cleaned = clean_candidate(candidate.as_str());
                    if is_valid_candidate(&cleaned) {
                        return Some(cleaned);
                    }
                }
            }
        }

        // The fallback filter is looser: no branding strip, no "EAN"
        // rejection, only the not-found token disqualifies.
        if let Some(captures) = self.fallback_pattern.captures(html) {
            if let Some(candidate) = captures.get(1) {
                let cleaned = unescape_entities(candidate.as_str().trim());
                if !cleaned.is_empty() && !cleaned.contains(NOT_FOUND_TOKEN) {
                    return Some(cleaned);
                }
            }
        }

        None
    }
}

/// Trim, decode the three entities the page emits, drop site branding
fn clean_candidate(candidate: &str) -> String {
    let unescaped = unescape_entities(candidate.trim());
    unescaped.replace(SITE_BRANDING, "").trim().to_string()
}

/// A candidate containing "EAN" or the not-found token is a mis-extraction,
/// even when the product might genuinely carry that text.
fn is_valid_candidate(candidate: &str) -> bool {
    !candidate.is_empty() && !candidate.contains("EAN") && !candidate.contains(NOT_FOUND_TOKEN)
}

/// Decode the three HTML entities the page uses in product names.
/// `&amp;` goes last so a decoded ampersand cannot form a fresh entity.
fn unescape_entities(text: &str) -> String {
    text.replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

// ============================================================================
// CLIENT
// ============================================================================

/// Scrape source for barcodelookup.com product pages
pub struct BarcodeLookupClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    rules: ExtractionRules,
}

impl BarcodeLookupClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: String) -> Self {
        Self {
            transport,
            base_url,
            rules: ExtractionRules::default(),
        }
    }

    fn failure(&self, kind: FailureKind, detail: impl Into<String>) -> SourceFailure {
        SourceFailure::new(ProductSource::BarcodeLookup, kind, detail)
    }
}

#[async_trait]
impl LookupSource for BarcodeLookupClient {
    fn source(&self) -> ProductSource {
        ProductSource::BarcodeLookup
    }

    async fn lookup(&self, barcode: &str) -> Result<ResolvedProduct, SourceFailure> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), barcode);

        let response = self
            .transport
            .get(&url, BROWSER_HEADERS)
            .await
            .map_err(|e| self.failure(FailureKind::TransportError, e.to_string()))?;

        if !response.is_success() {
            return Err(self.failure(
                FailureKind::TransportError,
                format!("HTTP status {}", response.status),
            ));
        }

        let html = String::from_utf8(response.body)
            .map_err(|_| self.failure(FailureKind::ParseError, "body is not valid UTF-8"))?;

        if html.contains(NOT_FOUND_MARKER) {
            log::debug!("barcode {} unknown to barcodelookup.com", barcode);
            return Err(self.failure(FailureKind::NotFound, "barcode not in site database"));
        }

        match self.rules.extract_name(&html) {
            Some(name) => Ok(ResolvedProduct::new(name, ProductSource::BarcodeLookup)),
            None => Err(self.failure(FailureKind::NotFound, "no extraction rule matched")),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::transport::{HttpResponse, TransportError};

    struct StaticTransport {
        response: Result<HttpResponse, TransportError>,
    }

    #[async_trait]
    impl HttpTransport for StaticTransport {
        async fn get(
            &self,
            _url: &str,
            _headers: &[(&str, &str)],
        ) -> Result<HttpResponse, TransportError> {
            self.response.clone()
        }
    }

    fn client_with_body(status: u16, body: &[u8]) -> BarcodeLookupClient {
        BarcodeLookupClient::new(
            Arc::new(StaticTransport {
                response: Ok(HttpResponse {
                    status,
                    body: body.to_vec(),
                }),
            }),
            "https://www.barcodelookup.com".to_string(),
        )
    }

    #[test]
    fn test_meta_description_rule() {
        let rules = ExtractionRules::default();
        let html = r#"<meta name="description" content="EAN 4001686301656 - Haribo Goldbears 200g.">"#;
        assert_eq!(
            rules.extract_name(html),
            Some("Haribo Goldbears 200g".to_string())
        );
    }

    #[test]
    fn test_product_title_rule() {
        let rules = ExtractionRules::default();
        let html = r#"<div><h4 class="product-title">Haribo Goldbears 200g</h4></div>"#;
        assert_eq!(
            rules.extract_name(html),
            Some("Haribo Goldbears 200g".to_string())
        );
    }

    #[test]
    fn test_h1_rule_strips_ean_prefix() {
        let rules = ExtractionRules::default();
        let html = r#"<h1 class="title">EAN 4001686301656 | Haribo Goldbears</h1>"#;
        assert_eq!(rules.extract_name(html), Some("Haribo Goldbears".to_string()));
    }

    #[test]
    fn test_ean_dash_pipe_rule() {
        let rules = ExtractionRules::default();
        let html = "header EAN 4001686301656 - Haribo Goldbears | footer";
        assert_eq!(rules.extract_name(html), Some("Haribo Goldbears".to_string()));
    }

    #[test]
    fn test_fallback_preamble_rule() {
        let rules = ExtractionRules::default();
        let html = r#"content="Barcode Lookup provides info on EAN 4001686301656 - Haribo Goldbears 200g. Read more""#;
        assert_eq!(
            rules.extract_name(html),
            Some("Haribo Goldbears 200g".to_string())
        );
    }

    #[test]
    fn test_candidate_with_ean_token_is_rejected() {
        let rules = ExtractionRules::default();
        // The only match still carries the EAN token, so extraction must fail
        let html = r#"<h4 class="product-title">EAN 4001686301656</h4>"#;
        assert_eq!(rules.extract_name(html), None);
    }

    #[test]
    fn test_branding_is_stripped() {
        let rules = ExtractionRules::default();
        let html = r#"<h4 class="product-title">Haribo Goldbears Barcode Lookup</h4>"#;
        assert_eq!(rules.extract_name(html), Some("Haribo Goldbears".to_string()));
    }

    #[test]
    fn test_entities_are_decoded() {
        let rules = ExtractionRules::default();
        let html = r#"<h4 class="product-title">Ben &amp; Jerry&#39;s Cookie Dough</h4>"#;
        assert_eq!(
            rules.extract_name(html),
            Some("Ben & Jerry's Cookie Dough".to_string())
        );
    }

    #[test]
    fn test_unescape_is_idempotent() {
        let once = unescape_entities("Ben &amp; Jerry&#39;s &quot;Classic&quot;");
        assert_eq!(once, "Ben & Jerry's \"Classic\"");
        assert_eq!(unescape_entities(&once), once);
    }

    #[test]
    fn test_no_rule_matches_plain_page() {
        let rules = ExtractionRules::default();
        assert_eq!(rules.extract_name("<html><body>nothing here</body></html>"), None);
    }

    #[tokio::test]
    async fn test_not_found_marker_wins_over_extraction() {
        // The page carries both the marker and an extractable title; the
        // marker must be honored first.
        let html = format!(
            r#"<h4 class="product-title">Haribo Goldbears</h4><p>{}</p>"#,
            "Barcode Doesn't Exist in Our Database"
        );
        let client = client_with_body(200, html.as_bytes());

        let failure = client.lookup("4001686301656").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_extracted_name_is_returned_with_provenance() {
        let client =
            client_with_body(200, br#"<h4 class="product-title">Haribo Goldbears</h4>"#);

        let resolved = client.lookup("4001686301656").await.unwrap();
        assert_eq!(resolved.name, "Haribo Goldbears");
        assert_eq!(resolved.source, ProductSource::BarcodeLookup);
    }

    #[tokio::test]
    async fn test_non_2xx_is_transport_error() {
        let client = client_with_body(503, b"maintenance");

        let failure = client.lookup("4001686301656").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::TransportError);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_parse_error() {
        let client = client_with_body(200, &[0xff, 0xfe, 0x00]);

        let failure = client.lookup("4001686301656").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::ParseError);
    }
}
