// src/integrations/ean_search/client.rs
//
// EAN-Search lookup (paid JSON API).
//
// Token-authenticated, metered quota - the resolver only reaches this
// client once every free source has failed.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::lookup::{
    FailureKind, LookupSource, ProductSource, ResolvedProduct, SourceFailure,
};
use crate::integrations::transport::HttpTransport;

/// German result language, per the API's numeric language codes
const LANGUAGE_GERMAN: &str = "3";

/// One candidate record from the barcode-lookup operation
#[derive(Debug, Deserialize)]
struct EanRecord {
    #[allow(dead_code)] // Part of the API response schema
    ean: String,
    name: String,
    #[serde(rename = "categoryId")]
    #[allow(dead_code)] // Part of the API response schema
    category_id: Option<String>,
    #[serde(rename = "categoryName")]
    category_name: Option<String>,
    #[serde(rename = "issuingCountry")]
    #[allow(dead_code)] // Part of the API response schema
    issuing_country: Option<String>,
}

/// "name [category]" when a category is known, bare name otherwise
fn compose_name(record: &EanRecord) -> String {
    match &record.category_name {
        Some(category) => format!("{} [{}]", record.name, category),
        None => record.name.clone(),
    }
}

/// Paid JSON API source backed by the EAN-Search database
pub struct EanSearchClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    api_token: String,
}

impl EanSearchClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: String, api_token: String) -> Self {
        Self {
            transport,
            base_url,
            api_token,
        }
    }

    fn failure(&self, kind: FailureKind, detail: impl Into<String>) -> SourceFailure {
        SourceFailure::new(ProductSource::EanSearch, kind, detail)
    }
}

#[async_trait]
impl LookupSource for EanSearchClient {
    fn source(&self) -> ProductSource {
        ProductSource::EanSearch
    }

    async fn lookup(&self, barcode: &str) -> Result<ResolvedProduct, SourceFailure> {
        let url = format!(
            "{}/api?token={}&op=barcode-lookup&ean={}&language={}&format=json",
            self.base_url.trim_end_matches('/'),
            self.api_token,
            barcode,
            LANGUAGE_GERMAN
        );

        let response = self
            .transport
            .get(&url, &[])
            .await
            .map_err(|e| self.failure(FailureKind::TransportError, e.to_string()))?;

        if response.status == 401 {
            return Err(self.failure(FailureKind::Unauthorized, "API token rejected"));
        }

        if !response.is_success() {
            return Err(self.failure(
                FailureKind::InvalidResponse,
                format!("HTTP status {}", response.status),
            ));
        }

        let records: Vec<EanRecord> = serde_json::from_slice(&response.body)
            .map_err(|e| self.failure(FailureKind::ParseError, e.to_string()))?;

        let record = match records.first() {
            Some(record) => record,
            None => return Err(self.failure(FailureKind::NotFound, "no candidate records")),
        };

        Ok(ResolvedProduct::new(
            compose_name(record),
            ProductSource::EanSearch,
        ))
    }
}

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

    fn client_with_json(status: u16, body: &str) -> EanSearchClient {
        EanSearchClient::new(
            Arc::new(StaticTransport {
                response: Ok(HttpResponse {
                    status,
                    body: body.as_bytes().to_vec(),
                }),
            }),
            "https://api.ean-search.org".to_string(),
            "test-token".to_string(),
        )
    }

    #[test]
    fn test_compose_name_with_category() {
        let record = EanRecord {
            ean: "4001686301656".to_string(),
            name: "Choco Bar".to_string(),
            category_id: Some("45".to_string()),
            category_name: Some("Snacks".to_string()),
            issuing_country: Some("DE".to_string()),
        };
        assert_eq!(compose_name(&record), "Choco Bar [Snacks]");
    }

    #[test]
    fn test_compose_name_without_category() {
        let record = EanRecord {
            ean: "4001686301656".to_string(),
            name: "Choco Bar".to_string(),
            category_id: None,
            category_name: None,
            issuing_country: None,
        };
        assert_eq!(compose_name(&record), "Choco Bar");
    }

    #[tokio::test]
    async fn test_first_record_wins() {
        let client = client_with_json(
            200,
            r#"[{"ean":"4001686301656","name":"Goldbears","categoryName":"Snacks"},
               {"ean":"4001686301656","name":"Other"}]"#,
        );

        let resolved = client.lookup("4001686301656").await.unwrap();
        assert_eq!(resolved.name, "Goldbears [Snacks]");
        assert_eq!(resolved.source, ProductSource::EanSearch);
    }

    #[tokio::test]
    async fn test_empty_array_is_not_found() {
        let client = client_with_json(200, "[]");

        let failure = client.lookup("4001686301656").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_401_is_unauthorized() {
        let client = client_with_json(401, r#"{"error":"invalid token"}"#);

        let failure = client.lookup("4001686301656").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_other_status_is_invalid_response_with_code() {
        let client = client_with_json(500, "server error");

        let failure = client.lookup("4001686301656").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::InvalidResponse);
        assert!(failure.detail.contains("500"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let client = client_with_json(200, r#"{"not":"an array"}"#);

        let failure = client.lookup("4001686301656").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::ParseError);
    }
}
