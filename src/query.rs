//! Update query construction.

use crate::config::QueryParameter;
use crate::error::{DdnsError, Result};
use reqwest::Url;

/// Serialize the parameters, in order, as `?key=value&key=value`.
///
/// Values are percent-encoded; unreserved characters pass through.
pub fn build_query(params: &[QueryParameter]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .map(|p| format!("{}={}", p.name, urlencoding::encode(&p.value)))
        .collect();
    format!("?{}", pairs.join("&"))
}

/// Endpoint with the update query appended.
pub fn request_url(endpoint: &str, params: &[QueryParameter]) -> Result<Url> {
    let raw = format!("{}{}", endpoint, build_query(params));
    Url::parse(&raw).map_err(|e| DdnsError::RequestConstruction(format!("{}: {}", e, endpoint)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(service: &str, hostname: &str, wildcard: &str) -> Vec<QueryParameter> {
        let mut params = QueryParameter::defaults();
        params[0].value = service.to_string();
        params[1].value = hostname.to_string();
        params[2].value = wildcard.to_string();
        params
    }

    #[test]
    fn test_query_order_and_keys() {
        let query = build_query(&params("zoneedit", "home.example.org", "NO"));
        assert_eq!(
            query,
            "?rsp_ident=zoneedit&hostname=home.example.org&wildcard=NO"
        );
    }

    #[test]
    fn test_query_escapes_reserved_characters() {
        let query = build_query(&params("zone edit", "a&b=c.example.org", "YES"));
        assert_eq!(
            query,
            "?rsp_ident=zone%20edit&hostname=a%26b%3Dc.example.org&wildcard=YES"
        );
    }

    #[test]
    fn test_query_decodes_to_original_values() {
        let original = params("zone/edit?", "ünïcode host+#.example.org", "NO");
        let url = request_url("http://localhost/dyn", &original).unwrap();

        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let expected: Vec<(String, String)> = original
            .iter()
            .map(|p| (p.name.to_string(), p.value.clone()))
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_request_url_appends_to_endpoint() {
        let url = request_url(
            "https://dynamic.zoneedit.com/dyn/jsclient.php",
            &params("zoneedit", "home.example.org", "YES"),
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("dynamic.zoneedit.com"));
        assert_eq!(url.path(), "/dyn/jsclient.php");
        assert_eq!(
            url.query(),
            Some("rsp_ident=zoneedit&hostname=home.example.org&wildcard=YES")
        );
    }

    #[test]
    fn test_request_url_rejects_malformed_endpoint() {
        let err = request_url("not a url", &params("zoneedit", "h.example.org", "NO")).unwrap_err();
        assert!(matches!(err, DdnsError::RequestConstruction(_)));
        assert_eq!(err.exit_code(), 6);
    }
}
