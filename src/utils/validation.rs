use crate::utils::error::{DashError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> DashError {
    DashError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The statistics service base URL: http(s), with a host, and nothing after the path
/// since `/v2/locations` and the query string are appended to it.
pub fn validate_url(field: &str, endpoint: &str) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(invalid(field, endpoint, "endpoint is empty"));
    }

    let url = Url::parse(endpoint)
        .map_err(|e| invalid(field, endpoint, format!("not a URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            endpoint,
            format!("expected http or https, got {}", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(field, endpoint, "endpoint has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field,
            endpoint,
            "endpoint must not carry a query or fragment",
        ));
    }
    Ok(())
}

/// Directory the export archive is written into.
pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field, path, "output path is empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path.escape_default(), "output path contains a NUL byte"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "must not be blank"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(field, value, format!("expected {}..={}", min, max)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.endpoint", "https://coronavirus-tracker-api.herokuapp.com").is_ok());
        assert!(validate_url("source.endpoint", "http://127.0.0.1:8080/").is_ok());
        assert!(validate_url("source.endpoint", "").is_err());
        assert!(validate_url("source.endpoint", "not a url").is_err());
        assert!(validate_url("source.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_endpoint_with_query_is_rejected() {
        let err = validate_url("source.endpoint", "https://example.com?source=jhu").unwrap_err();
        assert!(matches!(err, DashError::InvalidConfigValueError { ref field, .. } if field == "source.endpoint"));
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("export.output_path", "./output").is_ok());
        assert!(validate_path("export.output_path", "").is_err());
        assert!(validate_path("export.output_path", "out\0put").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("display.top_n", 10usize, 1, 500).is_ok());
        assert!(validate_range("display.top_n", 0usize, 1, 500).is_err());
        let err = validate_range("display.chart_width", 201usize, 10, 200).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value '201' for 'display.chart_width': expected 10..=200"
        );
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("source.data_source", "jhu").is_ok());
        assert!(validate_non_empty_string("source.data_source", "   ").is_err());
    }
}
