//! Endpoint resolution: default provider hosts or a proxy URL template.

use url::Url;

use crate::types::ProviderId;
use crate::Error;

/// Placeholder in a proxy template, substituted with the canonical
/// provider identifier.
pub const PROVIDER_PLACEHOLDER: &str = "{provider}";

fn default_base_url(provider: ProviderId) -> Result<&'static str, Error> {
    match provider {
        ProviderId::Google => Ok("https://generativelanguage.googleapis.com"),
        ProviderId::OpenAi => Ok("https://api.openai.com"),
        ProviderId::DeepSeek => Ok("https://api.deepseek.com"),
        ProviderId::Echo => Err(Error::config("echobot has no remote endpoint")),
    }
}

/// Resolve the request URL for `provider`.
///
/// With a proxy template, the `{provider}` placeholder is replaced with the
/// canonical identifier and trailing slashes are stripped before `api_path`
/// is appended; a template without the placeholder is used as-is. Without a
/// template, the provider's default host is used. The result is parsed
/// eagerly so a malformed template fails the first request instead of
/// silently falling back to the default host.
pub fn resolve(
    provider: ProviderId,
    api_path: &str,
    proxy_template: Option<&str>,
) -> Result<Url, Error> {
    let base = match proxy_template {
        Some(template) => template
            .replace(PROVIDER_PLACEHOLDER, provider.as_str())
            .trim_end_matches('/')
            .to_string(),
        None => default_base_url(provider)?.to_string(),
    };

    let endpoint = format!("{base}{api_path}");
    Url::parse(&endpoint)
        .map_err(|e| Error::config(format!("invalid endpoint URL '{endpoint}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let url = resolve(ProviderId::OpenAi, "/v1/chat/completions", None).unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");

        let url = resolve(ProviderId::DeepSeek, "/chat/completions", None).unwrap();
        assert_eq!(url.as_str(), "https://api.deepseek.com/chat/completions");

        let url = resolve(
            ProviderId::Google,
            "/v1beta/models/gemini-2.5-flash:streamGenerateContent?key=k",
            None,
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:streamGenerateContent?key=k"
        );
    }

    #[test]
    fn test_proxy_template_substitution() {
        let url = resolve(
            ProviderId::OpenAi,
            "/v1/chat/completions",
            Some("http://localhost:8080/{provider}"),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_proxy_template_trailing_slash_stripped() {
        let url = resolve(
            ProviderId::DeepSeek,
            "/chat/completions",
            Some("http://localhost:8080/{provider}/"),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/deepseek/chat/completions"
        );
    }

    #[test]
    fn test_proxy_template_without_placeholder() {
        let url = resolve(
            ProviderId::OpenAi,
            "/v1/chat/completions",
            Some("http://gateway.internal"),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://gateway.internal/v1/chat/completions"
        );
    }

    #[test]
    fn test_malformed_template_fails_fast() {
        let err = resolve(
            ProviderId::OpenAi,
            "/v1/chat/completions",
            Some("not a url/{provider}"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("not a url/openai"));
    }

    #[test]
    fn test_echo_has_no_endpoint() {
        let err = resolve(ProviderId::Echo, "/anything", None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
