//! Page metadata extraction for the analyze and fetch-logo endpoints.
//!
//! Fetches a page and pulls title, description and icon out of the raw HTML
//! with targeted patterns. Extraction is best-effort: a page that cannot be
//! fetched still yields a usable result via the favicon-service fallback.

use std::time::Duration;

use regex::Regex;
use reqwest::Url;
use serde::Serialize;

/// Browser-like User-Agent; some sites serve bots an empty shell.
const FETCH_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36";

/// Time budget for fetching a page to analyze.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Favicon service used when a page exposes no icon of its own.
fn favicon_service_url(host: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={host}&sz=64")
}

/// Raw metadata extracted from a page (before AI summarization).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub logo_url: Option<String>,
    /// The normalized URL that was actually fetched.
    pub url: String,
}

/// Extracts titles, descriptions and icons from live pages.
pub struct PageAnalyzer {
    client: reqwest::Client,
    title_tag: Regex,
    icon_link: Regex,
    apple_icon_link: Regex,
}

impl PageAnalyzer {
    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = reqwest::Client::builder()
            .user_agent(FETCH_USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            title_tag: Regex::new(r"(?is)<title[^>]*>(.*?)</title>")?,
            icon_link: Regex::new(
                r#"(?i)<link[^>]+rel=["'](?:shortcut )?icon["'][^>]+href=["']([^"']+)["']"#,
            )?,
            apple_icon_link: Regex::new(
                r#"(?i)<link[^>]+rel=["']apple-touch-icon["'][^>]+href=["']([^"']+)["']"#,
            )?,
        })
    }

    /// Prefix `https://` when the input has no scheme.
    pub fn normalize_url(input: &str) -> String {
        if input.starts_with("http://") || input.starts_with("https://") {
            input.to_string()
        } else {
            format!("https://{input}")
        }
    }

    /// Fetch a page and extract its metadata.
    ///
    /// A fetch failure still returns metadata: empty title/description plus
    /// the favicon-service logo when the host can be determined.
    pub async fn analyze(&self, input_url: &str) -> PageMetadata {
        let url = Self::normalize_url(input_url);
        let host = Url::parse(&url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));

        let html = match self.fetch_html(&url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::debug!(url = %url, error = %err, "Page fetch failed");
                return PageMetadata {
                    logo_url: host.as_deref().map(favicon_service_url),
                    url,
                    ..PageMetadata::default()
                };
            }
        };

        let title = self
            .extract_title(&html)
            .or_else(|| extract_meta(&html, "og:title"))
            .or_else(|| extract_meta(&html, "twitter:title"))
            .unwrap_or_default();

        let description = extract_meta(&html, "description")
            .or_else(|| extract_meta(&html, "og:description"))
            .or_else(|| extract_meta(&html, "twitter:description"))
            .unwrap_or_default();

        let logo_url = self
            .extract_icon(&html, &url)
            .or_else(|| host.as_deref().map(favicon_service_url));

        PageMetadata {
            title,
            description,
            logo_url,
            url,
        }
    }

    /// Resolve just the icon for a page, with the `/favicon.ico` probe and
    /// favicon-service fallbacks.
    pub async fn fetch_logo(&self, input_url: &str) -> Option<String> {
        let url = Self::normalize_url(input_url);
        let parsed = Url::parse(&url).ok()?;
        let host = parsed.host_str()?.to_string();

        if let Ok(html) = self.fetch_html(&url).await {
            if let Some(icon) = self.extract_icon(&html, &url) {
                return Some(icon);
            }
        }

        // No declared icon: probe the conventional location.
        if let Ok(favicon) = parsed.join("/favicon.ico") {
            if let Ok(response) = self.client.head(favicon.as_str()).send().await {
                if response.status().is_success() {
                    return Some(favicon.to_string());
                }
            }
        }

        Some(favicon_service_url(&host))
    }

    async fn fetch_html(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client.get(url).send().await?.text().await
    }

    fn extract_title(&self, html: &str) -> Option<String> {
        self.title_tag
            .captures(html)
            .map(|c| c[1].trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Icon link priority: icon / shortcut icon, then apple-touch-icon.
    /// Relative hrefs are resolved against the page URL.
    fn extract_icon(&self, html: &str, base_url: &str) -> Option<String> {
        let href = self
            .icon_link
            .captures(html)
            .or_else(|| self.apple_icon_link.captures(html))
            .map(|c| c[1].to_string())?;
        resolve_href(&href, base_url)
    }
}

/// Extract the `content` of a `<meta>` tag keyed by `name` or `property`,
/// tolerating either attribute order.
fn extract_meta(html: &str, key: &str) -> Option<String> {
    let escaped = regex::escape(key);
    let patterns = [
        format!(
            r#"(?i)<meta[^>]+(?:name|property)=["']{escaped}["'][^>]+content=["']([^"']*)["']"#
        ),
        format!(
            r#"(?i)<meta[^>]+content=["']([^"']*)["'][^>]+(?:name|property)=["']{escaped}["']"#
        ),
    ];
    for pattern in patterns {
        if let Ok(re) = Regex::new(&pattern) {
            if let Some(captures) = re.captures(html) {
                let content = captures[1].trim().to_string();
                if !content.is_empty() {
                    return Some(content);
                }
            }
        }
    }
    None
}

/// Resolve a possibly-relative href against the page it came from.
fn resolve_href(href: &str, base_url: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_scheme_less_urls() {
        assert_eq!(
            PageAnalyzer::normalize_url("example.com"),
            "https://example.com"
        );
        assert_eq!(
            PageAnalyzer::normalize_url("http://example.com"),
            "http://example.com"
        );
        assert_eq!(
            PageAnalyzer::normalize_url("https://example.com/a"),
            "https://example.com/a"
        );
    }

    #[test]
    fn extracts_title_tag() {
        let analyzer = PageAnalyzer::new().unwrap();
        let html = "<html><head><title> GitHub - Build software </title></head></html>";
        assert_eq!(
            analyzer.extract_title(html).as_deref(),
            Some("GitHub - Build software")
        );
        assert_eq!(analyzer.extract_title("<html></html>"), None);
    }

    #[test]
    fn extracts_meta_in_either_attribute_order() {
        let forward = r#"<meta name="description" content="A code host">"#;
        let reversed = r#"<meta content="A code host" property="og:description">"#;
        assert_eq!(
            extract_meta(forward, "description").as_deref(),
            Some("A code host")
        );
        assert_eq!(
            extract_meta(reversed, "og:description").as_deref(),
            Some("A code host")
        );
        assert_eq!(extract_meta(forward, "og:title"), None);
    }

    #[test]
    fn resolves_relative_icon_hrefs() {
        let analyzer = PageAnalyzer::new().unwrap();
        let html = r#"<link rel="icon" href="/static/favicon.png">"#;
        assert_eq!(
            analyzer
                .extract_icon(html, "https://example.com/page")
                .as_deref(),
            Some("https://example.com/static/favicon.png")
        );

        let absolute = r#"<link rel="shortcut icon" href="https://cdn.example.com/i.ico">"#;
        assert_eq!(
            analyzer
                .extract_icon(absolute, "https://example.com")
                .as_deref(),
            Some("https://cdn.example.com/i.ico")
        );
    }

    #[test]
    fn apple_touch_icon_is_a_fallback() {
        let analyzer = PageAnalyzer::new().unwrap();
        let html = r#"<link rel="apple-touch-icon" href="/touch.png">"#;
        assert_eq!(
            analyzer
                .extract_icon(html, "https://example.com")
                .as_deref(),
            Some("https://example.com/touch.png")
        );
    }
}
