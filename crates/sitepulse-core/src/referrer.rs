use url::Url;

/// Normalize a raw referrer into a traffic-source label.
///
/// A full URL collapses to its hostname with a leading `www.` stripped.
/// A string that does not parse as a URL is kept unchanged. An empty value
/// or the literal `"direct"` (what the tracking snippet sends when
/// `document.referrer` is empty) normalizes to `None`.
pub fn normalize_referrer(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "direct" {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => match url.host_str() {
            Some(host) => Some(host.strip_prefix("www.").unwrap_or(host).to_string()),
            // Parsed but host-less (e.g. "mailto:"): keep the raw value.
            None => Some(raw.to_string()),
        },
        Err(_) => Some(raw.to_string()),
    }
}
