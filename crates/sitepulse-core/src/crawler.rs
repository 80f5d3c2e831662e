//! AI-crawler user-agent classification.

/// Known AI crawler signatures, checked in order; first match wins.
///
/// Each entry is `(lowercase needle, reported name)`. All upstream signatures
/// are literal substrings, so matching is a case-insensitive `contains` —
/// no multi-label classification.
pub const CRAWLER_SIGNATURES: &[(&str, &str)] = &[
    ("gptbot", "GPTBot"),
    ("chatgpt-user", "ChatGPT-User"),
    ("claudebot", "ClaudeBot"),
    ("anthropic-ai", "Anthropic-ai"),
    ("claude-web", "Claude-Web"),
    ("perplexitybot", "PerplexityBot"),
    ("bytespider", "Bytespider"),
    ("cohere-ai", "Cohere"),
    ("youbot", "YouBot"),
    ("google-extended", "Google-Extended"),
    ("ccbot", "CCBot"),
    ("facebookbot", "FacebookBot"),
    ("applebot-extended", "Applebot-Extended"),
];

/// Crawler names split out as their own columns in the daily crawl series;
/// every other classified crawler folds into the `other` column.
pub const SPLIT_CRAWLERS: [&str; 3] = ["GPTBot", "ClaudeBot", "PerplexityBot"];

/// Classify a user-agent string against [`CRAWLER_SIGNATURES`].
///
/// Returns the crawler name on the first match, `None` for ordinary traffic.
pub fn classify_user_agent(user_agent: &str) -> Option<&'static str> {
    if user_agent.is_empty() {
        return None;
    }
    let ua = user_agent.to_ascii_lowercase();
    CRAWLER_SIGNATURES
        .iter()
        .find(|(needle, _)| ua.contains(needle))
        .map(|(_, name)| *name)
}

/// Extract the post slug from a `/blog/{slug}` path.
///
/// The overview page `/blog` itself and nested paths yield `None` — those
/// crawls are recorded without a slug and surface in the top-paths
/// leaderboard instead of the per-article one.
pub fn blog_slug_from_path(path: &str) -> Option<String> {
    let rest = path.strip_prefix("/blog/")?;
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(rest.to_string())
}
