//! Coarse content-type label from the URL and the opening of the text.

const SOCIAL_HINTS: &[&str] = &["twitter", "facebook", "instagram", "tiktok", "reddit"];
const NEWS_HINTS: &[&str] = &["news", "times", "post", "journal", "bbc", "cnn"];
const RESEARCH_DOMAINS: &[&str] = &[".edu", ".gov"];

/// Only this many leading characters are inspected for research wording.
const RESEARCH_PREFIX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    SocialMedia,
    NewsArticle,
    Research,
    General,
    Unknown,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::SocialMedia => "social-media",
            ContentType::NewsArticle => "news-article",
            ContentType::Research => "research",
            ContentType::General => "general",
            ContentType::Unknown => "unknown",
        }
    }
}

pub fn classify(url: &str, content: &str) -> ContentType {
    if content.trim().is_empty() {
        return ContentType::Unknown;
    }
    let url = url.to_lowercase();

    if SOCIAL_HINTS.iter().any(|h| url.contains(h)) {
        return ContentType::SocialMedia;
    }
    if NEWS_HINTS.iter().any(|h| url.contains(h)) {
        return ContentType::NewsArticle;
    }

    let opening: String = content
        .chars()
        .take(RESEARCH_PREFIX_CHARS)
        .collect::<String>()
        .to_lowercase();
    if RESEARCH_DOMAINS.iter().any(|d| url.contains(d)) || opening.contains("research") {
        return ContentType::Research;
    }

    ContentType::General
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_hints_take_priority() {
        assert_eq!(
            classify("https://reddit.com/r/news", "text"),
            ContentType::SocialMedia
        );
        assert_eq!(
            classify("https://www.bbc.co.uk/a", "Research says"),
            ContentType::NewsArticle
        );
        assert_eq!(classify("https://mit.edu/a", "text"), ContentType::Research);
    }

    #[test]
    fn research_wording_only_counts_near_the_start() {
        assert_eq!(classify("", "New research on sleep"), ContentType::Research);
        let late = format!("{} research", "a".repeat(600));
        assert_eq!(classify("", &late), ContentType::General);
    }

    #[test]
    fn empty_content_is_unknown() {
        assert_eq!(classify("https://twitter.com", "  "), ContentType::Unknown);
        assert_eq!(ContentType::Unknown.as_str(), "unknown");
    }
}
