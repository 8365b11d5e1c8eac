//! Text helpers shared by the dashboard panels

use chrono::{DateTime, Utc};

use crate::data::Article;

/// Length of update excerpts, in characters
pub const EXCERPT_LENGTH: usize = 150;

/// Formats a timestamp relative to `now`
///
/// Anything older than a week falls back to the calendar date.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - timestamp).num_seconds();

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3_600 {
        format!("{} minutes ago", diff / 60)
    } else if diff < 86_400 {
        format!("{} hours ago", diff / 3_600)
    } else if diff < 604_800 {
        format!("{} days ago", diff / 86_400)
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Removes every complete `<...>` run
///
/// A `<` with no `>` after it is kept as text.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    out.push_str(rest);

    out
}

/// Strips markup and cuts the text to `length` characters, adding `...`
pub fn truncate_excerpt(text: &str, length: usize) -> String {
    let stripped = strip_tags(text);
    if stripped.chars().count() <= length {
        return stripped;
    }

    let mut cut: String = stripped.chars().take(length).collect();
    cut.push_str("...");
    cut
}

/// Wraps every case-insensitive occurrence of `query` in brackets
///
/// The query is matched literally. Case folding is ASCII-only so byte offsets
/// line up with the original text.
pub fn highlight_match(text: &str, query: &str) -> String {
    if query.is_empty() {
        return text.to_string();
    }

    let haystack = text.to_ascii_lowercase();
    let needle = query.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;

    for (start, matched) in haystack.match_indices(&needle) {
        let end = start + matched.len();
        out.push_str(&text[last..start]);
        out.push('[');
        out.push_str(&text[start..end]);
        out.push(']');
        last = end;
    }
    out.push_str(&text[last..]);

    out
}

/// Category shown on updates-feed items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCategory {
    ReleaseNotes,
    Policy,
    Training,
    Community,
    Update,
}

impl UpdateCategory {
    /// Classifies an article by its labels, then by its title
    pub fn detect(article: &Article) -> Self {
        let title = article.title.to_lowercase();
        let has_label = |label: &str| article.label_names.iter().any(|l| l == label);

        if has_label("release-notes") || title.contains("release") {
            UpdateCategory::ReleaseNotes
        } else if has_label("policy") || title.contains("policy") {
            UpdateCategory::Policy
        } else if has_label("training") || title.contains("training") {
            UpdateCategory::Training
        } else if has_label("community") {
            UpdateCategory::Community
        } else {
            UpdateCategory::Update
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UpdateCategory::ReleaseNotes => "Release Notes",
            UpdateCategory::Policy => "Policy",
            UpdateCategory::Training => "Training",
            UpdateCategory::Community => "Community",
            UpdateCategory::Update => "Update",
        }
    }
}
