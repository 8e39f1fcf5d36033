//! Plain-text rendering of repository results.

use kms_core::{Article, ArticlePage, Category, KnowledgeBaseStats, PaginationInfo};
use std::fmt::Write;

const EMPTY_LISTING: &str = "No articles found";

fn capitalized(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One table row per article.
pub fn article_rows(articles: &[Article]) -> String {
    if articles.is_empty() {
        return EMPTY_LISTING.to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<40}  {:<16}  {:<16}  {:<12}  {:>6}  STATUS",
        "ID", "TITLE", "CATEGORY", "AUTHOR", "UPDATED", "VIEWS"
    );
    for article in articles {
        let _ = writeln!(
            out,
            "{:>4}  {:<40}  {:<16}  {:<16}  {:<12}  {:>6}  {}",
            article.id,
            truncate(&article.title, 40),
            truncate(&article.category, 16),
            truncate(&article.author, 16),
            article.last_updated.format("%b %-d, %Y"),
            article.views,
            capitalized(article.status.as_str()),
        );
    }
    out.trim_end().to_string()
}

pub fn page(listing: &ArticlePage, pagination: &PaginationInfo) -> String {
    format!("{}\n\n{}", article_rows(&listing.items), pagination)
}

/// Full detail view of one article.
pub fn article_detail(article: &Article) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", article.title);
    let _ = writeln!(out, "Category: {}", article.category);
    let _ = writeln!(out, "Author:   {}", article.author);
    let _ = writeln!(
        out,
        "Updated:  {}",
        article.last_updated.format("%B %-d, %Y")
    );
    let _ = writeln!(out, "Views:    {}", article.views);
    let _ = writeln!(out, "Status:   {}", capitalized(article.status.as_str()));
    if !article.tags.is_empty() {
        let _ = writeln!(out, "Tags:     {}", article.tags.join(", "));
    }
    let _ = write!(out, "\n{}", article.content);
    out
}

pub fn categories(categories: &[Category]) -> String {
    let mut out = String::from("all  All Articles");
    for category in categories {
        let _ = write!(out, "\n{:<3}  {} ({})", category.id, category.name, category.count);
    }
    out
}

pub fn stats(stats: &KnowledgeBaseStats) -> String {
    format!(
        "Total articles:    {}\nCategories:        {}\nActive authors:    {}\nTotal views:       {}\nPublished ratio:   {}%",
        stats.total_articles,
        stats.total_categories,
        stats.distinct_author_count,
        stats.total_views,
        stats.published_ratio_percent
    )
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    shortened.push_str("...");
    shortened
}

#[cfg(test)]
mod tests {
    use super::{article_rows, capitalized, truncate};

    #[test]
    fn status_is_capitalized_for_display() {
        assert_eq!(capitalized("published"), "Published");
        assert_eq!(capitalized(""), "");
    }

    #[test]
    fn long_values_are_shortened() {
        assert_eq!(truncate("abcdefgh", 6), "abc...");
        assert_eq!(truncate("abc", 6), "abc");
    }

    #[test]
    fn empty_listing_has_placeholder() {
        assert_eq!(article_rows(&[]), "No articles found");
    }
}
