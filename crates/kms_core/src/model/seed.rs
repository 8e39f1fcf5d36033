//! Default dataset written on first start.
//!
//! # Invariants
//! - Category counts match the article distribution exactly.
//! - Article ids are `1..=8`, newest first.

use crate::model::article::{Article, ArticleStatus};
use crate::model::category::Category;
use chrono::NaiveDate;

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn article(
    id: u64,
    title: &str,
    category: &str,
    author: &str,
    last_updated: NaiveDate,
    views: u64,
    status: ArticleStatus,
    content: &str,
    tag_values: &[&str],
) -> Article {
    Article {
        id,
        title: title.to_string(),
        category: category.to_string(),
        author: author.to_string(),
        last_updated,
        views,
        status,
        content: content.to_string(),
        tags: tags(tag_values),
    }
}

/// Returns the eight seed articles.
pub fn default_articles() -> Vec<Article> {
    use ArticleStatus::{Draft, Published};

    vec![
        article(
            1,
            "Getting Started with Our Platform",
            "Getting Started",
            "John Smith",
            seed_date(2023, 5, 15),
            342,
            Published,
            "This guide will help you get started with our platform. Follow these steps to set up your account and begin using our services.",
            &["onboarding", "setup", "tutorial"],
        ),
        article(
            2,
            "User Account Management Guide",
            "User Guides",
            "Sarah Johnson",
            seed_date(2023, 5, 12),
            218,
            Published,
            "Learn how to manage your user account, update profile information, change passwords, and configure notification settings.",
            &["account", "profile", "settings"],
        ),
        article(
            3,
            "Troubleshooting Common Login Issues",
            "Troubleshooting",
            "Michael Brown",
            seed_date(2023, 5, 10),
            156,
            Published,
            "Having trouble logging in? This article covers the most common login issues and how to resolve them.",
            &["login", "authentication", "issues"],
        ),
        article(
            4,
            "Best Practices for Data Security",
            "Best Practices",
            "Emily Davis",
            seed_date(2023, 5, 8),
            89,
            Draft,
            "Follow these best practices to ensure your data remains secure while using our platform.",
            &["security", "best practices", "data protection"],
        ),
        article(
            5,
            "Company Privacy Policy Update",
            "Policies",
            "Robert Wilson",
            seed_date(2023, 5, 5),
            421,
            Published,
            "We've updated our privacy policy to better protect your data and comply with new regulations.",
            &["policy", "privacy", "compliance"],
        ),
        article(
            6,
            "Advanced Feature Overview",
            "User Guides",
            "Lisa Anderson",
            seed_date(2023, 5, 3),
            127,
            Published,
            "Explore the advanced features of our platform to get the most out of your experience.",
            &["features", "advanced", "guide"],
        ),
        article(
            7,
            "API Integration Guide",
            "User Guides",
            "David Miller",
            seed_date(2023, 5, 1),
            94,
            Draft,
            "Learn how to integrate our API into your applications and automate workflows.",
            &["api", "integration", "development"],
        ),
        article(
            8,
            "Performance Optimization Tips",
            "Best Practices",
            "Jennifer Lee",
            seed_date(2023, 4, 28),
            203,
            Published,
            "Optimize your usage of our platform for better performance and efficiency.",
            &["performance", "optimization", "tips"],
        ),
    ]
}

/// Returns the five seed categories with counts matching [`default_articles`].
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(1, "Getting Started", 1),
        Category::new(2, "User Guides", 3),
        Category::new(3, "Troubleshooting", 1),
        Category::new(4, "Best Practices", 2),
        Category::new(5, "Policies", 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::{default_articles, default_categories};

    #[test]
    fn seed_counts_match_article_distribution() {
        let articles = default_articles();
        for category in default_categories() {
            let actual = articles
                .iter()
                .filter(|article| article.category == category.name)
                .count() as u64;
            assert_eq!(category.count, actual, "category `{}`", category.name);
        }
    }

    #[test]
    fn seed_ids_are_unique_and_dense() {
        let mut ids: Vec<u64> = default_articles().iter().map(|a| a.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }
}
