use kms_core::{
    ArticleInput, ArticleRepository, ArticleStatus, BrowseSession, CategoryFilter, MemoryStore,
};

fn seeded() -> ArticleRepository<MemoryStore> {
    ArticleRepository::load(MemoryStore::new())
}

#[test]
fn next_page_stops_at_last_page() {
    let repo = seeded();
    let mut session = BrowseSession::new(5);

    let info = session.pagination(&repo);
    assert_eq!(info.to_string(), "Page 1 of 2");
    assert!(!info.has_previous);
    assert!(info.has_next);

    assert!(session.next_page(&repo));
    assert_eq!(session.current_listing(&repo).items.len(), 3);
    assert!(!session.next_page(&repo));
    assert_eq!(session.current_page(), 2);

    let info = session.pagination(&repo);
    assert!(info.has_previous);
    assert!(!info.has_next);
}

#[test]
fn category_filter_resets_page_and_narrows_listing() {
    let repo = seeded();
    let mut session = BrowseSession::new(2);
    assert!(session.next_page(&repo));

    session.filter_by_category(CategoryFilter::Id(2));
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.pagination(&repo).total_pages, 2);

    let listing = session.current_listing(&repo);
    assert_eq!(listing.total, 3);
    assert!(listing
        .items
        .iter()
        .all(|article| article.category == "User Guides"));
}

#[test]
fn empty_filter_has_no_pages() {
    let repo = seeded();
    let mut session = BrowseSession::default();
    session.filter_by_category(CategoryFilter::Id(99));

    let info = session.pagination(&repo);
    assert_eq!(info.total_pages, 0);
    assert!(!info.has_next);
    assert!(!session.next_page(&repo));
    assert!(session.current_listing(&repo).items.is_empty());
}

#[test]
fn listing_reflects_new_articles_first() {
    let mut repo = seeded();
    let session = BrowseSession::default();
    repo.create(&ArticleInput::new(
        "Release Notes",
        1,
        "What changed",
        Vec::new(),
        ArticleStatus::Published,
    ))
    .unwrap();

    let listing = session.current_listing(&repo);
    assert_eq!(listing.items[0].title, "Release Notes");
    assert_eq!(listing.total, 9);
    assert_eq!(session.pagination(&repo).total_pages, 2);
}
