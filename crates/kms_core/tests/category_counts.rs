use chrono::NaiveDate;
use kms_core::{
    ArticleInput, ArticleRepository, ArticleStatus, ArticleValidationError, FixedClock,
    MemoryStore, RepoError,
};

const USER_GUIDES: u64 = 2;
const BEST_PRACTICES: u64 = 4;
const POLICIES: u64 = 5;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn seeded() -> ArticleRepository<MemoryStore, FixedClock> {
    ArticleRepository::load_with_clock(MemoryStore::new(), FixedClock(today()))
}

fn input(title: &str, category_id: u64, content: &str) -> ArticleInput {
    ArticleInput::new(
        title,
        category_id,
        content,
        vec!["x".to_string()],
        ArticleStatus::Draft,
    )
}

fn count_of(repo: &ArticleRepository<MemoryStore, FixedClock>, name: &str) -> u64 {
    repo.category_by_name(name).unwrap().count
}

fn assert_counts_consistent(repo: &ArticleRepository<MemoryStore, FixedClock>) {
    for category in repo.categories() {
        let actual = repo
            .articles()
            .iter()
            .filter(|article| article.category == category.name)
            .count() as u64;
        assert_eq!(category.count, actual, "category `{}` drifted", category.name);
    }
}

#[test]
fn create_assigns_next_id_and_bumps_category() {
    let mut repo = seeded();

    let created = repo.create(&input("T", USER_GUIDES, "C")).unwrap();

    assert_eq!(created.id, 9);
    assert_eq!(created.views, 0);
    assert_eq!(created.author, "Current User");
    assert_eq!(created.last_updated, today());
    assert_eq!(created.category, "User Guides");
    assert_eq!(created.tags, vec!["x".to_string()]);
    assert_eq!(repo.articles()[0].id, 9);
    assert_eq!(count_of(&repo, "User Guides"), 4);
    assert_eq!(repo.stats().total_articles, 9);
    assert_counts_consistent(&repo);
}

#[test]
fn update_moves_count_between_categories() {
    let mut repo = seeded();
    let before = repo.get_by_id(4).unwrap().clone();
    assert_eq!(before.category, "Best Practices");

    let updated = repo
        .update(
            4,
            &ArticleInput::new(
                before.title.clone(),
                POLICIES,
                before.content.clone(),
                before.tags.clone(),
                before.status,
            ),
        )
        .unwrap();

    assert_eq!(count_of(&repo, "Best Practices"), 1);
    assert_eq!(count_of(&repo, "Policies"), 2);
    assert_eq!(updated.id, 4);
    assert_eq!(updated.views, before.views);
    assert_eq!(updated.author, before.author);
    assert_eq!(updated.category, "Policies");
    assert_eq!(updated.last_updated, today());
    assert_ne!(updated.last_updated, before.last_updated);
    assert_counts_consistent(&repo);
}

#[test]
fn update_within_same_category_keeps_counts() {
    let mut repo = seeded();
    repo.update(8, &input("Renamed", BEST_PRACTICES, "Body")).unwrap();

    assert_eq!(count_of(&repo, "Best Practices"), 2);
    assert_eq!(repo.get_by_id(8).unwrap().title, "Renamed");
    assert_counts_consistent(&repo);
}

#[test]
fn create_then_delete_restores_category_count() {
    let mut repo = seeded();
    let before = count_of(&repo, "Policies");

    let created = repo.create(&input("Retention", POLICIES, "Keep")).unwrap();
    assert_eq!(count_of(&repo, "Policies"), before + 1);

    let removed = repo.delete(created.id).unwrap();
    assert_eq!(removed.id, created.id);
    assert_eq!(count_of(&repo, "Policies"), before);
    assert!(repo.get_by_id(created.id).is_none());
    assert_counts_consistent(&repo);
}

#[test]
fn deleting_missing_id_changes_nothing() {
    let mut repo = seeded();
    let articles = repo.articles().to_vec();
    let categories = repo.categories().to_vec();

    let err = repo.delete(404).unwrap_err();

    assert!(matches!(err, RepoError::NotFound(404)));
    assert_eq!(repo.articles(), articles.as_slice());
    assert_eq!(repo.categories(), categories.as_slice());
    assert!(repo.store().is_empty());
}

#[test]
fn invalid_input_is_rejected_before_mutation() {
    let mut repo = seeded();
    let articles = repo.articles().to_vec();
    let categories = repo.categories().to_vec();

    let blank_title = repo.create(&input("   ", USER_GUIDES, "C")).unwrap_err();
    assert!(matches!(
        blank_title,
        RepoError::Validation(ArticleValidationError::EmptyTitle)
    ));

    let blank_content = repo.create(&input("T", USER_GUIDES, "\n")).unwrap_err();
    assert!(matches!(
        blank_content,
        RepoError::Validation(ArticleValidationError::EmptyContent)
    ));

    let unknown = repo.update(2, &input("T", 99, "C")).unwrap_err();
    match unknown {
        RepoError::Validation(err) => {
            assert_eq!(err, ArticleValidationError::UnknownCategory(99));
            assert_eq!(err.field(), "category");
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut missing_category = input("T", USER_GUIDES, "C");
    missing_category.category_id = None;
    assert!(matches!(
        repo.create(&missing_category).unwrap_err(),
        RepoError::Validation(ArticleValidationError::MissingCategory)
    ));

    assert_eq!(repo.articles(), articles.as_slice());
    assert_eq!(repo.categories(), categories.as_slice());
    assert!(repo.store().is_empty());
}

#[test]
fn update_of_missing_id_reports_not_found_first() {
    let mut repo = seeded();
    let err = repo.update(77, &input("", 99, "")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(77)));
}

#[test]
fn deleting_highest_id_lets_the_next_create_reuse_it() {
    let mut repo = seeded();
    repo.delete(8).unwrap();

    let created = repo.create(&input("Reused", BEST_PRACTICES, "C")).unwrap();
    assert_eq!(created.id, 8);
    assert_counts_consistent(&repo);
}

#[test]
fn emptied_repository_restarts_ids_at_one() {
    let mut repo = seeded();
    for id in 1..=8 {
        repo.delete(id).unwrap();
    }
    assert!(repo.categories().iter().all(|category| category.count == 0));

    let created = repo.create(&input("Fresh", USER_GUIDES, "C")).unwrap();
    assert_eq!(created.id, 1);
    assert_counts_consistent(&repo);
}

#[test]
fn invariant_holds_across_mixed_operation_sequence() {
    let mut repo = seeded();
    let categories = [1, USER_GUIDES, 3, BEST_PRACTICES, POLICIES];

    for round in 0..20u64 {
        let category = categories[(round % 5) as usize];
        let created = repo
            .create(&input(&format!("Article {round}"), category, "Body"))
            .unwrap();
        assert_counts_consistent(&repo);

        let target = categories[((round + 2) % 5) as usize];
        repo.update(created.id, &input("Moved", target, "Body")).unwrap();
        assert_counts_consistent(&repo);

        if round % 3 == 0 {
            repo.delete(created.id).unwrap();
            assert_counts_consistent(&repo);
        }
        repo.view(created.id).ok();
    }

    let total: u64 = repo.categories().iter().map(|category| category.count).sum();
    assert_eq!(total as usize, repo.articles().len());
}
