//! Services running against the in-memory repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use blog_core::domain::author::MAX_AUTHOR_ID;
use blog_core::domain::{Author, AuthorChanges, Category, NewAuthor, NewPost, PostChanges};
use blog_core::error::RepoError;
use blog_core::ports::{AuthorRepository, BaseRepository};
use blog_core::{AuthorService, DomainError, PostService};
use blog_infra::{InMemoryAuthorRepository, InMemoryPostRepository};

fn authors() -> AuthorService {
    AuthorService::new(Arc::new(InMemoryAuthorRepository::new()))
}

fn posts() -> PostService {
    PostService::new(Arc::new(InMemoryPostRepository::new()))
}

fn new_author(name: &str, phone_number: &str) -> NewAuthor {
    NewAuthor {
        id: None,
        name: name.to_string(),
        phone_number: phone_number.to_string(),
    }
}

fn new_post(title: &str, category: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: "Once upon a time. ".repeat(15),
        summary: "A short tale.".to_string(),
        category: category.to_string(),
    }
}

fn violated_fields(err: &DomainError) -> Vec<&'static str> {
    err.violations()
        .map(|v| v.errors().iter().map(|e| e.field).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_create_author_assigns_id_and_timestamps() {
    let service = authors();

    let author = service
        .create(new_author("Ada Lovelace", "5551234567"))
        .await
        .unwrap();

    assert_eq!(author.id, Some(1));
    assert_eq!(author.created_at, author.updated_at);
    assert_eq!(service.get(1).await.unwrap(), author);
}

#[tokio::test]
async fn test_duplicate_name_is_rejected_and_first_remains() {
    let service = authors();
    let first = service
        .create(new_author("Ada Lovelace", "5551234567"))
        .await
        .unwrap();

    let err = service
        .create(new_author("Ada Lovelace", "5559876543"))
        .await
        .unwrap_err();

    assert_eq!(violated_fields(&err), ["name"]);
    assert_eq!(
        err.violations().unwrap().errors()[0].message,
        "Name must be unique."
    );
    assert_eq!(service.list().await.unwrap(), vec![first]);
}

#[tokio::test]
async fn test_explicit_ids() {
    let service = authors();

    let mut request = new_author("Grace Hopper", "5551234567");
    request.id = Some(10_000);
    assert_eq!(service.create(request).await.unwrap().id, Some(10_000));

    for bad in [0, -1, 10_001] {
        let mut request = new_author("Alan Turing", "5551234567");
        request.id = Some(bad);
        let err = service.create(request).await.unwrap_err();
        assert_eq!(violated_fields(&err), ["id"]);
    }

    let mut taken = new_author("Alan Turing", "5551234567");
    taken.id = Some(10_000);
    let err = service.create(taken).await.unwrap_err();
    assert_eq!(
        err.violations().unwrap().errors()[0].message,
        "ID must be unique."
    );
}

#[tokio::test]
async fn test_assigned_id_never_exceeds_max() {
    let service = authors();

    let mut request = new_author("Grace Hopper", "5551234567");
    request.id = Some(MAX_AUTHOR_ID);
    service.create(request).await.unwrap();

    let err = service
        .create(new_author("Alan Turing", "5559876543"))
        .await
        .unwrap_err();

    assert_eq!(violated_fields(&err), ["id"]);
    assert_eq!(
        err.violations().unwrap().errors()[0].message,
        "ID must be less than or equal to 10000."
    );
    let ids: Vec<_> = service.list().await.unwrap().iter().map(|a| a.id).collect();
    assert_eq!(ids, [Some(MAX_AUTHOR_ID)]);
}

/// Lets every name through the lookup, as if a concurrent writer claimed
/// it between the check and the insert.
struct UnseenNames(InMemoryAuthorRepository);

#[async_trait]
impl BaseRepository<Author, i32> for UnseenNames {
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, RepoError> {
        self.0.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        self.0.find_all().await
    }

    async fn insert(&self, author: Author) -> Result<Author, RepoError> {
        self.0.insert(author).await
    }

    async fn update(&self, author: Author) -> Result<Author, RepoError> {
        self.0.update(author).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.0.delete(id).await
    }
}

#[async_trait]
impl AuthorRepository for UnseenNames {
    async fn find_by_name(&self, _name: &str) -> Result<Option<Author>, RepoError> {
        Ok(None)
    }
}

#[tokio::test]
async fn test_store_rejects_name_that_passed_the_check() {
    let service = AuthorService::new(Arc::new(UnseenNames(InMemoryAuthorRepository::new())));
    service
        .create(new_author("Ada Lovelace", "5551234567"))
        .await
        .unwrap();

    let err = service
        .create(new_author("Ada Lovelace", "5559876543"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Duplicate(_)), "{:?}", err);
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_phone_numbers() {
    let service = authors();

    assert!(service
        .create(new_author("Ada Lovelace", "5551234567"))
        .await
        .is_ok());
    for bad in ["555123456", "555-123-4567"] {
        let err = service
            .create(new_author("Alan Turing", bad))
            .await
            .unwrap_err();
        assert_eq!(violated_fields(&err), ["phone_number"]);
    }
}

#[tokio::test]
async fn test_create_reports_all_violations() {
    let service = authors();

    let mut request = new_author("R2", "abc");
    request.id = Some(0);
    let err = service.create(request).await.unwrap_err();

    assert_eq!(violated_fields(&err), ["id", "name", "phone_number"]);
}

#[tokio::test]
async fn test_update_author() {
    let repo = Arc::new(InMemoryAuthorRepository::new());
    let service = AuthorService::new(repo.clone());

    let mut ada = Author::new("Ada Lovelace", "5551234567");
    ada.created_at = Utc::now() - Duration::minutes(5);
    ada.updated_at = ada.created_at;
    let ada = repo.insert(ada).await.unwrap();
    service
        .create(new_author("Grace Hopper", "5551112222"))
        .await
        .unwrap();

    // Keeping its own name is not a uniqueness violation.
    let updated = service
        .update(
            1,
            AuthorChanges {
                name: Some("Ada Lovelace".to_string()),
                phone_number: Some("5550000000".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone_number, "5550000000");
    assert_eq!(updated.created_at, ada.created_at);
    assert!(updated.updated_at > ada.updated_at);

    let err = service
        .update(
            1,
            AuthorChanges {
                name: Some("Grace Hopper".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(violated_fields(&err), ["name"]);
    assert_eq!(service.get(1).await.unwrap().name, "Ada Lovelace");
}

#[tokio::test]
async fn test_missing_author() {
    let service = authors();

    assert!(matches!(
        service.get(3).await,
        Err(DomainError::NotFound { id: 3, .. })
    ));
    assert!(matches!(
        service.update(3, AuthorChanges::default()).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(3).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_deleted_name_can_be_reused() {
    let service = authors();
    service
        .create(new_author("Ada Lovelace", "5551234567"))
        .await
        .unwrap();

    service.delete(1).await.unwrap();

    let again = service
        .create(new_author("Ada Lovelace", "5551234567"))
        .await
        .unwrap();
    assert_eq!(again.id, Some(2));
    assert!(service.find_by_name("Ada Lovelace").await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_post_and_list_by_category() {
    let service = posts();

    service
        .create(new_post("Top 10 Secrets", "Fiction"))
        .await
        .unwrap();
    service
        .create(new_post("Guess What Happened", "Non-Fiction"))
        .await
        .unwrap();
    service
        .create(new_post("You Won't Believe It", "Fiction"))
        .await
        .unwrap();

    let fiction = service.list_by_category(Category::Fiction).await.unwrap();
    let ids: Vec<_> = fiction.iter().map(|p| p.id).collect();
    assert_eq!(ids, [Some(1), Some(3)]);
    assert_eq!(service.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_rejected_post_is_not_stored() {
    let service = posts();

    let err = service
        .create(new_post("A Normal Day", "Poetry"))
        .await
        .unwrap_err();

    assert_eq!(violated_fields(&err), ["title", "category"]);
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_post_content_and_summary_boundaries() {
    let service = posts();

    let mut request = new_post("Top Picks", "Fiction");
    request.content = "x".repeat(249);
    request.summary = "y".repeat(251);
    let err = service.create(request).await.unwrap_err();
    assert_eq!(violated_fields(&err), ["content", "summary"]);

    let mut request = new_post("Top Picks", "Fiction");
    request.content = "x".repeat(250);
    request.summary = "y".repeat(250);
    assert!(service.create(request).await.is_ok());
}

#[tokio::test]
async fn test_failed_post_update_leaves_record_unchanged() {
    let service = posts();
    let post = service
        .create(new_post("Top 10 Secrets", "Fiction"))
        .await
        .unwrap();

    let err = service
        .update(
            1,
            PostChanges {
                title: Some("A Normal Day".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(violated_fields(&err), ["title"]);
    assert_eq!(service.get(1).await.unwrap(), post);

    let updated = service
        .update(
            1,
            PostChanges {
                category: Some("Non-Fiction".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.category(), Some(Category::NonFiction));
    assert_eq!(updated.created_at, post.created_at);
}
