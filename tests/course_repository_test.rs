use std::collections::HashSet;

use learnhub::db;
use learnhub::domain::{Course, CourseRepository, DomainError, ExecutionContext};
use learnhub::infrastructure::AppState;
use uuid::Uuid;

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

fn test_course(name: &str) -> Course {
    Course {
        id: Uuid::new_v4(),
        name: name.to_string(),
        url: format!("https://x/{}", name),
        text: "intro".to_string(),
    }
}

#[tokio::test]
async fn test_course_lifecycle() {
    let state = setup_test_state().await;
    let repo = state.course_repo.as_ref();
    let ctx = ExecutionContext::new();

    // 1. Create
    let course = Course {
        id: Uuid::new_v4(),
        name: "algo-101".to_string(),
        url: "https://x/algo".to_string(),
        text: "intro".to_string(),
    };
    let created = repo.create(&ctx, course.clone()).await.unwrap();
    assert_eq!(created, course);

    // 2. Lookup returns an identical record
    assert_eq!(repo.find_by_id(&ctx, course.id).await.unwrap(), course);

    // 3. Update the name
    let v2 = Course {
        name: "algo-101-v2".to_string(),
        ..course.clone()
    };
    let updated = repo.update(&ctx, v2.clone()).await.unwrap();
    assert_eq!(updated, v2);
    assert_eq!(repo.find_by_id(&ctx, course.id).await.unwrap(), v2);

    // 4. Delete returns the v2 record
    let deleted = repo.delete(&ctx, course.id).await.unwrap();
    assert_eq!(deleted, v2);

    // 5. Gone
    assert_eq!(
        repo.find_by_id(&ctx, course.id).await,
        Err(DomainError::NotFound)
    );
}

#[tokio::test]
async fn test_list_empty_store() {
    let state = setup_test_state().await;
    let ctx = ExecutionContext::new();

    let courses = state.course_repo.find_all(&ctx).await.unwrap();
    assert!(courses.is_empty());
}

#[tokio::test]
async fn test_list_returns_every_course_once() {
    let state = setup_test_state().await;
    let repo = state.course_repo.as_ref();
    let ctx = ExecutionContext::new();

    let mut expected = HashSet::new();
    for i in 0..5 {
        let course = test_course(&format!("course-{}", i));
        expected.insert(course.id);
        repo.create(&ctx, course).await.unwrap();
    }

    let listed = repo.find_all(&ctx).await.unwrap();
    assert_eq!(listed.len(), 5);

    let ids: HashSet<Uuid> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_duplicate_name_is_rejected() {
    let state = setup_test_state().await;
    let repo = state.course_repo.as_ref();
    let ctx = ExecutionContext::new();

    let first = test_course("rust-201");
    repo.create(&ctx, first.clone()).await.unwrap();

    let mut second = test_course("rust-201");
    second.url = "https://elsewhere/rust".to_string();
    assert_eq!(
        repo.create(&ctx, second).await,
        Err(DomainError::AlreadyExists)
    );

    assert_eq!(repo.find_by_id(&ctx, first.id).await.unwrap(), first);
    assert_eq!(repo.find_all(&ctx).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rename_onto_existing_name_is_rejected() {
    let state = setup_test_state().await;
    let repo = state.course_repo.as_ref();
    let ctx = ExecutionContext::new();

    let a = test_course("a");
    let b = test_course("b");
    repo.create(&ctx, a.clone()).await.unwrap();
    repo.create(&ctx, b.clone()).await.unwrap();

    let clash = Course {
        name: "a".to_string(),
        ..b.clone()
    };
    assert_eq!(
        repo.update(&ctx, clash).await,
        Err(DomainError::AlreadyExists)
    );
    assert_eq!(repo.find_by_id(&ctx, b.id).await.unwrap(), b);
}

#[tokio::test]
async fn test_unknown_course_is_not_found_everywhere() {
    let state = setup_test_state().await;
    let repo = state.course_repo.as_ref();
    let ctx = ExecutionContext::new();

    repo.create(&ctx, test_course("existing")).await.unwrap();
    let missing = test_course("missing");

    assert_eq!(
        repo.find_by_id(&ctx, missing.id).await,
        Err(DomainError::NotFound)
    );
    assert_eq!(
        repo.update(&ctx, missing.clone()).await,
        Err(DomainError::NotFound)
    );
    assert_eq!(
        repo.delete(&ctx, missing.id).await,
        Err(DomainError::NotFound)
    );

    // Nothing was partially applied
    let listed = repo.find_all(&ctx).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "existing");
}

#[tokio::test]
async fn test_update_keeps_identifier() {
    let state = setup_test_state().await;
    let repo = state.course_repo.as_ref();
    let ctx = ExecutionContext::new();

    let course = test_course("stable");
    repo.create(&ctx, course.clone()).await.unwrap();

    let changed = Course {
        id: course.id,
        name: "stable-2".to_string(),
        url: "https://x/new".to_string(),
        text: "rewritten".to_string(),
    };
    repo.update(&ctx, changed.clone()).await.unwrap();

    let listed = repo.find_all(&ctx).await.unwrap();
    assert_eq!(listed, vec![changed]);
}
