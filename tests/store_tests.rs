// tests/store_tests.rs

use std::time::Duration;

use catquiz_backend::models::activation_code::CodeKind;
use catquiz_backend::store::CodeStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Opens a fresh SQLite database in the temp directory and migrates it.
async fn setup_store() -> CodeStore {
    let db_path = std::env::temp_dir().join(format!("catquiz-test-{}.db", uuid::Uuid::new_v4()));

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to open test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate test database");

    CodeStore::new(pool)
}

#[tokio::test]
async fn repeated_batch_inserts_keep_codes_unique() {
    let store = setup_store().await;

    let batch: Vec<(String, CodeKind)> = vec![
        ("CAT-AAAA-AAAA".to_string(), CodeKind::Normal),
        ("CAT-BBBB-BBBB".to_string(), CodeKind::Normal),
    ];

    store.batch_insert(&batch).await.unwrap();
    // Same codes again, plus one new one.
    let mut second = batch.clone();
    second.push(("CAT-CCCC-CCCC".to_string(), CodeKind::Normal));
    store.batch_insert(&second).await.unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total, 3);
}

#[tokio::test]
async fn concurrent_redeem_succeeds_at_most_once() {
    let store = setup_store().await;
    store
        .batch_insert(&[("CAT-RACE-TEST".to_string(), CodeKind::Normal)])
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(
            async move { store.redeem("CAT-RACE-TEST").await },
        ));
    }

    let mut transitions = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            transitions += 1;
        }
    }

    assert_eq!(transitions, 1, "exactly one caller may observe the transition");

    let record = store.find_by_code("CAT-RACE-TEST").await.unwrap().unwrap();
    assert!(record.used_at.is_some());
}

#[tokio::test]
async fn upsert_is_idempotent() {
    let store = setup_store().await;

    store.upsert("CAT-SEED-WXYZ", CodeKind::Admin).await.unwrap();
    let first = store.find_by_code("CAT-SEED-WXYZ").await.unwrap().unwrap();

    store.upsert("CAT-SEED-WXYZ", CodeKind::Admin).await.unwrap();
    let second = store.find_by_code("CAT-SEED-WXYZ").await.unwrap().unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.kind, CodeKind::Admin);
    assert!(second.used_at.is_none());

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total, 1);
}

#[tokio::test]
async fn upsert_resets_a_used_code() {
    let store = setup_store().await;
    store
        .batch_insert(&[("CAT-RSET-TEST".to_string(), CodeKind::Normal)])
        .await
        .unwrap();

    assert!(store.redeem("CAT-RSET-TEST").await.unwrap());
    let used = store.find_by_code("CAT-RSET-TEST").await.unwrap().unwrap();
    assert!(used.used_at.is_some());

    store.upsert("CAT-RSET-TEST", CodeKind::Normal).await.unwrap();
    let reset = store.find_by_code("CAT-RSET-TEST").await.unwrap().unwrap();
    assert!(reset.used_at.is_none());

    // Redeemable again after the administrative reset.
    assert!(store.redeem("CAT-RSET-TEST").await.unwrap());
}

#[tokio::test]
async fn admin_codes_are_immune_to_redemption() {
    let store = setup_store().await;
    store.upsert("CAT-ADMN-TEST", CodeKind::Admin).await.unwrap();

    assert!(!store.redeem("CAT-ADMN-TEST").await.unwrap());
    assert!(!store.redeem("CAT-ADMN-TEST").await.unwrap());

    let record = store.find_by_code("CAT-ADMN-TEST").await.unwrap().unwrap();
    assert!(record.used_at.is_none());
}

#[tokio::test]
async fn redeeming_missing_or_used_codes_is_a_noop() {
    let store = setup_store().await;

    assert!(!store.redeem("CAT-GONE-GONE").await.unwrap());

    store
        .batch_insert(&[("CAT-ONCE-ONLY".to_string(), CodeKind::Normal)])
        .await
        .unwrap();
    assert!(store.redeem("CAT-ONCE-ONLY").await.unwrap());
    assert!(!store.redeem("CAT-ONCE-ONLY").await.unwrap());
}

#[tokio::test]
async fn stats_reflect_seeded_state() {
    let store = setup_store().await;

    let normals: Vec<(String, CodeKind)> = (0..10)
        .map(|i| (format!("CAT-NRML-Q{:03}", i), CodeKind::Normal))
        .collect();
    store.batch_insert(&normals).await.unwrap();
    store.upsert("CAT-ADMN-AAAA", CodeKind::Admin).await.unwrap();
    store.upsert("CAT-ADMN-BBBB", CodeKind::Admin).await.unwrap();

    for (code, _) in normals.iter().take(3) {
        assert!(store.redeem(code).await.unwrap());
    }

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total, 12);
    assert_eq!(stats.used_count, 3);
    assert_eq!(stats.remaining_normal, 7);
    assert_eq!(stats.admin_count, 2);
    assert!((stats.usage_rate_percent - 30.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn stats_on_empty_store_avoid_division_by_zero() {
    let store = setup_store().await;

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.usage_rate_percent, 0.0);
}

#[tokio::test]
async fn lookup_is_exact_match_only() {
    let store = setup_store().await;
    store
        .batch_insert(&[("CAT-XKCD-PLOT".to_string(), CodeKind::Normal)])
        .await
        .unwrap();

    assert!(store.find_by_code("CAT-XKCD-PLOT").await.unwrap().is_some());
    // Normalization happens before the store; lowercase misses.
    assert!(store.find_by_code("cat-xkcd-plot").await.unwrap().is_none());
    assert!(store.find_by_code("CAT-XKCD-PLO").await.unwrap().is_none());
}
