//! Service-level tests against a real SQLite file.
//!
//! Covers the ledger guards under concurrency, the seeded dashboard figures
//! and account management without going through HTTP.

use tonerdesk::config::Config;
use tonerdesk::db::{CreateOutcome, NewAccount};
use tonerdesk::domain::{AttentionKind, SYSTEM_ACTOR, StockId};
use tonerdesk::services::{ActionResult, AuthError, StockError};
use tonerdesk::state::SharedState;

async fn spawn_state() -> SharedState {
    let db_path =
        std::env::temp_dir().join(format!("tonerdesk-service-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    SharedState::new(config)
        .await
        .expect("Failed to create shared state")
}

#[tokio::test]
async fn test_concurrent_decrements_never_go_negative() {
    let state = spawn_state().await;
    let id = StockId::new(1);

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = state.stock_service.clone();
        handles.push(tokio::spawn(async move {
            service.decrement(id, &format!("worker-{i}")).await
        }));
    }

    let mut applied = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_applied() {
            applied += 1;
        }
    }

    assert_eq!(applied, 1);
    let record = state.stock_service.get(id).await.unwrap();
    assert_eq!(record.quantity, 0);
    assert_eq!(state.stock_service.history(50).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_seeded_dashboard() {
    let state = spawn_state().await;
    let summary = state.stock_service.dashboard().await.unwrap();

    assert_eq!(summary.record_count, 18);
    assert_eq!(summary.total_units, 16);
    assert_eq!(summary.ok_count, 14);
    assert_eq!(summary.awaiting_count, 2);
    assert_eq!(summary.zeroed_count, 2);
    assert_eq!(summary.percent_ok, 78);
    assert_eq!(summary.percent_problem, 11);

    let first = &summary.attention[0];
    assert_eq!(first.kind, AttentionKind::OutOfStock);
    assert_eq!(first.sector, "-");

    let lowest = &summary.ink_levels[0];
    assert_eq!(lowest.percent, 3);
}

#[tokio::test]
async fn test_receive_from_the_terminal_is_attributed_to_system() {
    let state = spawn_state().await;
    let id = StockId::new(5);

    let result = state
        .stock_service
        .receive(id, SYSTEM_ACTOR)
        .await
        .unwrap();

    let ActionResult::Applied(entry) = result else {
        panic!("receive should always apply");
    };
    assert_eq!(entry.actor, "System");
    assert_eq!(entry.action, "Receipt");
    assert_eq!(entry.detail, "Toner received +1 - MTR");

    let record = state.stock_service.get(id).await.unwrap();
    assert_eq!(record.quantity, 1);
    assert!(!record.awaiting);
}

#[tokio::test]
async fn test_unknown_record() {
    let state = spawn_state().await;

    let err = state
        .stock_service
        .increment(StockId::new(404), "tester")
        .await
        .unwrap_err();
    assert!(matches!(err, StockError::NotFound(id) if id.value() == 404));
    assert!(state.stock_service.history(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_is_newest_first_and_clearable() {
    let state = spawn_state().await;
    let id = StockId::new(18);

    state.stock_service.increment(id, "a").await.unwrap();
    state
        .stock_service
        .set_note(id, "b", "  keep for audit  ")
        .await
        .unwrap();
    state
        .stock_service
        .set_ink_level(id, "c", Some("abc"))
        .await
        .unwrap();

    let history = state.stock_service.history(10).await.unwrap();
    let details: Vec<&str> = history.iter().map(|e| e.detail.as_str()).collect();
    assert_eq!(
        details,
        vec![
            "Ink level cleared - Pecém",
            "Note updated - Pecém: \"keep for audit\"",
            "+1 unit - Pecém",
        ]
    );

    assert_eq!(state.stock_service.history(2).await.unwrap().len(), 2);
    assert_eq!(state.stock_service.clear_history().await.unwrap(), 3);
    assert!(state.stock_service.history(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_accounts() {
    let state = spawn_state().await;
    let auth = &state.auth_service;

    let err = auth.login("admin", "nope").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    let err = auth.login("ghost", "admin123").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    let admin = auth.login(" admin ", "admin123").await.unwrap();
    assert!(admin.is_admin);

    let new_account = NewAccount {
        username: "ana".to_string(),
        display_name: "Ana Lima".to_string(),
        password: "s3cret!".to_string(),
        is_admin: false,
    };
    let CreateOutcome::Created(ana) = auth.create_account(new_account.clone()).await.unwrap()
    else {
        panic!("first create should succeed");
    };
    assert_eq!(
        auth.create_account(new_account).await.unwrap(),
        CreateOutcome::DuplicateUsername
    );

    let names: Vec<String> = auth
        .list_accounts()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.display_name)
        .collect();
    assert_eq!(names, vec!["Administrator", "Ana Lima", "IT Team"]);

    let err = auth.delete_account(&admin, admin.id).await.unwrap_err();
    assert!(matches!(err, AuthError::Forbidden(_)));

    let deleted = auth.delete_account(&admin, ana.id).await.unwrap();
    assert_eq!(deleted.username, "ana");
    assert!(matches!(
        auth.delete_account(&admin, ana.id).await.unwrap_err(),
        AuthError::NotFound(_)
    ));
}
