use gazette_core::MaintenanceService;
use gazette_core::models::{MAINTENANCE_MODE_KEY, MAINTENANCE_TITLE_KEY};

use crate::integration::common::setup_test_db;

#[tokio::test]
async fn migration_seeds_maintenance_off() {
    let (db, _container) = setup_test_db().await;
    let repo = db.settings_repo();

    let value = repo.get(MAINTENANCE_MODE_KEY).await.unwrap();
    assert_eq!(value.as_deref(), Some("false"));
    assert_eq!(repo.get(MAINTENANCE_TITLE_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn set_upserts_single_row() {
    let (db, _container) = setup_test_db().await;
    let repo = db.settings_repo();

    repo.set("homepage_layout", "grid").await.unwrap();
    repo.set("homepage_layout", "list").await.unwrap();

    assert_eq!(
        repo.get("homepage_layout").await.unwrap().as_deref(),
        Some("list")
    );

    let rows = repo.list().await.unwrap();
    let matching = rows.iter().filter(|s| s.key == "homepage_layout").count();
    assert_eq!(matching, 1);
}

#[tokio::test]
async fn list_is_ordered_by_key() {
    let (db, _container) = setup_test_db().await;
    let repo = db.settings_repo();

    repo.set("zeta", "1").await.unwrap();
    repo.set("alpha", "2").await.unwrap();

    let keys: Vec<String> = repo.list().await.unwrap().into_iter().map(|s| s.key).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(keys.contains(&"alpha".to_string()));
}

#[tokio::test]
async fn toggling_maintenance_is_idempotent() {
    let (db, _container) = setup_test_db().await;
    let service = MaintenanceService::new(db.settings_repo());

    service.update(true, Some("Scheduled upgrade")).await.unwrap();
    service.update(true, None).await.unwrap();
    let settings = service.settings().await.unwrap();
    assert!(settings.enabled);
    assert_eq!(settings.title.as_deref(), Some("Scheduled upgrade"));

    service.update(false, None).await.unwrap();
    service.update(false, None).await.unwrap();
    assert_eq!(
        db.settings_repo()
            .get(MAINTENANCE_MODE_KEY)
            .await
            .unwrap()
            .as_deref(),
        Some("false")
    );
}
