use atlas_backend::config::db::{DbKind, RuntimeEnv};
use atlas_backend::db::require_db;
use atlas_backend::infra::state::build_state;
use atlas_backend::AppError;
use migration::count_applied_migrations;

#[tokio::test]
async fn memory_state_is_migrated_and_private() -> Result<(), Box<dyn std::error::Error>> {
    let first = build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .build()
        .await?;
    let second = build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .build()
        .await?;

    assert_eq!(count_applied_migrations(require_db(&first)?).await?, 1);

    crate::support::factory::seed_country(require_db(&first)?, "Turkey", "TR").await?;
    let page = atlas_backend::repos::countries::find_all(
        require_db(&second)?,
        &Default::default(),
    )
    .await?;
    assert_eq!(page.total_elements, 0, "memory databases must not share rows");

    Ok(())
}

#[tokio::test]
async fn memory_store_is_refused_in_prod() {
    let err = build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(DbKind::SqliteMemory)
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Config { .. }));
}
