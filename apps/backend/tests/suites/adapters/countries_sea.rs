use atlas_backend::adapters::countries_sea::{self, CountryCreate, CountryUpdate};
use atlas_backend::db::require_db;
use atlas_backend::domain::{CountrySort, PageSpec, SortOrder};
use sea_orm::{DbErr, TransactionTrait};

use crate::support::build_test_state;

fn create_dto(name: &str, code: &str) -> CountryCreate {
    CountryCreate {
        name: Some(name.to_string()),
        code: Some(code.to_string()),
    }
}

#[tokio::test]
async fn create_then_find_by_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;

    let created = countries_sea::create(&txn, create_dto("Turkey", "TR")).await?;
    assert!(created.id > 0);
    assert_eq!(created.name.as_deref(), Some("Turkey"));
    assert_eq!(created.code.as_deref(), Some("TR"));

    let found = countries_sea::find_by_id(&txn, created.id).await?;
    assert_eq!(found, Some(created.clone()));

    let missing = countries_sea::find_by_id(&txn, created.id + 1000).await?;
    assert!(missing.is_none());

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn create_accepts_null_fields() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;

    let created = countries_sea::create(&txn, CountryCreate::default()).await?;
    assert!(created.name.is_none());
    assert!(created.code.is_none());

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn update_overwrites_every_field() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;

    let created = countries_sea::create(&txn, create_dto("Turkey", "TR")).await?;
    let updated = countries_sea::update(
        &txn,
        CountryUpdate {
            id: created.id,
            name: Some("Türkiye".to_string()),
            code: None,
        },
    )
    .await?;

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name.as_deref(), Some("Türkiye"));
    assert!(updated.code.is_none());

    let reloaded = countries_sea::find_by_id(&txn, created.id).await?;
    assert_eq!(reloaded, Some(updated));

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn update_missing_row_is_not_updated() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;

    let err = countries_sea::update(
        &txn,
        CountryUpdate {
            id: 9_999,
            name: Some("Atlantis".to_string()),
            code: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DbErr::RecordNotUpdated), "got {err:?}");

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn delete_reports_rows_affected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;

    let created = countries_sea::create(&txn, create_dto("Turkey", "TR")).await?;
    assert_eq!(countries_sea::delete_by_id(&txn, created.id).await?, 1);
    assert_eq!(countries_sea::delete_by_id(&txn, created.id).await?, 0);
    assert!(countries_sea::find_by_id(&txn, created.id).await?.is_none());

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn delete_all_empties_table() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;

    countries_sea::create(&txn, create_dto("Turkey", "TR")).await?;
    countries_sea::create(&txn, create_dto("Greece", "GR")).await?;
    assert!(countries_sea::delete_all(&txn).await? >= 2);

    let (rows, total) = countries_sea::find_page(&txn, &PageSpec::default()).await?;
    assert!(rows.is_empty());
    assert_eq!(total, 0);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn find_page_sorts_and_slices() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;
    countries_sea::delete_all(&txn).await?;

    for (name, code) in [("Turkey", "TR"), ("Greece", "GR"), ("Bulgaria", "BG")] {
        countries_sea::create(&txn, create_dto(name, code)).await?;
    }

    let by_name = PageSpec::first(2).with_sort(SortOrder::parse("name")?);
    let (rows, total) = countries_sea::find_page(&txn, &by_name).await?;
    assert_eq!(total, 3);
    let names: Vec<_> = rows.iter().filter_map(|c| c.name.as_deref()).collect();
    assert_eq!(names, ["Bulgaria", "Greece"]);

    let second = PageSpec::<CountrySort>::new(Some(1), Some(2), Some(SortOrder::parse("name")?));
    let (rows, _) = countries_sea::find_page(&txn, &second).await?;
    let names: Vec<_> = rows.iter().filter_map(|c| c.name.as_deref()).collect();
    assert_eq!(names, ["Turkey"]);

    let by_code_desc = PageSpec::first(10).with_sort(SortOrder::parse("code,desc")?);
    let (rows, _) = countries_sea::find_page(&txn, &by_code_desc).await?;
    let codes: Vec<_> = rows.iter().filter_map(|c| c.code.as_deref()).collect();
    assert_eq!(codes, ["TR", "GR", "BG"]);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn unsorted_page_follows_insertion_order() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;
    countries_sea::delete_all(&txn).await?;

    let first = countries_sea::create(&txn, create_dto("Turkey", "TR")).await?;
    let second = countries_sea::create(&txn, create_dto("Greece", "GR")).await?;

    let (rows, _) = countries_sea::find_page(&txn, &PageSpec::<CountrySort>::default()).await?;
    let ids: Vec<_> = rows.iter().map(|c| c.id).collect();
    assert_eq!(ids, [first.id, second.id]);

    txn.rollback().await?;
    Ok(())
}
