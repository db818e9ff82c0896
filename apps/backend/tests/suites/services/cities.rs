use atlas_backend::db::require_db;
use atlas_backend::domain::{CityDetails, CitySort, PageSpec};
use atlas_backend::errors::domain::{DomainError, NotFoundKind};
use atlas_backend::services::CityService;
use sea_orm::TransactionTrait;

use crate::support::build_test_state;
use crate::support::factory::{seed_atlas, seed_country};

#[tokio::test]
async fn find_all_lists_cities_in_insertion_order() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;
    atlas_backend::repos::cities::delete_all(&txn).await?;

    let atlas = seed_atlas(&txn).await?;
    let page = CityService::new()
        .find_all(&txn, &PageSpec::<CitySort>::default())
        .await?;

    let names: Vec<_> = page
        .content
        .iter()
        .filter_map(|c| c.name.as_deref())
        .collect();
    assert_eq!(names, ["Istanbul", "Ankara", "Izmir"]);
    assert!(page
        .content
        .iter()
        .all(|c| c.country.as_ref() == Some(&atlas.turkey)));

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn update_overwrites_name_and_keeps_country() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;
    let service = CityService::new();

    let atlas = seed_atlas(&txn).await?;
    let updated = service
        .update(
            &txn,
            atlas.istanbul.id,
            CityDetails::new("Ankara", Some(atlas.turkey.id)),
        )
        .await?;

    assert_eq!(updated.id, atlas.istanbul.id);
    assert_eq!(updated.name.as_deref(), Some("Ankara"));
    assert_eq!(updated.country, Some(atlas.turkey.clone()));

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn update_can_move_city_between_countries() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;

    let atlas = seed_atlas(&txn).await?;
    let greece = seed_country(&txn, "Greece", "GR").await?;
    let moved = CityService::new()
        .update(&txn, atlas.izmir.id, CityDetails::new("Smyrna", Some(greece.id)))
        .await?;
    assert_eq!(moved.country_id(), Some(greece.id));

    let detached = CityService::new()
        .update(
            &txn,
            atlas.izmir.id,
            CityDetails {
                name: Some("Smyrna".into()),
                country_id: None,
            },
        )
        .await?;
    assert!(detached.country.is_none());

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn update_unknown_city_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;

    let err = CityService::new()
        .update(&txn, 44, CityDetails::new("Ankara", None))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::NotFound(NotFoundKind::City, "City not found with id 44".to_string())
    );
    assert_eq!(err.to_string(), "City not found with id 44");

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn delete_then_absent() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let txn = require_db(&state)?.begin().await?;
    let service = CityService::new();

    let atlas = seed_atlas(&txn).await?;
    service.delete(&txn, atlas.ankara.id).await?;

    let page = service
        .find_all(&txn, &PageSpec::<CitySort>::default())
        .await?;
    assert!(page.content.iter().all(|c| c.id != atlas.ankara.id));
    assert!(page.content.iter().any(|c| c.id == atlas.izmir.id));

    // Second delete of the same id is a no-op
    service.delete(&txn, atlas.ankara.id).await?;

    txn.rollback().await?;
    Ok(())
}
