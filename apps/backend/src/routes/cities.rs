use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::{City, CityDetails, CitySort};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::routes::countries::CountryResponse;
use crate::routes::pagination::{PageQuery, PageResponse};
use crate::services::CityService;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CityResponse {
    pub id: i64,
    pub name: Option<String>,
    pub country: Option<CountryResponse>,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            country: city.country.map(CountryResponse::from),
        }
    }
}

/// Only the id of the referenced country is read; other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CountryRef {
    pub id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CityRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<CountryRef>,
}

impl From<CityRequest> for CityDetails {
    fn from(req: CityRequest) -> Self {
        Self {
            name: req.name,
            country_id: req.country.map(|c| c.id),
        }
    }
}

async fn create_city(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CityRequest>,
) -> Result<HttpResponse, AppError> {
    let details = CityDetails::from(body.into_inner());

    let city = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            CityService::new()
                .create(txn, details)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(CityResponse::from(city)))
}

async fn update_city(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CityRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let details = CityDetails::from(body.into_inner());

    let city = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            CityService::new()
                .update(txn, id, details)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CityResponse::from(city)))
}

async fn delete_city(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            CityService::new()
                .delete(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn list_cities(
    req: HttpRequest,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let spec = query.into_inner().into_spec::<CitySort>()?;

    let page = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            CityService::new()
                .find_all(txn, &spec)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PageResponse::from_page(page, CityResponse::from)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_cities))
            .route(web::post().to(create_city)),
    )
    .service(
        web::resource("/{id}")
            .route(web::put().to(update_city))
            .route(web::delete().to(delete_city)),
    );
}
