use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::{Country, CountryDetails, CountrySort};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::routes::pagination::{PageQuery, PageResponse};
use crate::services::CountryService;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryResponse {
    pub id: i64,
    pub name: Option<String>,
    pub code: Option<String>,
}

impl From<Country> for CountryResponse {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
            code: country.code,
        }
    }
}

/// Body for create and update. Missing fields are null.
#[derive(Debug, Default, Deserialize)]
pub struct CountryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl From<CountryRequest> for CountryDetails {
    fn from(req: CountryRequest) -> Self {
        Self {
            name: req.name,
            code: req.code,
        }
    }
}

async fn create_country(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CountryRequest>,
) -> Result<HttpResponse, AppError> {
    let details = CountryDetails::from(body.into_inner());

    let country = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            CountryService::new()
                .create(txn, details)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(CountryResponse::from(country)))
}

async fn update_country(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CountryRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let details = CountryDetails::from(body.into_inner());

    let country = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            CountryService::new()
                .update(txn, id, details)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CountryResponse::from(country)))
}

async fn delete_country(
    req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            CountryService::new()
                .delete(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn list_countries(
    req: HttpRequest,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let spec = query.into_inner().into_spec::<CountrySort>()?;

    let page = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            CountryService::new()
                .find_all(txn, &spec)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PageResponse::from_page(page, CountryResponse::from)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_countries))
            .route(web::post().to(create_country)),
    )
    .service(
        web::resource("/{id}")
            .route(web::put().to(update_country))
            .route(web::delete().to(delete_country)),
    );
}
