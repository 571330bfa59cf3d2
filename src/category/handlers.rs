use actix_web::{get, HttpResponse};

use super::models::{CategoriesResponse, Category};

/// GET /api/categories - List the closed set of spending categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "Available categories", body = CategoriesResponse)
    )
)]
#[get("/api/categories")]
pub async fn list_categories() -> HttpResponse {
    HttpResponse::Ok().json(CategoriesResponse {
        categories: Category::sorted_by_name(),
    })
}
