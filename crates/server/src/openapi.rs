use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ServiceInputDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(ToSchema)]
pub struct ServiceRecordDoc {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct FieldErrorDoc {
    pub msg: String,
    pub param: String,
    pub path: String,
    pub location: String,
}

#[derive(ToSchema)]
pub struct ValidationErrorsDoc { pub errors: Vec<FieldErrorDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::services::create,
        crate::routes::services::list,
        crate::routes::services::update,
        crate::routes::services::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceInputDoc,
            ServiceRecordDoc,
            MessageDoc,
            FieldErrorDoc,
            ValidationErrorsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "services", description = "Service registry CRUD")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_service_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/services"));
        assert!(paths.iter().any(|p| p.as_str() == "/services/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }
}
