use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
pub enum GenderDoc { MALE, FEMALE, OTHER }

#[derive(ToSchema)]
pub struct NewStudentDoc {
    pub name: String,
    pub email: String,
    pub gender: GenderDoc,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct StudentDoc {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub gender: GenderDoc,
    pub joke: String,
    pub bookingId: i32,
    pub createdAt: String,
}

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub error: String, pub detail: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::get,
        crate::routes::students::create,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            GenderDoc,
            NewStudentDoc,
            StudentDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
