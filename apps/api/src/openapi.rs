use utoipa::OpenApi;

/// User registry API documentation
#[derive(OpenApi)]
#[openapi(
    components(schemas(
        domain_users::UserResponse,
        domain_users::CreateUser,
        domain_users::UpdateUser,
    )),
    tags((name = "users", description = "User registry operations"))
)]
pub struct ApiDoc;
