use axum::Router;
use domain_users::{handlers, MongoUserRepository, UserService};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let service = UserService::new(repository);
    handlers::router(service)
}
