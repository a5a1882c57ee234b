mod docs;
mod home;
pub mod v1;

use aide::axum::ApiRouter;

use crate::types::Environment;

/// Creates the router with all handler routes
pub fn handler(environment: &Environment) -> ApiRouter {
    let router = ApiRouter::new()
        .merge(home::handler())
        .nest("/api/v1", v1::handler());

    if environment.show_api_docs() {
        router.merge(docs::handler())
    } else {
        router
    }
}
