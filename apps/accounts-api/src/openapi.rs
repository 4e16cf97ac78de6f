//! OpenAPI documentation configuration

use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for Accounts API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounts API",
        version = "0.1.0",
        description = "User registration, credential checks and user management backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:3333", description = "Local development server")
    ),
    modifiers(&DomainDocs)
)]
pub struct ApiDoc;

/// Domain routes are mounted at the root, so their documents merge unprefixed.
struct DomainDocs;

impl Modify for DomainDocs {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        openapi.merge(domain_users::ApiDoc::openapi());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_paths_are_documented_at_root() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/register",
            "/auth",
            "/users",
            "/users/details/{id}",
            "/users/edit/{id}",
            "/users/delete/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
