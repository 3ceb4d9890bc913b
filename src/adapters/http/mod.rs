pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use errors::ApiError;
pub use handlers::health_handler;
pub use middleware::{AuthMiddleware, AuthenticatedUser, RequestId, RequestIdMiddleware};
pub use routes::{AuthRouteDependencies, configure_auth_routes};
