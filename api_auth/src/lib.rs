use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}

/// Middleware enforcing an authenticated dashboard session.
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}
