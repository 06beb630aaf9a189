use actix_web::web;
use middleware::global::GlobalLimiter;

pub mod gate;

pub mod middleware {
    pub mod global;
}

pub mod routes {
    pub mod validate;
}

/// Server-wide requests-per-second guard, independent of per-key metering.
pub fn global_middleware(permits_per_second: u32) -> GlobalLimiter {
    GlobalLimiter::new(permits_per_second)
}

pub fn mount_validate() -> actix_web::Scope {
    web::scope("/validate").service(routes::validate::post_validate)
}
