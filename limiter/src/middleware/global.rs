use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::error::AppError;
use governor::{
    Quota, RateLimiter,
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
};
use std::{future::Future, num::NonZeroU32, pin::Pin, rc::Rc, sync::Arc};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, QuantaClock>;

const DEFAULT_SHED_MESSAGE: &str = "Server overloaded. Please try again later.";

/// Caps the total request rate of the process. This is a coarse overload
/// guard for every request coming in, unrelated to the per-key usage
/// accounting done by the gate; shed requests get a 429 without ever
/// reaching a handler.
pub struct GlobalLimiter {
    limiter: Arc<DirectLimiter>,
    message: Arc<str>,
}

impl GlobalLimiter {
    pub fn new(permits_per_sec: u32) -> Self {
        Self::with_message(permits_per_sec, DEFAULT_SHED_MESSAGE)
    }

    pub fn with_message(permits_per_sec: u32, message: &str) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(permits_per_sec).expect("permits per second must be non-zero"),
        );
        GlobalLimiter {
            limiter: Arc::new(RateLimiter::direct(quota)),
            message: Arc::from(message),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for GlobalLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = GlobalLimiterService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(GlobalLimiterService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            message: self.message.clone(),
        }))
    }
}

pub struct GlobalLimiterService<S> {
    service: Rc<S>,
    limiter: Arc<DirectLimiter>,
    message: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for GlobalLimiterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);
        let limiter = self.limiter.clone();
        let message = self.message.clone();
        Box::pin(async move {
            if limiter.check().is_ok() {
                srv.call(req).await.map(|res| res.map_into_boxed_body())
            } else {
                log::warn!(
                    "Shedding {} {}: global request budget exhausted",
                    req.method(),
                    req.path()
                );
                Ok(req.error_response(AppError::TooManyRequests(message.to_string())))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    #[actix_web::test]
    async fn requests_beyond_the_budget_are_shed_with_429() {
        let app = test::init_service(
            App::new()
                .wrap(GlobalLimiter::new(1))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let first =
            test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(first.status(), StatusCode::OK);

        // the budget of one permit per second is spent; an immediate
        // second request must be shed
        let second =
            test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
