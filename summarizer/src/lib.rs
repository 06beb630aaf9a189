use actix_web::web;

pub mod routes {
    pub mod summarize;
}

pub mod service {
    pub mod chain;
    pub mod github;
}

mod dtos {
    pub(crate) mod summarize;
}

pub fn mount_summarizer() -> actix_web::Scope {
    web::scope("/summarize").service(routes::summarize::post_summarize)
}
