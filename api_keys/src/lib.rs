use actix_web::web;

pub mod routes {
    pub mod key;
}

mod service {
    pub(crate) mod key;
}
mod dtos {
    pub(crate) mod key;
}

pub fn mount_keys() -> actix_web::Scope {
    web::scope("/keys")
        .service(routes::key::get_keys)
        .service(routes::key::post_create_key)
        .service(routes::key::get_key)
        .service(routes::key::patch_rename_key)
        .service(routes::key::delete_key)
}
