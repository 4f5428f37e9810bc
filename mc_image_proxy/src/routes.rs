//! Request handler definitions
//!
//! Define each route and its handler here. Handlers must not block: image fetches are awaited so that the worker can
//! serve other requests in the meantime.
use actix_web::{
    get,
    http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE},
    web,
    HttpResponse,
    Responder,
};
use log::*;

use crate::{
    config::CacheSettings,
    errors::ServerError,
    image_source::{ImageFetchError, ImageSource},
};

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Images  ----------------------------------------------------
route!(proxy_image => Get "/api/images/{path:.*}" impl ImageSource);
pub async fn proxy_image<S: ImageSource>(
    path: web::Path<String>,
    source: web::Data<S>,
    cache: web::Data<CacheSettings>,
) -> Result<HttpResponse, ServerError> {
    let path = path.into_inner();
    check_image_path(&path)?;
    let image = source.fetch_image(&path).await.map_err(|e| match e {
        ImageFetchError::Unavailable(status) => {
            debug!("🖼️ {path} is not available upstream ({status})");
            ServerError::ImageNotFound
        },
        ImageFetchError::Transport(msg) => {
            error!("🖼️ Error proxying image {path}. {msg}");
            ServerError::UpstreamFailure(msg)
        },
    })?;
    let content_type = image.content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, content_type))
        .insert_header((CACHE_CONTROL, cache.cache_control()))
        .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .body(image.bytes))
}

fn check_image_path(path: &str) -> Result<(), ServerError> {
    if path.trim_matches('/').is_empty() {
        return Err(ServerError::InvalidRequestPath("No image path was given".into()));
    }
    if path.split('/').any(|segment| segment == "..") {
        warn!("🖼️ Refusing image path with parent segments: {path}");
        return Err(ServerError::InvalidRequestPath(path.to_string()));
    }
    Ok(())
}
