use actix_web::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE},
        StatusCode,
    },
    web,
    web::ServiceConfig,
};
use bytes::Bytes;
use mockall::predicate::eq;

use super::{helpers::get_request, mocks::MockImageStore};
use crate::{
    config::CacheSettings,
    image_source::{FetchedImage, ImageFetchError},
    routes::{health, ProxyImageRoute},
};

fn configure(store: MockImageStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(store))
            .app_data(web::Data::new(CacheSettings { max_age: 600 }))
            .service(health)
            .service(ProxyImageRoute::<MockImageStore>::new());
    }
}

#[actix_web::test]
async fn health_check() {
    let _ = env_logger::try_init();
    let res = get_request("/health", configure(MockImageStore::new())).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn proxies_image_with_headers() {
    let _ = env_logger::try_init();
    let mut store = MockImageStore::new();
    store.expect_fetch_image().with(eq("products/7/front.png")).times(1).returning(|_| {
        Ok(FetchedImage { content_type: Some("image/png".into()), bytes: Bytes::from_static(b"\x89PNG") })
    });
    let res = get_request("/api/images/products/7/front.png", configure(store)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers.get(CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(res.headers.get(CACHE_CONTROL).unwrap(), "public, max-age=600");
    assert_eq!(res.headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(res.body, b"\x89PNG");
}

#[actix_web::test]
async fn missing_content_type_defaults_to_jpeg() {
    let _ = env_logger::try_init();
    let mut store = MockImageStore::new();
    store
        .expect_fetch_image()
        .returning(|_| Ok(FetchedImage { content_type: None, bytes: Bytes::from_static(b"\xff\xd8") }));
    let res = get_request("/api/images/a.jpg", configure(store)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers.get(CONTENT_TYPE).unwrap(), "image/jpeg");
}

#[actix_web::test]
async fn upstream_failure_is_not_found() {
    let _ = env_logger::try_init();
    let mut store = MockImageStore::new();
    store.expect_fetch_image().returning(|_| Err(ImageFetchError::Unavailable(500)));
    let res = get_request("/api/images/gone.jpg", configure(store)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.text(), r#"{"error":"Image not found"}"#);
}

#[actix_web::test]
async fn transport_error_is_internal_error() {
    let _ = env_logger::try_init();
    let mut store = MockImageStore::new();
    store.expect_fetch_image().returning(|_| Err(ImageFetchError::Transport("connection refused".into())));
    let res = get_request("/api/images/a.jpg", configure(store)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text(), r#"{"error":"Internal Server Error"}"#);
}

#[actix_web::test]
async fn parent_segments_are_refused() {
    let _ = env_logger::try_init();
    let mut store = MockImageStore::new();
    store.expect_fetch_image().never();
    let res = get_request("/api/images/products/../secrets.txt", configure(store)).await;
    assert_ne!(res.status, StatusCode::OK);
}
