use actix_web::{
    body::MessageBody,
    http::{header::HeaderMap, StatusCode},
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use log::debug;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn get_request<F>(path: &str, configure: F) -> TestResponse
where F: FnOnce(&mut ServiceConfig) {
    let req = TestRequest::get().uri(path).to_request();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request to {path}");
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let headers = res.headers().clone();
    let body = res.into_body().try_into_bytes().map(|b| b.to_vec()).unwrap_or_default();
    TestResponse { status, headers, body }
}
