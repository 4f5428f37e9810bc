use mockall::mock;

use crate::image_source::{FetchedImage, ImageFetchError, ImageSource};

mock! {
    pub ImageStore {}
    impl ImageSource for ImageStore {
        async fn fetch_image(&self, path: &str) -> Result<FetchedImage, ImageFetchError>;
    }
}
