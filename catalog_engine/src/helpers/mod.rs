mod image_urls;
mod lenient;
mod pricing;
mod uploads;

pub use image_urls::{ImageResolver, DEFAULT_IMAGE_BASE_URL};
pub use lenient::lenient;
pub use pricing::{discount_percent, lowest_price};
pub use uploads::{is_supported_upload, SUPPORTED_MIME_TYPES};
