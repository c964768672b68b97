pub mod fetcher;
pub mod http;
pub mod webdriver;

pub use fetcher::{PageFetcher, SearchUrl};
pub use http::HttpFetcher;
pub use webdriver::WebDriverFetcher;
