pub mod droid;
pub mod product_scraper;
pub mod renderer;
pub mod sheets;
pub mod uploader;

pub use droid::*;
pub use product_scraper::*;
pub use renderer::*;
pub use sheets::*;
pub use uploader::*;
