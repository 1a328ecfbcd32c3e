use std::time::Duration;

use chrono::Local;
use url::Url;

use crate::configuration::ScrapeSettings;
use crate::domain::product::{truncate_description, FieldOutcome, ProductRecord};
use crate::services::renderer::{PageRenderer, RenderError, RenderedElement, Selector};

pub const ITEM_CONTAINER: Selector = Selector::Class("thumbnail");
pub const PRODUCT_TITLE: Selector = Selector::Class("title");
pub const PRODUCT_PRICE: Selector = Selector::Class("price");
pub const PRODUCT_DESCRIPTION: Selector = Selector::Class("description");
pub const PRODUCT_LINK: Selector = Selector::Tag("a");
pub const NEXT_PAGE: Selector =
    Selector::XPath("//a[contains(@class, 'next') or contains(text(), 'Next')]");

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Critical scraping error: {0}")]
    Renderer(#[from] RenderError),
    #[error("Invalid page url: {0}")]
    Url(#[from] url::ParseError),
}

/// Walks the paginated listing and collects product records in order.
pub struct ProductExtractor<R: PageRenderer> {
    renderer: R,
    base_url: String,
    wait_timeout: Duration,
    settle_delay: Duration,
}

impl<R: PageRenderer> ProductExtractor<R> {
    pub fn new(renderer: R, settings: &ScrapeSettings) -> Self {
        ProductExtractor {
            renderer,
            base_url: settings.base_url.clone(),
            wait_timeout: Duration::from_secs(settings.wait_timeout_secs),
            settle_delay: Duration::from_millis(settings.settle_delay_ms),
        }
    }

    /// The renderer is released on every exit path, success or not.
    pub async fn extract(
        self,
        target_count: usize,
    ) -> Result<Vec<ProductRecord>, ExtractionError> {
        let ProductExtractor {
            renderer,
            base_url,
            wait_timeout,
            settle_delay,
        } = self;

        let outcome = crawl(&renderer, &base_url, wait_timeout, settle_delay, target_count).await;
        if let Err(e) = renderer.release().await {
            log::warn!("Failed to shut down renderer: {}", e);
        }

        let mut products = outcome?;
        // Last page may have overshot the target.
        products.truncate(target_count);
        log::info!("Scraping completed. Extracted {} products", products.len());
        Ok(products)
    }
}

async fn crawl<R: PageRenderer>(
    renderer: &R,
    base_url: &str,
    wait_timeout: Duration,
    settle_delay: Duration,
    target_count: usize,
) -> Result<Vec<ProductRecord>, ExtractionError> {
    let mut products: Vec<ProductRecord> = Vec::new();
    let mut page: u32 = 1;

    while products.len() < target_count {
        let url = page_url(base_url, page)?;
        log::info!("Scraping page {}: {}", page, url);
        renderer.navigate(&url).await?;

        // Any wait failure is fatal, first page or not. An empty container
        // list after a successful wait is handled below as end-of-data.
        renderer.wait_for_selector(&ITEM_CONTAINER, wait_timeout).await?;
        tokio::time::sleep(settle_delay).await;

        let items = renderer.find_all(&ITEM_CONTAINER).await?;
        log::info!("Found {} products on page {}", items.len(), page);

        if items.is_empty() {
            log::warn!("No products found on page {}", page);
            break;
        }

        for item in &items {
            if products.len() >= target_count {
                break;
            }

            let rank = products.len() + 1;
            match extract_item(item, page, rank).await {
                Ok(record) => products.push(record),
                Err(e) => log::warn!("Error extracting product {}: {}", rank, e),
            }
        }

        match renderer.find_all(&NEXT_PAGE).await {
            Ok(controls) => match controls.into_iter().next() {
                Some(control) => match control.is_enabled().await {
                    Ok(true) => page += 1,
                    Ok(false) => {
                        log::info!("No more pages available");
                        break;
                    }
                    Err(_) => {
                        log::info!("No pagination found - all products on single page");
                        break;
                    }
                },
                None => {
                    log::info!("No pagination found - all products on single page");
                    break;
                }
            },
            Err(_) => {
                log::info!("No pagination found - all products on single page");
                break;
            }
        }
    }

    Ok(products)
}

async fn extract_item<E: RenderedElement>(
    item: &E,
    page_number: u32,
    rank: usize,
) -> Result<ProductRecord, RenderError> {
    let title = item.find(&PRODUCT_TITLE).await?;
    let product_name = match title.attr("title").await? {
        Some(name) if !name.is_empty() => name,
        _ => title.text().await?,
    };

    let price = item.find(&PRODUCT_PRICE).await?.text().await?;

    let description = match item.find(&PRODUCT_DESCRIPTION).await {
        Ok(element) => match element.text().await {
            Ok(text) => FieldOutcome::Present(text),
            Err(_) => FieldOutcome::Missing,
        },
        Err(_) => FieldOutcome::Missing,
    };

    let product_url = match item.find(&PRODUCT_LINK).await {
        Ok(element) => match element.attr("href").await {
            Ok(Some(href)) => FieldOutcome::Present(href),
            Ok(None) | Err(_) => FieldOutcome::Missing,
        },
        Err(_) => FieldOutcome::Missing,
    };

    Ok(ProductRecord {
        product_name,
        price,
        description: truncate_description(&description.or_na()),
        product_url: product_url.or_na(),
        extraction_timestamp: Local::now().to_rfc3339(),
        page_number,
        product_rank: rank,
    })
}

fn page_url(base_url: &str, page: u32) -> Result<String, url::ParseError> {
    match page {
        1 => Ok(base_url.to_string()),
        _ => {
            let url = Url::parse_with_params(base_url, [("page", page.to_string())])?;
            Ok(url.into())
        }
    }
}
