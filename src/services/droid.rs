use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::{
    error::WebDriverError, extensions::query::ElementQueryable, By, ChromiumLikeCapabilities,
    DesiredCapabilities, WebDriver, WebElement,
};

use crate::configuration::ScrapeSettings;
use crate::services::renderer::{PageRenderer, RenderError, RenderedElement, Selector};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Chromedriver-backed browser session.
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(settings: &ScrapeSettings) -> Result<Self, RenderError> {
        let mut caps = DesiredCapabilities::chrome();
        if settings.headless {
            caps.add_arg("--headless")?;
        }
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;

        let driver = WebDriver::new(&settings.webdriver_url, caps).await?;
        driver.maximize_window().await?;
        log::info!("Scraper initialized");

        Ok(Droid { driver })
    }
}

fn by(selector: &Selector) -> By {
    match *selector {
        Selector::Class(name) => By::ClassName(name),
        Selector::Tag(name) => By::Tag(name),
        Selector::XPath(path) => By::XPath(path),
    }
}

impl From<WebDriverError> for RenderError {
    fn from(e: WebDriverError) -> Self {
        RenderError::Driver(e.to_string())
    }
}

#[async_trait]
impl PageRenderer for Droid {
    type Element = WebElement;

    async fn navigate(&self, url: &str) -> Result<(), RenderError> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))
    }

    async fn wait_for_selector(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), RenderError> {
        self.driver
            .query(by(selector))
            .wait(timeout, WAIT_POLL_INTERVAL)
            .first()
            .await
            .map(|_| ())
            .map_err(|_| RenderError::WaitTimeout(selector.to_string()))
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<WebElement>, RenderError> {
        Ok(self.driver.find_all(by(selector)).await?)
    }

    async fn release(self) -> Result<(), RenderError> {
        Ok(self.driver.quit().await?)
    }
}

#[async_trait]
impl RenderedElement for WebElement {
    async fn find(&self, selector: &Selector) -> Result<WebElement, RenderError> {
        Ok(WebElement::find(self, by(selector)).await?)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, RenderError> {
        Ok(WebElement::attr(self, name).await?)
    }

    async fn text(&self) -> Result<String, RenderError> {
        Ok(WebElement::text(self).await?)
    }

    async fn is_enabled(&self) -> Result<bool, RenderError> {
        Ok(WebElement::is_enabled(self).await?)
    }
}
