use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

/// Locator understood by both the live driver and test stubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Class(&'static str),
    Tag(&'static str),
    XPath(&'static str),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(name) => write!(f, "class={}", name),
            Selector::Tag(name) => write!(f, "tag={}", name),
            Selector::XPath(path) => write!(f, "xpath={}", path),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Navigation failed: {0}")]
    Navigation(String),
    #[error("Timed out waiting for {0}")]
    WaitTimeout(String),
    #[error("Renderer failure: {0}")]
    Driver(String),
}

/// Browser-session capability the extractor runs against. Implemented by
/// the chromedriver-backed session and by fabricated pages in tests.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    type Element: RenderedElement;

    async fn navigate(&self, url: &str) -> Result<(), RenderError>;

    /// Blocks until an element matching `selector` is present, or fails
    /// once `timeout` elapses.
    async fn wait_for_selector(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), RenderError>;

    async fn find_all(&self, selector: &Selector) -> Result<Vec<Self::Element>, RenderError>;

    /// Shuts the session down. Consumes the renderer so it can only happen once.
    async fn release(self) -> Result<(), RenderError>;
}

#[async_trait]
pub trait RenderedElement: Sized + Send + Sync {
    async fn find(&self, selector: &Selector) -> Result<Self, RenderError>;

    async fn attr(&self, name: &str) -> Result<Option<String>, RenderError>;

    async fn text(&self) -> Result<String, RenderError>;

    async fn is_enabled(&self) -> Result<bool, RenderError>;
}
