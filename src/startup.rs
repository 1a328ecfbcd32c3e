use std::path::Path;

use chrono::Local;

use crate::configuration::{ConfigurationError, Settings};
use crate::services::droid::Droid;
use crate::services::product_scraper::{ExtractionError, ProductExtractor};
use crate::services::renderer::PageRenderer;
use crate::services::sheets::{
    ServiceAccountKey, SheetsClient, SpreadsheetError, SpreadsheetService,
};
use crate::services::uploader::SheetUploader;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("Upload failed: {0}")]
    Upload(#[from] SpreadsheetError),
}

#[derive(Debug)]
pub struct RunReport {
    pub products_scraped: usize,
    pub sheet_name: Option<String>,
}

pub async fn run(settings: Settings) -> Result<RunReport, PipelineError> {
    // Credentials are validated before anything touches the network.
    let credentials =
        ServiceAccountKey::from_file(Path::new(&settings.spreadsheet.credentials_path))?;

    let droid = Droid::new(&settings.scrape)
        .await
        .map_err(ExtractionError::from)?;
    let sheets = SheetsClient::new(credentials, settings.spreadsheet.spreadsheet_id.clone());

    run_pipeline(droid, sheets, &settings).await
}

pub async fn run_pipeline<R, S>(
    renderer: R,
    service: S,
    settings: &Settings,
) -> Result<RunReport, PipelineError>
where
    R: PageRenderer,
    S: SpreadsheetService,
{
    /*
     1. Scrape products until the target count or the last page
     2. Bail out quietly when nothing was scraped
     3. Create a timestamped sheet and append header + records
     4. Log the run summary
    */
    let target_count = settings.scrape.target_count;
    log::info!("Starting scraper for {} products", target_count);

    let extractor = ProductExtractor::new(renderer, &settings.scrape);
    let products = extractor.extract(target_count).await?;

    if products.is_empty() {
        log::error!("No products scraped");
        return Ok(RunReport {
            products_scraped: 0,
            sheet_name: None,
        });
    }
    log::info!("Successfully scraped {} products", products.len());

    let uploader = SheetUploader::new(service);
    let sheet_name = format!("Laptop_Data_{}", Local::now().format("%Y%m%d_%H%M%S"));
    uploader.create_sheet(&sheet_name).await?;

    log::info!("Uploading data to sheet: {}", sheet_name);
    uploader.append_rows(&sheet_name, &products).await?;

    log::info!("{}", "=".repeat(50));
    log::info!("SCRAPING COMPLETED SUCCESSFULLY");
    log::info!("Products scraped: {}", products.len());
    log::info!("Sheet name: {}", sheet_name);
    log::info!("Spreadsheet ID: {}", settings.spreadsheet.spreadsheet_id);
    log::info!("{}", "=".repeat(50));

    Ok(RunReport {
        products_scraped: products.len(),
        sheet_name: Some(sheet_name),
    })
}
