use crate::domain::product::ProductRecord;
use crate::services::sheets::{SpreadsheetError, SpreadsheetService};

pub const HEADER_ROW: [&str; 7] = [
    "Product Name",
    "Price",
    "Description",
    "Product URL",
    "Extraction Timestamp",
    "Page Number",
    "Product Rank",
];

/// Materializes extracted records as spreadsheet rows.
pub struct SheetUploader<S: SpreadsheetService> {
    service: S,
}

impl<S: SpreadsheetService> SheetUploader<S> {
    pub fn new(service: S) -> Self {
        SheetUploader { service }
    }

    /// Idempotent: an already-existing sheet is treated as success.
    pub async fn create_sheet(&self, name: &str) -> Result<(), SpreadsheetError> {
        match self.service.create_sheet(name).await {
            Ok(()) => {
                log::info!("Created new sheet: {}", name);
                Ok(())
            }
            Err(SpreadsheetError::SheetExists(_)) => {
                log::info!("Sheet {} already exists, will append to it", name);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn append_rows(
        &self,
        name: &str,
        records: &[ProductRecord],
    ) -> Result<(), SpreadsheetError> {
        if records.is_empty() {
            log::warn!("No data to append");
            return Ok(());
        }

        let mut rows: Vec<Vec<String>> =
            vec![HEADER_ROW.iter().map(|cell| cell.to_string()).collect()];
        rows.extend(records.iter().map(ProductRecord::to_row));

        let range = format!("{}!A1", name);
        let updated = self.service.append_values(&range, rows).await?;
        log::info!("Appended {} rows to {}", updated, name);

        Ok(())
    }
}
