use serde::Serialize;

pub const MISSING_FIELD: &str = "N/A";

const DESCRIPTION_LIMIT: usize = 100;

/// One scraped listing. Never mutated after extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub price: String,
    pub description: String,
    pub product_url: String,
    pub extraction_timestamp: String,
    pub page_number: u32,
    pub product_rank: usize,
}

impl ProductRecord {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.product_name.clone(),
            self.price.clone(),
            self.description.clone(),
            self.product_url.clone(),
            self.extraction_timestamp.clone(),
            self.page_number.to_string(),
            self.product_rank.to_string(),
        ]
    }
}

/// Outcome of extracting an optional field. A failed lookup substitutes a
/// default instead of failing the item.
#[derive(Debug, PartialEq)]
pub enum FieldOutcome {
    Present(String),
    Missing,
}

impl FieldOutcome {
    pub fn or_na(self) -> String {
        match self {
            FieldOutcome::Present(value) => value,
            FieldOutcome::Missing => MISSING_FIELD.to_string(),
        }
    }
}

/// Caps descriptions at 100 characters, marking the cut with an ellipsis.
pub fn truncate_description(text: &str) -> String {
    match text.chars().count() > DESCRIPTION_LIMIT {
        true => {
            let truncated: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            format!("{}...", truncated)
        }
        false => text.to_string(),
    }
}
