//! Barcode and label lookups against FoodData Central.
//!
//! Each lookup is a search followed by one or more detail fetches. The core
//! client builds and parses every exchange; this module sequences them and
//! decides which outcome maps to which response.

use nutrition_core::{extract_nutrition, FdcClient, FoodCandidate, FoodRecord, NutritionInfo};

use crate::config::Config;
use crate::error::{AppError, UpstreamError};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct NutritionService {
    client: FdcClient,
    transport: Transport,
}

impl NutritionService {
    pub fn new(client: FdcClient, transport: Transport) -> Self {
        Self { client, transport }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(config.fdc_client(), Transport::new()?))
    }

    /// Nutrition facts for the first branded hit on `barcode` that has any.
    ///
    /// Branded hits are tried in provider order; one without an `fdcId`, or
    /// whose detail record carries no nutrient list, is skipped.
    pub async fn lookup_barcode(&self, barcode: &str) -> Result<NutritionInfo, AppError> {
        let candidates = self
            .search(self.client.build_barcode_search(barcode))
            .await?;
        if candidates.is_empty() {
            return Err(AppError::NotFound("Product not found.".to_string()));
        }

        let branded_ids = candidates
            .iter()
            .filter(|c| c.is_branded())
            .filter_map(|c| c.fdc_id);
        for fdc_id in branded_ids {
            let record = self.food_details(fdc_id).await?;
            if let Some(info) = extract_nutrition(record.as_ref()) {
                return Ok(info);
            }
            tracing::debug!(fdc_id, "branded hit has no nutrient data");
        }

        Err(AppError::NotFound(
            "No branded food found for this barcode.".to_string(),
        ))
    }

    /// Nutrition facts for the top branded or SR Legacy hit on `label`.
    pub async fn lookup_label(&self, label: &str) -> Result<NutritionInfo, AppError> {
        let candidates = self.search(self.client.build_label_search(label)).await?;
        let Some(fdc_id) = candidates.first().and_then(|c| c.fdc_id) else {
            return Err(AppError::NotFound(format!("No food found for '{label}'.")));
        };

        let record = self.food_details(fdc_id).await?;
        extract_nutrition(record.as_ref()).ok_or_else(|| {
            AppError::NotFound(format!("No detailed nutrition data found for '{label}'."))
        })
    }

    async fn search(
        &self,
        request: nutrition_core::HttpRequest,
    ) -> Result<Vec<FoodCandidate>, UpstreamError> {
        tracing::debug!(url = %request.url, "searching FDC");
        let response = self.transport.execute(request).await?;
        Ok(self.client.parse_search(response)?)
    }

    async fn food_details(&self, fdc_id: u64) -> Result<Option<FoodRecord>, UpstreamError> {
        tracing::debug!(fdc_id, "fetching FDC food details");
        let response = self
            .transport
            .execute(self.client.build_food_details(fdc_id))
            .await?;
        Ok(self.client.parse_food_details(response)?)
    }
}
