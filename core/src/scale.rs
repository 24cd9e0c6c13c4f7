//! Linear rescaling of a macro set from one serving size to another.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ScaleError;
use crate::extract::coerce_f64;
use crate::types::MacroNutrients;

/// A validated `POST /api/scale_nutrition` payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRequest {
    pub nutrients: MacroNutrients,
    pub serving_size_g: f64,
    pub desired_grams: f64,
}

impl ScaleRequest {
    /// Parse and validate a raw request body.
    ///
    /// The sizes may be numbers or numeric strings. The serving size is
    /// checked before the nutrient fields are read, so a zero serving size is
    /// reported even when the nutrients are malformed.
    pub fn from_json(body: &[u8]) -> Result<Self, ScaleError> {
        let payload: Value = serde_json::from_slice(body).map_err(|_| ScaleError::InvalidInput)?;
        let payload = payload.as_object().ok_or(ScaleError::InvalidInput)?;

        let nutrients = payload.get("nutrients").ok_or(ScaleError::InvalidInput)?;
        let serving_size_g = payload
            .get("serving_size_g")
            .and_then(coerce_f64)
            .ok_or(ScaleError::InvalidInput)?;
        let desired_grams = payload
            .get("desired_grams")
            .and_then(coerce_f64)
            .ok_or(ScaleError::InvalidInput)?;

        if serving_size_g <= 0.0 {
            return Err(ScaleError::NonPositiveServingSize);
        }

        let nutrients =
            MacroNutrients::deserialize(nutrients).map_err(|_| ScaleError::InvalidInput)?;

        Ok(Self {
            nutrients,
            serving_size_g,
            desired_grams,
        })
    }

    pub fn ratio(&self) -> f64 {
        self.desired_grams / self.serving_size_g
    }

    pub fn scale(&self) -> MacroNutrients {
        self.nutrients.scaled_by(self.ratio())
    }
}

impl MacroNutrients {
    pub fn scaled_by(&self, ratio: f64) -> MacroNutrients {
        MacroNutrients {
            calories: self.calories * ratio,
            protein: self.protein * ratio,
            carbs: self.carbs * ratio,
            fat: self.fat * ratio,
        }
    }
}
