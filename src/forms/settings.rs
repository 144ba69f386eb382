// src/forms/settings.rs

use crate::error::Result;
use crate::forms::{parse_number, validate, FieldRule, FieldValue, Validated};
use crate::models::ProfitMargin;

const RULES: &[FieldRule] = &[FieldRule::required("percentage", "Enter a valid percentage")];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfitMarginForm {
    /// Raw input
    pub percentage: String,
}

impl ProfitMarginForm {
    pub fn new(percentage: impl Into<String>) -> Self {
        Self {
            percentage: percentage.into(),
        }
    }

    pub fn margin(&self) -> Result<ProfitMargin> {
        validate(self).into_result()?;
        Ok(ProfitMargin::new(parse_number(&self.percentage).unwrap_or_default()))
    }
}

impl Validated for ProfitMarginForm {
    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn field(&self, _name: &str) -> FieldValue<'_> {
        FieldValue::Number(parse_number(&self.percentage))
    }
}
