// src/screens/settings.rs

use tokio::sync::RwLock;

use crate::error::Result;
use crate::forms::ProfitMarginForm;
use crate::models::ProfitMargin;
use crate::screens::{ScreenContext, ScreenState};

#[derive(Debug)]
pub struct SettingsScreen {
    state: ScreenState,
    margin: RwLock<Option<ProfitMargin>>,
}

impl SettingsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            state: ScreenState::new("settings", ctx),
            margin: RwLock::new(None),
        }
    }

    pub async fn load(&self) -> Result<ProfitMargin> {
        let _busy = self.state.begin()?;
        self.fetch().await
    }

    async fn fetch(&self) -> Result<ProfitMargin> {
        let result = self.state.client().settings().profit_margin().await;
        let margin = result.map_err(|e| self.state.fail(e, "Failed to load settings"))?;
        *self.margin.write().await = Some(margin);
        Ok(margin)
    }

    pub async fn margin(&self) -> Option<ProfitMargin> {
        *self.margin.read().await
    }

    pub async fn save(&self, form: &ProfitMarginForm) -> Result<ProfitMargin> {
        let _busy = self.state.begin()?;
        let margin = form.margin()?;

        let result = self.state.client().settings().set_profit_margin(margin).await;
        self.state
            .report(result, "Settings saved successfully", "Failed to save settings")?;
        self.fetch().await
    }
}
