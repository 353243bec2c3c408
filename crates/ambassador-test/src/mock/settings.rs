//! Mock settings writer.

use std::sync::{Arc, Mutex};

use ambassador_core::types::EntityId;
use ambassador_core::{Error, Result, SettingsPatch, SettingsWriter};

use super::lock;

#[derive(Debug, Default)]
struct WriterState {
    failing: bool,
    calls: Vec<(EntityId, SettingsPatch)>,
}

/// Settings writer that records every patch.
#[derive(Debug, Clone, Default)]
pub struct MockSettingsWriter {
    state: Arc<Mutex<WriterState>>,
}

impl MockSettingsWriter {
    /// Accepts every update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every update with a server error.
    pub fn failing() -> Self {
        let writer = Self::default();
        writer.set_failing(true);
        writer
    }

    /// Switches the failing mode.
    pub fn set_failing(&self, failing: bool) {
        lock(&self.state).failing = failing;
    }

    /// Every received `(entity, patch)` pair, in order.
    pub fn calls(&self) -> Vec<(EntityId, SettingsPatch)> {
        lock(&self.state).calls.clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.state).calls.len()
    }
}

#[async_trait::async_trait]
impl SettingsWriter for MockSettingsWriter {
    async fn update_settings(&self, entity_id: &EntityId, patch: &SettingsPatch) -> Result<()> {
        let failing = {
            let mut state = lock(&self.state);
            state.calls.push((entity_id.clone(), patch.clone()));
            state.failing
        };

        tokio::task::yield_now().await;

        if failing {
            return Err(Error::from_status(500).with_message("Failed to update settings"));
        }
        Ok(())
    }
}
