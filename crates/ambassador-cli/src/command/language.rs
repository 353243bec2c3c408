//! `language get|set`.

use ambassador_session::Language;
use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::app::{App, print_json};

#[derive(Debug, Clone, Subcommand)]
pub enum LanguageCommand {
    /// Print the display language
    Get,
    /// Change the display language
    Set {
        /// `en` or `zh`
        language: Language,
    },
}

impl LanguageCommand {
    pub async fn run(&self, app: &App) -> anyhow::Result<()> {
        let language = match self {
            Self::Get => app
                .preferences
                .language()
                .await
                .context("failed to read the language")?,
            Self::Set { language } => {
                app.preferences
                    .set_language(*language)
                    .await
                    .context("failed to store the language")?;
                *language
            }
        };

        print_json(&json!({ "language": language }))
    }
}
