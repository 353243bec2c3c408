//! `master-data <kind>`.

use ambassador_core::MasterData;
use anyhow::Context;
use clap::Args;

use crate::app::{App, print_json};

#[derive(Debug, Clone, Args)]
pub struct MasterDataArgs {
    /// `currencies`, `projects` or `sales-statuses`
    pub kind: MasterData,
}

pub async fn run(app: &App, args: &MasterDataArgs) -> anyhow::Result<()> {
    app.require_session()?;

    let items = app
        .client
        .master_data(args.kind)
        .await
        .with_context(|| format!("failed to list {}", args.kind))?;
    print_json(&items)
}
