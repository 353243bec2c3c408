//! `dashboard`.

use anyhow::Context;
use clap::Args;
use jiff::Zoned;
use jiff::civil::Date;

use crate::app::{App, print_json};

#[derive(Debug, Clone, Args)]
pub struct DashboardArgs {
    /// Day to summarize (defaults to today)
    #[arg(long)]
    pub date: Option<Date>,
}

pub async fn run(app: &App, args: &DashboardArgs) -> anyhow::Result<()> {
    app.require_session()?;

    let today = args.date.unwrap_or_else(|| Zoned::now().date());
    let summary = app
        .client
        .dashboard(today)
        .await
        .context("failed to load the dashboard")?;

    print_json(&summary)
}
