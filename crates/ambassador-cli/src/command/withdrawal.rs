//! `withdrawals list|approve|reject`.

use ambassador_core::filter::WithdrawalFilter;
use ambassador_core::types::{EntityId, Withdrawal, WithdrawalStatus};
use anyhow::Context;
use clap::{Args, Subcommand};
use jiff::civil::Date;
use serde_json::json;

use super::PageArgs;
use crate::app::{App, print_json};

#[derive(Debug, Clone, Subcommand)]
pub enum WithdrawalCommand {
    /// List withdrawal requests matching the filters
    List(WithdrawalListArgs),
    /// Approve a pending request
    Approve {
        id: EntityId,
    },
    /// Reject a pending request
    Reject {
        id: EntityId,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct WithdrawalListArgs {
    /// `pending`, `approved` or `rejected`
    #[arg(long)]
    pub status: Option<WithdrawalStatus>,

    #[arg(long, requires = "end_date")]
    pub start_date: Option<Date>,

    #[arg(long, requires = "start_date")]
    pub end_date: Option<Date>,

    #[arg(long)]
    pub customer_id: Option<EntityId>,

    #[command(flatten)]
    pub page: PageArgs,
}

impl From<&WithdrawalListArgs> for WithdrawalFilter {
    fn from(args: &WithdrawalListArgs) -> Self {
        Self {
            status_id: args.status.map(WithdrawalStatus::id),
            start_date: args.start_date,
            end_date: args.end_date,
            customer_id: args.customer_id.clone(),
            pagination: args.page.into(),
        }
    }
}

impl WithdrawalCommand {
    pub async fn run(&self, app: &App) -> anyhow::Result<()> {
        app.require_session()?;

        match self {
            Self::List(args) => {
                let withdrawals = app
                    .client
                    .list::<Withdrawal>(&args.into())
                    .await
                    .context("failed to list withdrawals")?;
                print_json(&withdrawals)
            }
            Self::Approve { id } => {
                app.client
                    .approve_withdrawal(id)
                    .await
                    .with_context(|| format!("failed to approve withdrawal {id}"))?;
                print_json(&json!({ "id": id, "status": WithdrawalStatus::Approved.as_ref() }))
            }
            Self::Reject { id } => {
                app.client
                    .reject_withdrawal(id)
                    .await
                    .with_context(|| format!("failed to reject withdrawal {id}"))?;
                print_json(&json!({ "id": id, "status": WithdrawalStatus::Rejected.as_ref() }))
            }
        }
    }
}
