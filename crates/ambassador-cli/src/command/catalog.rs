//! `levels list|create|update|delete` and `admins list`.

use ambassador_core::filter::{AdminFilter, NoFilter};
use ambassador_core::types::{AdminUser, AmbassadorLevel, AmbassadorLevelDraft, EntityId};
use anyhow::Context;
use bigdecimal::BigDecimal;
use clap::{Args, Subcommand};
use serde_json::json;

use super::PageArgs;
use crate::app::{App, print_json};

#[derive(Debug, Clone, Subcommand)]
pub enum LevelCommand {
    /// List every ambassador level
    List,
    /// Add a level
    Create(LevelArgs),
    /// Replace every field of a level
    Update {
        id: EntityId,
        #[command(flatten)]
        level: LevelArgs,
    },
    /// Remove a level
    Delete {
        id: EntityId,
    },
}

/// Every field of an ambassador level.
#[derive(Debug, Clone, Args)]
pub struct LevelArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "0")]
    pub cash_bonus: BigDecimal,

    /// Tasks in one set
    #[arg(long)]
    pub set_size: i64,

    /// Sets per round
    #[arg(long)]
    pub sets: i64,

    #[arg(long)]
    pub price_from: BigDecimal,

    #[arg(long)]
    pub price_to: BigDecimal,

    /// Commission in percent
    #[arg(long, default_value = "0")]
    pub incentive: BigDecimal,

    /// Commission of combo tasks in percent
    #[arg(long, default_value = "0")]
    pub combo_incentive: BigDecimal,

    #[arg(long)]
    pub min_withdrawal: BigDecimal,

    #[arg(long)]
    pub max_withdrawal: BigDecimal,

    /// Completed tasks needed before a withdrawal
    #[arg(long, default_value_t = 0)]
    pub required_tasks: i64,

    #[arg(long, default_value = "0")]
    pub withdrawal_fees: BigDecimal,
}

impl From<&LevelArgs> for AmbassadorLevelDraft {
    fn from(args: &LevelArgs) -> Self {
        Self {
            ambassador_level_name: args.name.clone(),
            cash_bonus_given: args.cash_bonus.clone(),
            each_set_task_number: args.set_size,
            total_task_set: args.sets,
            task_price_range_from: args.price_from.clone(),
            task_price_range_to: args.price_to.clone(),
            incentive_percentage: args.incentive.clone(),
            combo_task_incentive_percentage: args.combo_incentive.clone(),
            min_withdrawal_amount: args.min_withdrawal.clone(),
            max_withdrawal_amount: args.max_withdrawal.clone(),
            required_task_count_to_withdraw: args.required_tasks,
            withdrawal_fees: args.withdrawal_fees.clone(),
        }
    }
}

impl LevelCommand {
    pub async fn run(&self, app: &App) -> anyhow::Result<()> {
        app.require_session()?;

        match self {
            Self::List => {
                let levels = app
                    .client
                    .list::<AmbassadorLevel>(&NoFilter {})
                    .await
                    .context("failed to list ambassador levels")?;
                print_json(&levels)
            }
            Self::Create(level) => {
                let created = app
                    .client
                    .create::<AmbassadorLevel>(&level.into())
                    .await
                    .context("failed to create ambassador level")?;
                print_json(&json!({ "created": true, "level": created }))
            }
            Self::Update { id, level } => {
                let updated = app
                    .client
                    .update::<AmbassadorLevel>(id, &level.into())
                    .await
                    .with_context(|| format!("failed to update ambassador level {id}"))?;
                print_json(&json!({ "updated": id, "level": updated }))
            }
            Self::Delete { id } => {
                app.client
                    .delete::<AmbassadorLevel>(id)
                    .await
                    .with_context(|| format!("failed to delete ambassador level {id}"))?;
                print_json(&json!({ "deleted": id }))
            }
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum AdminCommand {
    /// List administrators
    List {
        /// Only the administrator with this id
        #[arg(long)]
        id: Option<EntityId>,

        #[command(flatten)]
        page: PageArgs,
    },
}

impl AdminCommand {
    pub async fn run(&self, app: &App) -> anyhow::Result<()> {
        app.require_session()?;

        match self {
            Self::List { id, page } => {
                let filter = AdminFilter {
                    id: id.clone(),
                    pagination: (*page).into(),
                };
                let admins = app
                    .client
                    .list::<AdminUser>(&filter)
                    .await
                    .context("failed to list administrators")?;
                print_json(&admins)
            }
        }
    }
}
