//! `customers list|show|create|update|toggle|tasks|delete`.

use std::sync::Arc;

use ambassador_core::CustomerSetting;
use ambassador_core::filter::{CustomerFilter, CustomerTaskFilter, Presence};
use ambassador_core::types::{Customer, CustomerDraft, CustomerPatch, CustomerTask, EntityId};
use ambassador_service::SettingsBoard;
use anyhow::Context;
use clap::{Args, Subcommand};
use jiff::civil::Date;
use serde_json::json;

use super::PageArgs;
use crate::app::{App, print_json};

#[derive(Debug, Clone, Subcommand)]
pub enum CustomerCommand {
    /// List customers matching the filters
    List(CustomerListArgs),
    /// Show one customer
    Show {
        id: EntityId,
    },
    /// Register a customer
    Create(CustomerCreateArgs),
    /// Change the profile of a customer
    Update {
        id: EntityId,
        #[command(flatten)]
        changes: CustomerUpdateArgs,
    },
    /// Flip one permission flag of a customer
    Toggle {
        id: EntityId,
        /// Flag name, e.g. `isAllowToWithdraw`
        setting: CustomerSetting,
    },
    /// List the tasks taken by a customer
    Tasks {
        id: EntityId,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Delete a customer
    Delete {
        id: EntityId,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct CustomerCreateArgs {
    #[arg(long)]
    pub login_user_name: String,

    #[arg(long, env = "AMBASSADOR_CUSTOMER_PASSWORD", hide_env_values = true)]
    pub login_password: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub phone_number: Option<String>,

    /// Code of the referring customer
    #[arg(long)]
    pub referral_code: Option<String>,

    /// Ambassador level id
    #[arg(long)]
    pub level: Option<EntityId>,
}

impl From<&CustomerCreateArgs> for CustomerDraft {
    fn from(args: &CustomerCreateArgs) -> Self {
        Self {
            login_user_name: args.login_user_name.clone(),
            login_password: args.login_password.clone(),
            name: args.name.clone(),
            phone_number: args.phone_number.clone(),
            referral_code: args.referral_code.clone(),
            ambassador_level_id: args.level.clone(),
            flags: Default::default(),
        }
    }
}

/// Profile fields to change; omitted flags are left untouched.
#[derive(Debug, Clone, Default, Args)]
pub struct CustomerUpdateArgs {
    #[arg(long)]
    pub login_user_name: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone_number: Option<String>,

    #[arg(long)]
    pub referral_code: Option<String>,

    /// Ambassador level id
    #[arg(long)]
    pub level: Option<EntityId>,

    #[arg(long)]
    pub status: Option<i64>,
}

impl From<&CustomerUpdateArgs> for CustomerPatch {
    fn from(args: &CustomerUpdateArgs) -> Self {
        Self {
            login_user_name: args.login_user_name.clone(),
            name: args.name.clone(),
            phone_number: args.phone_number.clone(),
            referral_code: args.referral_code.clone(),
            ambassador_level_id: args.level.clone(),
            customer_status_id: args.status,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct CustomerListArgs {
    /// First day of the registration window
    #[arg(long, requires = "end_date")]
    pub start_date: Option<Date>,

    /// Last day of the registration window
    #[arg(long, requires = "start_date")]
    pub end_date: Option<Date>,

    #[arg(long)]
    pub login_user_name: Option<String>,

    /// Referral or number code
    #[arg(long)]
    pub code: Option<String>,

    /// Last login IP address
    #[arg(long)]
    pub ip_address: Option<String>,

    #[arg(long)]
    pub phone_number: Option<String>,

    #[arg(long)]
    pub customer_status: Option<String>,

    /// `all`, `online` or `offline`
    #[arg(long)]
    pub presence: Option<Presence>,

    #[command(flatten)]
    pub page: PageArgs,
}

impl From<&CustomerListArgs> for CustomerFilter {
    fn from(args: &CustomerListArgs) -> Self {
        Self {
            start_date: args.start_date,
            end_date: args.end_date,
            login_user_name: args.login_user_name.clone(),
            code: args.code.clone(),
            ip_address: args.ip_address.clone(),
            phone_number: args.phone_number.clone(),
            customer_status: args.customer_status.clone(),
            online_offline: args.presence,
            pagination: args.page.into(),
        }
    }
}

impl CustomerCommand {
    pub async fn run(&self, app: &App) -> anyhow::Result<()> {
        app.require_session()?;

        match self {
            Self::List(args) => {
                let customers = app
                    .client
                    .list::<Customer>(&args.into())
                    .await
                    .context("failed to list customers")?;
                print_json(&customers)
            }
            Self::Show { id } => {
                let customer = app
                    .client
                    .get::<Customer>(id)
                    .await
                    .with_context(|| format!("failed to load customer {id}"))?;
                print_json(&customer)
            }
            Self::Create(args) => {
                let created = app
                    .client
                    .create::<Customer>(&args.into())
                    .await
                    .context("failed to create customer")?;
                print_json(&json!({ "created": true, "customer": created }))
            }
            Self::Update { id, changes } => {
                let updated = app
                    .client
                    .update::<Customer>(id, &changes.into())
                    .await
                    .with_context(|| format!("failed to update customer {id}"))?;
                print_json(&json!({ "updated": id, "customer": updated }))
            }
            Self::Toggle { id, setting } => toggle(app, id, *setting).await,
            Self::Tasks { id, page } => {
                let filter = CustomerTaskFilter {
                    customer_id: Some(id.clone()),
                    pagination: (*page).into(),
                };
                let tasks = app
                    .client
                    .list::<CustomerTask>(&filter)
                    .await
                    .with_context(|| format!("failed to list tasks of customer {id}"))?;
                print_json(&tasks)
            }
            Self::Delete { id } => {
                app.client
                    .delete::<Customer>(id)
                    .await
                    .with_context(|| format!("failed to delete customer {id}"))?;
                print_json(&json!({ "deleted": id }))
            }
        }
    }
}

async fn toggle(app: &App, id: &EntityId, setting: CustomerSetting) -> anyhow::Result<()> {
    let customer = app
        .client
        .get::<Customer>(id)
        .await
        .with_context(|| format!("failed to load customer {id}"))?;

    let board = SettingsBoard::new(Arc::new(app.client.clone()));
    board.load(id, &customer.settings());

    let outcome = board.toggle(id, setting).await;
    let shown = board.setting(id, setting);
    board.close();

    print_json(&json!({
        "outcome": outcome,
        "setting": shown,
        "label": setting.label(),
        "displayed": shown.displayed(),
    }))
}
