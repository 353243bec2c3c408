//! `tasks list|create|update|delete`.

use std::sync::Arc;

use ambassador_core::filter::{TaskCriteria, TaskFilter};
use ambassador_core::types::{EntityId, Task, TaskDraft};
use ambassador_service::ListController;
use anyhow::Context;
use bigdecimal::BigDecimal;
use clap::{Args, Subcommand};
use serde_json::json;

use super::PageArgs;
use crate::app::{App, print_json};

#[derive(Debug, Clone, Subcommand)]
pub enum TaskCommand {
    /// List catalog entries, optionally narrowed by name and price
    List(TaskListArgs),
    /// Add a catalog entry
    Create {
        #[arg(long)]
        name: String,
        /// Price of the task
        #[arg(long)]
        value: BigDecimal,
    },
    /// Replace the name and price of a catalog entry
    Update {
        id: EntityId,
        #[arg(long)]
        name: String,
        /// Price of the task
        #[arg(long)]
        value: BigDecimal,
    },
    /// Remove a catalog entry
    Delete {
        id: EntityId,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct TaskListArgs {
    /// Case-insensitive part of the task name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Lowest price, inclusive
    #[arg(long, default_value = "")]
    pub price_from: String,

    /// Highest price, inclusive
    #[arg(long, default_value = "")]
    pub price_to: String,

    #[command(flatten)]
    pub page: PageArgs,
}

impl TaskCommand {
    pub async fn run(&self, app: &App) -> anyhow::Result<()> {
        app.require_session()?;

        match self {
            Self::List(args) => list(app, args).await,
            Self::Create { name, value } => {
                let draft = TaskDraft {
                    name: name.clone(),
                    task_value: value.clone(),
                };
                let created = app
                    .client
                    .create::<Task>(&draft)
                    .await
                    .context("failed to create task")?;
                print_json(&json!({ "created": true, "task": created }))
            }
            Self::Update { id, name, value } => {
                let draft = TaskDraft {
                    name: name.clone(),
                    task_value: value.clone(),
                };
                let updated = app
                    .client
                    .update::<Task>(id, &draft)
                    .await
                    .with_context(|| format!("failed to update task {id}"))?;
                print_json(&json!({ "updated": id, "task": updated }))
            }
            Self::Delete { id } => {
                app.client
                    .delete::<Task>(id)
                    .await
                    .with_context(|| format!("failed to delete task {id}"))?;
                print_json(&json!({ "deleted": id }))
            }
        }
    }
}

async fn list(app: &App, args: &TaskListArgs) -> anyhow::Result<()> {
    let controller = ListController::<Task>::new(Arc::new(app.client.clone()));
    let filter = TaskFilter {
        pagination: args.page.into(),
    };
    controller
        .fetch(&filter)
        .await
        .context("failed to list tasks")?;

    let criteria = TaskCriteria::from_input(&args.name, &args.price_from, &args.price_to);
    let tasks = if criteria.is_empty() {
        controller.items().to_vec()
    } else {
        controller.narrow(&criteria)
    };
    controller.close();

    print_json(&tasks)
}
