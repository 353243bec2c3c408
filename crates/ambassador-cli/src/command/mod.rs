//! Subcommands of the `ambassador` binary.

mod auth;
mod catalog;
mod customer;
mod dashboard;
mod language;
mod master_data;
mod task;
mod withdrawal;

use ambassador_core::filter::Pagination;
use clap::{Args, Subcommand};

pub use self::auth::LoginArgs;
pub use self::catalog::{AdminCommand, LevelCommand};
pub use self::customer::CustomerCommand;
pub use self::dashboard::DashboardArgs;
pub use self::language::LanguageCommand;
pub use self::master_data::MasterDataArgs;
pub use self::task::TaskCommand;
pub use self::withdrawal::WithdrawalCommand;
use crate::app::App;

/// What the back office should do.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and keep the session
    Login(LoginArgs),
    /// End the session
    Logout,
    /// Show the current session
    Status,
    /// Manage customers
    #[command(subcommand)]
    Customers(CustomerCommand),
    /// Manage the task catalog
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Review withdrawal requests
    #[command(subcommand)]
    Withdrawals(WithdrawalCommand),
    /// Manage ambassador levels
    #[command(subcommand)]
    Levels(LevelCommand),
    /// Browse administrators
    #[command(subcommand)]
    Admins(AdminCommand),
    /// List currencies, projects or sales statuses
    MasterData(MasterDataArgs),
    /// Show today's summary
    Dashboard(DashboardArgs),
    /// Read or change the display language
    #[command(subcommand)]
    Language(LanguageCommand),
}

impl Command {
    /// Runs the command against the connected application.
    pub async fn run(&self, app: &App) -> anyhow::Result<()> {
        match self {
            Self::Login(args) => auth::login(app, args).await,
            Self::Logout => auth::logout(app).await,
            Self::Status => auth::status(app),
            Self::Customers(command) => command.run(app).await,
            Self::Tasks(command) => command.run(app).await,
            Self::Withdrawals(command) => command.run(app).await,
            Self::Levels(command) => command.run(app).await,
            Self::Admins(command) => command.run(app).await,
            Self::MasterData(args) => master_data::run(app, args).await,
            Self::Dashboard(args) => dashboard::run(app, args).await,
            Self::Language(command) => command.run(app).await,
        }
    }
}

/// Page selection shared by the list subcommands.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PageArgs {
    /// One-based page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Rows per page
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Self {
            page: args.page,
            limit: args.limit,
        }
    }
}
