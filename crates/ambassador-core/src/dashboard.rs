//! Dashboard aggregation over yesterday's and today's records.

use bigdecimal::BigDecimal;
use jiff::civil::Date;
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::types::{Customer, DepositRecord, Withdrawal, WithdrawalStatus};

/// Which figure a stat card summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    Deposit,
    ApprovedWithdrawal,
    PendingWithdrawal,
    RejectedWithdrawal,
    Customer,
}

/// One summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub kind: StatKind,
    /// Number of records created today.
    pub today: u64,
    /// Amount (or count, for customers) of the records created yesterday.
    pub yesterday: BigDecimal,
    /// Amount (or total row count, for customers) over the whole window.
    pub total: BigDecimal,
}

/// The five cards of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub cards: Vec<StatCard>,
}

fn created_on(created_date: Option<&str>, day: &str) -> bool {
    created_date.is_some_and(|created| created.starts_with(day))
}

fn sum<'a>(amounts: impl Iterator<Item = Option<&'a BigDecimal>>) -> BigDecimal {
    amounts.flatten().fold(BigDecimal::from(0), |acc, amount| acc + amount)
}

impl DashboardSummary {
    /// Computes the cards from records fetched for `yesterday..=today`.
    ///
    /// Records are bucketed by the date prefix of `createdDate`; missing
    /// amounts count as zero.
    pub fn compute(
        today: Date,
        yesterday: Date,
        withdrawals: &[Withdrawal],
        deposits: &[DepositRecord],
        customers: &[Customer],
    ) -> Self {
        let today = today.to_string();
        let yesterday = yesterday.to_string();

        let deposit = StatCard {
            kind: StatKind::Deposit,
            today: deposits
                .iter()
                .filter(|d| created_on(d.created_date.as_deref(), &today))
                .count() as u64,
            yesterday: sum(deposits
                .iter()
                .filter(|d| created_on(d.created_date.as_deref(), &yesterday))
                .map(|d| d.amount.as_ref())),
            total: sum(deposits.iter().map(|d| d.amount.as_ref())),
        };

        let withdrawal_card = |kind: StatKind, status: WithdrawalStatus| {
            let matching: Vec<_> = withdrawals
                .iter()
                .filter(|w| w.status() == Some(status))
                .collect();
            StatCard {
                kind,
                today: matching
                    .iter()
                    .filter(|w| created_on(w.created_date.as_deref(), &today))
                    .count() as u64,
                yesterday: sum(matching
                    .iter()
                    .filter(|w| created_on(w.created_date.as_deref(), &yesterday))
                    .map(|w| w.amount.as_ref())),
                total: sum(matching.iter().map(|w| w.amount.as_ref())),
            }
        };

        let customers_yesterday = customers
            .iter()
            .filter(|c| created_on(c.created_date.as_deref(), &yesterday))
            .count() as u64;
        let customers_total = customers
            .first()
            .and_then(|c| c.total_rows_count)
            .unwrap_or(customers.len() as u64);
        let customer = StatCard {
            kind: StatKind::Customer,
            today: customers
                .iter()
                .filter(|c| created_on(c.created_date.as_deref(), &today))
                .count() as u64,
            yesterday: BigDecimal::from(customers_yesterday),
            total: BigDecimal::from(customers_total),
        };

        Self {
            cards: vec![
                deposit,
                withdrawal_card(StatKind::ApprovedWithdrawal, WithdrawalStatus::Approved),
                withdrawal_card(StatKind::PendingWithdrawal, WithdrawalStatus::Pending),
                withdrawal_card(StatKind::RejectedWithdrawal, WithdrawalStatus::Rejected),
                customer,
            ],
        }
    }

    /// Returns the card of the given kind.
    pub fn card(&self, kind: StatKind) -> Option<&StatCard> {
        self.cards.iter().find(|card| card.kind == kind)
    }
}
