//! Career-break cash drain: month-by-month withdrawals from a starting balance.
//!
//! The live path drives a sandbox account sequentially, since each month's
//! withdrawal depends on the balance the previous month left behind. A month
//! whose sandbox call fails is filled in from the drain formula and the run
//! continues. If the account cannot be opened at all, or the whole run
//! exceeds its budget, the timeline is computed entirely from the formula.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::benchmark::round_to_tenth;
use crate::career_break::sandbox::BankingSandbox;
use crate::errors::SourceError;
use crate::resolution::{resolve, Provenance};

pub const MIN_MONTHS: u32 = 1;
pub const MAX_MONTHS: u32 = 24;

pub const DRAIN_WARNING: &str = "This demonstrates why negotiating salary NOW matters - \
    every dollar counts during career transitions.";

#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub default_balance: f64,
    /// Delay between a withdrawal and the balance read-back.
    pub pacing: Duration,
    /// Upper bound on a whole live run.
    pub budget: Duration,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            default_balance: 25_000.0,
            pacing: Duration::from_millis(1000),
            budget: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Balance read back from the sandbox.
    Confirmed,
    /// Withdrawal accepted but the balance read failed.
    Estimated,
    /// Computed from the drain formula.
    Calculated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub month: u32,
    pub balance: f64,
    pub withdrawal: f64,
    pub status: EntryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceTimeline {
    pub starting_balance: f64,
    pub monthly_spend: f64,
    /// Months `1..=n`; the starting balance is month 0 and not stored here.
    pub entries: Vec<TimelineEntry>,
    pub total_lost: f64,
    pub source: Provenance,
}

impl BalanceTimeline {
    fn new(
        starting_balance: f64,
        monthly_spend: f64,
        entries: Vec<TimelineEntry>,
        source: Provenance,
    ) -> Self {
        let final_balance = entries.last().map(|e| e.balance).unwrap_or(starting_balance);
        Self {
            starting_balance,
            monthly_spend,
            total_lost: starting_balance - final_balance,
            entries,
            source,
        }
    }

    pub fn months(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn final_balance(&self) -> f64 {
        self.entries
            .last()
            .map(|e| e.balance)
            .unwrap_or(self.starting_balance)
    }

    /// Whole-dollar balances starting with the starting balance.
    pub fn chart_data(&self) -> Vec<i64> {
        std::iter::once(self.starting_balance)
            .chain(self.entries.iter().map(|e| e.balance))
            .map(|b| b.round() as i64)
            .collect()
    }

    pub fn report(&self) -> SimulationReport {
        let depletion_percentage = if self.starting_balance > 0.0 {
            round_to_tenth(self.total_lost / self.starting_balance * 100.0)
        } else {
            0.0
        };
        SimulationReport {
            months_simulated: self.months(),
            initial_balance: self.starting_balance.round() as i64,
            final_balance: self.final_balance().round() as i64,
            total_spent: (self.months() as f64 * self.monthly_spend).round() as i64,
            depletion_percentage,
            warning: DRAIN_WARNING,
            source: self.source,
        }
    }
}

/// Summary fields, computed the same way for live and formula timelines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub months_simulated: u32,
    pub initial_balance: i64,
    pub final_balance: i64,
    pub total_spent: i64,
    pub depletion_percentage: f64,
    pub warning: &'static str,
    pub source: Provenance,
}

fn drain(balance: f64, spend: f64) -> f64 {
    (balance - spend).max(0.0)
}

/// Formula timeline: `balanceₙ = max(0, balanceₙ₋₁ − spend)`.
pub fn formula_entries(months: u32, monthly_spend: f64, starting_balance: f64) -> Vec<TimelineEntry> {
    let mut balance = starting_balance;
    (1..=months)
        .map(|month| {
            balance = drain(balance, monthly_spend);
            TimelineEntry {
                month,
                balance,
                withdrawal: monthly_spend,
                status: EntryStatus::Calculated,
            }
        })
        .collect()
}

pub fn clamp_months(months: i64) -> u32 {
    months.clamp(MIN_MONTHS as i64, MAX_MONTHS as i64) as u32
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[derive(Clone)]
pub struct CareerBreakSimulator {
    sandbox: Option<Arc<dyn BankingSandbox>>,
    settings: SimulationSettings,
}

impl CareerBreakSimulator {
    pub fn new(sandbox: Option<Arc<dyn BankingSandbox>>, settings: SimulationSettings) -> Self {
        Self { sandbox, settings }
    }

    pub fn default_balance(&self) -> f64 {
        self.settings.default_balance
    }

    pub async fn simulate(
        &self,
        months: i64,
        monthly_spend: f64,
        starting_balance: f64,
    ) -> BalanceTimeline {
        let months = clamp_months(months);
        let spend = non_negative(monthly_spend);
        let start = non_negative(starting_balance);

        let resolved = resolve(
            "banking sandbox",
            self.settings.budget,
            self.live(months, spend, start),
            || formula_entries(months, spend, start),
        )
        .await;

        BalanceTimeline::new(start, spend, resolved.value, resolved.provenance)
    }

    async fn live(
        &self,
        months: u32,
        spend: f64,
        start: f64,
    ) -> Result<Vec<TimelineEntry>, SourceError> {
        let sandbox = self
            .sandbox
            .as_ref()
            .ok_or(SourceError::Unconfigured("banking sandbox"))?;

        let account_id = sandbox.open_account(start).await?;

        let mut entries = Vec::with_capacity(months as usize);
        let mut last_balance = start;

        for month in 1..=months {
            let (balance, status) = match sandbox.withdraw(&account_id, spend, month).await {
                Err(e) => {
                    warn!("Sandbox withdrawal for month {month} failed: {e}");
                    (drain(last_balance, spend), EntryStatus::Calculated)
                }
                Ok(()) => {
                    tokio::time::sleep(self.settings.pacing).await;
                    match sandbox.balance(&account_id).await {
                        Ok(balance) => (balance.max(0.0), EntryStatus::Confirmed),
                        Err(e) => {
                            warn!("Sandbox balance read for month {month} failed: {e}");
                            (drain(last_balance, spend), EntryStatus::Estimated)
                        }
                    }
                }
            };

            entries.push(TimelineEntry {
                month,
                balance,
                withdrawal: spend,
                status,
            });
            last_balance = balance;
        }

        if entries.is_empty() {
            return Err(SourceError::NoData);
        }
        Ok(entries)
    }
}
