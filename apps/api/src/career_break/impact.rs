//! Quick career-break cost estimate. Pure arithmetic; no sandbox account.

use serde::Serialize;

use crate::career_break::simulator::clamp_months;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactAssumptions {
    pub monthly_expenses: f64,
    pub initial_balance: f64,
    /// Return the paid expenses would have earned if invested instead.
    pub annual_return: f64,
    pub default_salary: f64,
}

impl Default for ImpactAssumptions {
    fn default() -> Self {
        Self {
            monthly_expenses: 3_000.0,
            initial_balance: 25_000.0,
            annual_return: 0.07,
            default_salary: 75_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsDepletion {
    pub initial: f64,
    #[serde(rename = "final")]
    pub remaining: f64,
    pub percentage_used: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakImpact {
    pub months: u32,
    pub lost_income: f64,
    pub expenses_during_break: f64,
    pub total_financial_impact: f64,
    pub investment_opportunity_cost: f64,
    pub savings_depletion: SavingsDepletion,
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Cost of stepping away from a salary for `months` while expenses keep running.
pub fn estimate_break_impact(
    months: i64,
    annual_salary: f64,
    assumptions: &ImpactAssumptions,
) -> BreakImpact {
    let months = clamp_months(months);
    let salary = if annual_salary.is_finite() {
        annual_salary.max(0.0)
    } else {
        0.0
    };
    let span = months as f64;

    let lost_income = salary / 12.0 * span;
    let expenses = assumptions.monthly_expenses * span;
    let opportunity_cost = expenses * assumptions.annual_return * (span / 12.0);
    let percentage_used = if assumptions.initial_balance > 0.0 {
        round_to_cents(expenses / assumptions.initial_balance * 100.0)
    } else {
        0.0
    };

    BreakImpact {
        months,
        lost_income: round_to_cents(lost_income),
        expenses_during_break: round_to_cents(expenses),
        total_financial_impact: round_to_cents(lost_income + expenses),
        investment_opportunity_cost: round_to_cents(opportunity_cost),
        savings_depletion: SavingsDepletion {
            initial: assumptions.initial_balance,
            remaining: (assumptions.initial_balance - expenses).max(0.0),
            percentage_used,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_month_break_at_default_salary() {
        let impact = estimate_break_impact(6, 75_000.0, &ImpactAssumptions::default());
        assert_eq!(impact.lost_income, 37_500.0);
        assert_eq!(impact.expenses_during_break, 18_000.0);
        assert_eq!(impact.total_financial_impact, 55_500.0);
        assert_eq!(impact.investment_opportunity_cost, 630.0);
        assert_eq!(impact.savings_depletion.remaining, 7_000.0);
        assert_eq!(impact.savings_depletion.percentage_used, 72.0);
    }

    #[test]
    fn test_long_break_empties_savings_but_not_below_zero() {
        let impact = estimate_break_impact(12, 60_000.0, &ImpactAssumptions::default());
        assert_eq!(impact.lost_income, 60_000.0);
        assert_eq!(impact.savings_depletion.remaining, 0.0);
        assert_eq!(impact.savings_depletion.percentage_used, 144.0);
    }

    #[test]
    fn test_inputs_are_clamped() {
        let assumptions = ImpactAssumptions::default();
        assert_eq!(estimate_break_impact(0, 75_000.0, &assumptions).months, 1);
        assert_eq!(estimate_break_impact(99, 75_000.0, &assumptions).months, 24);
        assert_eq!(estimate_break_impact(3, -1.0, &assumptions).lost_income, 0.0);
    }

    #[test]
    fn test_serialises_final_balance_key() {
        let impact = estimate_break_impact(1, 12_000.0, &ImpactAssumptions::default());
        let value = serde_json::to_value(impact).unwrap();
        assert_eq!(value["savings_depletion"]["final"], 22_000.0);
        assert_eq!(value["lost_income"], 1_000.0);
    }
}
