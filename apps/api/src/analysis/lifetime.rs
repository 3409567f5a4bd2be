//! Lifetime impact projection of a recurring gender pay gap.
//!
//! Each year: apply the raise, take the gap, then accumulate. Year 0 is the
//! starting salaries and is never accumulated.

use serde::Serialize;

pub const MIN_YEARS: u32 = 1;
pub const MAX_YEARS: u32 = 40;
pub const DEFAULT_YEARS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionRates {
    pub annual_raise: f64,
    pub employer_match: f64,
    pub investment_return: f64,
}

impl Default for ProjectionRates {
    fn default() -> Self {
        Self {
            annual_raise: 0.03,
            employer_match: 0.04,
            investment_return: 0.07,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearSnapshot {
    pub year: u32,
    pub male_salary: f64,
    pub female_salary: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactTotals {
    pub lost_salary: f64,
    pub lost_retirement_match: f64,
    pub lost_investment_growth: f64,
    pub total_compound_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactTrajectory {
    /// Years `0..=years`.
    pub snapshots: Vec<YearSnapshot>,
    pub totals: ImpactTotals,
    pub years: u32,
}

impl ImpactTrajectory {
    pub fn male_trajectory(&self) -> Vec<i64> {
        self.snapshots.iter().map(|s| dollars(s.male_salary)).collect()
    }

    pub fn female_trajectory(&self) -> Vec<i64> {
        self.snapshots.iter().map(|s| dollars(s.female_salary)).collect()
    }

    pub fn gap_trajectory(&self) -> Vec<i64> {
        self.snapshots.iter().map(|s| dollars(s.gap)).collect()
    }

    pub fn year_labels(&self) -> Vec<String> {
        self.snapshots
            .iter()
            .map(|s| match s.year {
                0 => "Start".to_string(),
                y => format!("Year {y}"),
            })
            .collect()
    }

    pub fn final_gap(&self) -> i64 {
        self.snapshots.last().map(|s| dollars(s.gap)).unwrap_or(0)
    }
}

/// Whole dollars for reporting, truncated toward zero.
pub fn dollars(value: f64) -> i64 {
    value.trunc() as i64
}

pub fn clamp_years(years: i64) -> u32 {
    years.clamp(MIN_YEARS as i64, MAX_YEARS as i64) as u32
}

/// Pure projection kernel; holds only its rates.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifetimeImpactProjector {
    rates: ProjectionRates,
}

impl LifetimeImpactProjector {
    pub fn new(rates: ProjectionRates) -> Self {
        Self { rates }
    }

    pub fn project(&self, male_avg: f64, female_avg: f64, years: i64) -> ImpactTrajectory {
        let years = clamp_years(years);
        let rates = self.rates;

        let mut male_salary = male_avg.max(0.0);
        let mut female_salary = female_avg.max(0.0);

        let mut snapshots = Vec::with_capacity(years as usize + 1);
        let mut lost_salary = 0.0;
        let mut lost_retirement = 0.0;
        let mut investment_pot = 0.0;

        for year in 0..=years {
            if year > 0 {
                male_salary *= 1.0 + rates.annual_raise;
                female_salary *= 1.0 + rates.annual_raise;
            }

            let gap = male_salary - female_salary;
            snapshots.push(YearSnapshot {
                year,
                male_salary,
                female_salary,
                gap,
            });

            if year > 0 {
                lost_salary += gap;
                lost_retirement += gap * rates.employer_match;
                // this year's gap is invested at the start of the year
                investment_pot = (investment_pot + gap) * (1.0 + rates.investment_return);
            }
        }

        ImpactTrajectory {
            snapshots,
            totals: ImpactTotals {
                lost_salary,
                lost_retirement_match: lost_retirement,
                lost_investment_growth: investment_pot - lost_salary,
                total_compound_loss: investment_pot + lost_retirement,
            },
            years,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> LifetimeImpactProjector {
        LifetimeImpactProjector::default()
    }

    #[test]
    fn test_one_year_projection() {
        let t = projector().project(100_000.0, 90_000.0, 1);
        assert_eq!(t.male_trajectory(), vec![100_000, 103_000]);
        assert_eq!(t.female_trajectory(), vec![90_000, 92_700]);
        assert_eq!(t.gap_trajectory(), vec![10_000, 10_300]);
        assert_eq!(dollars(t.totals.lost_salary), 10_300);
        assert_eq!(dollars(t.totals.lost_retirement_match), 412);
        // 10_300 × 1.07
        assert_eq!(dollars(t.totals.total_compound_loss), 11_021 + 412);
        assert_eq!(dollars(t.totals.lost_investment_growth), 721);
    }

    #[test]
    fn test_year_zero_is_not_accumulated() {
        let t = projector().project(100_000.0, 50_000.0, 1);
        // only year 1's gap (51_500) counts
        assert_eq!(dollars(t.totals.lost_salary), 51_500);
    }

    #[test]
    fn test_years_are_clamped() {
        assert_eq!(projector().project(1.0, 1.0, 0).snapshots.len(), 2);
        assert_eq!(projector().project(1.0, 1.0, -3).years, 1);
        assert_eq!(projector().project(1.0, 1.0, 100).snapshots.len(), 41);
    }

    #[test]
    fn test_trajectory_lengths_and_monotonic_growth() {
        for years in [1, 5, 30, 40] {
            let t = projector().project(120_000.0, 100_000.0, years);
            assert_eq!(t.snapshots.len(), years as usize + 1);
            for pair in t.snapshots.windows(2) {
                assert!(pair[1].male_salary >= pair[0].male_salary);
                assert!(pair[1].female_salary >= pair[0].female_salary);
            }
            assert!(t.totals.total_compound_loss >= t.totals.lost_retirement_match);
        }
    }

    #[test]
    fn test_compounding_treats_each_gap_as_invested_at_year_start() {
        let rates = ProjectionRates {
            annual_raise: 0.0,
            employer_match: 0.0,
            investment_return: 0.1,
        };
        let t = LifetimeImpactProjector::new(rates).project(1_000.0, 0.0, 2);
        // (1000 × 1.1 + 1000) × 1.1
        assert_eq!(dollars(t.totals.total_compound_loss), 2_310);
        assert_eq!(dollars(t.totals.lost_investment_growth), 310);
    }

    #[test]
    fn test_negative_gap_is_carried_through() {
        let t = projector().project(90_000.0, 100_000.0, 3);
        assert!(t.totals.lost_salary < 0.0);
        assert_eq!(t.gap_trajectory()[0], -10_000);
    }

    #[test]
    fn test_year_labels() {
        let t = projector().project(1.0, 1.0, 2);
        assert_eq!(t.year_labels(), vec!["Start", "Year 1", "Year 2"]);
        assert_eq!(t.final_gap(), 0);
    }

    #[test]
    fn test_reported_dollars_drop_cents() {
        let t = projector().project(85_000.0, 80_000.0, 2);
        // 85_000 × 1.03² = 90_176.5
        assert_eq!(t.male_trajectory()[2], 90_176);
        assert_eq!(dollars(-10.9), -10);
    }
}
