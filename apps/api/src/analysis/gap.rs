//! Market gap verdict for a single salary.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Underpaid,
    FairRate,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underpaid => "UNDERPAID",
            Verdict::FairRate => "FAIR RATE",
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapEvaluation {
    pub verdict: Verdict,
    pub gap_amount: i64,
    pub market_average: i64,
    pub message: String,
}

/// Compares a salary against a market average.
///
/// Negative or non-finite salaries are treated as 0. Equal salary is a fair rate.
pub fn evaluate_gap(current_salary: f64, market_average: i64) -> GapEvaluation {
    let current = if current_salary.is_finite() {
        current_salary.max(0.0)
    } else {
        0.0
    };
    let market = market_average.max(0);

    let gap = (market as f64 - current).max(0.0);
    let gap_amount = gap as i64;
    let verdict = if gap > 0.0 {
        Verdict::Underpaid
    } else {
        Verdict::FairRate
    };

    let message = match verdict {
        Verdict::Underpaid => format!(
            "You are leaving ${} on the table.",
            format_dollars(gap_amount)
        ),
        Verdict::FairRate => {
            "Your salary is competitive with market rates. Keep negotiating to stay ahead!"
                .to_string()
        }
    };

    GapEvaluation {
        verdict,
        gap_amount,
        market_average: market,
        message,
    }
}

/// Formats whole dollars with thousands separators: `1234567` → `1,234,567`.
pub fn format_dollars(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
