//! Static negotiation tips used when the knowledge store cannot answer.

use std::collections::HashMap;

use crate::negotiation::classifier::Category;

pub const DEFAULT_TIP: &str = "You deserve to be paid fairly for your work. Start by asking: \
    'What's the budgeted range for this role?' - this prevents lowball offers based on your \
    current pay. (Source: Harvard Business Review)";

const SALARY_TIPS: &[&str] = &[
    "Never reveal your current salary first. Ask 'What's the budgeted range for this role?' to anchor the negotiation. (Source: Harvard Business Review)",
    "Research market rates using Glassdoor, Levels.fyi, and Payscale before any negotiation. Data-driven requests are 3x more likely to succeed. (Source: Fearless Salary Negotiation)",
    "Use specific numbers like $127,000 instead of $130,000. Precise figures signal thorough research and are harder to negotiate down. (Source: Columbia Business School)",
];

const EQUITY_TIPS: &[&str] = &[
    "Request equity details in writing: vesting schedule, strike price, and percentage of fully-diluted shares - not just number of options. (Source: Holloway Guide to Equity Compensation)",
    "Ask: 'What was the valuation at the last funding round?' to determine if your equity offer is actually meaningful. (Source: Index Ventures)",
];

const BENEFITS_TIPS: &[&str] = &[
    "Negotiate family leave, remote flexibility, and professional development budgets - these often have more room than base salary. (Source: Lean In)",
    "Ask for a work-from-anywhere stipend ($500-1000/year) even if remote work is already standard. (Source: GitLab Remote Work Framework)",
];

const REJECTION_TIPS: &[&str] = &[
    "If they say 'no budget,' know that 80% of the time this is negotiable. Ask about signing bonuses, equity, or a 6-month salary review. (Source: Never Split the Difference)",
    "If they say no to salary, ask: 'What would need to happen to revisit this in 6 months?' Turn rejection into a roadmap. (Source: Ask a Manager)",
];

const CONFIDENCE_TIPS: &[&str] = &[
    "Use collaborative framing: 'I'm excited about this role. Based on my research, I'd like to discuss...' This reduces social backlash by 40%. (Source: Women Don't Ask)",
    "Practice your negotiation script out loud 3 times before the real conversation. Rehearsal reduces anxiety significantly. (Source: Stanford GSB)",
];

const GENERAL_TIPS: &[&str] = &[
    "Wait until you have a written offer before negotiating. A verbal 'we'd like to offer you...' is not an offer yet. (Source: Never Split the Difference)",
    "Document your wins quarterly in a 'brag document' with metrics. Concrete evidence is your strongest tool in any negotiation. (Source: Julia Evans)",
    "Negotiate within 2-3 business days of receiving an offer to show enthusiasm while maintaining leverage. (Source: Wharton School)",
    "You deserve to be paid fairly. Research shows women who negotiate their first salary earn over $1M more across their careers.",
    "If salary is 'maxed out,' ask for a signing bonus - it comes from a different budget pool and is often easier to approve. (Source: Never Split the Difference)",
];

/// Category → tips. Categories without an entry use the general list.
#[derive(Debug, Clone)]
pub struct TipTable {
    pub tips: HashMap<Category, Vec<String>>,
    pub default_tip: String,
}

impl Default for TipTable {
    fn default() -> Self {
        let tips = [
            (Category::Salary, SALARY_TIPS),
            (Category::Equity, EQUITY_TIPS),
            (Category::Benefits, BENEFITS_TIPS),
            (Category::Rejection, REJECTION_TIPS),
            (Category::Confidence, CONFIDENCE_TIPS),
            (Category::General, GENERAL_TIPS),
        ]
        .into_iter()
        .map(|(category, tips)| (category, tips.iter().map(|t| t.to_string()).collect()))
        .collect();

        Self {
            tips,
            default_tip: DEFAULT_TIP.to_string(),
        }
    }
}

impl TipTable {
    /// Candidate tips for a category, falling back to the general list.
    /// Empty only when both lists are missing or empty.
    pub fn candidates(&self, category: Category) -> &[String] {
        match self.tips.get(&category) {
            Some(tips) if !tips.is_empty() => tips.as_slice(),
            _ => self
                .tips
                .get(&Category::General)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_category_uses_its_own_tips() {
        let table = TipTable::default();
        assert_eq!(table.candidates(Category::Equity).len(), 2);
        assert!(table.candidates(Category::Equity)[0].contains("vesting"));
    }

    #[test]
    fn test_unlisted_category_uses_general_tips() {
        let table = TipTable::default();
        assert_eq!(
            table.candidates(Category::Timing),
            table.candidates(Category::General)
        );
        assert_eq!(table.candidates(Category::SigningBonus).len(), GENERAL_TIPS.len());
    }

    #[test]
    fn test_empty_table_has_no_candidates() {
        let table = TipTable {
            tips: HashMap::new(),
            default_tip: DEFAULT_TIP.to_string(),
        };
        assert!(table.candidates(Category::Salary).is_empty());
    }
}
