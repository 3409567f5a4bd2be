//! Keyword classifier mapping a free-text message to a tip category.
//!
//! Rules are evaluated in order and the first match wins. Keyword sets overlap
//! ("maxed out" is about a signing bonus even though the message talks about
//! pay), so the order of `RULES` is part of the contract.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Salary,
    Equity,
    Benefits,
    Rejection,
    Confidence,
    Timing,
    SigningBonus,
    Promotion,
    Counteroffer,
    General,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Salary,
        Category::Equity,
        Category::Benefits,
        Category::Rejection,
        Category::Confidence,
        Category::Timing,
        Category::SigningBonus,
        Category::Promotion,
        Category::Counteroffer,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Equity => "equity",
            Category::Benefits => "benefits",
            Category::Rejection => "rejection",
            Category::Confidence => "confidence",
            Category::Timing => "timing",
            Category::SigningBonus => "signing_bonus",
            Category::Promotion => "promotion",
            Category::Counteroffer => "counteroffer",
            Category::General => "general",
        }
    }
}

pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub category: Category,
}

/// Priority-ordered rules. Do not reorder.
pub const RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &[
            "no budget", "reject", "said no", "declined", "can't", "won't", "refused", "pushback",
        ],
        category: Category::Rejection,
    },
    KeywordRule {
        keywords: &["equity", "stock", "options", "vesting", "shares", "rsu"],
        category: Category::Equity,
    },
    KeywordRule {
        keywords: &[
            "benefit", "remote", "leave", "pto", "flexibility", "perks", "vacation", "wfh",
        ],
        category: Category::Benefits,
    },
    KeywordRule {
        keywords: &[
            "confident", "nervous", "scared", "afraid", "anxiety", "worried", "uncomfortable",
        ],
        category: Category::Confidence,
    },
    KeywordRule {
        keywords: &["when", "timing", "wait", "how soon", "deadline", "days"],
        category: Category::Timing,
    },
    KeywordRule {
        keywords: &["signing bonus", "sign-on", "one-time", "lump sum", "maxed out"],
        category: Category::SigningBonus,
    },
    KeywordRule {
        keywords: &["promotion", "promoted", "advance", "title", "level up", "brag doc"],
        category: Category::Promotion,
    },
    KeywordRule {
        keywords: &["counter", "counteroffer", "current employer", "match", "retain"],
        category: Category::Counteroffer,
    },
    KeywordRule {
        keywords: &[
            "salary", "pay", "compensation", "raise", "money", "offer", "underpaid", "lowball",
        ],
        category: Category::Salary,
    },
];

pub fn classify(message: &str) -> Category {
    let message = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| message.contains(kw)))
        .map(|rule| rule.category)
        .unwrap_or(Category::General)
}
