use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::SourceError;
use crate::negotiation::classifier::{classify, Category};
use crate::negotiation::store::TipStore;
use crate::negotiation::tips::TipTable;
use crate::resolution::{resolve, Provenance};

const SOURCE: &str = "knowledge store";

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedTip {
    pub text: String,
    pub category: Category,
    pub provenance: Provenance,
}

/// Picks one actionable tip for a message. Never fails and never returns an
/// empty string.
#[derive(Clone)]
pub struct TipSelector {
    store: Option<Arc<dyn TipStore>>,
    table: Arc<TipTable>,
    timeout: Duration,
}

impl TipSelector {
    pub fn new(store: Option<Arc<dyn TipStore>>, table: Arc<TipTable>, timeout: Duration) -> Self {
        Self {
            store,
            table,
            timeout,
        }
    }

    /// Classifies `message`, gathers candidates (store first, then the table)
    /// and draws one uniformly from `rng`.
    pub async fn select<R: Rng + Send>(&self, message: &str, rng: &mut R) -> SelectedTip {
        let category = classify(message);
        let filter = (category != Category::General).then_some(category);

        let live = async {
            let store = self
                .store
                .as_ref()
                .ok_or(SourceError::Unconfigured(SOURCE))?;
            let docs = store.find_tips(filter).await?;
            let candidates: Vec<String> = docs.iter().map(|d| d.attributed()).collect();
            if candidates.is_empty() {
                return Err(SourceError::NoData);
            }
            Ok(candidates)
        };

        let resolved = resolve(SOURCE, self.timeout, live, || {
            self.table.candidates(category).to_vec()
        })
        .await;

        let text = resolved
            .value
            .choose(rng)
            .filter(|tip| !tip.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| self.table.default_tip.clone());

        SelectedTip {
            text,
            category,
            provenance: resolved.provenance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::negotiation::store::TipDocument;
    use crate::negotiation::tips::DEFAULT_TIP;

    const TIMEOUT: Duration = Duration::from_secs(15);

    struct FixedStore {
        docs: Vec<TipDocument>,
    }

    #[async_trait]
    impl TipStore for FixedStore {
        async fn find_tips(
            &self,
            category: Option<Category>,
        ) -> Result<Vec<TipDocument>, SourceError> {
            // only equity tips are stored
            match category {
                Some(Category::Equity) | None => Ok(self.docs.clone()),
                Some(_) => Ok(vec![]),
            }
        }
    }

    struct DownStore;

    #[async_trait]
    impl TipStore for DownStore {
        async fn find_tips(
            &self,
            _category: Option<Category>,
        ) -> Result<Vec<TipDocument>, SourceError> {
            Err(SourceError::Unavailable("connection refused".into()))
        }
    }

    fn equity_store() -> Arc<dyn TipStore> {
        Arc::new(FixedStore {
            docs: vec![TipDocument {
                tip: "Ask for the 409A valuation.".to_string(),
                source: Some("Carta".to_string()),
            }],
        })
    }

    fn table() -> Arc<TipTable> {
        Arc::new(TipTable::default())
    }

    #[tokio::test]
    async fn test_live_tip_carries_attribution() {
        let selector = TipSelector::new(Some(equity_store()), table(), TIMEOUT);
        let tip = selector
            .select("what about my stock options?", &mut StdRng::seed_from_u64(1))
            .await;
        assert_eq!(tip.text, "Ask for the 409A valuation. (Source: Carta)");
        assert_eq!(tip.category, Category::Equity);
        assert_eq!(tip.provenance, Provenance::Live);
    }

    #[tokio::test]
    async fn test_empty_store_result_falls_back_to_table() {
        let selector = TipSelector::new(Some(equity_store()), table(), TIMEOUT);
        let tip = selector
            .select("they said no", &mut StdRng::seed_from_u64(1))
            .await;
        assert_eq!(tip.category, Category::Rejection);
        assert_eq!(tip.provenance, Provenance::Fallback);
        assert!(TipTable::default()
            .candidates(Category::Rejection)
            .contains(&tip.text));
    }

    #[tokio::test]
    async fn test_unreachable_store_falls_back() {
        let selector = TipSelector::new(Some(Arc::new(DownStore)), table(), TIMEOUT);
        let tip = selector
            .select("I'm nervous", &mut StdRng::seed_from_u64(3))
            .await;
        assert_eq!(tip.provenance, Provenance::Fallback);
        assert!(tip.text.contains("Source"));
    }

    #[tokio::test]
    async fn test_seeded_selection_is_reproducible() {
        let selector = TipSelector::new(None, table(), TIMEOUT);
        let first = selector.select("", &mut StdRng::seed_from_u64(42)).await;
        let second = selector.select("", &mut StdRng::seed_from_u64(42)).await;
        assert_eq!(first, second);

        let mut rng = StdRng::seed_from_u64(42);
        let expected = TipTable::default().candidates(Category::General).choose(&mut rng).cloned();
        assert_eq!(Some(first.text), expected);
    }

    #[tokio::test]
    async fn test_empty_table_returns_default_tip() {
        let empty = Arc::new(TipTable {
            tips: HashMap::new(),
            default_tip: DEFAULT_TIP.to_string(),
        });
        let selector = TipSelector::new(None, empty, TIMEOUT);
        let tip = selector.select("salary?", &mut StdRng::seed_from_u64(0)).await;
        assert_eq!(tip.text, DEFAULT_TIP);
    }

    #[tokio::test]
    async fn test_selection_is_total_over_odd_inputs() {
        let selector = TipSelector::new(Some(Arc::new(DownStore)), table(), TIMEOUT);
        let mut rng = StdRng::seed_from_u64(9);
        for message in ["", "   ", "ñ 日本語 🚀", "zzzz", "MAXED OUT", "\u{0}"] {
            let tip = selector.select(message, &mut rng).await;
            assert!(!tip.text.trim().is_empty(), "empty tip for {message:?}");
        }
    }
}
