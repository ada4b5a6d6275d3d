use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::{Document, NeedTag};

/// Per-tag record counts across the ledger. Tags with no records report zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagDistribution {
    pub gerekli: usize,
    pub fuzuli: usize,
    pub zorunlu: usize,
}

impl TagDistribution {
    pub fn count(&self, tag: NeedTag) -> usize {
        match tag {
            NeedTag::Gerekli => self.gerekli,
            NeedTag::Fuzuli => self.fuzuli,
            NeedTag::Zorunlu => self.zorunlu,
        }
    }
}

/// Derived display snapshot of the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerSummary {
    pub total: f64,
    pub record_count: usize,
    pub distribution: TagDistribution,
    pub last_reset_at: Option<DateTime<Utc>>,
}

/// Read-only aggregations over the committed history.
pub struct SummaryService;

impl SummaryService {
    /// Sum of every committed delta: the displayed pool total.
    pub fn total(doc: &Document) -> f64 {
        doc.history.iter().map(|record| record.delta).sum()
    }

    /// Counts committed records per need tag.
    pub fn tag_distribution(doc: &Document) -> TagDistribution {
        let mut distribution = TagDistribution::default();
        for record in &doc.history {
            match record.need {
                NeedTag::Gerekli => distribution.gerekli += 1,
                NeedTag::Fuzuli => distribution.fuzuli += 1,
                NeedTag::Zorunlu => distribution.zorunlu += 1,
            }
        }
        distribution
    }

    pub fn summarize(doc: &Document) -> LedgerSummary {
        LedgerSummary {
            total: Self::total(doc),
            record_count: doc.history.len(),
            distribution: Self::tag_distribution(doc),
            last_reset_at: doc.last_reset_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_zero_on_empty_history() {
        assert_eq!(SummaryService::total(&Document::starter()), 0.0);
    }
}
