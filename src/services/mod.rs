pub mod group_service;
pub mod ledger_service;
pub mod summary_service;

pub use group_service::{GroupPatch, GroupService};
pub use ledger_service::{HistoryPatch, LedgerService};
pub use summary_service::{LedgerSummary, SummaryService, TagDistribution};
