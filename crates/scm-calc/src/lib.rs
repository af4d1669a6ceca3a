//! # SCM Calculation
//!
//! 每日決策策略：零件需求帳、報價、採購、供應商報價接受與訂單履行排程

pub mod acceptance;
pub mod bidding;
pub mod fulfillment;
pub mod ledger;
pub mod procurement;

// Re-export 主要類型
pub use acceptance::{AcceptanceSummary, OfferAcceptancePolicy};
pub use bidding::{BidDecision, BiddingPolicy, BiddingSummary, RejectReason};
pub use fulfillment::{
    candidate_actions, FulfillmentAction, FulfillmentOutcome, FulfillmentScheduler,
    ScheduleReport,
};
pub use ledger::ComponentDemandLedger;
pub use procurement::{IntakeSummary, ProcurementPlanner, ProcurementSummary};

use scm_core::ProductId;
use serde::Serialize;

/// 每日處理過程中的警告（不中斷處理）
#[derive(Debug, Clone, Serialize)]
pub struct DayWarning {
    pub product_id: ProductId,
    pub message: String,
    pub severity: WarningSeverity,
}

impl DayWarning {
    pub fn new(product_id: ProductId, message: String, severity: WarningSeverity) -> Self {
        Self {
            product_id,
            message,
            severity,
        }
    }

    pub fn warning(product_id: ProductId, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Warning)
    }

    pub fn error(product_id: ProductId, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Warning,
    Error,
}
