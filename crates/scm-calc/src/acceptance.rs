//! 供應商報價接受策略

use rust_decimal::Decimal;
use scm_core::{OutboundBatch, SupplierOffer, SupplierOrder};
use serde::Serialize;

/// 報價接受結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct AcceptanceSummary {
    /// 轉為採購單的報價數
    pub accepted: usize,
    /// 僅報價參考（數量 0）而略過的報價數
    pub skipped_quotes: usize,
    /// 採購單總金額
    pub committed_cost: Decimal,
}

/// 供應商報價接受策略
///
/// 供應商的報價依「部分 → 完整」排列，而平台對同一報價只接受第一張採購單，
/// 因此反向走訪，讓完整報價優先成交。
pub struct OfferAcceptancePolicy;

impl OfferAcceptancePolicy {
    /// 選出要下單的報價（反向順序，略過數量為 0 的報價）
    pub fn select(offers: &[SupplierOffer]) -> Vec<SupplierOrder> {
        offers
            .iter()
            .rev()
            .filter(|offer| offer.is_orderable())
            .map(SupplierOrder::from_offer)
            .collect()
    }

    /// 將一家供應商的報價轉為採購單並暫存
    pub fn stage(
        offers: &[SupplierOffer],
        outbound: &mut OutboundBatch<SupplierOrder>,
    ) -> AcceptanceSummary {
        let orders = Self::select(offers);
        let mut summary = AcceptanceSummary {
            accepted: orders.len(),
            skipped_quotes: offers.len() - orders.len(),
            committed_cost: Decimal::ZERO,
        };

        for order in orders {
            summary.committed_cost = summary.committed_cost.saturating_add(order.total_cost());
            tracing::debug!(
                "下單：供應商 {} 報價 {} 零件 {} × {}",
                order.supplier,
                order.offer_id,
                order.product_id,
                order.quantity
            );
            outbound.stage(order);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(offer_id: u32, quantity: u32) -> SupplierOffer {
        SupplierOffer::new(offer_id, "pintel".to_string(), 100, quantity, Decimal::from(90), 6)
    }

    #[test]
    fn test_reverse_order_and_skip_quotes() {
        // 部分報價、價格參考、完整報價
        let offers = vec![offer(1, 40), offer(2, 0), offer(3, 100)];

        let orders = OfferAcceptancePolicy::select(&offers);

        let ids: Vec<u32> = orders.iter().map(|o| o.offer_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_stage_summary() {
        let offers = vec![offer(1, 0), offer(2, 0), offer(3, 25)];
        let mut outbound = OutboundBatch::new();

        let summary = OfferAcceptancePolicy::stage(&offers, &mut outbound);

        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.skipped_quotes, 2);
        assert_eq!(summary.committed_cost, Decimal::from(2250));
        assert_eq!(outbound.staged()[0].quantity, 25);
    }

    #[test]
    fn test_empty_bundle() {
        let mut outbound = OutboundBatch::new();

        let summary = OfferAcceptancePolicy::stage(&[], &mut outbound);

        assert_eq!(summary.accepted, 0);
        assert_eq!(summary.committed_cost, Decimal::ZERO);
        assert!(outbound.is_empty());
    }
}
