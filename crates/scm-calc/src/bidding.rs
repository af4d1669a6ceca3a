//! 客戶詢價報價策略

use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use scm_core::{AgentConfig, CustomerOffer, Day, OutboundBatch, ProductCatalog, Rfq};
use serde::Serialize;

use crate::DayWarning;

/// 不報價的原因
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RejectReason {
    /// 交期太近，來不及生產
    InsufficientLeadTime { lead_time: Day },
    /// 交期晚於最後可報價日
    BeyondLastBidDueDate { last_bid_due_date: Day },
    /// 型錄中沒有此產品
    UnknownProduct,
    /// 預期利潤相對罰金太低
    BelowRiskThreshold { profit: Decimal },
    /// 預期利潤超出可表示範圍
    ProfitOverflow,
}

/// 單筆詢價的報價決策
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BidDecision {
    Bid(CustomerOffer),
    Reject(RejectReason),
}

impl BidDecision {
    pub fn is_bid(&self) -> bool {
        matches!(self, BidDecision::Bid(_))
    }
}

/// 單日報價結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct BiddingSummary {
    /// 評估的詢價數
    pub evaluated: usize,
    /// 暫存的報價數
    pub offers: usize,
    /// 暫存報價的總金額
    pub offered_value: Decimal,
    /// 未報價的詢價（詢價ID, 原因）
    pub rejections: Vec<(u32, RejectReason)>,
    pub warnings: Vec<DayWarning>,
}

/// 報價策略
///
/// 每筆詢價獨立評估，評估順序不影響結果（隨機數序列除外）。
#[derive(Debug, Clone)]
pub struct BiddingPolicy {
    price_discount_factor: Decimal,
    risk_threshold: Decimal,
    min_lead_time_days: Day,
    last_bid_due_date: Day,
}

impl BiddingPolicy {
    /// 依配置與最後可報價交期創建策略
    pub fn new(config: &AgentConfig, last_bid_due_date: Day) -> Self {
        Self {
            price_discount_factor: config.price_discount_factor,
            risk_threshold: config.risk_threshold,
            min_lead_time_days: config.min_lead_time_days,
            last_bid_due_date,
        }
    }

    pub fn last_bid_due_date(&self) -> Day {
        self.last_bid_due_date
    }

    /// 評估單筆詢價
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        rfq: &Rfq,
        current_date: Day,
        catalog: &ProductCatalog,
        rng: &mut R,
    ) -> BidDecision {
        let lead_time = rfq.lead_time(current_date);
        if lead_time < self.min_lead_time_days {
            return BidDecision::Reject(RejectReason::InsufficientLeadTime { lead_time });
        }
        if rfq.due_date > self.last_bid_due_date {
            return BidDecision::Reject(RejectReason::BeyondLastBidDueDate {
                last_bid_due_date: self.last_bid_due_date,
            });
        }

        let cost = match catalog.product_base_price(rfq.product_id) {
            Some(cost) => cost,
            None => return BidDecision::Reject(RejectReason::UnknownProduct),
        };

        let draw: f64 = rng.gen();
        let offered_price = self.offered_price(
            rfq.reserve_price_per_unit,
            Decimal::from_f64(draw).unwrap_or(Decimal::ZERO),
        );

        let profit = match offered_price
            .checked_sub(cost)
            .and_then(|margin| margin.checked_mul(Decimal::from(rfq.quantity)))
        {
            Some(profit) => profit,
            None => return BidDecision::Reject(RejectReason::ProfitOverflow),
        };
        if !self.passes_risk_threshold(profit, rfq.penalty) {
            return BidDecision::Reject(RejectReason::BelowRiskThreshold { profit });
        }

        BidDecision::Bid(CustomerOffer::for_rfq(rfq, offered_price))
    }

    /// 報價單價 = trunc(保留價 × (1 - r × 折扣係數))，r ∈ [0, 1)
    pub fn offered_price(&self, reserve_price: Decimal, r: Decimal) -> Decimal {
        (reserve_price * (Decimal::ONE - r * self.price_discount_factor)).trunc()
    }

    /// 預期利潤 / 罰金 > 風險門檻
    ///
    /// 罰金為 0 或比值超出可表示範圍時，只要求利潤為正。
    pub fn passes_risk_threshold(&self, profit: Decimal, penalty: Decimal) -> bool {
        match profit.checked_div(penalty) {
            Some(ratio) => ratio > self.risk_threshold,
            None => profit > Decimal::ZERO,
        }
    }

    /// 評估當日全部詢價，報價暫存到 outbound 等待一次送出
    pub fn evaluate_bundle<R: Rng + ?Sized>(
        &self,
        rfqs: &[Rfq],
        current_date: Day,
        catalog: &ProductCatalog,
        rng: &mut R,
        outbound: &mut OutboundBatch<CustomerOffer>,
    ) -> BiddingSummary {
        let mut summary = BiddingSummary::default();

        for rfq in rfqs {
            summary.evaluated += 1;
            match self.evaluate(rfq, current_date, catalog, rng) {
                BidDecision::Bid(offer) => {
                    tracing::debug!(
                        "報價：詢價 {} 產品 {} 數量 {} 單價 {}（保留價 {}）",
                        rfq.rfq_id,
                        rfq.product_id,
                        rfq.quantity,
                        offer.unit_price,
                        rfq.reserve_price_per_unit
                    );
                    summary.offers += 1;
                    summary.offered_value =
                        summary.offered_value.saturating_add(offer.total_price());
                    outbound.stage(offer);
                }
                BidDecision::Reject(reason) => {
                    if reason == RejectReason::UnknownProduct {
                        tracing::warn!(
                            "詢價 {} 的產品 {} 不在型錄中",
                            rfq.rfq_id,
                            rfq.product_id
                        );
                        summary.warnings.push(DayWarning::warning(
                            rfq.product_id,
                            format!("詢價 {} 的產品不在型錄中", rfq.rfq_id),
                        ));
                    }
                    summary.rejections.push((rfq.rfq_id, reason));
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;
    use scm_core::ProductSpec;

    fn catalog() -> ProductCatalog {
        ProductCatalog::new().with_product(ProductSpec::new(
            1,
            Decimal::from(1000),
            vec![100, 200],
        ))
    }

    fn policy() -> BiddingPolicy {
        // 賽局 220 天，最後可報價交期 218
        BiddingPolicy::new(&AgentConfig::default(), 218)
    }

    fn rfq(due_date: Day, reserve: i64, quantity: u32, penalty: i64) -> Rfq {
        Rfq::new(
            1,
            1,
            quantity,
            due_date,
            Decimal::from(reserve),
            Decimal::from(penalty),
        )
    }

    // r = 0，報價等於保留價
    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[rstest]
    #[case(10, 15, false)] // 交期 5 天
    #[case(10, 16, true)] // 交期 6 天，剛好可報價
    #[case(10, 218, true)] // 最後可報價日
    #[case(10, 219, false)] // 超過最後可報價日
    fn test_lead_time_window(#[case] today: Day, #[case] due: Day, #[case] expect_bid: bool) {
        let decision = policy().evaluate(&rfq(due, 2000, 10, 100), today, &catalog(), &mut zero_rng());

        assert_eq!(decision.is_bid(), expect_bid);
    }

    #[test]
    fn test_reject_reasons() {
        let policy = policy();

        assert_eq!(
            policy.evaluate(&rfq(12, 2000, 10, 100), 10, &catalog(), &mut zero_rng()),
            BidDecision::Reject(RejectReason::InsufficientLeadTime { lead_time: 2 })
        );
        assert_eq!(
            policy.evaluate(&rfq(219, 2000, 10, 100), 10, &catalog(), &mut zero_rng()),
            BidDecision::Reject(RejectReason::BeyondLastBidDueDate {
                last_bid_due_date: 218
            })
        );

        let unknown = Rfq::new(2, 9, 10, 30, Decimal::from(2000), Decimal::from(100));
        assert_eq!(
            policy.evaluate(&unknown, 10, &catalog(), &mut zero_rng()),
            BidDecision::Reject(RejectReason::UnknownProduct)
        );
    }

    #[test]
    fn test_offered_price_discount() {
        let policy = policy();

        // 2000 × (1 - 0.5 × 0.2) = 1800
        assert_eq!(
            policy.offered_price(Decimal::from(2000), Decimal::new(5, 1)),
            Decimal::from(1800)
        );
        // 小數部分捨去：1999 × 0.9 = 1799.1
        assert_eq!(
            policy.offered_price(Decimal::from(1999), Decimal::new(5, 1)),
            Decimal::from(1799)
        );
    }

    #[test]
    fn test_risk_threshold() {
        let policy = policy();

        // 利潤 (1100 - 1000) × 1 = 100，罰金 1000，比值 0.1 不大於門檻
        let decision = policy.evaluate(&rfq(20, 1100, 1, 1000), 10, &catalog(), &mut zero_rng());
        assert_eq!(
            decision,
            BidDecision::Reject(RejectReason::BelowRiskThreshold {
                profit: Decimal::from(100)
            })
        );

        // 罰金 999，比值略大於 0.1
        let decision = policy.evaluate(&rfq(20, 1100, 1, 999), 10, &catalog(), &mut zero_rng());
        assert!(decision.is_bid());
    }

    #[test]
    fn test_zero_penalty_requires_positive_profit() {
        let policy = policy();

        assert!(policy.passes_risk_threshold(Decimal::from(1), Decimal::ZERO));
        assert!(!policy.passes_risk_threshold(Decimal::ZERO, Decimal::ZERO));
        assert!(!policy.passes_risk_threshold(Decimal::from(-5), Decimal::ZERO));
    }

    #[rstest]
    #[case::tiny_penalty_with_profit(Decimal::from(2000), 100, Decimal::new(1, 26), None)]
    #[case::tiny_penalty_with_loss(
        Decimal::from(900),
        100,
        Decimal::new(1, 26),
        Some(RejectReason::BelowRiskThreshold { profit: Decimal::from(-10000) })
    )]
    #[case::profit_overflow(
        Decimal::from(u64::MAX) * Decimal::from(1000),
        u32::MAX,
        Decimal::from(100),
        Some(RejectReason::ProfitOverflow)
    )]
    fn test_extreme_amounts_do_not_panic(
        #[case] reserve: Decimal,
        #[case] quantity: u32,
        #[case] penalty: Decimal,
        #[case] expected_reject: Option<RejectReason>,
    ) {
        let rfq = Rfq::new(1, 1, quantity, 30, reserve, penalty);

        let decision = policy().evaluate(&rfq, 10, &catalog(), &mut zero_rng());

        match expected_reject {
            Some(reason) => assert_eq!(decision, BidDecision::Reject(reason)),
            None => assert!(decision.is_bid()),
        }
    }

    #[test]
    fn test_bundle_stages_offers() {
        let policy = policy();
        let rfqs = vec![
            rfq(20, 2000, 10, 100),
            rfq(12, 2000, 10, 100),
            Rfq::new(3, 1, 5, 30, Decimal::from(1900), Decimal::from(50)),
        ];
        let mut outbound = OutboundBatch::new();

        let summary = policy.evaluate_bundle(&rfqs, 10, &catalog(), &mut zero_rng(), &mut outbound);

        assert_eq!(summary.evaluated, 3);
        assert_eq!(summary.offers, 2);
        assert_eq!(summary.offered_value, Decimal::from(29500));
        assert_eq!(summary.rejections.len(), 1);
        assert_eq!(outbound.len(), 2);
        assert_eq!(outbound.staged()[1].rfq_id, 3);
    }

    #[test]
    fn test_same_seed_same_prices() {
        let policy = policy();
        let rfqs: Vec<Rfq> = (0..20)
            .map(|i| Rfq::new(i, 1, 10, 30, Decimal::from(2500), Decimal::from(100)))
            .collect();

        let mut first = OutboundBatch::new();
        let mut second = OutboundBatch::new();
        policy.evaluate_bundle(&rfqs, 10, &catalog(), &mut StdRng::seed_from_u64(7), &mut first);
        policy.evaluate_bundle(&rfqs, 10, &catalog(), &mut StdRng::seed_from_u64(7), &mut second);

        assert_eq!(first.flush(), second.flush());
    }

    proptest! {
        #[test]
        fn prop_no_bid_outside_window(today in 0i32..220, offset in -10i32..6, seed in any::<u64>()) {
            let policy = policy();
            let decision = policy.evaluate(
                &rfq(today + offset, 5000, 10, 10),
                today,
                &catalog(),
                &mut StdRng::seed_from_u64(seed),
            );
            prop_assert!(!decision.is_bid());
        }

        #[test]
        fn prop_bid_price_within_reserve(
            reserve in 0i64..10_000,
            quantity in 1u32..500,
            penalty in 0i64..5_000,
            seed in any::<u64>(),
        ) {
            let policy = policy();
            let decision = policy.evaluate(
                &rfq(30, reserve, quantity, penalty),
                10,
                &catalog(),
                &mut StdRng::seed_from_u64(seed),
            );
            if let BidDecision::Bid(offer) = decision {
                prop_assert!(offer.unit_price >= Decimal::ZERO);
                prop_assert!(offer.unit_price <= Decimal::from(reserve));
            }
        }
    }
}
