//! 訂單接收與零件採購規劃

use scm_core::{
    AgentConfig, CustomerOrder, Day, OutboundBatch, ProductCatalog, SupplierRfq,
    SupplierRfqLedgerPolicy,
};
use serde::Serialize;

use crate::{ComponentDemandLedger, DayWarning};

/// 訂單接收結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntakeSummary {
    /// 已計入需求帳的訂單數
    pub recorded_orders: usize,
    pub warnings: Vec<DayWarning>,
}

/// 採購規劃結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcurementSummary {
    /// 有正需求的零件數
    pub components_planned: usize,
    /// 暫存的零件詢價數
    pub rfqs_staged: usize,
    pub warnings: Vec<DayWarning>,
}

/// 採購規劃器
#[derive(Debug, Clone)]
pub struct ProcurementPlanner {
    ledger_policy: SupplierRfqLedgerPolicy,
    supplier_rfq_lead_days: Day,
}

impl ProcurementPlanner {
    /// 依配置創建規劃器
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            ledger_policy: config.supplier_rfq_ledger_policy,
            supplier_rfq_lead_days: config.supplier_rfq_lead_days,
        }
    }

    /// 將新確認的客戶訂單展開為零件需求
    pub fn intake(
        &self,
        orders: &[CustomerOrder],
        catalog: &ProductCatalog,
        ledger: &mut ComponentDemandLedger,
    ) -> IntakeSummary {
        let mut summary = IntakeSummary::default();

        for order in orders {
            match catalog.components_for_product(order.product_id) {
                Some(components) => {
                    ledger.add_component_demand(components, i64::from(order.quantity));
                    summary.recorded_orders += 1;
                    tracing::debug!(
                        "訂單 {} 計入零件需求：產品 {} × {}",
                        order.order_id,
                        order.product_id,
                        order.quantity
                    );
                }
                None => {
                    tracing::warn!(
                        "訂單 {} 的產品 {} 沒有 BOM，略過",
                        order.order_id,
                        order.product_id
                    );
                    summary.warnings.push(DayWarning::warning(
                        order.product_id,
                        format!("訂單 {} 的產品沒有 BOM", order.order_id),
                    ));
                }
            }
        }

        summary
    }

    /// 掃描需求帳，對每個正需求零件的所有合格供應商發出詢價
    ///
    /// 發出詢價的同時扣減需求帳，扣減方式由 `SupplierRfqLedgerPolicy` 決定。
    pub fn plan(
        &self,
        current_date: Day,
        catalog: &ProductCatalog,
        ledger: &mut ComponentDemandLedger,
        outbound: &mut OutboundBatch<SupplierRfq>,
    ) -> ProcurementSummary {
        let mut summary = ProcurementSummary::default();
        let due_date = current_date + self.supplier_rfq_lead_days;

        // 先取快照，走訪中才能修改需求帳
        let pending: Vec<_> = ledger.positive_entries().collect();

        for (component_id, quantity) in pending {
            let suppliers = match catalog.suppliers_for_product(component_id) {
                Ok(suppliers) => suppliers,
                Err(err) => {
                    // 型錄保證每個零件都有供應商，不應發生
                    tracing::error!("零件 {} 無法詢價：{}", component_id, err);
                    summary
                        .warnings
                        .push(DayWarning::error(component_id, err.to_string()));
                    continue;
                }
            };

            summary.components_planned += 1;
            let rfq_quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

            for supplier in suppliers {
                outbound.stage(SupplierRfq::new(
                    supplier.clone(),
                    component_id,
                    rfq_quantity,
                    due_date,
                ));
                summary.rfqs_staged += 1;

                if self.ledger_policy == SupplierRfqLedgerPolicy::PerSupplier {
                    ledger.add_demand(component_id, -i64::from(rfq_quantity));
                }
            }

            if self.ledger_policy == SupplierRfqLedgerPolicy::OncePerProduct {
                ledger.add_demand(component_id, -i64::from(rfq_quantity));
            }

            tracing::debug!(
                "零件 {} 詢價 {} 家供應商，數量 {}，需求帳餘額 {}",
                component_id,
                suppliers.len(),
                rfq_quantity,
                ledger.quantity(component_id)
            );
        }

        summary
    }
}
