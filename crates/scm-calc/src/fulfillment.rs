//! 每日訂單履行排程
//!
//! 每天在當日所有訊息處理完後執行一次，對每張進行中的客戶訂單依優先順序嘗試：
//! 交貨 → 取消 → 以庫存預留 → 安排生產 → 延後。
//! 第一個成功的動作即為該訂單當日的結果；平台請求失敗時落到下一個較保守的動作，
//! 當日不重試。

use scm_core::{
    CustomerOrder, Day, FactorySchedule, FulfillmentPlatform, OrderId, OrderStatus,
    ProductCatalog, ProductId, ScmError, SimulationClock,
};
use serde::Serialize;

use crate::{ComponentDemandLedger, DayWarning};

/// 訂單當日的履行動作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FulfillmentAction {
    /// 交貨（訂單結案）
    Deliver,
    /// 取消逾期訂單並沖回零件需求
    Cancel,
    /// 以次日庫存預留整張訂單
    ReserveFromStock { quantity: u32 },
    /// 生產不足的數量，並預留既有庫存
    RequestProduction { quantity: u32, reserve: u32 },
    /// 今日無法處理，明日再評估
    Defer,
}

impl FulfillmentAction {
    /// 動作成功後訂單的狀態
    pub fn resulting_status(&self) -> OrderStatus {
        match self {
            FulfillmentAction::Deliver => OrderStatus::Delivered,
            FulfillmentAction::Cancel => OrderStatus::Canceled,
            _ => OrderStatus::Active,
        }
    }
}

/// 依優先順序列出訂單當日可嘗試的動作
///
/// 交貨窗口：`current_date >= due_date - 1` 且 `due_date >= latest_due_date`；
/// `due_date <= latest_due_date` 的訂單已無法準時交貨，只能取消。
pub fn candidate_actions(
    order: &CustomerOrder,
    inventory: u32,
    current_date: Day,
    latest_due_date: Day,
) -> Vec<FulfillmentAction> {
    let mut candidates = Vec::with_capacity(3);

    if current_date >= order.due_date - 1 && order.due_date >= latest_due_date {
        candidates.push(FulfillmentAction::Deliver);
    }

    if order.due_date <= latest_due_date {
        candidates.push(FulfillmentAction::Cancel);
        return candidates;
    }

    if inventory >= order.quantity {
        candidates.push(FulfillmentAction::ReserveFromStock {
            quantity: order.quantity,
        });
    } else {
        candidates.push(FulfillmentAction::RequestProduction {
            quantity: order.quantity - inventory,
            reserve: inventory,
        });
    }

    candidates.push(FulfillmentAction::Defer);
    candidates
}

/// 單張訂單的履行結果
#[derive(Debug, Clone, Serialize)]
pub struct FulfillmentOutcome {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub action: FulfillmentAction,
    pub status: OrderStatus,
}

/// 單日排程結果
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    /// 排程日
    pub date: Day,

    /// 當日作廢門檻
    pub latest_due_date: Day,

    /// 每張進行中訂單的結果
    pub outcomes: Vec<FulfillmentOutcome>,

    /// 送出的工廠排程
    pub schedule: FactorySchedule,

    pub warnings: Vec<DayWarning>,
}

impl ScheduleReport {
    fn count(&self, predicate: impl Fn(&FulfillmentAction) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.action)).count()
    }

    pub fn delivered(&self) -> usize {
        self.count(|a| *a == FulfillmentAction::Deliver)
    }

    pub fn canceled(&self) -> usize {
        self.count(|a| *a == FulfillmentAction::Cancel)
    }

    pub fn reserved(&self) -> usize {
        self.count(|a| matches!(a, FulfillmentAction::ReserveFromStock { .. }))
    }

    pub fn produced(&self) -> usize {
        self.count(|a| matches!(a, FulfillmentAction::RequestProduction { .. }))
    }

    pub fn deferred(&self) -> usize {
        self.count(|a| *a == FulfillmentAction::Defer)
    }

    /// 查詢某張訂單的結果
    pub fn outcome(&self, order_id: OrderId) -> Option<&FulfillmentOutcome> {
        self.outcomes.iter().find(|o| o.order_id == order_id)
    }
}

/// 訂單履行排程器
#[derive(Debug, Clone, Default)]
pub struct FulfillmentScheduler {
    last_run: Option<Day>,
}

impl FulfillmentScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次執行的模擬日
    pub fn last_run(&self) -> Option<Day> {
        self.last_run
    }

    /// 清除執行紀錄（新賽局開始時）
    pub fn reset(&mut self) {
        self.last_run = None;
    }

    /// 對所有進行中訂單執行當日排程，並送出工廠排程
    ///
    /// 同一模擬日只能執行一次。
    pub fn run<P: FulfillmentPlatform + ?Sized>(
        &mut self,
        clock: &SimulationClock,
        catalog: &ProductCatalog,
        ledger: &mut ComponentDemandLedger,
        platform: &mut P,
    ) -> scm_core::Result<ScheduleReport> {
        let current_date = clock.current_date;
        if self.last_run == Some(current_date) {
            return Err(ScmError::DayAlreadyScheduled(current_date));
        }
        self.last_run = Some(current_date);

        let latest_due_date = clock.latest_due_date();
        let orders = platform.active_orders();
        let mut outcomes = Vec::with_capacity(orders.len());
        let mut warnings = Vec::new();

        tracing::debug!(
            "第 {} 天排程：進行中訂單 {} 張，作廢門檻 {}",
            current_date,
            orders.len(),
            latest_due_date
        );

        for order in &orders {
            // 每張訂單都重新讀取次日庫存，前面訂單的預留已反映在內
            let inventory = platform.inventory_for_next_day(order.product_id);
            let candidates = candidate_actions(order, inventory, current_date, latest_due_date);

            let mut action = FulfillmentAction::Defer;
            for candidate in candidates {
                let executed = Self::execute(
                    candidate,
                    order,
                    clock,
                    catalog,
                    ledger,
                    platform,
                    &mut warnings,
                );
                if executed {
                    action = candidate;
                    break;
                }
            }

            tracing::debug!(
                "訂單 {}（產品 {} × {}，交期 {}，庫存 {}）→ {:?}",
                order.order_id,
                order.product_id,
                order.quantity,
                order.due_date,
                inventory,
                action
            );

            outcomes.push(FulfillmentOutcome {
                order_id: order.order_id,
                product_id: order.product_id,
                action,
                status: action.resulting_status(),
            });
        }

        let schedule = platform.send_factory_schedules(current_date);

        let report = ScheduleReport {
            date: current_date,
            latest_due_date,
            outcomes,
            schedule,
            warnings,
        };

        tracing::info!(
            "第 {} 天排程完成：交貨 {}，取消 {}，預留 {}，生產 {}，延後 {}",
            current_date,
            report.delivered(),
            report.canceled(),
            report.reserved(),
            report.produced(),
            report.deferred()
        );

        Ok(report)
    }

    /// 執行單一動作，回傳是否成功
    fn execute<P: FulfillmentPlatform + ?Sized>(
        action: FulfillmentAction,
        order: &CustomerOrder,
        clock: &SimulationClock,
        catalog: &ProductCatalog,
        ledger: &mut ComponentDemandLedger,
        platform: &mut P,
        warnings: &mut Vec<DayWarning>,
    ) -> bool {
        match action {
            FulfillmentAction::Deliver => platform.add_delivery_request(order.order_id),

            FulfillmentAction::Cancel => {
                if !platform.cancel_order(order.order_id) {
                    return false;
                }
                tracing::info!(
                    "取消逾期訂單 {}（交期 {}，今日 {}）",
                    order.order_id,
                    order.due_date,
                    clock.current_date
                );

                // 訂單取消後，其零件需求不再需要
                match catalog.components_for_product(order.product_id) {
                    Some(components) => {
                        ledger.add_component_demand(components, -i64::from(order.quantity));
                    }
                    None => {
                        tracing::warn!(
                            "取消訂單 {} 時找不到產品 {} 的 BOM",
                            order.order_id,
                            order.product_id
                        );
                        warnings.push(DayWarning::warning(
                            order.product_id,
                            format!("取消訂單 {} 時無法沖回零件需求", order.order_id),
                        ));
                    }
                }
                true
            }

            FulfillmentAction::ReserveFromStock { quantity } => {
                platform.reserve_inventory_for_next_day(order.product_id, quantity)
            }

            FulfillmentAction::RequestProduction { quantity, reserve } => {
                if !platform.add_production_request(order.product_id, quantity) {
                    return false;
                }
                // 既有庫存與新生產合併滿足此訂單，既有庫存必須預留
                if reserve > 0
                    && !platform.reserve_inventory_for_next_day(order.product_id, reserve)
                {
                    tracing::warn!(
                        "訂單 {} 已安排生產，但預留既有庫存 {} 失敗",
                        order.order_id,
                        reserve
                    );
                    warnings.push(DayWarning::warning(
                        order.product_id,
                        format!("訂單 {} 預留既有庫存失敗", order.order_id),
                    ));
                }
                true
            }

            FulfillmentAction::Defer => true,
        }
    }
}
