//! 客戶端模型：詢價、報價與訂單

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Day, OrderId, ProductId};

/// 客戶訂單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// 進行中
    Active,
    /// 已交貨
    Delivered,
    /// 已取消
    Canceled,
}

/// 客戶訂單
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOrder {
    /// 訂單ID（由模擬主機配發）
    pub order_id: OrderId,

    /// 產品ID
    pub product_id: ProductId,

    /// 訂購數量
    pub quantity: u32,

    /// 交貨期限（模擬日）
    pub due_date: Day,

    /// 成交單價
    pub unit_price: Decimal,

    /// 逾期罰金
    pub penalty: Decimal,

    /// 訂單狀態
    pub status: OrderStatus,
}

impl CustomerOrder {
    /// 創建新的客戶訂單
    pub fn new(order_id: OrderId, product_id: ProductId, quantity: u32, due_date: Day) -> Self {
        Self {
            order_id,
            product_id,
            quantity,
            due_date,
            unit_price: Decimal::ZERO,
            penalty: Decimal::ZERO,
            status: OrderStatus::Active,
        }
    }

    /// 建構器模式：設置成交單價
    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// 建構器模式：設置罰金
    pub fn with_penalty(mut self, penalty: Decimal) -> Self {
        self.penalty = penalty;
        self
    }

    /// 檢查是否仍在進行中
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    /// 標記為已交貨（僅限進行中的訂單）
    pub fn mark_delivered(&mut self) -> bool {
        self.transition(OrderStatus::Delivered)
    }

    /// 標記為已取消（僅限進行中的訂單）
    pub fn mark_canceled(&mut self) -> bool {
        self.transition(OrderStatus::Canceled)
    }

    // 終態訂單不可復活
    fn transition(&mut self, next: OrderStatus) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = next;
        true
    }
}

/// 客戶詢價（RFQ）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rfq {
    /// 詢價ID
    pub rfq_id: u32,

    /// 產品ID
    pub product_id: ProductId,

    /// 需求數量
    pub quantity: u32,

    /// 交貨期限
    pub due_date: Day,

    /// 客戶可接受的最高單價
    pub reserve_price_per_unit: Decimal,

    /// 逾期罰金
    pub penalty: Decimal,
}

impl Rfq {
    /// 創建新的詢價
    pub fn new(
        rfq_id: u32,
        product_id: ProductId,
        quantity: u32,
        due_date: Day,
        reserve_price_per_unit: Decimal,
        penalty: Decimal,
    ) -> Self {
        Self {
            rfq_id,
            product_id,
            quantity,
            due_date,
            reserve_price_per_unit,
            penalty,
        }
    }

    /// 距離交期的天數
    pub fn lead_time(&self, current_date: Day) -> Day {
        self.due_date - current_date
    }
}

/// 對客戶詢價的報價
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerOffer {
    /// 對應的詢價ID
    pub rfq_id: u32,

    /// 產品ID
    pub product_id: ProductId,

    /// 數量
    pub quantity: u32,

    /// 交貨期限
    pub due_date: Day,

    /// 報價單價
    pub unit_price: Decimal,
}

impl CustomerOffer {
    /// 依詢價與報價單價創建報價
    pub fn for_rfq(rfq: &Rfq, unit_price: Decimal) -> Self {
        Self {
            rfq_id: rfq.rfq_id,
            product_id: rfq.product_id,
            quantity: rfq.quantity,
            due_date: rfq.due_date,
            unit_price,
        }
    }

    /// 報價總額（超出可表示範圍時取上限）
    pub fn total_price(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}
