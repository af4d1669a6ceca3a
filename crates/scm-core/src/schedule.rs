//! 工廠排程模型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Day, OrderId, ProductId};

/// 生產請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRequest {
    /// 請求ID
    pub id: Uuid,

    /// 產品ID
    pub product_id: ProductId,

    /// 生產數量
    pub quantity: u32,

    /// 佔用的工廠產能（週期數）
    pub cycles: u32,
}

impl ProductionRequest {
    /// 創建新的生產請求
    pub fn new(product_id: ProductId, quantity: u32, cycles: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            cycles,
        }
    }
}

/// 交貨請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    /// 請求ID
    pub id: Uuid,

    /// 客戶訂單ID
    pub order_id: OrderId,

    /// 產品ID
    pub product_id: ProductId,

    /// 交貨數量
    pub quantity: u32,
}

impl DeliveryRequest {
    /// 創建新的交貨請求
    pub fn new(order_id: OrderId, product_id: ProductId, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            quantity,
        }
    }
}

/// 單日工廠排程（生產與交貨一併送出）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactorySchedule {
    /// 排程日
    pub date: Day,

    /// 生產請求
    pub production: Vec<ProductionRequest>,

    /// 交貨請求
    pub deliveries: Vec<DeliveryRequest>,
}

impl FactorySchedule {
    /// 創建空的排程
    pub fn new(date: Day) -> Self {
        Self {
            date,
            production: Vec::new(),
            deliveries: Vec::new(),
        }
    }

    /// 檢查是否為空排程
    pub fn is_empty(&self) -> bool {
        self.production.is_empty() && self.deliveries.is_empty()
    }

    /// 佔用的總產能
    pub fn total_cycles(&self) -> u32 {
        self.production.iter().map(|p| p.cycles).sum()
    }
}
