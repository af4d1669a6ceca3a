//! 庫存模型

use scm_core::ProductId;
use serde::{Deserialize, Serialize};

/// 庫存操作錯誤
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("庫存不足：需要 {requested}, 可用 {available}")]
    Insufficient { requested: u32, available: u32 },
}

/// 單一產品／零件的庫存狀態
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevel {
    /// 產品ID
    pub product_id: ProductId,

    /// 現有庫存
    pub on_hand_qty: u32,

    /// 已預留數量（當日有效）
    pub reserved_qty: u32,

    /// 次日可用庫存（現有 - 已預留）
    pub available_qty: u32,
}

impl StockLevel {
    /// 創建新的庫存記錄
    pub fn new(product_id: ProductId, on_hand_qty: u32) -> Self {
        Self {
            product_id,
            on_hand_qty,
            reserved_qty: 0,
            available_qty: on_hand_qty,
        }
    }

    /// 計算可用庫存
    pub fn calculate_available(&mut self) {
        self.available_qty = self.on_hand_qty - self.reserved_qty;
    }

    /// 入庫
    pub fn receive(&mut self, quantity: u32) {
        self.on_hand_qty += quantity;
        self.calculate_available();
    }

    /// 從可用庫存出庫（交貨或生產耗用）
    pub fn issue(&mut self, quantity: u32) -> Result<(), InventoryError> {
        if quantity > self.available_qty {
            return Err(InventoryError::Insufficient {
                requested: quantity,
                available: self.available_qty,
            });
        }
        self.on_hand_qty -= quantity;
        self.calculate_available();
        Ok(())
    }

    /// 預留庫存
    pub fn reserve(&mut self, quantity: u32) -> Result<(), InventoryError> {
        if quantity > self.available_qty {
            return Err(InventoryError::Insufficient {
                requested: quantity,
                available: self.available_qty,
            });
        }
        self.reserved_qty += quantity;
        self.calculate_available();
        Ok(())
    }

    /// 釋放全部預留（換日時）
    pub fn release_all(&mut self) {
        self.reserved_qty = 0;
        self.calculate_available();
    }
}
