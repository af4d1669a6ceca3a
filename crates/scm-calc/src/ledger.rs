//! 零件需求帳
//!
//! 記錄已確認客戶訂單所需、但尚未向供應商詢價的零件數量。
//! 每次發出詢價都必須在同一步驟扣減對應的需求，避免重複詢價。

use std::collections::BTreeMap;

use scm_core::ProductId;
use serde::{Deserialize, Serialize};

/// 零件需求帳
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentDemandLedger {
    entries: BTreeMap<ProductId, i64>,
}

impl ComponentDemandLedger {
    /// 創建空的需求帳
    pub fn new() -> Self {
        Self::default()
    }

    /// 增加（負數為減少）零件的未滿足需求
    pub fn add_demand(&mut self, product_id: ProductId, delta: i64) {
        *self.entries.entry(product_id).or_insert(0) += delta;
    }

    /// 對一組零件各增加相同的需求量（一單位成品各需一個零件）
    pub fn add_component_demand(&mut self, components: &[ProductId], delta: i64) {
        for &component_id in components {
            self.add_demand(component_id, delta);
        }
    }

    /// 查詢零件目前的需求量（未記錄者為 0）
    pub fn quantity(&self, product_id: ProductId) -> i64 {
        self.entries.get(&product_id).copied().unwrap_or(0)
    }

    /// 需求量大於 0 的零件，依零件ID排序
    ///
    /// 可重複呼叫，每次都從頭走訪目前狀態。
    pub fn positive_entries(&self) -> impl Iterator<Item = (ProductId, i64)> + '_ {
        self.entries
            .iter()
            .filter(|(_, &quantity)| quantity > 0)
            .map(|(&product_id, &quantity)| (product_id, quantity))
    }

    /// 所有正需求的總和
    pub fn total_outstanding(&self) -> i64 {
        self.positive_entries().map(|(_, quantity)| quantity).sum()
    }

    /// 已記錄的零件數
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空需求帳（模擬結束時）
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
