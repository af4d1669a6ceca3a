//! 產品型錄：BOM、基準價格與供應商

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ProductId, ScmError};

/// 成品規格
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSpec {
    /// 產品ID
    pub product_id: ProductId,

    /// BOM 基準單價（零件成本）
    pub base_price: Decimal,

    /// 組成零件（每單位成品各需一個）
    pub components: Vec<ProductId>,

    /// 每單位組裝所需的工廠週期
    pub assembly_cycles: u32,
}

impl ProductSpec {
    /// 創建新的成品規格
    pub fn new(product_id: ProductId, base_price: Decimal, components: Vec<ProductId>) -> Self {
        Self {
            product_id,
            base_price,
            components,
            assembly_cycles: 1,
        }
    }

    /// 建構器模式：設置組裝週期
    pub fn with_assembly_cycles(mut self, cycles: u32) -> Self {
        self.assembly_cycles = cycles;
        self
    }
}

/// 產品型錄（賽局開始後不再變動）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: BTreeMap<ProductId, ProductSpec>,
    suppliers: BTreeMap<ProductId, Vec<String>>,
}

impl ProductCatalog {
    /// 創建空型錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入成品
    pub fn with_product(mut self, spec: ProductSpec) -> Self {
        self.add_product(spec);
        self
    }

    /// 建構器模式：加入零件供應商
    pub fn with_supplier(mut self, component_id: ProductId, supplier: &str) -> Self {
        self.add_supplier(component_id, supplier);
        self
    }

    /// 加入成品
    pub fn add_product(&mut self, spec: ProductSpec) {
        self.products.insert(spec.product_id, spec);
    }

    /// 加入零件供應商（重複加入會被忽略）
    pub fn add_supplier(&mut self, component_id: ProductId, supplier: &str) {
        let list = self.suppliers.entry(component_id).or_default();
        if !list.iter().any(|s| s == supplier) {
            list.push(supplier.to_string());
        }
    }

    /// 取得成品規格
    pub fn product(&self, product_id: ProductId) -> Option<&ProductSpec> {
        self.products.get(&product_id)
    }

    /// 取得成品的組成零件
    pub fn components_for_product(&self, product_id: ProductId) -> Option<&[ProductId]> {
        self.products
            .get(&product_id)
            .map(|spec| spec.components.as_slice())
    }

    /// 取得成品的 BOM 基準單價
    pub fn product_base_price(&self, product_id: ProductId) -> Option<Decimal> {
        self.products.get(&product_id).map(|spec| spec.base_price)
    }

    /// 取得零件的合格供應商
    pub fn suppliers_for_product(&self, component_id: ProductId) -> crate::Result<&[String]> {
        match self.suppliers.get(&component_id) {
            Some(list) if !list.is_empty() => Ok(list.as_slice()),
            _ => Err(ScmError::NoSuppliers(component_id)),
        }
    }

    /// 所有零件ID（依ID排序、去重）
    pub fn component_ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self
            .products
            .values()
            .flat_map(|spec| spec.components.iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// 檢查每個零件都至少有一家供應商
    pub fn validate(&self) -> crate::Result<()> {
        for component_id in self.component_ids() {
            self.suppliers_for_product(component_id)?;
        }
        Ok(())
    }
}
