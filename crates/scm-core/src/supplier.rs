//! 供應商端模型：零件詢價、供應商報價與採購單

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Day, ProductId};

/// 向供應商發出的零件詢價
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRfq {
    /// 供應商地址
    pub supplier: String,

    /// 零件ID
    pub product_id: ProductId,

    /// 詢價數量
    pub quantity: u32,

    /// 保留價（0 表示不設上限）
    pub reserve_price: Decimal,

    /// 希望到貨日
    pub due_date: Day,
}

impl SupplierRfq {
    /// 創建新的零件詢價（保留價為 0）
    pub fn new(supplier: String, product_id: ProductId, quantity: u32, due_date: Day) -> Self {
        Self {
            supplier,
            product_id,
            quantity,
            reserve_price: Decimal::ZERO,
            due_date,
        }
    }
}

/// 供應商報價
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierOffer {
    /// 報價ID
    pub offer_id: u32,

    /// 供應商地址
    pub supplier: String,

    /// 零件ID
    pub product_id: ProductId,

    /// 可供應數量（0 表示僅為價格參考）
    pub quantity: u32,

    /// 單價
    pub unit_price: Decimal,

    /// 到貨日
    pub due_date: Day,
}

impl SupplierOffer {
    /// 創建新的供應商報價
    pub fn new(
        offer_id: u32,
        supplier: String,
        product_id: ProductId,
        quantity: u32,
        unit_price: Decimal,
        due_date: Day,
    ) -> Self {
        Self {
            offer_id,
            supplier,
            product_id,
            quantity,
            unit_price,
            due_date,
        }
    }

    /// 檢查是否可下單（數量為 0 的報價只是報價參考）
    pub fn is_orderable(&self) -> bool {
        self.quantity > 0
    }
}

/// 採購單（對供應商報價的確認）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierOrder {
    /// 採購單ID
    pub id: Uuid,

    /// 對應的報價ID
    pub offer_id: u32,

    /// 供應商地址
    pub supplier: String,

    /// 零件ID
    pub product_id: ProductId,

    /// 數量
    pub quantity: u32,

    /// 單價
    pub unit_price: Decimal,

    /// 到貨日
    pub due_date: Day,
}

impl SupplierOrder {
    /// 依供應商報價創建採購單
    pub fn from_offer(offer: &SupplierOffer) -> Self {
        Self {
            id: Uuid::new_v4(),
            offer_id: offer.offer_id,
            supplier: offer.supplier.clone(),
            product_id: offer.product_id,
            quantity: offer.quantity,
            unit_price: offer.unit_price,
            due_date: offer.due_date,
        }
    }

    /// 採購總額（超出可表示範圍時取上限）
    pub fn total_cost(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_rfq_has_zero_reserve_price() {
        let rfq = SupplierRfq::new("pintel".to_string(), 100, 250, 7);

        assert_eq!(rfq.reserve_price, Decimal::ZERO);
        assert_eq!(rfq.due_date, 7);
    }

    #[test]
    fn test_price_quote_is_not_orderable() {
        let quote = SupplierOffer::new(1, "imd".to_string(), 101, 0, Decimal::from(90), 5);
        let offer = SupplierOffer::new(2, "imd".to_string(), 101, 80, Decimal::from(95), 6);

        assert!(!quote.is_orderable());
        assert!(offer.is_orderable());
    }

    #[test]
    fn test_order_from_offer() {
        let offer = SupplierOffer::new(3, "basus".to_string(), 110, 40, Decimal::from(120), 9);
        let order = SupplierOrder::from_offer(&offer);

        assert_eq!(order.offer_id, 3);
        assert_eq!(order.supplier, "basus");
        assert_eq!(order.total_cost(), Decimal::from(4800));
    }
}
