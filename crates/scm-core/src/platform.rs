//! 模擬平台介面
//!
//! 代理人只透過這些介面讀寫訂單簿、次日庫存與工廠產能，
//! 以及送出每日的訊息批次。

use crate::{
    CustomerOffer, CustomerOrder, Day, FactorySchedule, OrderId, ProductId, SupplierOrder,
    SupplierRfq,
};

/// 訂單履行平台（訂單簿、次日庫存、工廠）
///
/// 每個請求都是原子的：成功則一次完成所有狀態變更，失敗則不改變任何狀態。
pub trait FulfillmentPlatform {
    /// 登記新成立的客戶訂單
    fn register_order(&mut self, order: CustomerOrder);

    /// 目前進行中的客戶訂單快照
    fn active_orders(&self) -> Vec<CustomerOrder>;

    /// 次日開始時預計可用的庫存（已扣除預留與交貨）
    fn inventory_for_next_day(&self, product_id: ProductId) -> u32;

    /// 交貨：庫存足夠時扣除庫存並將訂單標記為已交貨
    fn add_delivery_request(&mut self, order_id: OrderId) -> bool;

    /// 生產：零件與產能足夠時扣除零件、佔用產能
    fn add_production_request(&mut self, product_id: ProductId, quantity: u32) -> bool;

    /// 預留次日庫存，避免被其他訂單重複使用
    fn reserve_inventory_for_next_day(&mut self, product_id: ProductId, quantity: u32) -> bool;

    /// 取消進行中的訂單
    fn cancel_order(&mut self, order_id: OrderId) -> bool;

    /// 送出當日的生產與交貨排程
    fn send_factory_schedules(&mut self, date: Day) -> FactorySchedule;
}

/// 對外訊息通道（每類訊息每日送出一批）
pub trait MessageSink {
    /// 送出對客戶的報價
    fn send_customer_offers(&mut self, offers: Vec<CustomerOffer>);

    /// 送出零件詢價
    fn send_supplier_rfqs(&mut self, rfqs: Vec<SupplierRfq>);

    /// 送出採購單
    fn send_supplier_orders(&mut self, orders: Vec<SupplierOrder>);
}

/// 待送出的訊息暫存區
#[derive(Debug, Clone)]
pub struct OutboundBatch<T> {
    items: Vec<T>,
}

impl<T> OutboundBatch<T> {
    /// 創建空的暫存區
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 暫存一筆訊息
    pub fn stage(&mut self, item: T) {
        self.items.push(item);
    }

    /// 已暫存的訊息
    pub fn staged(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 取出全部暫存訊息並清空
    pub fn flush(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }
}

impl<T> Default for OutboundBatch<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_and_flush() {
        let mut batch = OutboundBatch::new();
        batch.stage(SupplierRfq::new("pintel".to_string(), 100, 10, 3));
        batch.stage(SupplierRfq::new("imd".to_string(), 200, 10, 3));

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.staged()[1].supplier, "imd");

        let flushed = batch.flush();
        assert_eq!(flushed.len(), 2);
        assert!(batch.is_empty());

        // 清空後再次送出為空批次
        assert!(batch.flush().is_empty());
    }
}
