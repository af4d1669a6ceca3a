//! 記錄型訊息通道

use scm_core::{CustomerOffer, MessageSink, SupplierOrder, SupplierRfq};

/// 記錄每日送出批次的訊息通道
///
/// 每次呼叫記錄一個批次（即使為空），方便檢查「每日每類一批」。
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    pub customer_offers: Vec<Vec<CustomerOffer>>,
    pub supplier_rfqs: Vec<Vec<SupplierRfq>>,
    pub supplier_orders: Vec<Vec<SupplierOrder>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已送出的報價總數
    pub fn offers_sent(&self) -> usize {
        self.customer_offers.iter().map(Vec::len).sum()
    }

    /// 已送出的詢價總數
    pub fn rfqs_sent(&self) -> usize {
        self.supplier_rfqs.iter().map(Vec::len).sum()
    }

    /// 已送出的採購單總數
    pub fn orders_sent(&self) -> usize {
        self.supplier_orders.iter().map(Vec::len).sum()
    }

    /// 最近一批採購單
    pub fn last_supplier_orders(&self) -> &[SupplierOrder] {
        self.supplier_orders
            .last()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl MessageSink for RecordingGateway {
    fn send_customer_offers(&mut self, offers: Vec<CustomerOffer>) {
        tracing::debug!("送出客戶報價 {} 筆", offers.len());
        self.customer_offers.push(offers);
    }

    fn send_supplier_rfqs(&mut self, rfqs: Vec<SupplierRfq>) {
        tracing::debug!("送出零件詢價 {} 筆", rfqs.len());
        self.supplier_rfqs.push(rfqs);
    }

    fn send_supplier_orders(&mut self, orders: Vec<SupplierOrder>) {
        tracing::debug!("送出採購單 {} 筆", orders.len());
        self.supplier_orders.push(orders);
    }
}
