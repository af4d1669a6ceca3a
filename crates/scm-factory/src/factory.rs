//! 記憶體內的模擬工廠：訂單簿、次日庫存與產能

use std::collections::BTreeMap;

use scm_core::{
    CustomerOrder, Day, DeliveryRequest, FactorySchedule, FulfillmentPlatform, OrderId,
    OrderStatus, ProductCatalog, ProductId, ProductionRequest, SupplierOrder,
};

use crate::{FactoryCapacity, InventoryError, StockLevel};

/// 模擬工廠
///
/// 當日的預留與產能佔用在 `end_of_day` 時釋放；
/// 當日排程的生產在 `end_of_day` 完工入庫，次日即可使用。
#[derive(Debug, Clone)]
pub struct SimulatedFactory {
    catalog: ProductCatalog,
    orders: BTreeMap<OrderId, CustomerOrder>,
    stock: BTreeMap<ProductId, StockLevel>,
    capacity: FactoryCapacity,
    pending: FactorySchedule,
    in_production: Vec<ProductionRequest>,
    arrivals: BTreeMap<Day, Vec<(ProductId, u32)>>,
    sent_schedules: Vec<FactorySchedule>,
}

impl SimulatedFactory {
    /// 創建新的模擬工廠
    pub fn new(catalog: ProductCatalog, cycles_per_day: u32) -> Self {
        Self {
            catalog,
            orders: BTreeMap::new(),
            stock: BTreeMap::new(),
            capacity: FactoryCapacity::new(cycles_per_day),
            pending: FactorySchedule::default(),
            in_production: Vec::new(),
            arrivals: BTreeMap::new(),
            sent_schedules: Vec::new(),
        }
    }

    /// 建構器模式：設置期初庫存
    pub fn with_stock(mut self, product_id: ProductId, quantity: u32) -> Self {
        self.receive(product_id, quantity);
        self
    }

    /// 入庫
    pub fn receive(&mut self, product_id: ProductId, quantity: u32) {
        self.stock_mut(product_id).receive(quantity);
    }

    /// 登記供應商採購單，零件於到貨日入庫
    pub fn accept_supplier_orders(&mut self, orders: &[SupplierOrder]) {
        for order in orders {
            self.arrivals
                .entry(order.due_date)
                .or_default()
                .push((order.product_id, order.quantity));
        }
    }

    /// 查詢訂單狀態
    pub fn order_status(&self, order_id: OrderId) -> Option<OrderStatus> {
        self.orders.get(&order_id).map(|o| o.status)
    }

    /// 查詢庫存狀態
    pub fn stock(&self, product_id: ProductId) -> Option<&StockLevel> {
        self.stock.get(&product_id)
    }

    /// 今日剩餘產能
    pub fn free_cycles(&self) -> u32 {
        self.capacity.free_cycles()
    }

    /// 已送出的歷史排程
    pub fn sent_schedules(&self) -> &[FactorySchedule] {
        &self.sent_schedules
    }

    /// 換日：生產完工入庫、隔日到貨的零件入庫、釋放預留、重置產能
    pub fn end_of_day(&mut self, date: Day) {
        for request in std::mem::take(&mut self.in_production) {
            self.receive(request.product_id, request.quantity);
        }

        let due: Vec<Day> = self.arrivals.range(..=date + 1).map(|(&day, _)| day).collect();
        for day in due {
            for (product_id, quantity) in self.arrivals.remove(&day).unwrap_or_default() {
                self.receive(product_id, quantity);
            }
        }

        for stock in self.stock.values_mut() {
            stock.release_all();
        }
        self.capacity.reset();

        tracing::debug!("第 {} 天結束：剩餘庫存品項 {}", date, self.stock.len());
    }

    fn stock_mut(&mut self, product_id: ProductId) -> &mut StockLevel {
        self.stock
            .entry(product_id)
            .or_insert_with(|| StockLevel::new(product_id, 0))
    }

    /// 扣除生產所需零件；任一零件不足時庫存保持不變
    fn consume_components(
        &mut self,
        required: &BTreeMap<ProductId, u32>,
    ) -> Result<(), InventoryError> {
        let mut updated = Vec::with_capacity(required.len());
        for (&component_id, &quantity) in required {
            let mut stock = self
                .stock
                .get(&component_id)
                .cloned()
                .unwrap_or_else(|| StockLevel::new(component_id, 0));
            stock.issue(quantity)?;
            updated.push(stock);
        }
        for stock in updated {
            self.stock.insert(stock.product_id, stock);
        }
        Ok(())
    }

    fn available(&self, product_id: ProductId) -> u32 {
        self.stock
            .get(&product_id)
            .map(|s| s.available_qty)
            .unwrap_or(0)
    }
}

impl FulfillmentPlatform for SimulatedFactory {
    fn register_order(&mut self, order: CustomerOrder) {
        self.orders.insert(order.order_id, order);
    }

    fn active_orders(&self) -> Vec<CustomerOrder> {
        self.orders
            .values()
            .filter(|o| o.is_active())
            .cloned()
            .collect()
    }

    fn inventory_for_next_day(&self, product_id: ProductId) -> u32 {
        self.available(product_id)
    }

    fn add_delivery_request(&mut self, order_id: OrderId) -> bool {
        let (product_id, quantity) = match self.orders.get(&order_id) {
            Some(order) if order.is_active() => (order.product_id, order.quantity),
            _ => return false,
        };
        if self.stock_mut(product_id).issue(quantity).is_err() {
            return false;
        }
        if let Some(order) = self.orders.get_mut(&order_id) {
            order.mark_delivered();
        }
        self.pending
            .deliveries
            .push(DeliveryRequest::new(order_id, product_id, quantity));
        true
    }

    fn add_production_request(&mut self, product_id: ProductId, quantity: u32) -> bool {
        let spec = match self.catalog.product(product_id) {
            Some(spec) => spec,
            None => return false,
        };
        let cycles = match spec.assembly_cycles.checked_mul(quantity) {
            Some(cycles) => cycles,
            None => return false,
        };

        // 同一零件在 BOM 中出現多次時合併需求量
        let mut required: BTreeMap<ProductId, u32> = BTreeMap::new();
        for &component_id in &spec.components {
            let total = required.entry(component_id).or_insert(0);
            match total.checked_add(quantity) {
                Some(sum) => *total = sum,
                None => return false,
            }
        }

        if cycles > self.capacity.free_cycles() {
            return false;
        }
        if let Err(e) = self.consume_components(&required) {
            tracing::debug!("產品 {} 零件不足，無法生產 {}：{}", product_id, quantity, e);
            return false;
        }
        self.capacity.try_allocate(cycles);

        let request = ProductionRequest::new(product_id, quantity, cycles);
        self.pending.production.push(request);
        true
    }

    fn reserve_inventory_for_next_day(&mut self, product_id: ProductId, quantity: u32) -> bool {
        self.stock_mut(product_id).reserve(quantity).is_ok()
    }

    fn cancel_order(&mut self, order_id: OrderId) -> bool {
        self.orders
            .get_mut(&order_id)
            .map(|o| o.mark_canceled())
            .unwrap_or(false)
    }

    fn send_factory_schedules(&mut self, date: Day) -> FactorySchedule {
        let mut schedule = std::mem::take(&mut self.pending);
        schedule.date = date;
        self.in_production.extend(schedule.production.iter().cloned());
        self.sent_schedules.push(schedule.clone());
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use scm_core::{ProductSpec, SupplierOffer};

    fn catalog() -> ProductCatalog {
        ProductCatalog::new()
            .with_product(
                ProductSpec::new(1, Decimal::from(1000), vec![100, 200]).with_assembly_cycles(5),
            )
            .with_supplier(100, "pintel")
            .with_supplier(200, "imd")
    }

    fn factory() -> SimulatedFactory {
        SimulatedFactory::new(catalog(), 100)
            .with_stock(100, 30)
            .with_stock(200, 30)
    }

    #[test]
    fn test_production_consumes_components_and_capacity() {
        let mut factory = factory();

        assert!(factory.add_production_request(1, 10));
        assert_eq!(factory.free_cycles(), 50);
        assert_eq!(factory.inventory_for_next_day(100), 20);
        assert_eq!(factory.inventory_for_next_day(200), 20);
    }

    #[test]
    fn test_production_failure_is_atomic() {
        // 產能足夠但零件 200 不足
        let mut factory = SimulatedFactory::new(catalog(), 1000)
            .with_stock(100, 50)
            .with_stock(200, 10);
        assert!(!factory.add_production_request(1, 15));
        assert_eq!(factory.inventory_for_next_day(100), 50);
        assert_eq!(factory.free_cycles(), 1000);

        // 零件足夠但產能不足
        let mut factory = SimulatedFactory::new(catalog(), 40)
            .with_stock(100, 50)
            .with_stock(200, 50);
        assert!(!factory.add_production_request(1, 10));
        assert_eq!(factory.inventory_for_next_day(200), 50);
    }

    #[rstest]
    #[case(20, 100, true)] // 100 週期剛好用完
    #[case(21, 100, false)]
    #[case(30, 1000, true)] // 零件剛好用完
    #[case(31, 1000, false)]
    fn test_production_feasibility(
        #[case] quantity: u32,
        #[case] cycles_per_day: u32,
        #[case] expected: bool,
    ) {
        let mut factory = SimulatedFactory::new(catalog(), cycles_per_day)
            .with_stock(100, 30)
            .with_stock(200, 30);

        assert_eq!(factory.add_production_request(1, quantity), expected);
    }

    #[rstest]
    #[case(15, false, 15)]
    #[case(20, true, 0)]
    fn test_repeated_component_counted_per_use(
        #[case] stock: u32,
        #[case] expected: bool,
        #[case] remaining: u32,
    ) {
        // 每單位產品需要兩個零件 100
        let catalog = ProductCatalog::new()
            .with_product(ProductSpec::new(2, Decimal::from(800), vec![100, 100]))
            .with_supplier(100, "pintel");
        let mut factory = SimulatedFactory::new(catalog, 1000).with_stock(100, stock);

        assert_eq!(factory.add_production_request(2, 10), expected);
        assert_eq!(factory.inventory_for_next_day(100), remaining);
    }

    #[test]
    fn test_oversized_production_request_rejected() {
        let mut factory = SimulatedFactory::new(catalog(), u32::MAX)
            .with_stock(100, u32::MAX)
            .with_stock(200, u32::MAX);

        assert!(!factory.add_production_request(1, u32::MAX));
        assert_eq!(factory.free_cycles(), u32::MAX);
        assert_eq!(factory.inventory_for_next_day(100), u32::MAX);
    }

    #[test]
    fn test_unknown_product_cannot_be_produced() {
        let mut factory = factory();

        assert!(!factory.add_production_request(9, 1));
        assert_eq!(factory.free_cycles(), 100);
    }

    #[test]
    fn test_production_completes_at_end_of_day() {
        let mut factory = factory();
        factory.add_production_request(1, 10);
        let schedule = factory.send_factory_schedules(3);

        assert_eq!(schedule.date, 3);
        assert_eq!(schedule.production.len(), 1);
        assert_eq!(factory.inventory_for_next_day(1), 0);

        factory.end_of_day(3);
        assert_eq!(factory.inventory_for_next_day(1), 10);
        assert_eq!(factory.free_cycles(), 100);
        assert_eq!(factory.sent_schedules().len(), 1);
    }

    #[test]
    fn test_delivery_marks_order() {
        let mut factory = factory().with_stock(1, 12);
        factory.register_order(CustomerOrder::new(5, 1, 10, 8));

        assert!(factory.add_delivery_request(5));
        assert_eq!(factory.order_status(5), Some(OrderStatus::Delivered));
        assert_eq!(factory.inventory_for_next_day(1), 2);
        assert!(factory.active_orders().is_empty());

        // 已交貨的訂單不能重複交貨
        assert!(!factory.add_delivery_request(5));
    }

    #[test]
    fn test_delivery_fails_without_stock() {
        let mut factory = factory().with_stock(1, 5);
        factory.register_order(CustomerOrder::new(5, 1, 10, 8));

        assert!(!factory.add_delivery_request(5));
        assert_eq!(factory.order_status(5), Some(OrderStatus::Active));
        assert_eq!(factory.inventory_for_next_day(1), 5);
    }

    #[test]
    fn test_reservations_released_at_end_of_day() {
        let mut factory = factory().with_stock(1, 10);

        assert!(factory.reserve_inventory_for_next_day(1, 8));
        assert_eq!(factory.inventory_for_next_day(1), 2);
        assert!(!factory.reserve_inventory_for_next_day(1, 3));

        factory.end_of_day(0);
        assert_eq!(factory.inventory_for_next_day(1), 10);
    }

    #[test]
    fn test_supplier_orders_arrive_on_due_date() {
        let mut factory = factory();
        let offer = SupplierOffer::new(1, "pintel".to_string(), 100, 40, Decimal::from(90), 5);
        factory.accept_supplier_orders(&[SupplierOrder::from_offer(&offer)]);

        factory.end_of_day(3);
        assert_eq!(factory.inventory_for_next_day(100), 30);

        // 第 4 天結束時，第 5 天到貨的零件入庫
        factory.end_of_day(4);
        assert_eq!(factory.inventory_for_next_day(100), 70);
    }

    #[test]
    fn test_cancel_order() {
        let mut factory = factory();
        factory.register_order(CustomerOrder::new(5, 1, 10, 8));

        assert!(factory.cancel_order(5));
        assert!(!factory.cancel_order(5));
        assert!(!factory.cancel_order(99));
        assert_eq!(factory.order_status(5), Some(OrderStatus::Canceled));
    }
}
