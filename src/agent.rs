//! 交易代理人：每日訊息處理與賽局生命週期

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use scm_calc::{
    AcceptanceSummary, BiddingPolicy, BiddingSummary, ComponentDemandLedger, FulfillmentScheduler,
    IntakeSummary, OfferAcceptancePolicy, ProcurementPlanner, ProcurementSummary, ScheduleReport,
};
use scm_core::{
    AgentConfig, CustomerOffer, CustomerOrder, Day, FulfillmentPlatform, MessageSink,
    OutboundBatch, ProductCatalog, Result, Rfq, ScmError, SimulationClock, StartInfo,
    SupplierOffer, SupplierOrder, SupplierRfq,
};

/// 客戶訂單處理結果（需求展開 + 零件詢價）
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderIntakeReport {
    pub intake: IntakeSummary,
    pub procurement: ProcurementSummary,
}

/// 交易代理人
///
/// 持有一場賽局的全部狀態：配置、型錄、時鐘、零件需求帳與隨機數來源。
/// 各處理函式對應一類進站訊息，出站訊息先暫存，處理結束時一次送出。
#[derive(Debug)]
pub struct TradingAgent {
    config: AgentConfig,
    catalog: ProductCatalog,
    clock: Option<SimulationClock>,
    ledger: ComponentDemandLedger,
    rng: StdRng,
    procurement: ProcurementPlanner,
    scheduler: FulfillmentScheduler,
    customer_offers: OutboundBatch<CustomerOffer>,
    supplier_rfqs: OutboundBatch<SupplierRfq>,
    supplier_orders: OutboundBatch<SupplierOrder>,
}

impl TradingAgent {
    /// 創建代理人（驗證配置與型錄）
    pub fn new(config: AgentConfig, catalog: ProductCatalog) -> Result<Self> {
        config.validate()?;
        catalog.validate()?;

        Ok(Self {
            procurement: ProcurementPlanner::new(&config),
            rng: Self::seeded_rng(&config),
            config,
            catalog,
            clock: None,
            ledger: ComponentDemandLedger::new(),
            scheduler: FulfillmentScheduler::new(),
            customer_offers: OutboundBatch::new(),
            supplier_rfqs: OutboundBatch::new(),
            supplier_orders: OutboundBatch::new(),
        })
    }

    fn seeded_rng(config: &AgentConfig) -> StdRng {
        match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &ComponentDemandLedger {
        &self.ledger
    }

    /// 模擬時鐘（賽局進行中才有）
    pub fn clock(&self) -> Option<&SimulationClock> {
        self.clock.as_ref()
    }

    /// 當前模擬日
    pub fn current_date(&self) -> Result<Day> {
        Ok(self.started_clock()?.current_date)
    }

    fn started_clock(&self) -> Result<&SimulationClock> {
        self.clock.as_ref().ok_or(ScmError::SimulationNotStarted)
    }

    /// 賽局開始：重置需求帳與排程紀錄，並依配置重新播種
    pub fn simulation_started(&mut self, start_info: StartInfo) {
        tracing::info!(
            "賽局開始：共 {} 天，作廢天數 {}",
            start_info.number_of_days,
            start_info.days_before_void
        );
        self.clock = Some(SimulationClock::new(start_info));
        self.ledger.clear();
        self.scheduler.reset();
        self.rng = Self::seeded_rng(&self.config);
    }

    /// 賽局結束：清除所有每場狀態
    pub fn simulation_ended(&mut self) {
        tracing::info!(
            "賽局結束：未覆蓋零件需求 {}",
            self.ledger.total_outstanding()
        );
        self.clock = None;
        self.ledger.clear();
        self.scheduler.reset();
        self.customer_offers.flush();
        self.supplier_rfqs.flush();
        self.supplier_orders.flush();
    }

    /// 換日
    pub fn begin_day(&mut self, date: Day) -> Result<()> {
        let clock = self.clock.as_mut().ok_or(ScmError::SimulationNotStarted)?;
        clock.advance_to(date);
        tracing::debug!("進入第 {} 天", date);
        Ok(())
    }

    /// 處理當日的客戶詢價，報價一次送出
    pub fn handle_customer_rfqs<S: MessageSink + ?Sized>(
        &mut self,
        rfqs: &[Rfq],
        sink: &mut S,
    ) -> Result<BiddingSummary> {
        let clock = self.started_clock()?;
        let current_date = clock.current_date;
        let policy = BiddingPolicy::new(
            &self.config,
            clock.last_bid_due_date(self.config.bid_due_margin_days),
        );

        let summary = policy.evaluate_bundle(
            rfqs,
            current_date,
            &self.catalog,
            &mut self.rng,
            &mut self.customer_offers,
        );
        sink.send_customer_offers(self.customer_offers.flush());

        tracing::info!(
            "第 {} 天詢價 {} 筆，報價 {} 筆",
            current_date,
            summary.evaluated,
            summary.offers
        );
        Ok(summary)
    }

    /// 處理新成立的客戶訂單：登記到訂單簿、展開零件需求並對供應商詢價
    pub fn handle_customer_orders<P, S>(
        &mut self,
        orders: &[CustomerOrder],
        platform: &mut P,
        sink: &mut S,
    ) -> Result<OrderIntakeReport>
    where
        P: FulfillmentPlatform + ?Sized,
        S: MessageSink + ?Sized,
    {
        let current_date = self.current_date()?;

        for order in orders {
            platform.register_order(order.clone());
        }

        let intake = self
            .procurement
            .intake(orders, &self.catalog, &mut self.ledger);
        let procurement = self.procurement.plan(
            current_date,
            &self.catalog,
            &mut self.ledger,
            &mut self.supplier_rfqs,
        );
        sink.send_supplier_rfqs(self.supplier_rfqs.flush());

        tracing::info!(
            "第 {} 天新訂單 {} 張，零件詢價 {} 筆",
            current_date,
            intake.recorded_orders,
            procurement.rfqs_staged
        );
        Ok(OrderIntakeReport {
            intake,
            procurement,
        })
    }

    /// 處理一家供應商的報價：全部轉為採購單
    pub fn handle_supplier_offers<S: MessageSink + ?Sized>(
        &mut self,
        offers: &[SupplierOffer],
        sink: &mut S,
    ) -> Result<AcceptanceSummary> {
        self.started_clock()?;

        let summary = OfferAcceptancePolicy::stage(offers, &mut self.supplier_orders);
        sink.send_supplier_orders(self.supplier_orders.flush());
        Ok(summary)
    }

    /// 處理當日模擬狀態訊息：執行訂單履行排程
    pub fn handle_simulation_status<P: FulfillmentPlatform + ?Sized>(
        &mut self,
        platform: &mut P,
    ) -> Result<ScheduleReport> {
        let clock = self.clock.as_ref().ok_or(ScmError::SimulationNotStarted)?;
        self.scheduler
            .run(clock, &self.catalog, &mut self.ledger, platform)
    }
}
