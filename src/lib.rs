//! # SCM Agent
//!
//! 供應鏈交易代理人的每日決策引擎
//!
//! ## 功能
//!
//! - 客戶詢價報價（折扣隨機化 + 風險門檻）
//! - 客戶訂單展開為零件需求並對供應商詢價
//! - 供應商報價轉為採購單
//! - 每日訂單履行排程（交貨、取消、預留、生產）
//!
//! ## 使用範例
//!
//! ```
//! use rust_decimal::Decimal;
//! use scm_agent::{AgentConfig, ProductCatalog, ProductSpec, StartInfo, TradingAgent};
//! use scm_agent::scm_factory::RecordingGateway;
//!
//! let catalog = ProductCatalog::new()
//!     .with_product(ProductSpec::new(1, Decimal::from(1000), vec![100]))
//!     .with_supplier(100, "pintel");
//! let mut agent = TradingAgent::new(AgentConfig::new().with_rng_seed(42), catalog).unwrap();
//! let mut gateway = RecordingGateway::new();
//!
//! agent.simulation_started(StartInfo::new(220, 5));
//! agent.begin_day(0).unwrap();
//! agent.handle_customer_rfqs(&[], &mut gateway).unwrap();
//! assert_eq!(gateway.customer_offers.len(), 1);
//! ```

pub mod agent;

pub use agent::{OrderIntakeReport, TradingAgent};

// Re-export 各 crate
pub use scm_calc;
pub use scm_core;
pub use scm_factory;

pub use scm_calc::{AcceptanceSummary, BiddingSummary, FulfillmentAction, ScheduleReport};
pub use scm_core::{
    AgentConfig, CustomerOrder, ProductCatalog, ProductSpec, Result, Rfq, ScmError, StartInfo,
    SupplierOffer, SupplierRfqLedgerPolicy,
};
