//! # SCM Core
//!
//! 供應鏈代理人的核心資料模型、型錄、設定與平台介面

pub mod catalog;
pub mod clock;
pub mod config;
pub mod order;
pub mod platform;
pub mod schedule;
pub mod supplier;

// Re-export 主要類型
pub use catalog::{ProductCatalog, ProductSpec};
pub use clock::{SimulationClock, StartInfo};
pub use config::{AgentConfig, SupplierRfqLedgerPolicy};
pub use order::{CustomerOffer, CustomerOrder, OrderStatus, Rfq};
pub use platform::{FulfillmentPlatform, MessageSink, OutboundBatch};
pub use schedule::{DeliveryRequest, FactorySchedule, ProductionRequest};
pub use supplier::{SupplierOffer, SupplierOrder, SupplierRfq};

/// 模擬日（可為負數：作廢門檻在賽局初期會落在第 0 天之前）
pub type Day = i32;

/// 產品／零件ID
pub type ProductId = u32;

/// 客戶訂單ID
pub type OrderId = u32;

/// SCM 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    #[error("無效的設定: {0}")]
    InvalidConfig(String),

    #[error("設定解析失敗: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("設定檔讀取失敗: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("型錄中找不到產品: {0}")]
    UnknownProduct(ProductId),

    #[error("零件 {0} 沒有任何供應商")]
    NoSuppliers(ProductId),

    #[error("第 {0} 天的排程已執行過")]
    DayAlreadyScheduled(Day),

    #[error("模擬尚未開始")]
    SimulationNotStarted,
}

pub type Result<T> = std::result::Result<T, ScmError>;
