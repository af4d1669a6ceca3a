//! # SCM Factory
//!
//! 模擬平台：訂單簿、次日庫存、工廠產能與訊息通道
//!
//! 提供 `FulfillmentPlatform` 與 `MessageSink` 的記憶體實作，
//! 用於多日模擬與整合測試。

pub mod capacity;
pub mod factory;
pub mod gateway;
pub mod inventory;

// Re-export 主要類型
pub use capacity::FactoryCapacity;
pub use factory::SimulatedFactory;
pub use gateway::RecordingGateway;
pub use inventory::{InventoryError, StockLevel};
