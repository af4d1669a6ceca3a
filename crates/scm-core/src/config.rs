//! 代理人策略參數配置

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Day, ScmError};

/// 代理人策略參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// 報價折扣係數（報價 = 保留價 × (1 - r × 係數)，r ∈ [0, 1)）
    pub price_discount_factor: Decimal,

    /// 風險門檻：預期利潤 / 罰金 必須大於此值才報價
    pub risk_threshold: Decimal,

    /// 報價所需的最短交期（天）
    pub min_lead_time_days: Day,

    /// 最後可報價交期距賽局結束的天數
    pub bid_due_margin_days: Day,

    /// 零件詢價的希望到貨天數
    pub supplier_rfq_lead_days: Day,

    /// 零件詢價後需求帳的扣減方式
    pub supplier_rfq_ledger_policy: SupplierRfqLedgerPolicy,

    /// 隨機種子（None 表示使用系統熵）
    pub rng_seed: Option<u64>,
}

impl AgentConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            price_discount_factor: Decimal::new(2, 1),
            risk_threshold: Decimal::new(1, 1),
            min_lead_time_days: 6,
            bid_due_margin_days: 2,
            supplier_rfq_lead_days: 2,
            supplier_rfq_ledger_policy: SupplierRfqLedgerPolicy::PerSupplier,
            rng_seed: None,
        }
    }

    /// 建構器模式：設置報價折扣係數
    pub fn with_price_discount_factor(mut self, factor: Decimal) -> Self {
        self.price_discount_factor = factor;
        self
    }

    /// 建構器模式：設置風險門檻
    pub fn with_risk_threshold(mut self, threshold: Decimal) -> Self {
        self.risk_threshold = threshold;
        self
    }

    /// 建構器模式：設置最短交期
    pub fn with_min_lead_time_days(mut self, days: Day) -> Self {
        self.min_lead_time_days = days;
        self
    }

    /// 建構器模式：設置零件詢價到貨天數
    pub fn with_supplier_rfq_lead_days(mut self, days: Day) -> Self {
        self.supplier_rfq_lead_days = days;
        self
    }

    /// 建構器模式：設置需求帳扣減方式
    pub fn with_ledger_policy(mut self, policy: SupplierRfqLedgerPolicy) -> Self {
        self.supplier_rfq_ledger_policy = policy;
        self
    }

    /// 建構器模式：設置隨機種子
    ///
    /// # 範例
    /// ```
    /// # use scm_core::AgentConfig;
    /// let config = AgentConfig::new().with_rng_seed(42); // 可重現的報價
    /// assert_eq!(config.rng_seed, Some(42));
    /// ```
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// 驗證參數範圍
    pub fn validate(&self) -> crate::Result<()> {
        if self.price_discount_factor < Decimal::ZERO || self.price_discount_factor > Decimal::ONE
        {
            return Err(ScmError::InvalidConfig(format!(
                "報價折扣係數必須介於 0 與 1 之間：{}",
                self.price_discount_factor
            )));
        }
        if self.risk_threshold < Decimal::ZERO {
            return Err(ScmError::InvalidConfig(format!(
                "風險門檻不可為負：{}",
                self.risk_threshold
            )));
        }
        if self.min_lead_time_days < 0
            || self.bid_due_margin_days < 0
            || self.supplier_rfq_lead_days < 0
        {
            return Err(ScmError::InvalidConfig("天數參數不可為負".to_string()));
        }
        Ok(())
    }

    /// 從 JSON 字串載入並驗證
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 從 JSON 檔案載入並驗證
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 零件詢價後需求帳的扣減方式
///
/// 同一零件有多家供應商時，每家都會收到完整數量的詢價。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierRfqLedgerPolicy {
    /// 每發出一張詢價就扣減一次（多家供應商時需求帳會變負）
    PerSupplier,

    /// 每個零件只扣減一次
    OncePerProduct,
}
