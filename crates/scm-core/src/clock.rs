//! 模擬時鐘

use serde::{Deserialize, Serialize};

use crate::Day;

/// 模擬開始時由主機提供的賽局資訊
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartInfo {
    /// 模擬總天數
    pub number_of_days: Day,

    /// 訂單逾期後仍可交貨的天數（超過即作廢）
    pub days_before_void: Day,
}

impl StartInfo {
    /// 創建新的賽局資訊
    pub fn new(number_of_days: Day, days_before_void: Day) -> Self {
        Self {
            number_of_days,
            days_before_void,
        }
    }
}

/// 模擬時鐘
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationClock {
    /// 賽局資訊
    pub start_info: StartInfo,

    /// 當前模擬日
    pub current_date: Day,
}

impl SimulationClock {
    /// 創建新的時鐘（從第 0 天開始）
    pub fn new(start_info: StartInfo) -> Self {
        Self {
            start_info,
            current_date: 0,
        }
    }

    /// 推進到指定模擬日
    pub fn advance_to(&mut self, date: Day) {
        self.current_date = date;
    }

    /// 作廢天數
    pub fn days_before_void(&self) -> Day {
        self.start_info.days_before_void
    }

    /// 今日最晚仍可處理的交期，交期不晚於此日的訂單必須取消
    ///
    /// latest_due_date = current_date - days_before_void + 2
    pub fn latest_due_date(&self) -> Day {
        self.current_date - self.start_info.days_before_void + 2
    }

    /// 可接受報價的最晚交期（保留 margin 天完成生產與交貨）
    pub fn last_bid_due_date(&self, margin: Day) -> Day {
        self.start_info.number_of_days - margin
    }

    /// 檢查模擬是否已結束
    pub fn is_finished(&self) -> bool {
        self.current_date >= self.start_info.number_of_days
    }
}
