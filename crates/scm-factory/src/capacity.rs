//! 工廠產能

use serde::{Deserialize, Serialize};

/// 每日工廠產能（以組裝週期計）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryCapacity {
    /// 每日總週期
    pub cycles_per_day: u32,

    /// 今日已佔用週期
    pub used_cycles: u32,
}

impl FactoryCapacity {
    pub fn new(cycles_per_day: u32) -> Self {
        Self {
            cycles_per_day,
            used_cycles: 0,
        }
    }

    /// 今日剩餘週期
    pub fn free_cycles(&self) -> u32 {
        self.cycles_per_day.saturating_sub(self.used_cycles)
    }

    /// 佔用產能，不足時不改變狀態
    pub fn try_allocate(&mut self, cycles: u32) -> bool {
        if cycles > self.free_cycles() {
            return false;
        }
        self.used_cycles += cycles;
        true
    }

    /// 換日重置
    pub fn reset(&mut self) {
        self.used_cycles = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_within_capacity() {
        let mut capacity = FactoryCapacity::new(2000);

        assert!(capacity.try_allocate(1500));
        assert_eq!(capacity.free_cycles(), 500);
        assert!(!capacity.try_allocate(501));
        assert_eq!(capacity.used_cycles, 1500);

        capacity.reset();
        assert_eq!(capacity.free_cycles(), 2000);
    }
}
