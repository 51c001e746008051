// ==========================================
// 制造报价系统 - 领域类型定义
// ==========================================
// 红线: 定价档位是封闭枚举, 有且只有三档
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 定价档位 (Pricing Tier)
// ==========================================
// 档位只决定乘数/交期的解析入口, 顺序本身无数值含义
// 预期 economy 乘数 < standard 乘数 < rush 乘数, 但不强制
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingTier {
    Economy,  // 经济档
    Standard, // 标准档
    Rush,     // 加急档
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingTier::Economy => write!(f, "ECONOMY"),
            PricingTier::Standard => write!(f, "STANDARD"),
            PricingTier::Rush => write!(f, "RUSH"),
        }
    }
}

impl PricingTier {
    /// 从字符串解析档位
    ///
    /// 大小写不敏感; 未知档位返回 None (由调用方转为 UnknownTier 错误)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ECONOMY" => Some(PricingTier::Economy),
            "STANDARD" => Some(PricingTier::Standard),
            "RUSH" => Some(PricingTier::Rush),
            _ => None,
        }
    }

    /// 全部档位（遍历用, 顺序固定）
    pub fn all() -> [PricingTier; 3] {
        [
            PricingTier::Economy,
            PricingTier::Standard,
            PricingTier::Rush,
        ]
    }
}

// ==========================================
// 工序类别 (Process Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessCategory {
    Primary,   // 主加工
    Secondary, // 二次加工
    Finishing, // 表面处理
}

impl fmt::Display for ProcessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessCategory::Primary => write!(f, "PRIMARY"),
            ProcessCategory::Secondary => write!(f, "SECONDARY"),
            ProcessCategory::Finishing => write!(f, "FINISHING"),
        }
    }
}

impl ProcessCategory {
    /// 从字符串解析工序类别（目录 CSV 导入用）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PRIMARY" => Some(ProcessCategory::Primary),
            "SECONDARY" => Some(ProcessCategory::Secondary),
            "FINISHING" => Some(ProcessCategory::Finishing),
            _ => None,
        }
    }
}
