// ==========================================
// 制造报价系统 - 定价配置与报价结果模型
// ==========================================
// 红线: PriceBreakdown 是值对象, 每次计算新建, 不持久化不复用
// 红线: volume_breaks 必须无缝无重叠覆盖 [1, ∞)
// ==========================================

use crate::domain::types::PricingTier;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// VolumeBreak - 批量折扣档
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeBreak {
    pub min_quantity: u32,          // 档位下界（含）
    pub max_quantity: Option<u32>,  // 档位上界（含）; None = 无上界
    pub discount_percent: f64,      // 折扣百分比（0-100）
}

impl VolumeBreak {
    /// 数量是否落入本档
    pub fn matches(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity
            && self.max_quantity.map_or(true, |max| quantity <= max)
    }
}

// ==========================================
// TierMultipliers - 全局档位默认乘数
// ==========================================
// 仅乘数有全局默认值; 加价/表面处理/交期的回退终点是路线默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierMultipliers {
    pub economy: f64,
    pub standard: f64,
    pub rush: f64,
}

impl TierMultipliers {
    /// 取某档位的默认乘数
    pub fn get(&self, tier: PricingTier) -> f64 {
        match tier {
            PricingTier::Economy => self.economy,
            PricingTier::Standard => self.standard,
            PricingTier::Rush => self.rush,
        }
    }
}

// ==========================================
// GlobalPricingConfig - 全局定价配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalPricingConfig {
    /// 档位默认乘数（路线/档位无覆写时生效）
    pub default_tier_multipliers: TierMultipliers,

    /// 批量折扣表（有序, 覆盖 [1, ∞), 配置加载时校验）
    pub volume_breaks: Vec<VolumeBreak>,

    /// 最低订单金额（最终报价的货币下限, 与路线/档位无关）
    pub minimum_order_value: f64,
}

// ==========================================
// EffectiveRates - 解析后的生效值
// ==========================================
// 覆写解析结果, 随报价结果返回, 供展示/审计
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveRates {
    pub multiplier: f64,              // 生效档位乘数
    pub material_markup_percent: f64, // 生效物料加价百分比
    pub finishing_cost_per_area: f64, // 生效表面处理单价
    pub lead_time_days: i64,          // 生效交期天数
}

// ==========================================
// PriceBreakdown - 报价分解（引擎输出）
// ==========================================
// 每次计算新建; 相同输入必须产生逐位相同的输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    // ===== 成本分项 =====
    pub processing_cost: f64, // 加工费（步骤汇总 × 生效档位乘数）
    pub material_cost: f64,   // 物料费（基础成本 × (1 + 加价%)）
    pub finishing_cost: f64,  // 表面处理费（单价 × 面积）

    // ===== 汇总 =====
    pub subtotal: f64,         // 三项之和（折扣前）
    pub discount_percent: f64, // 命中的批量折扣
    pub final_price: f64,      // 折后价, 下限为最低订单金额

    // ===== 生效值（审计/展示）=====
    pub effective: EffectiveRates,

    // ===== 标志 =====
    /// 路线无步骤（加工费为 0）; 合法但调用方应可感知, 避免静默报 0 加工费
    pub empty_routing: bool,
}

// ==========================================
// LeadTimeRange - 交期区间
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeRange {
    pub min_days: i64, // 最短交期（天）
    pub max_days: i64, // 最长交期（天）

    pub earliest_ship_date: NaiveDate, // 最早发货日（today + min_days）
    pub latest_ship_date: NaiveDate,   // 最晚发货日（today + max_days）
}
