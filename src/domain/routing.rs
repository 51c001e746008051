// ==========================================
// 制造报价系统 - 工艺路线领域模型
// ==========================================
// 红线: 覆写字段"缺失"与"为零"语义不同, 不得混淆
// 红线: 全系统同时最多一条主定价路线 (由目录变更方保证, 引擎不感知)
// ==========================================

use crate::domain::types::PricingTier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RoutingStep - 工艺路线步骤
// ==========================================
// 引用一个工序定义, 归属其父路线, 随路线销毁
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingStep {
    pub process_id: String, // 关联 ProcessDefinition

    /// 序号（1 起, 路线内唯一且连续, 决定展示/装配顺序）
    pub sequence: u32,

    /// 准备时间乘数（无量纲, 缩放本路线内该工序的准备费）
    #[serde(default = "default_multiplier")]
    pub setup_time_multiplier: f64,

    /// 运行时间乘数（无量纲, 缩放本路线内该工序的运行费）
    #[serde(default = "default_multiplier")]
    pub runtime_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

// ==========================================
// TierOverride - 档位覆写
// ==========================================
// 全字段可选: 缺失 → 回退到路线默认值或全局默认值
// 红线: 存在的值必须是有限数, 在设置边界校验, 不在计算时校验
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TierOverride {
    /// 档位乘数覆写（缺失 → 全局 default_tier_multipliers）
    #[serde(default)]
    pub multiplier: Option<f64>,

    /// 物料加价百分比覆写（缺失 → 路线 material_markup_percent）
    #[serde(default)]
    pub material_markup_override: Option<f64>,

    /// 表面处理单价覆写（缺失 → 路线 finishing_cost_per_area）
    #[serde(default)]
    pub finishing_cost_override: Option<f64>,

    /// 交期天数覆写（缺失 → 路线 estimated_lead_time_days）
    #[serde(default)]
    pub lead_time_override: Option<i64>,
}

impl TierOverride {
    /// 校验所有存在的覆写值均为有限数
    ///
    /// 返回第一个非法字段 (字段名, 值); 全部合法返回 Ok(())
    pub fn validate_finite(&self) -> Result<(), (&'static str, f64)> {
        if let Some(v) = self.multiplier {
            if !v.is_finite() {
                return Err(("multiplier", v));
            }
        }
        if let Some(v) = self.material_markup_override {
            if !v.is_finite() {
                return Err(("material_markup_override", v));
            }
        }
        if let Some(v) = self.finishing_cost_override {
            if !v.is_finite() {
                return Err(("finishing_cost_override", v));
            }
        }
        Ok(())
    }

    /// 是否不含任何覆写（清空后可据此移除整条记录）
    pub fn is_empty(&self) -> bool {
        self.multiplier.is_none()
            && self.material_markup_override.is_none()
            && self.finishing_cost_override.is_none()
            && self.lead_time_override.is_none()
    }
}

// ==========================================
// Routing - 工艺路线
// ==========================================
// 有序步骤序列 + 路线级定价默认值 + 档位覆写表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routing {
    // ===== 主键 =====
    pub routing_id: String, // 路线唯一标识

    // ===== 基础信息 =====
    pub name: String, // 显示名称

    // ===== 步骤序列 =====
    pub steps: Vec<RoutingStep>, // 序号必须连续且不重复

    // ===== 路线级定价默认值 =====
    pub material_markup_percent: f64,  // 物料加价百分比
    pub finishing_cost_per_area: f64,  // 表面处理单价（货币/平方英寸）
    pub estimated_lead_time_days: i64, // 预估交期（天）

    // ===== 档位覆写 =====
    #[serde(default)]
    pub tier_overrides: HashMap<PricingTier, TierOverride>,

    // ===== 状态标志 =====
    pub active: bool,                  // 启用标志
    pub is_primary_pricing_route: bool, // 主定价路线标志（全系统至多一条）
}

impl Routing {
    /// 校验步骤序号: 1 起连续、无重复
    ///
    /// 空路线合法（纯物料/表面处理报价行）
    pub fn validate_steps(&self) -> Result<(), String> {
        let mut sequences: Vec<u32> = self.steps.iter().map(|s| s.sequence).collect();
        sequences.sort_unstable();

        for (idx, seq) in sequences.iter().enumerate() {
            let expected = (idx + 1) as u32;
            if *seq != expected {
                return Err(format!(
                    "路线{}步骤序号非法: 期望连续序号{}, 实际{}",
                    self.routing_id, expected, seq
                ));
            }
        }
        Ok(())
    }

    /// 按序号升序返回步骤（计算本身与顺序无关, 展示/装配流需要）
    pub fn steps_in_sequence(&self) -> Vec<&RoutingStep> {
        let mut refs: Vec<&RoutingStep> = self.steps.iter().collect();
        refs.sort_by_key(|s| s.sequence);
        refs
    }

    /// 查询某档位的覆写（缺失为正常情况, 不是错误）
    pub fn tier_override(&self, tier: PricingTier) -> Option<&TierOverride> {
        self.tier_overrides.get(&tier)
    }
}
