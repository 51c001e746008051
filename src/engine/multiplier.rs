// ==========================================
// 制造报价系统 - 覆写解析引擎
// ==========================================
// 职责: 解析路线 × 档位的生效乘数/加价/表面处理单价/交期
// 红线: 回退规则不对称且必须保持 —
//   乘数:       覆写 → 全局档位默认乘数 (两级)
//   其余三字段: 覆写 → 路线默认值 (两级, 无全局默认)
// 红线: 覆写缺失是正常预期情况, 不是错误
// ==========================================

use crate::domain::pricing::{EffectiveRates, GlobalPricingConfig};
use crate::domain::routing::Routing;
use crate::domain::types::PricingTier;

// ==========================================
// MultiplierResolver - 覆写解析引擎
// ==========================================
pub struct MultiplierResolver;

impl MultiplierResolver {
    pub fn new() -> Self {
        Self
    }

    /// 解析生效值
    ///
    /// 每个字段独立解析:
    /// - multiplier: tier_overrides[tier].multiplier → global.default_tier_multipliers[tier]
    /// - material_markup_percent: 覆写 → routing.material_markup_percent
    /// - finishing_cost_per_area: 覆写 → routing.finishing_cost_per_area
    /// - lead_time_days: 覆写 → routing.estimated_lead_time_days
    pub fn resolve_effective(
        &self,
        routing: &Routing,
        tier: PricingTier,
        global: &GlobalPricingConfig,
    ) -> EffectiveRates {
        let tier_override = routing.tier_override(tier);

        let multiplier = tier_override
            .and_then(|o| o.multiplier)
            .unwrap_or_else(|| global.default_tier_multipliers.get(tier));

        let material_markup_percent = tier_override
            .and_then(|o| o.material_markup_override)
            .unwrap_or(routing.material_markup_percent);

        let finishing_cost_per_area = tier_override
            .and_then(|o| o.finishing_cost_override)
            .unwrap_or(routing.finishing_cost_per_area);

        let lead_time_days = tier_override
            .and_then(|o| o.lead_time_override)
            .unwrap_or(routing.estimated_lead_time_days);

        EffectiveRates {
            multiplier,
            material_markup_percent,
            finishing_cost_per_area,
            lead_time_days,
        }
    }
}

impl Default for MultiplierResolver {
    fn default() -> Self {
        Self::new()
    }
}
