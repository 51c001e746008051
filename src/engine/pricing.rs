// ==========================================
// 制造报价系统 - 报价装配引擎
// ==========================================
// 职责: 覆写解析 → 成本汇总 → 批量折扣 → 最低订单金额, 装配完整报价分解
// 红线: 档位乘数在步骤汇总之后整体施加一次, 绝不按步骤施加
// 红线: 纯函数管线 — 无随机因子, 无隐藏全局状态, 相同输入逐位相同输出
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::pricing::{GlobalPricingConfig, PriceBreakdown};
use crate::domain::routing::Routing;
use crate::domain::types::PricingTier;
use crate::engine::error::{PricingError, PricingResult};
use crate::engine::multiplier::MultiplierResolver;
use crate::engine::rollup::CostRollup;
use crate::engine::volume::VolumeBreakMatcher;
use tracing::instrument;

// ==========================================
// PricingEngine - 报价装配引擎
// ==========================================
pub struct PricingEngine {
    resolver: MultiplierResolver,
    rollup: CostRollup,
    matcher: VolumeBreakMatcher,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self {
            resolver: MultiplierResolver::new(),
            rollup: CostRollup::new(),
            matcher: VolumeBreakMatcher::new(),
        }
    }

    /// 计算完整报价分解
    ///
    /// 管线（顺序固定）:
    /// 1. 输入校验（数量 ≥ 1, 货币输入非负有限）
    /// 2. 覆写解析 → 生效乘数/加价/表面处理单价/交期
    /// 3. 步骤汇总加工费 × 生效档位乘数（路线级, 汇总后施加一次）
    /// 4. 物料费 = 基础成本 × (1 + 生效加价%)
    /// 5. 表面处理费 = 生效单价 × 面积
    /// 6. 小计 = 三项之和
    /// 7. 折扣 = 批量折扣表命中档
    /// 8. 最终价 = max(小计 × (1 - 折扣%), 最低订单金额)
    ///
    /// base_material_cost / surface_area 来自零件/报价单数据, 由调用方提供;
    /// 引擎只施加加价与单价, 不做取数假定
    #[instrument(
        skip(self, routing, catalog, global),
        fields(routing_id = %routing.routing_id, tier = %tier, quantity)
    )]
    pub fn calculate_price(
        &self,
        routing: &Routing,
        catalog: &Catalog,
        tier: PricingTier,
        quantity: u32,
        global: &GlobalPricingConfig,
        base_material_cost: f64,
        surface_area: f64,
    ) -> PricingResult<PriceBreakdown> {
        // 1. 输入校验: 快速失败, 不得静默产出 0/NaN
        if quantity == 0 {
            return Err(PricingError::InvalidQuantity { quantity });
        }
        Self::validate_money("base_material_cost", base_material_cost)?;
        Self::validate_money("surface_area", surface_area)?;

        // 2. 覆写解析
        let effective = self.resolver.resolve_effective(routing, tier, global);

        // 3. 加工费: 步骤汇总后, 档位乘数整体施加一次
        let rollup = self.rollup.processing_cost(routing, catalog, quantity)?;
        let processing_cost = rollup.processing_cost * effective.multiplier;

        // 4/5. 物料费与表面处理费
        let material_cost = self
            .rollup
            .material_cost(base_material_cost, effective.material_markup_percent);
        let finishing_cost = self
            .rollup
            .finishing_cost(effective.finishing_cost_per_area, surface_area);

        // 6/7/8. 小计 → 折扣 → 最低订单金额下限
        let subtotal = processing_cost + material_cost + finishing_cost;
        let discount_percent = self.matcher.match_discount(&global.volume_breaks, quantity);
        let discounted = subtotal * (1.0 - discount_percent / 100.0);
        let final_price = discounted.max(global.minimum_order_value);

        let empty_routing = rollup.step_count == 0;
        if empty_routing {
            tracing::info!(
                routing_id = %routing.routing_id,
                "空路线报价: 加工费为0, 仅物料/表面处理计价"
            );
        }

        tracing::debug!(
            processing_cost,
            material_cost,
            finishing_cost,
            subtotal,
            discount_percent,
            final_price,
            "报价装配完成"
        );

        Ok(PriceBreakdown {
            processing_cost,
            material_cost,
            finishing_cost,
            subtotal,
            discount_percent,
            final_price,
            effective,
            empty_routing,
        })
    }

    /// 货币/面积输入校验: 非负有限数
    fn validate_money(field: &'static str, value: f64) -> PricingResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(PricingError::InvalidMoneyInput { field, value });
        }
        Ok(())
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new()
    }
}
