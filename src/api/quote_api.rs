// ==========================================
// 制造报价系统 - 报价接口
// ==========================================
// 职责: 输入校验 + 目录受控变更 + 调用引擎装配报价
// 红线: 引擎计算期间目录/配置视为不可变快照, 变更只发生在两次计算之间
// 红线: 覆写值的有限数校验在本层完成, 绝不留到计算时
// ==========================================

use crate::api::error::{QuoteError, QuoteResult};
use crate::config::config_manager::PricingConfigManager;
use crate::domain::catalog::Catalog;
use crate::domain::pricing::{GlobalPricingConfig, LeadTimeRange, PriceBreakdown};
use crate::domain::routing::{Routing, TierOverride};
use crate::domain::types::PricingTier;
use crate::engine::lead_time::LeadTimeEngine;
use crate::engine::pricing::PricingEngine;
use chrono::NaiveDate;
use tracing::instrument;

// ==========================================
// QuoteApi - 报价接口
// ==========================================
pub struct QuoteApi {
    global: GlobalPricingConfig,
    catalog: Catalog,
    pricing_engine: PricingEngine,
    lead_time_engine: LeadTimeEngine,
}

impl QuoteApi {
    /// 创建报价接口（入参过一遍配置完整性校验）
    pub fn new(global: GlobalPricingConfig, catalog: Catalog) -> QuoteResult<Self> {
        PricingConfigManager::validate(&global, &catalog)?;
        Ok(Self {
            global,
            catalog,
            pricing_engine: PricingEngine::new(),
            lead_time_engine: LeadTimeEngine::new(),
        })
    }

    /// 从配置管理器创建
    pub fn from_config_manager(manager: PricingConfigManager) -> Self {
        let (global, catalog) = manager.into_parts();
        // 配置管理器加载时已校验, 此处直接持有
        Self {
            global,
            catalog,
            pricing_engine: PricingEngine::new(),
            lead_time_engine: LeadTimeEngine::new(),
        }
    }

    // ==========================================
    // 报价
    // ==========================================

    /// 计算报价分解
    ///
    /// base_material_cost / surface_area 来自零件/报价单数据, 由调用方提供
    #[instrument(skip(self), fields(routing_id, tier = %tier, quantity))]
    pub fn quote(
        &self,
        routing_id: &str,
        tier: PricingTier,
        quantity: u32,
        base_material_cost: f64,
        surface_area: f64,
    ) -> QuoteResult<PriceBreakdown> {
        let routing = self.require_routing(routing_id)?;

        if !routing.active {
            tracing::warn!(routing_id, "对停用路线报价（仅告警, 不拒绝）");
        }

        let breakdown = self.pricing_engine.calculate_price(
            routing,
            &self.catalog,
            tier,
            quantity,
            &self.global,
            base_material_cost,
            surface_area,
        )?;
        Ok(breakdown)
    }

    /// 按档位名称报价（CLI/外部字符串边界）
    pub fn quote_by_tier_name(
        &self,
        routing_id: &str,
        tier_name: &str,
        quantity: u32,
        base_material_cost: f64,
        surface_area: f64,
    ) -> QuoteResult<PriceBreakdown> {
        let tier = PricingTier::parse(tier_name)
            .ok_or_else(|| QuoteError::UnknownTier(tier_name.to_string()))?;
        self.quote(routing_id, tier, quantity, base_material_cost, surface_area)
    }

    /// 估算交期区间
    ///
    /// today 由调用方给出, 保证同输入可复现
    #[instrument(skip(self, finish_ids), fields(routing_id, tier = %tier, quantity))]
    pub fn lead_time(
        &self,
        routing_id: &str,
        tier: PricingTier,
        quantity: u32,
        finish_ids: &[String],
        today: NaiveDate,
    ) -> QuoteResult<LeadTimeRange> {
        let routing = self.require_routing(routing_id)?;
        let range = self.lead_time_engine.estimate(
            routing,
            &self.catalog,
            tier,
            quantity,
            finish_ids,
            &self.global,
            today,
        )?;
        Ok(range)
    }

    // ==========================================
    // 目录受控变更
    // ==========================================

    /// 设置主定价路线（先清空全部, 再设置一条）
    pub fn set_primary_routing(&mut self, routing_id: &str) -> QuoteResult<()> {
        self.catalog
            .set_primary_routing(routing_id)
            .map_err(|_| QuoteError::UnknownRouting(routing_id.to_string()))
    }

    /// 设置路线启用标志
    pub fn set_routing_active(&mut self, routing_id: &str, active: bool) -> QuoteResult<()> {
        self.catalog
            .set_routing_active(routing_id, active)
            .map_err(|_| QuoteError::UnknownRouting(routing_id.to_string()))
    }

    /// 写入档位覆写
    ///
    /// 有限数校验在此边界完成（畸形 UI 输入在这里被拒绝）
    pub fn upsert_tier_override(
        &mut self,
        routing_id: &str,
        tier: PricingTier,
        tier_override: TierOverride,
    ) -> QuoteResult<()> {
        if let Err((field, value)) = tier_override.validate_finite() {
            return Err(QuoteError::OverrideNotFinite {
                field: field.to_string(),
                value,
            });
        }

        self.catalog
            .upsert_tier_override(routing_id, tier, tier_override)
            .map_err(|_| QuoteError::UnknownRouting(routing_id.to_string()))
    }

    /// 清除档位覆写（整条移除, 恢复回退语义）
    pub fn clear_tier_override(
        &mut self,
        routing_id: &str,
        tier: PricingTier,
    ) -> QuoteResult<()> {
        self.catalog
            .clear_tier_override(routing_id, tier)
            .map_err(|_| QuoteError::UnknownRouting(routing_id.to_string()))
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn global(&self) -> &GlobalPricingConfig {
        &self.global
    }

    fn require_routing(&self, routing_id: &str) -> QuoteResult<&Routing> {
        self.catalog
            .get_routing(routing_id)
            .ok_or_else(|| QuoteError::UnknownRouting(routing_id.to_string()))
    }
}
