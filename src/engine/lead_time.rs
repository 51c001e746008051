// ==========================================
// 制造报价系统 - 交期估算引擎
// ==========================================
// 职责: 覆写解析 → 表面处理附加 → 数量加垫 → 档位调整 → 交期区间
// 红线: 加急缩短设下限（小的正天数）, 交期不得被压到 0 或负数
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::pricing::{GlobalPricingConfig, LeadTimeRange};
use crate::domain::routing::Routing;
use crate::domain::types::PricingTier;
use crate::engine::error::{PricingError, PricingResult};
use crate::engine::multiplier::MultiplierResolver;
use chrono::{Duration, NaiveDate};
use tracing::instrument;

// 数量加垫阈值: 大批量占用更多机时
const QTY_PAD_THRESHOLD_LARGE: u32 = 50; // 超过 → +7 天
const QTY_PAD_THRESHOLD_SMALL: u32 = 20; // 超过 → +3 天
const QTY_PAD_LARGE_DAYS: i64 = 7;
const QTY_PAD_SMALL_DAYS: i64 = 3;

// 加急档缩短后的最低交期（天）
const RUSH_MIN_DAYS: i64 = 2;

// ==========================================
// LeadTimeEngine - 交期估算引擎
// ==========================================
pub struct LeadTimeEngine {
    resolver: MultiplierResolver,
}

impl LeadTimeEngine {
    pub fn new() -> Self {
        Self {
            resolver: MultiplierResolver::new(),
        }
    }

    /// 估算交期区间
    ///
    /// 规则（顺序执行）:
    /// 1) 起点 = 生效交期天数（档位覆写 → 路线默认）
    /// 2) 每个表面处理追加其 lead_time_add_days
    /// 3) 数量加垫: > 50 → +7 天; > 20 → +3 天（取大档, 不叠加）
    /// 4) 档位调整: rush → ceil(天数 × 0.6), 下限 2 天;
    ///    economy → 天数 + ceil(天数 × 0.25); standard 不变
    /// 5) 区间: min = 调整后天数, max = min + max(2, min/4)
    ///
    /// 发货日按自然日推算（today 由调用方给出, 保证可复现）
    #[instrument(
        skip(self, routing, catalog, global),
        fields(routing_id = %routing.routing_id, tier = %tier, quantity)
    )]
    pub fn estimate(
        &self,
        routing: &Routing,
        catalog: &Catalog,
        tier: PricingTier,
        quantity: u32,
        finish_ids: &[String],
        global: &GlobalPricingConfig,
        today: NaiveDate,
    ) -> PricingResult<LeadTimeRange> {
        if quantity == 0 {
            return Err(PricingError::InvalidQuantity { quantity });
        }

        // 1. 起点: 生效交期
        let effective = self.resolver.resolve_effective(routing, tier, global);
        let mut days = effective.lead_time_days;

        // 2. 表面处理附加
        for finish_id in finish_ids {
            let finish = catalog.get_finish(finish_id).ok_or_else(|| {
                PricingError::UnknownFinish {
                    finish_id: finish_id.clone(),
                }
            })?;
            days += finish.lead_time_add_days;
        }

        // 3. 数量加垫（取大档, 不叠加）
        if quantity > QTY_PAD_THRESHOLD_LARGE {
            days += QTY_PAD_LARGE_DAYS;
        } else if quantity > QTY_PAD_THRESHOLD_SMALL {
            days += QTY_PAD_SMALL_DAYS;
        }

        // 4. 档位调整
        let adjusted = match tier {
            PricingTier::Rush => ((days as f64 * 0.6).ceil() as i64).max(RUSH_MIN_DAYS),
            PricingTier::Economy => days + (days as f64 * 0.25).ceil() as i64,
            PricingTier::Standard => days,
        };

        // 5. 区间装配
        let min_days = adjusted;
        let max_days = min_days + (min_days / 4).max(2);

        tracing::debug!(base_days = effective.lead_time_days, min_days, max_days, "交期估算完成");

        Ok(LeadTimeRange {
            min_days,
            max_days,
            earliest_ship_date: today + Duration::days(min_days),
            latest_ship_date: today + Duration::days(max_days),
        })
    }
}

impl Default for LeadTimeEngine {
    fn default() -> Self {
        Self::new()
    }
}
