// ==========================================
// 制造报价系统 - 领域层
// ==========================================
// 职责: 实体与类型定义, 不含业务规则计算
// 红线: 目录数据对引擎层只读; 值对象不持久化
// ==========================================

pub mod catalog;
pub mod pricing;
pub mod process;
pub mod routing;
pub mod types;

// 重导出核心实体
pub use catalog::Catalog;
pub use pricing::{
    EffectiveRates, GlobalPricingConfig, LeadTimeRange, PriceBreakdown, TierMultipliers,
    VolumeBreak,
};
pub use process::{FinishDefinition, MaterialDefinition, ProcessDefinition};
pub use routing::{Routing, RoutingStep, TierOverride};
pub use types::{PricingTier, ProcessCategory};
