// ==========================================
// 制造报价系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 定价与交期估算引擎 (纯计算库, 无持久化)
// 红线: 引擎层不做 I/O, 相同输入必须产生相同输出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 定价与交期规则
pub mod engine;

// 配置层 - 目录与全局定价配置
pub mod config;

// 导入层 - 工序目录 CSV 导入
pub mod importer;

// API 层 - 报价接口
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PricingTier, ProcessCategory};

// 领域实体
pub use domain::{
    Catalog, FinishDefinition, GlobalPricingConfig, LeadTimeRange, MaterialDefinition,
    PriceBreakdown, ProcessDefinition, Routing, RoutingStep, TierMultipliers, TierOverride,
    VolumeBreak,
};

// 引擎
pub use engine::{
    CostRollup, EffectiveRates, LeadTimeEngine, MultiplierResolver, PricingEngine,
    VolumeBreakMatcher,
};

// 配置
pub use config::{ConfigError, PricingConfigManager};

// API
pub use api::{QuoteApi, QuoteError, QuoteResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "制造报价系统";
