// ==========================================
// 制造报价系统 - 引擎层
// ==========================================
// 职责: 实现定价与交期规则, 不做 I/O, 不持有可变状态
// 红线: 引擎把收到的路线/目录/全局配置视为本次计算的不可变快照;
//       相同输入必须产生逐位相同的输出
// ==========================================

pub mod error;
pub mod lead_time;
pub mod multiplier;
pub mod pricing;
pub mod rollup;
pub mod volume;

// 重导出核心引擎
pub use error::{PricingError, PricingResult};
pub use lead_time::LeadTimeEngine;
pub use multiplier::MultiplierResolver;
pub use pricing::PricingEngine;
pub use rollup::{CostRollup, RollupResult, ASSUMED_RUNTIME_MINUTES};
pub use volume::{ScheduleViolation, VolumeBreakMatcher};

// 生效值随报价结果返回, 从领域层重导出便于引擎消费方使用
pub use crate::domain::pricing::EffectiveRates;
