// ==========================================
// 制造报价系统 - 配置层
// ==========================================
// 职责: 目录与全局定价配置的加载、校验与快照
// 存储: JSON 配置文件（无数据库）
// ==========================================

pub mod config_manager;
pub mod defaults;
pub mod error;

// 重导出核心配置管理器
pub use config_manager::{PricingConfigFile, PricingConfigManager};
pub use defaults::{default_catalog, default_global_config};
pub use error::{ConfigError, ConfigResult};
