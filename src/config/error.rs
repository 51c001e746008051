// ==========================================
// 制造报价系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 折扣表完整性在配置加载时校验一次, 不留到每次报价
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件相关错误 =====
    #[error("配置文件读取失败: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ===== 配置完整性错误 =====
    #[error("批量折扣表非法: {0}")]
    MalformedVolumeSchedule(String),

    #[error("工艺路线非法: {0}")]
    InvalidRouting(String),

    #[error("档位覆写非法: 路线{routing_id} 档位{tier} 字段{field} 值{value}（必须为有限数）")]
    OverrideNotFinite {
        routing_id: String,
        tier: String,
        field: String,
        value: f64,
    },

    #[error("目录完整性错误: {0}")]
    CatalogIntegrity(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
