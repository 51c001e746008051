// ==========================================
// 制造报价系统 - API层错误类型
// ==========================================
// 职责: 定义报价接口错误, 转换引擎/配置层错误为用户可读的业务错误
// 红线: 所有错误信息必须包含显式原因（可解释性）
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::PricingError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum QuoteError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("无效数量: {quantity}（数量必须 ≥ 1）")]
    InvalidQuantity { quantity: u32 },

    #[error("未知定价档位: {0}（有效档位: ECONOMY/STANDARD/RUSH）")]
    UnknownTier(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 资源未找到
    // ==========================================
    #[error("工艺路线不存在: {0}")]
    UnknownRouting(String),

    #[error("路线 {routing_id} 引用了不存在的工序: {process_id}")]
    UnknownProcess {
        routing_id: String,
        process_id: String,
    },

    #[error("表面处理不存在: {0}")]
    UnknownFinish(String),

    // ==========================================
    // 覆写边界错误
    // ==========================================
    /// 覆写值非有限数: 在设置边界拒绝, 不留到计算时
    #[error("档位覆写非法: 字段{field} 值{value}（必须为有限数）")]
    OverrideNotFinite { field: String, value: f64 },

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("批量折扣表非法: {0}")]
    MalformedVolumeSchedule(String),

    #[error("配置错误: {0}")]
    ConfigFailure(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type QuoteResult<T> = Result<T, QuoteError>;

// ==========================================
// 从引擎层错误转换
// ==========================================
impl From<PricingError> for QuoteError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidQuantity { quantity } => QuoteError::InvalidQuantity { quantity },
            PricingError::InvalidMoneyInput { field, value } => {
                QuoteError::InvalidInput(format!("字段{}值{}必须为非负有限数", field, value))
            }
            PricingError::UnknownProcess {
                routing_id,
                process_id,
            } => QuoteError::UnknownProcess {
                routing_id,
                process_id,
            },
            PricingError::UnknownFinish { finish_id } => QuoteError::UnknownFinish(finish_id),
        }
    }
}

// ==========================================
// 从配置层错误转换
// 目的: 配置层技术错误 → 用户可读的业务错误
// ==========================================
impl From<ConfigError> for QuoteError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MalformedVolumeSchedule(msg) => QuoteError::MalformedVolumeSchedule(msg),
            ConfigError::OverrideNotFinite { field, value, .. } => {
                QuoteError::OverrideNotFinite { field, value }
            }
            ConfigError::InvalidRouting(msg) => QuoteError::InvalidInput(msg),
            ConfigError::CatalogIntegrity(msg) => QuoteError::ConfigFailure(msg),
            other => QuoteError::ConfigFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_conversion() {
        let err: QuoteError = PricingError::InvalidQuantity { quantity: 0 }.into();
        match err {
            QuoteError::InvalidQuantity { quantity } => assert_eq!(quantity, 0),
            other => panic!("期望 InvalidQuantity, 实际 {:?}", other),
        }

        let err: QuoteError = PricingError::UnknownProcess {
            routing_id: "RT-001".to_string(),
            process_id: "P-404".to_string(),
        }
        .into();
        assert!(err.to_string().contains("P-404"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: QuoteError = ConfigError::MalformedVolumeSchedule("断档".to_string()).into();
        assert!(matches!(err, QuoteError::MalformedVolumeSchedule(_)));
    }
}
