// ==========================================
// 制造报价系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 无效输入必须在计算前快速失败, 不得静默产出 0/NaN
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum PricingError {
    // ===== 输入校验错误 =====
    #[error("无效数量: {quantity}（数量必须 ≥ 1）")]
    InvalidQuantity { quantity: u32 },

    #[error("无效货币输入: 字段 {field} 值 {value}（必须为非负有限数）")]
    InvalidMoneyInput { field: &'static str, value: f64 },

    // ===== 目录完整性错误 =====
    #[error("路线 {routing_id} 引用了不存在的工序: {process_id}")]
    UnknownProcess {
        routing_id: String,
        process_id: String,
    },

    #[error("表面处理不存在: {finish_id}")]
    UnknownFinish { finish_id: String },
}

/// Result 类型别名
pub type PricingResult<T> = Result<T, PricingError>;
