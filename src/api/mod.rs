// ==========================================
// 制造报价系统 - API层
// ==========================================
// 职责: 报价业务接口（校验边界 + 目录受控变更）
// ==========================================

pub mod error;
pub mod quote_api;

pub use error::{QuoteError, QuoteResult};
pub use quote_api::QuoteApi;
