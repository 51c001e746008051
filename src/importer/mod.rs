// ==========================================
// 制造报价系统 - 导入层
// ==========================================
// 职责: 工序目录 CSV 导入（解析 → 映射 → 校验 → 报告）
// ==========================================

pub mod error;
pub mod process_importer;

pub use error::ImportError;
pub use process_importer::{
    ImportReport, ImportViolation, ProcessCatalogImporter, ViolationLevel,
};
