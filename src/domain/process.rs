// ==========================================
// 制造报价系统 - 工序/物料/表面处理目录模型
// ==========================================
// 红线: 目录数据为只读参考数据, 加载后引擎层不得修改
// 用途: 配置层/导入层写入, 引擎层只读
// ==========================================

use crate::domain::types::ProcessCategory;
use serde::{Deserialize, Serialize};

// ==========================================
// ProcessDefinition - 工序定义
// ==========================================
// 描述一个制造步骤的计费参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessDefinition {
    // ===== 主键 =====
    pub process_id: String, // 工序唯一标识

    // ===== 基础信息 =====
    pub name: String,              // 显示名称
    pub category: ProcessCategory, // 工序类别（主加工/二次加工/表面处理）

    // ===== 计费维度 =====
    pub setup_time_minutes: f64,     // 准备时间（分钟, 一次性）
    pub hourly_rate: f64,            // 小时费率（货币/小时）
    pub minimum_cost: f64,           // 本工序最低收费（货币下限）
    pub complexity_multiplier: f64,  // 复杂度乘数（无量纲, 作用于运行费）
}

// ==========================================
// MaterialDefinition - 物料定义
// ==========================================
// 物料基础成本由调用方换算为 base_material_cost 后传入引擎;
// 引擎只负责加价, 不负责取数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDefinition {
    pub material_id: String, // 物料唯一标识

    pub name: String,                 // 显示名称
    pub cost_per_square_inch: f64,    // 单位面积成本（货币/平方英寸）
    #[serde(default)]
    pub stock_note: Option<String>,   // 备料说明（可选）
}

// ==========================================
// FinishDefinition - 表面处理定义
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishDefinition {
    pub finish_id: String, // 表面处理唯一标识

    pub name: String,               // 显示名称
    pub cost_per_square_inch: f64,  // 单位面积成本（货币/平方英寸）
    pub lead_time_add_days: i64,    // 交期附加天数（交期引擎使用）
}
