// ==========================================
// 制造报价系统 - 内置默认配置
// ==========================================
// 职责: 无配置文件时的兜底目录与全局定价配置
// 说明: 数值与报价目录基准表一致; 生产环境应以配置文件为准
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::pricing::{GlobalPricingConfig, TierMultipliers, VolumeBreak};
use crate::domain::process::{FinishDefinition, MaterialDefinition, ProcessDefinition};
use crate::domain::routing::{Routing, RoutingStep};
use crate::domain::types::ProcessCategory;
use std::collections::HashMap;

/// 内置默认全局定价配置
///
/// 档位乘数: economy 0.85 / standard 1.0 / rush 1.5
/// 折扣表: 1-9 无折扣, 10-49 5%, 50-99 10%, 100-499 15%, 500+ 20%
pub fn default_global_config() -> GlobalPricingConfig {
    GlobalPricingConfig {
        default_tier_multipliers: TierMultipliers {
            economy: 0.85,
            standard: 1.0,
            rush: 1.5,
        },
        volume_breaks: vec![
            VolumeBreak {
                min_quantity: 1,
                max_quantity: Some(9),
                discount_percent: 0.0,
            },
            VolumeBreak {
                min_quantity: 10,
                max_quantity: Some(49),
                discount_percent: 5.0,
            },
            VolumeBreak {
                min_quantity: 50,
                max_quantity: Some(99),
                discount_percent: 10.0,
            },
            VolumeBreak {
                min_quantity: 100,
                max_quantity: Some(499),
                discount_percent: 15.0,
            },
            VolumeBreak {
                min_quantity: 500,
                max_quantity: None,
                discount_percent: 20.0,
            },
        ],
        minimum_order_value: 50.0,
    }
}

fn process(
    process_id: &str,
    name: &str,
    category: ProcessCategory,
    setup_time_minutes: f64,
    hourly_rate: f64,
    minimum_cost: f64,
    complexity_multiplier: f64,
) -> ProcessDefinition {
    ProcessDefinition {
        process_id: process_id.to_string(),
        name: name.to_string(),
        category,
        setup_time_minutes,
        hourly_rate,
        minimum_cost,
        complexity_multiplier,
    }
}

/// 内置默认目录: 代表性工序/物料/表面处理 + 两条示例路线
pub fn default_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    // ===== 工序 =====
    for p in [
        process("PROC-LASER", "激光切割", ProcessCategory::Primary, 10.0, 85.0, 20.0, 1.0),
        process("PROC-CNC-MILL", "数控铣削", ProcessCategory::Primary, 15.0, 95.0, 25.0, 1.2),
        process("PROC-BEND", "折弯", ProcessCategory::Secondary, 12.0, 70.0, 15.0, 1.0),
        process("PROC-WELD-TIG", "氩弧焊", ProcessCategory::Secondary, 20.0, 90.0, 30.0, 1.3),
        process("PROC-POWDER", "粉末喷涂", ProcessCategory::Finishing, 25.0, 60.0, 40.0, 1.0),
        process("PROC-DEBURR", "去毛刺", ProcessCategory::Secondary, 5.0, 45.0, 10.0, 1.0),
    ] {
        catalog.processes.insert(p.process_id.clone(), p);
    }

    // ===== 物料 =====
    for m in [
        MaterialDefinition {
            material_id: "MAT-AL6061".to_string(),
            name: "铝 6061".to_string(),
            cost_per_square_inch: 0.8,
            stock_note: None,
        },
        MaterialDefinition {
            material_id: "MAT-SS304".to_string(),
            name: "不锈钢 304".to_string(),
            cost_per_square_inch: 1.5,
            stock_note: None,
        },
        MaterialDefinition {
            material_id: "MAT-CRS".to_string(),
            name: "冷轧钢板".to_string(),
            cost_per_square_inch: 0.5,
            stock_note: Some("常备库存".to_string()),
        },
    ] {
        catalog.materials.insert(m.material_id.clone(), m);
    }

    // ===== 表面处理 =====
    for f in [
        FinishDefinition {
            finish_id: "FIN-ANODIZE".to_string(),
            name: "阳极氧化".to_string(),
            cost_per_square_inch: 0.3,
            lead_time_add_days: 4,
        },
        FinishDefinition {
            finish_id: "FIN-POWDER".to_string(),
            name: "粉末喷涂".to_string(),
            cost_per_square_inch: 0.25,
            lead_time_add_days: 3,
        },
        FinishDefinition {
            finish_id: "FIN-PASSIVATE".to_string(),
            name: "钝化".to_string(),
            cost_per_square_inch: 0.15,
            lead_time_add_days: 2,
        },
    ] {
        catalog.finishes.insert(f.finish_id.clone(), f);
    }

    // ===== 示例路线 =====
    let sheet_metal = Routing {
        routing_id: "RT-SHEET-METAL".to_string(),
        name: "钣金件标准路线".to_string(),
        steps: vec![
            RoutingStep {
                process_id: "PROC-LASER".to_string(),
                sequence: 1,
                setup_time_multiplier: 1.0,
                runtime_multiplier: 1.0,
            },
            RoutingStep {
                process_id: "PROC-BEND".to_string(),
                sequence: 2,
                setup_time_multiplier: 1.0,
                runtime_multiplier: 0.8,
            },
            RoutingStep {
                process_id: "PROC-DEBURR".to_string(),
                sequence: 3,
                setup_time_multiplier: 0.5,
                runtime_multiplier: 0.5,
            },
        ],
        material_markup_percent: 20.0,
        finishing_cost_per_area: 0.25,
        estimated_lead_time_days: 10,
        tier_overrides: HashMap::new(),
        active: true,
        is_primary_pricing_route: true,
    };

    let machined = Routing {
        routing_id: "RT-MACHINED".to_string(),
        name: "机加工件标准路线".to_string(),
        steps: vec![
            RoutingStep {
                process_id: "PROC-CNC-MILL".to_string(),
                sequence: 1,
                setup_time_multiplier: 1.0,
                runtime_multiplier: 1.0,
            },
            RoutingStep {
                process_id: "PROC-DEBURR".to_string(),
                sequence: 2,
                setup_time_multiplier: 0.5,
                runtime_multiplier: 0.5,
            },
        ],
        material_markup_percent: 25.0,
        finishing_cost_per_area: 0.3,
        estimated_lead_time_days: 12,
        tier_overrides: HashMap::new(),
        active: true,
        is_primary_pricing_route: false,
    };

    catalog.upsert_routing(sheet_metal);
    catalog.upsert_routing(machined);

    catalog
}
