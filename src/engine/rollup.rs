// ==========================================
// 制造报价系统 - 成本汇总引擎
// ==========================================
// 职责: 步骤级准备费/运行费汇总 + 物料费 + 表面处理费
// 红线: 路线最低收费取各工序最低收费的最大值, 不是求和
//       (单一瓶颈工序的最低收费可主导整条路线)
// 红线: 档位乘数不在步骤级施加, 由装配层在汇总后整体施加一次
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::routing::Routing;
use crate::engine::error::{PricingError, PricingResult};
use tracing::instrument;

/// 单件运行时间假定值（分钟）
///
/// 占位常量: 实际运行时间应来自零件几何的节拍估算, 接入后
/// 仅需替换本常量的取值来源, 不影响管线其余部分。
// TODO: 接入 CAM/几何节拍估算后改为按步骤传入实际运行时间
pub const ASSUMED_RUNTIME_MINUTES: f64 = 30.0;

// ==========================================
// RollupResult - 加工费汇总结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollupResult {
    pub total_setup_cost: f64,     // 准备费合计（一次性, 与数量无关）
    pub total_runtime_cost: f64,   // 运行费合计（单件运行费 × 数量）
    pub per_operation_minimum: f64, // 各工序最低收费的最大值
    pub processing_cost: f64,      // max(准备费+运行费, 最低收费)
    pub step_count: usize,         // 步骤数（0 = 空路线, 合法）
}

// ==========================================
// CostRollup - 成本汇总引擎
// ==========================================
pub struct CostRollup;

impl CostRollup {
    pub fn new() -> Self {
        Self
    }

    /// 计算路线加工费（未施加档位乘数）
    ///
    /// 每步骤:
    /// - 准备费 = 准备分钟 × 准备乘数 / 60 × 小时费率（一次性）
    /// - 单件运行费 = 假定运行分钟 × 运行乘数 / 60 × 小时费率 × 复杂度乘数
    ///
    /// 结果 = max(准备费合计 + 单件运行费 × 数量, 各工序最低收费最大值)
    ///
    /// # 边界
    /// - 空路线 → 加工费 0, 最低收费 0, 不报错
    /// - 步骤引用不存在的工序 → UnknownProcess（目录完整性错误）
    #[instrument(skip(self, routing, catalog), fields(routing_id = %routing.routing_id, quantity))]
    pub fn processing_cost(
        &self,
        routing: &Routing,
        catalog: &Catalog,
        quantity: u32,
    ) -> PricingResult<RollupResult> {
        let mut total_setup_cost = 0.0;
        let mut total_runtime_cost = 0.0;
        let mut per_operation_minimum: f64 = 0.0;

        // 求和与顺序无关, 按序号遍历只为日志可读
        for step in routing.steps_in_sequence() {
            let process = catalog.get_process(&step.process_id).ok_or_else(|| {
                PricingError::UnknownProcess {
                    routing_id: routing.routing_id.clone(),
                    process_id: step.process_id.clone(),
                }
            })?;

            let setup_cost =
                process.setup_time_minutes * step.setup_time_multiplier / 60.0 * process.hourly_rate;

            let runtime_cost_per_unit = ASSUMED_RUNTIME_MINUTES * step.runtime_multiplier / 60.0
                * process.hourly_rate
                * process.complexity_multiplier;

            total_setup_cost += setup_cost;
            total_runtime_cost += runtime_cost_per_unit * quantity as f64;
            per_operation_minimum = per_operation_minimum.max(process.minimum_cost);

            tracing::debug!(
                sequence = step.sequence,
                process_id = %step.process_id,
                setup_cost,
                runtime_cost_per_unit,
                "步骤成本汇总"
            );
        }

        let raw_total = total_setup_cost + total_runtime_cost;
        let processing_cost = raw_total.max(per_operation_minimum);

        Ok(RollupResult {
            total_setup_cost,
            total_runtime_cost,
            per_operation_minimum,
            processing_cost,
            step_count: routing.steps.len(),
        })
    }

    /// 物料费 = 基础成本 × (1 + 加价% / 100)
    pub fn material_cost(&self, base_material_cost: f64, markup_percent: f64) -> f64 {
        base_material_cost * (1.0 + markup_percent / 100.0)
    }

    /// 表面处理费 = 单价 × 面积
    pub fn finishing_cost(&self, cost_per_area: f64, surface_area: f64) -> f64 {
        cost_per_area * surface_area
    }
}

impl Default for CostRollup {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::process::ProcessDefinition;
    use crate::domain::routing::RoutingStep;
    use crate::domain::types::ProcessCategory;
    use std::collections::HashMap;

    fn process(process_id: &str, setup_min: f64, rate: f64, min_cost: f64, complexity: f64) -> ProcessDefinition {
        ProcessDefinition {
            process_id: process_id.to_string(),
            name: format!("工序{}", process_id),
            category: ProcessCategory::Primary,
            setup_time_minutes: setup_min,
            hourly_rate: rate,
            minimum_cost: min_cost,
            complexity_multiplier: complexity,
        }
    }

    fn step(process_id: &str, sequence: u32, setup_mult: f64, runtime_mult: f64) -> RoutingStep {
        RoutingStep {
            process_id: process_id.to_string(),
            sequence,
            setup_time_multiplier: setup_mult,
            runtime_multiplier: runtime_mult,
        }
    }

    fn routing(steps: Vec<RoutingStep>) -> Routing {
        Routing {
            routing_id: "RT-001".to_string(),
            name: "测试路线".to_string(),
            steps,
            material_markup_percent: 20.0,
            finishing_cost_per_area: 0.5,
            estimated_lead_time_days: 10,
            tier_overrides: HashMap::new(),
            active: true,
            is_primary_pricing_route: false,
        }
    }

    fn catalog_with(processes: Vec<ProcessDefinition>) -> Catalog {
        let mut catalog = Catalog::new();
        for p in processes {
            catalog.processes.insert(p.process_id.clone(), p);
        }
        catalog
    }

    #[test]
    fn test_scenario_1_minimum_cost_dominates_single_unit() {
        // 场景1: 准备 15 分钟 × $95/h = 23.75 < 最低收费 25
        let rollup = CostRollup::new();
        let catalog = catalog_with(vec![process("P1", 15.0, 95.0, 25.0, 1.0)]);
        let r = routing(vec![step("P1", 1, 1.0, 1.0)]);

        let result = rollup.processing_cost(&r, &catalog, 1).unwrap();
        // 数量 1: 准备 23.75 + 运行 30/60×95 = 47.5 → 71.25 > 25
        // 场景 A 的 25 下限针对"仅准备费"口径, 这里验证完整口径
        assert!((result.total_setup_cost - 23.75).abs() < 1e-9);
        assert!((result.total_runtime_cost - 47.5).abs() < 1e-9);
        assert_eq!(result.per_operation_minimum, 25.0);
        assert!((result.processing_cost - 71.25).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_2_minimum_is_max_not_sum() {
        // 场景2: 两道工序最低收费 25 / 80 → 路线下限 80, 不是 105
        let rollup = CostRollup::new();
        let catalog = catalog_with(vec![
            process("P1", 0.0, 0.0, 25.0, 1.0),
            process("P2", 0.0, 0.0, 80.0, 1.0),
        ]);
        let r = routing(vec![step("P1", 1, 1.0, 1.0), step("P2", 2, 1.0, 1.0)]);

        let result = rollup.processing_cost(&r, &catalog, 1).unwrap();
        assert_eq!(result.per_operation_minimum, 80.0, "取最大值而非求和");
        assert_eq!(result.processing_cost, 80.0, "瓶颈工序最低收费主导");
    }

    #[test]
    fn test_scenario_3_setup_once_runtime_scales() {
        // 场景3: 准备费一次性, 运行费随数量线性
        let rollup = CostRollup::new();
        let catalog = catalog_with(vec![process("P1", 15.0, 95.0, 25.0, 1.0)]);
        let r = routing(vec![step("P1", 1, 1.0, 1.0)]);

        let result = rollup.processing_cost(&r, &catalog, 10).unwrap();
        assert!((result.total_setup_cost - 23.75).abs() < 1e-9, "准备费与数量无关");
        assert!((result.total_runtime_cost - 475.0).abs() < 1e-9, "30/60×95×10");
        assert!((result.processing_cost - 498.75).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_4_step_multipliers_scale_costs() {
        // 场景4: 步骤级乘数分别缩放准备费与运行费
        let rollup = CostRollup::new();
        let catalog = catalog_with(vec![process("P1", 60.0, 100.0, 0.0, 1.0)]);
        let r = routing(vec![step("P1", 1, 2.0, 0.5)]);

        let result = rollup.processing_cost(&r, &catalog, 1).unwrap();
        assert!((result.total_setup_cost - 200.0).abs() < 1e-9, "60×2/60×100");
        assert!((result.total_runtime_cost - 25.0).abs() < 1e-9, "30×0.5/60×100");
    }

    #[test]
    fn test_scenario_5_complexity_multiplier_runtime_only() {
        // 场景5: 复杂度乘数只作用于运行费, 不作用于准备费
        let rollup = CostRollup::new();
        let catalog = catalog_with(vec![process("P1", 60.0, 100.0, 0.0, 2.0)]);
        let r = routing(vec![step("P1", 1, 1.0, 1.0)]);

        let result = rollup.processing_cost(&r, &catalog, 1).unwrap();
        assert!((result.total_setup_cost - 100.0).abs() < 1e-9, "准备费不乘复杂度");
        assert!((result.total_runtime_cost - 100.0).abs() < 1e-9, "30/60×100×2");
    }

    #[test]
    fn test_scenario_6_empty_routing_is_zero_not_error() {
        // 场景6: 空路线 → 加工费 0, 下限 0, 不抛错
        let rollup = CostRollup::new();
        let catalog = Catalog::new();
        let r = routing(vec![]);

        let result = rollup.processing_cost(&r, &catalog, 5).unwrap();
        assert_eq!(result.processing_cost, 0.0);
        assert_eq!(result.per_operation_minimum, 0.0, "空路线不施加下限");
        assert_eq!(result.step_count, 0);
    }

    #[test]
    fn test_scenario_7_unknown_process_rejected() {
        // 场景7: 步骤引用不存在的工序 → 目录完整性错误
        let rollup = CostRollup::new();
        let catalog = Catalog::new();
        let r = routing(vec![step("P-MISSING", 1, 1.0, 1.0)]);

        let err = rollup.processing_cost(&r, &catalog, 1).unwrap_err();
        match err {
            PricingError::UnknownProcess { process_id, .. } => {
                assert_eq!(process_id, "P-MISSING");
            }
            other => panic!("期望 UnknownProcess, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_material_cost_markup() {
        let rollup = CostRollup::new();
        assert!((rollup.material_cost(100.0, 20.0) - 120.0).abs() < 1e-9);
        assert!((rollup.material_cost(100.0, 0.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_finishing_cost_per_area() {
        let rollup = CostRollup::new();
        assert!((rollup.finishing_cost(0.5, 100.0) - 50.0).abs() < 1e-9);
        assert_eq!(rollup.finishing_cost(0.5, 0.0), 0.0);
    }
}
