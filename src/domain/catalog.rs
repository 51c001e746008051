// ==========================================
// 制造报价系统 - 目录聚合
// ==========================================
// 职责: 工序/物料/表面处理/路线的键值查询与受控变更
// 红线: 主定价路线全系统至多一条, 由本层变更方法保证
//       (先清空全部, 再设置一条); 引擎层不感知该标志
// ==========================================

use crate::domain::process::{FinishDefinition, MaterialDefinition, ProcessDefinition};
use crate::domain::routing::{Routing, TierOverride};
use crate::domain::types::PricingTier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Catalog - 目录聚合
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub processes: HashMap<String, ProcessDefinition>,
    pub materials: HashMap<String, MaterialDefinition>,
    pub finishes: HashMap<String, FinishDefinition>,
    pub routings: HashMap<String, Routing>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn get_process(&self, process_id: &str) -> Option<&ProcessDefinition> {
        self.processes.get(process_id)
    }

    pub fn get_material(&self, material_id: &str) -> Option<&MaterialDefinition> {
        self.materials.get(material_id)
    }

    pub fn get_finish(&self, finish_id: &str) -> Option<&FinishDefinition> {
        self.finishes.get(finish_id)
    }

    pub fn get_routing(&self, routing_id: &str) -> Option<&Routing> {
        self.routings.get(routing_id)
    }

    /// 当前主定价路线（可能不存在）
    pub fn primary_routing(&self) -> Option<&Routing> {
        self.routings.values().find(|r| r.is_primary_pricing_route)
    }

    /// 启用中的路线列表（routing_id 升序, 保证遍历顺序稳定）
    pub fn active_routings(&self) -> Vec<&Routing> {
        let mut list: Vec<&Routing> = self.routings.values().filter(|r| r.active).collect();
        list.sort_by(|a, b| a.routing_id.cmp(&b.routing_id));
        list
    }

    // ==========================================
    // 受控变更（API 层调用, 引擎计算期间目录视为不可变快照）
    // ==========================================

    /// 写入/覆盖一条路线（配置加载、导入用）
    pub fn upsert_routing(&mut self, routing: Routing) {
        self.routings.insert(routing.routing_id.clone(), routing);
    }

    /// 设置主定价路线: 先清空全部标志, 再设置指定路线
    pub fn set_primary_routing(&mut self, routing_id: &str) -> Result<(), String> {
        if !self.routings.contains_key(routing_id) {
            return Err(format!("工艺路线不存在: {}", routing_id));
        }

        for routing in self.routings.values_mut() {
            routing.is_primary_pricing_route = false;
        }
        // contains_key 已校验, 此处必命中
        if let Some(routing) = self.routings.get_mut(routing_id) {
            routing.is_primary_pricing_route = true;
        }
        Ok(())
    }

    /// 设置路线启用标志
    pub fn set_routing_active(&mut self, routing_id: &str, active: bool) -> Result<(), String> {
        match self.routings.get_mut(routing_id) {
            Some(routing) => {
                routing.active = active;
                Ok(())
            }
            None => Err(format!("工艺路线不存在: {}", routing_id)),
        }
    }

    /// 写入档位覆写（有限数校验由 API 边界完成）
    pub fn upsert_tier_override(
        &mut self,
        routing_id: &str,
        tier: PricingTier,
        tier_override: TierOverride,
    ) -> Result<(), String> {
        match self.routings.get_mut(routing_id) {
            Some(routing) => {
                routing.tier_overrides.insert(tier, tier_override);
                Ok(())
            }
            None => Err(format!("工艺路线不存在: {}", routing_id)),
        }
    }

    /// 清除档位覆写（整条移除, 恢复回退语义）
    pub fn clear_tier_override(
        &mut self,
        routing_id: &str,
        tier: PricingTier,
    ) -> Result<(), String> {
        match self.routings.get_mut(routing_id) {
            Some(routing) => {
                routing.tier_overrides.remove(&tier);
                Ok(())
            }
            None => Err(format!("工艺路线不存在: {}", routing_id)),
        }
    }
}
