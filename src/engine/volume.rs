// ==========================================
// 制造报价系统 - 批量折扣引擎
// ==========================================
// 职责: 折扣档匹配 + 折扣表完整性校验
// 红线: 折扣表必须无缝无重叠覆盖 [1, ∞), 在配置加载时校验一次;
//       匹配失败回退 0% 只是最后防线, 不是正常处理路径
// ==========================================

use crate::domain::pricing::VolumeBreak;

/// 折扣表校验失败原因（配置层转为 ConfigError）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleViolation {
    Empty,                                 // 折扣表为空
    FirstBreakNotOne { actual: u32 },      // 首档下界不是 1
    Gap { after_max: u32, next_min: u32 }, // 档间断档
    Overlap { prev_max: u32, next_min: u32 }, // 档间重叠
    BoundedTail { last_max: u32 },         // 末档有上界, 未覆盖到 ∞
    InvertedBreak { min: u32, max: u32 },  // 单档上下界倒置
}

impl std::fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleViolation::Empty => write!(f, "折扣表为空"),
            ScheduleViolation::FirstBreakNotOne { actual } => {
                write!(f, "首档下界必须为1, 实际为{}", actual)
            }
            ScheduleViolation::Gap { after_max, next_min } => {
                write!(f, "档间断档: 上界{}之后下一档下界为{}", after_max, next_min)
            }
            ScheduleViolation::Overlap { prev_max, next_min } => {
                write!(f, "档间重叠: 上界{}与下一档下界{}重叠", prev_max, next_min)
            }
            ScheduleViolation::BoundedTail { last_max } => {
                write!(f, "末档上界为{}, 未覆盖到无穷", last_max)
            }
            ScheduleViolation::InvertedBreak { min, max } => {
                write!(f, "档位上下界倒置: [{}, {}]", min, max)
            }
        }
    }
}

// ==========================================
// VolumeBreakMatcher - 批量折扣引擎
// ==========================================
pub struct VolumeBreakMatcher;

impl VolumeBreakMatcher {
    pub fn new() -> Self {
        Self
    }

    /// 匹配折扣档, 返回折扣百分比
    ///
    /// 对合法折扣表, 任意数量 ≥ 1 恰好命中一档。
    /// 无命中（配置错误）→ 回退 0% 并告警, 不中断报价
    pub fn match_discount(&self, breaks: &[VolumeBreak], quantity: u32) -> f64 {
        for brk in breaks {
            if brk.matches(quantity) {
                return brk.discount_percent;
            }
        }

        // 合法配置下不可达: 折扣表在加载时已校验覆盖 [1, ∞)
        tracing::warn!(quantity, "批量折扣表无命中档, 回退0%折扣");
        0.0
    }

    /// 校验折扣表是否无缝无重叠覆盖 [1, ∞)
    ///
    /// 要求折扣表按下界升序给出（配置文件即按此序书写）
    pub fn validate_schedule(&self, breaks: &[VolumeBreak]) -> Result<(), ScheduleViolation> {
        if breaks.is_empty() {
            return Err(ScheduleViolation::Empty);
        }

        if breaks[0].min_quantity != 1 {
            return Err(ScheduleViolation::FirstBreakNotOne {
                actual: breaks[0].min_quantity,
            });
        }

        for (idx, brk) in breaks.iter().enumerate() {
            let is_last = idx + 1 == breaks.len();

            match brk.max_quantity {
                Some(max) => {
                    if max < brk.min_quantity {
                        return Err(ScheduleViolation::InvertedBreak {
                            min: brk.min_quantity,
                            max,
                        });
                    }
                    if is_last {
                        return Err(ScheduleViolation::BoundedTail { last_max: max });
                    }

                    let next_min = breaks[idx + 1].min_quantity;
                    if next_min > max + 1 {
                        return Err(ScheduleViolation::Gap {
                            after_max: max,
                            next_min,
                        });
                    }
                    if next_min <= max {
                        return Err(ScheduleViolation::Overlap {
                            prev_max: max,
                            next_min,
                        });
                    }
                }
                None => {
                    // 无上界档必须是末档, 否则其后档位全部被覆盖（重叠）
                    if !is_last {
                        return Err(ScheduleViolation::Overlap {
                            prev_max: u32::MAX,
                            next_min: breaks[idx + 1].min_quantity,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for VolumeBreakMatcher {
    fn default() -> Self {
        Self::new()
    }
}
