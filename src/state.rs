use crate::epoch::{EVEN_PHASE_START, EpochCell, ODD_PHASE_START, Phase};
use std::time::Duration;

/// Default wait between polls while a flip drains writers (zero = yield).
/// 翻转等待写入者退出时两次轮询之间的默认等待（零 = 让出处理器）。
pub(crate) const DEFAULT_FLIP_BACKOFF: Duration = Duration::ZERO;

/// The three epoch counters shared by writers and the reader.
///
/// - `start_epoch` counts entries into the active phase; its sign is the active phase.
/// - `even_end_epoch` / `odd_end_epoch` count exits of writers classified into that phase.
///
/// A phase is drained once its end counter equals the start counter captured at flip time.
///
/// 写入者与读取者共享的三个纪元计数器。
///
/// - `start_epoch` 统计进入当前阶段的次数；其符号即当前阶段。
/// - `even_end_epoch` / `odd_end_epoch` 统计被归入该阶段的写入者的退出次数。
///
/// 当某阶段的结束计数器等于翻转时捕获的起始计数器时，该阶段即被排空。
#[derive(Debug)]
pub(crate) struct PhaseState {
    pub(crate) start_epoch: EpochCell,
    pub(crate) even_end_epoch: EpochCell,
    pub(crate) odd_end_epoch: EpochCell,
}

impl PhaseState {
    /// Fresh state: even phase active, nobody entered, odd side already empty.
    /// 初始状态：偶数阶段活跃，无人进入，奇数侧已为空。
    pub(crate) fn new() -> Self {
        Self {
            start_epoch: EpochCell::new(EVEN_PHASE_START),
            even_end_epoch: EpochCell::new(EVEN_PHASE_START),
            odd_end_epoch: EpochCell::new(ODD_PHASE_START),
        }
    }

    /// The end counter that collects exits of `phase`.
    /// 收集 `phase` 退出次数的结束计数器。
    #[inline]
    pub(crate) fn end_epoch(&self, phase: Phase) -> &EpochCell {
        match phase {
            Phase::Even => &self.even_end_epoch,
            Phase::Odd => &self.odd_end_epoch,
        }
    }
}
