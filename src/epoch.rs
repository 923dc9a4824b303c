use crate::sync::{AtomicI64, Ordering, fence};
use std::fmt;

/// Start value of an even phase. Non-negative epochs belong to the even phase.
/// 偶数阶段的起始值。非负纪元属于偶数阶段。
pub(crate) const EVEN_PHASE_START: i64 = 0;

/// Start value of an odd phase. Its sign bit matches every odd-phase epoch.
/// 奇数阶段的起始值。其符号位与所有奇数阶段纪元一致。
pub(crate) const ODD_PHASE_START: i64 = i64::MIN;

/// One of the two alternating phases of a `WriterReaderPhaser`.
///
/// The phase is never stored on its own: it is derived from the sign of an epoch
/// value, so the entry counter and the phase it belongs to always change together.
///
/// `WriterReaderPhaser` 的两个交替阶段之一。
///
/// 阶段本身从不单独存储：它由纪元值的符号推导，
/// 因此入口计数器与其所属阶段总是一起变化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Even,
    Odd,
}

impl Phase {
    /// Classify an epoch value by its sign.
    /// 根据符号对纪元值进行分类。
    #[inline]
    pub(crate) fn of(epoch: i64) -> Self {
        if epoch < 0 { Phase::Odd } else { Phase::Even }
    }

    /// The phase that follows this one.
    /// 此阶段之后的阶段。
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Phase::Even => Phase::Odd,
            Phase::Odd => Phase::Even,
        }
    }

    /// The "empty" epoch value a counter of this phase starts from.
    /// 此阶段计数器起始的"空"纪元值。
    #[inline]
    pub(crate) fn start_value(self) -> i64 {
        match self {
            Phase::Even => EVEN_PHASE_START,
            Phase::Odd => ODD_PHASE_START,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Even => f.write_str("even"),
            Phase::Odd => f.write_str("odd"),
        }
    }
}

/// Opaque token returned by `writer_enter` and consumed by `writer_exit`.
///
/// It carries the start epoch observed at entry. Its phase is fixed at that
/// moment and does not change if a flip happens inside the critical section.
/// Tokens can only be produced by the phaser, so an exit can never be
/// forged from an arbitrary integer.
///
/// 由 `writer_enter` 返回、由 `writer_exit` 消费的不透明令牌。
///
/// 它携带进入时观察到的起始纪元。其阶段在那一刻就已确定，
/// 即使临界区内发生翻转也不会改变。
/// 令牌只能由 phaser 产生，因此不能从任意整数伪造退出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "every token must be passed back to `writer_exit`"]
pub struct WriterToken(i64);

impl WriterToken {
    #[inline]
    pub(crate) fn new(epoch: i64) -> Self {
        WriterToken(epoch)
    }

    /// Raw start epoch captured at entry.
    /// 进入时捕获的原始起始纪元。
    #[inline]
    pub fn epoch(self) -> i64 {
        self.0
    }

    /// Phase this writer was classified into.
    /// 此写入者被归入的阶段。
    #[inline]
    pub fn phase(self) -> Phase {
        Phase::of(self.0)
    }
}

/// A 64-bit signed epoch counter with the memory orderings the phaser relies on.
///
/// Cache-aligned so the start counter and the two end counters never share a line.
///
/// 具有 phaser 所依赖的内存序的 64 位有符号纪元计数器。
/// 缓存对齐，使起始计数器与两个结束计数器不共享缓存行。
#[derive(Debug)]
#[repr(align(64))]
pub(crate) struct EpochCell {
    value: AtomicI64,
}

impl EpochCell {
    pub(crate) fn new(value: i64) -> Self {
        Self {
            value: AtomicI64::new(value),
        }
    }

    /// Acquire load. Observes every write that happened before the latest release store.
    /// Acquire 读取。可观察到最近一次 release 写入之前发生的所有写入。
    #[inline]
    pub(crate) fn get(&self) -> i64 {
        self.value.load(Ordering::Acquire)
    }

    /// Release store followed by a full fence, ordering it against later seq-cst operations.
    /// Release 写入后跟一个完整栅栏，使其与之后的 seq-cst 操作有序。
    #[inline]
    pub(crate) fn set(&self, value: i64) {
        self.value.store(value, Ordering::Release);
        fence(Ordering::SeqCst);
    }

    /// Replace the value and return what was there immediately before.
    ///
    /// Seq-cst so it is totally ordered with concurrent writer increments: every
    /// increment lands either in the returned value or after the reset.
    ///
    /// 替换值并返回替换前一刻的值。
    /// 使用 seq-cst，使其与并发的写入者自增全序：
    /// 每次自增要么计入返回值，要么发生在重置之后。
    #[inline]
    pub(crate) fn reset(&self, value: i64) -> i64 {
        self.value.swap(value, Ordering::SeqCst)
    }

    /// Seq-cst increment, returning the pre-increment value.
    /// Seq-cst 自增，返回自增前的值。
    #[inline]
    pub(crate) fn increment(&self) -> i64 {
        self.value.fetch_add(1, Ordering::SeqCst)
    }
}

