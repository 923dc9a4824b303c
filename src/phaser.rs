use crate::epoch::Phase;
use crate::error::PhaserError;
use crate::state::{DEFAULT_FLIP_BACKOFF, PhaseState};
use crate::sync::Mutex;
use log::debug;
use std::fmt;
use std::mem::MaybeUninit;
use std::time::Duration;

/// Builder for configuring a `WriterReaderPhaser`.
///
/// - `flip_backoff`: default wait between polls used by `ReaderGuard::flip_phase`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use wr_phaser::WriterReaderPhaser;
///
/// let phaser = WriterReaderPhaser::builder()
///     .flip_backoff(Duration::from_micros(50))
///     .build();
/// assert_eq!(phaser.flip_backoff(), Duration::from_micros(50));
/// ```
///
/// 用于配置 `WriterReaderPhaser` 的构建器。
#[derive(Debug, Clone)]
pub struct PhaserBuilder {
    flip_backoff: Duration,
}

impl PhaserBuilder {
    /// Create a new builder with default settings.
    /// 创建一个带有默认设置的新构建器。
    #[inline]
    pub fn new() -> Self {
        Self {
            flip_backoff: DEFAULT_FLIP_BACKOFF,
        }
    }

    /// Set the wait between polls while a flip drains writers.
    ///
    /// `Duration::ZERO` yields the processor between polls; any other value
    /// sleeps for that long.
    ///
    /// Default: `Duration::ZERO`
    ///
    /// 设置翻转等待写入者退出时两次轮询之间的等待。
    /// `Duration::ZERO` 在轮询之间让出处理器；其他值则休眠相应时长。
    #[inline]
    pub fn flip_backoff(mut self, backoff: Duration) -> Self {
        self.flip_backoff = backoff;
        self
    }

    /// Build the phaser with the configured settings.
    /// 使用配置的设置构建 phaser。
    pub fn build(self) -> WriterReaderPhaser {
        debug!(target: "wr_phaser", "phaser created (flip backoff {:?})", self.flip_backoff);
        WriterReaderPhaser {
            state: PhaseState::new(),
            reader_lock: Mutex::new(()),
            flip_backoff: self.flip_backoff,
        }
    }
}

impl Default for PhaserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A writer-reader phaser.
///
/// Any number of writers bracket their updates to a shared, double-buffered
/// structure with `writer_enter` / `writer_exit` (or a `WriterSection`), without
/// ever blocking. A single reader takes the reader lock, swaps the buffers, then
/// calls `flip_phase`: when it returns, no writer is still inside the buffer that
/// was swapped out, so the reader can consume or reset it safely.
///
/// Every phaser is independent owned state. Share it with `Arc` or scoped threads.
///
/// **Typical Usage**:
/// ```
/// use wr_phaser::WriterReaderPhaser;
///
/// let phaser = WriterReaderPhaser::new();
///
/// // Writer side
/// {
///     let _section = phaser.writer_critical_section();
///     // record into the active buffer
/// }
///
/// // Reader side
/// let reader = phaser.reader_lock();
/// // swap active and inactive buffers
/// reader.flip_phase();
/// // the inactive buffer is now stable
/// reader.unlock();
/// ```
///
/// 写入者-读取者 phaser。
///
/// 任意数量的写入者用 `writer_enter` / `writer_exit`（或 `WriterSection`）
/// 包裹对共享双缓冲结构的更新，且永不阻塞。单个读取者获取读取锁、交换缓冲区，
/// 然后调用 `flip_phase`：返回时，不再有写入者位于被换出的缓冲区中，
/// 读取者可以安全地消费或重置它。
///
/// 每个 phaser 都是独立的自有状态。通过 `Arc` 或作用域线程共享。
pub struct WriterReaderPhaser {
    pub(crate) state: PhaseState,
    pub(crate) reader_lock: Mutex<()>,
    pub(crate) flip_backoff: Duration,
}

impl WriterReaderPhaser {
    /// Create a new phaser with default settings. The even phase is active.
    /// 使用默认设置创建新的 phaser。偶数阶段处于活跃状态。
    #[inline]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for configuring the phaser.
    /// 创建一个用于配置 phaser 的构建器。
    #[inline]
    pub fn builder() -> PhaserBuilder {
        PhaserBuilder::new()
    }

    /// Initialize a phaser in caller-provided storage.
    ///
    /// Returns `PhaserError::InvalidArgument` when `target` is `None`, leaving
    /// nothing initialized. No fence is issued: the phaser becomes visible to
    /// other threads only through whatever synchronizes its publication
    /// (spawning a thread, an `Arc`, a channel).
    ///
    /// The storage must later be released with `MaybeUninit::assume_init_drop`
    /// or by reading the value out and calling `destroy`.
    ///
    /// ```
    /// use std::mem::MaybeUninit;
    /// use wr_phaser::{PhaserError, WriterReaderPhaser};
    ///
    /// let mut slot = MaybeUninit::uninit();
    /// let phaser = WriterReaderPhaser::init(Some(&mut slot)).unwrap();
    /// let token = phaser.writer_enter();
    /// phaser.writer_exit(token);
    ///
    /// assert!(matches!(
    ///     WriterReaderPhaser::init(None),
    ///     Err(PhaserError::InvalidArgument { .. })
    /// ));
    /// # unsafe { slot.assume_init_drop() };
    /// ```
    ///
    /// 在调用者提供的存储中初始化 phaser。
    /// 当 `target` 为 `None` 时返回 `PhaserError::InvalidArgument`，且不初始化任何内容。
    /// 不发出栅栏：phaser 只能通过同步其发布的机制（创建线程、`Arc`、通道）对其他线程可见。
    pub fn init(target: Option<&mut MaybeUninit<Self>>) -> Result<&mut Self, PhaserError> {
        let target = target.ok_or(PhaserError::InvalidArgument {
            reason: "no phaser instance to initialize",
        })?;
        Ok(target.write(Self::new()))
    }

    /// Tear the phaser down.
    ///
    /// Taking `self` by value guarantees no other thread still holds a reference.
    /// Debug builds additionally assert that every writer has exited.
    ///
    /// 销毁 phaser。
    /// 按值获取 `self` 保证没有其他线程仍持有引用。
    /// Debug 构建还会断言所有写入者均已退出。
    pub fn destroy(self) {
        debug_assert_eq!(
            self.in_flight_writers(),
            0,
            "phaser destroyed while writers are still inside a critical section"
        );
        debug!(target: "wr_phaser", "phaser destroyed in {} phase", self.current_phase());
    }

    /// The phase new writers are currently classified into.
    /// 新写入者当前被归入的阶段。
    #[inline]
    pub fn current_phase(&self) -> Phase {
        Phase::of(self.state.start_epoch.get())
    }

    /// Default backoff used by `ReaderGuard::flip_phase`.
    /// `ReaderGuard::flip_phase` 使用的默认退避。
    #[inline]
    pub fn flip_backoff(&self) -> Duration {
        self.flip_backoff
    }

    /// Snapshot of writers that entered the active phase and have not exited yet.
    ///
    /// Racy by nature: only exact when no writer or flip runs concurrently.
    ///
    /// 进入当前阶段但尚未退出的写入者数量快照。
    /// 本质上存在竞争：仅在没有并发写入者或翻转时才精确。
    pub fn in_flight_writers(&self) -> u64 {
        let start = self.state.start_epoch.get();
        let end = self.state.end_epoch(Phase::of(start)).get();
        u64::try_from(start.wrapping_sub(end)).unwrap_or(0)
    }
}

impl Default for WriterReaderPhaser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WriterReaderPhaser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterReaderPhaser")
            .field("start_epoch", &self.state.start_epoch.get())
            .field("even_end_epoch", &self.state.even_end_epoch.get())
            .field("odd_end_epoch", &self.state.odd_end_epoch.get())
            .field("flip_backoff", &self.flip_backoff)
            .finish()
    }
}
