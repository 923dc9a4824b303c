use crate::epoch::Phase;
use crate::phaser::WriterReaderPhaser;
use crate::sync::{MutexGuard, pause};
use log::{debug, trace};
use std::time::Duration;

impl WriterReaderPhaser {
    /// Acquire the reader lock, blocking while another reader holds it.
    ///
    /// Writers never take this lock. Hold the returned guard for the whole
    /// swap / flip / consume sequence; dropping it (or calling `unlock`) lets
    /// the next reader in.
    ///
    /// The lock does not poison: a reader that panicked mid-snapshot does not
    /// prevent later readers from flipping.
    ///
    /// 获取读取锁，在其他读取者持有时阻塞。
    /// 写入者从不获取此锁。在整个交换 / 翻转 / 消费过程中持有返回的守卫；
    /// drop 它（或调用 `unlock`）后下一个读取者才能进入。
    /// 该锁不会中毒：在快照过程中 panic 的读取者不会阻止之后的读取者翻转。
    pub fn reader_lock(&self) -> ReaderGuard<'_> {
        ReaderGuard {
            phaser: self,
            _lock: self.reader_lock.lock(),
        }
    }
}

/// Exclusive reader access to a `WriterReaderPhaser`.
///
/// Flipping is only possible through this guard, so at most one flip is ever
/// in flight and it always runs under the reader lock.
///
/// 对 `WriterReaderPhaser` 的独占读取访问。
/// 只能通过此守卫进行翻转，因此同一时间最多只有一次翻转，且总是在读取锁下运行。
#[must_use]
pub struct ReaderGuard<'a> {
    phaser: &'a WriterReaderPhaser,
    _lock: MutexGuard<'a, ()>,
}

impl<'a> ReaderGuard<'a> {
    /// Flip the phase using the phaser's configured backoff.
    /// 使用 phaser 配置的退避进行阶段翻转。
    #[inline]
    pub fn flip_phase(&self) {
        self.flip_with_backoff(self.phaser.flip_backoff);
    }

    /// Retire the active phase and wait until all of its writers have exited.
    ///
    /// Writers entering after the swap are counted in the new phase and are
    /// not waited for. Between polls the reader yields (`Duration::ZERO`) or
    /// sleeps for `backoff`. There is no timeout: a writer that never exits
    /// keeps this call waiting forever.
    ///
    /// 退役当前阶段，并等待其所有写入者退出。
    /// 交换之后进入的写入者计入新阶段，不会被等待。
    /// 轮询之间读取者让出处理器（`Duration::ZERO`）或休眠 `backoff`。
    /// 没有超时：从不退出的写入者会使此调用永远等待。
    pub fn flip_with_backoff(&self, backoff: Duration) {
        let state = &self.phaser.state;

        let retiring = Phase::of(state.start_epoch.get());
        let next = retiring.next();
        let initial = next.start_value();

        // The next phase's end counter must be empty before any writer can be counted in it
        state.end_epoch(next).set(initial);

        let start_value_at_flip = state.start_epoch.reset(initial);
        trace!(
            target: "wr_phaser",
            "flip {} -> {}, start epoch at flip {}",
            retiring,
            next,
            start_value_at_flip
        );

        let end_epoch = state.end_epoch(retiring);
        let mut polls: u64 = 0;
        while end_epoch.get() != start_value_at_flip {
            polls += 1;
            pause(backoff);
        }

        if polls > 0 {
            debug!(
                target: "wr_phaser",
                "{} phase drained after {} polls (backoff {:?})",
                retiring,
                polls,
                backoff
            );
        }
    }

    /// The phaser this guard belongs to.
    /// 此守卫所属的 phaser。
    #[inline]
    pub fn phaser(&self) -> &'a WriterReaderPhaser {
        self.phaser
    }

    /// Release the reader lock.
    /// 释放读取锁。
    #[inline]
    pub fn unlock(self) {
        drop(self);
    }
}
