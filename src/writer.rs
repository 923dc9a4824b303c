use crate::epoch::{Phase, WriterToken};
use crate::phaser::WriterReaderPhaser;

impl WriterReaderPhaser {
    /// Enter a writer critical section.
    ///
    /// Wait-free on targets with a native atomic add, and callable from any
    /// number of threads at once. The returned token must be handed to exactly
    /// one `writer_exit` call on this same phaser.
    ///
    /// 进入写入者临界区。
    /// 在支持原生原子加法的平台上无等待，可被任意数量的线程同时调用。
    /// 返回的令牌必须恰好交给同一 phaser 上的一次 `writer_exit` 调用。
    #[inline]
    pub fn writer_enter(&self) -> WriterToken {
        WriterToken::new(self.state.start_epoch.increment())
    }

    /// Leave the writer critical section opened by `writer_enter`.
    ///
    /// The exit is counted against the phase recorded in the token, even if the
    /// reader flipped while the writer was inside. Passing a token twice, or a
    /// token from another phaser, breaks the drain accounting and may leave a
    /// later flip waiting forever.
    ///
    /// 离开由 `writer_enter` 打开的写入者临界区。
    /// 退出按令牌中记录的阶段计数，即使写入者在临界区内时读取者发生了翻转。
    /// 重复传递令牌或传递其他 phaser 的令牌会破坏排空计数，
    /// 并可能使之后的翻转永远等待。
    #[inline]
    pub fn writer_exit(&self, token: WriterToken) {
        self.state.end_epoch(token.phase()).increment();
    }

    /// Enter a writer critical section that ends when the returned guard drops.
    ///
    /// ```
    /// use wr_phaser::WriterReaderPhaser;
    ///
    /// let phaser = WriterReaderPhaser::new();
    /// {
    ///     let _section = phaser.writer_critical_section();
    ///     // write into the active buffer
    /// }
    /// assert_eq!(phaser.in_flight_writers(), 0);
    /// ```
    ///
    /// 进入一个写入者临界区，该临界区在返回的守卫被 drop 时结束。
    #[inline]
    pub fn writer_critical_section(&self) -> WriterSection<'_> {
        WriterSection {
            phaser: self,
            token: self.writer_enter(),
        }
    }
}

/// Scope guard for a writer critical section.
///
/// Created by `WriterReaderPhaser::writer_critical_section`, exits on drop.
///
/// 写入者临界区的作用域守卫。
/// 由 `WriterReaderPhaser::writer_critical_section` 创建，在 drop 时退出。
#[must_use]
pub struct WriterSection<'a> {
    phaser: &'a WriterReaderPhaser,
    token: WriterToken,
}

impl WriterSection<'_> {
    /// Token issued when this section was entered.
    /// 进入此临界区时发放的令牌。
    #[inline]
    pub fn token(&self) -> WriterToken {
        self.token
    }

    /// Phase this section is counted in.
    /// 此临界区被计入的阶段。
    #[inline]
    pub fn phase(&self) -> Phase {
        self.token.phase()
    }
}

impl Drop for WriterSection<'_> {
    #[inline]
    fn drop(&mut self) {
        self.phaser.writer_exit(self.token);
    }
}
