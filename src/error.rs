use thiserror::Error;

/// Errors reported while setting up a `WriterReaderPhaser`.
///
/// Only initialization can fail. Entering, exiting, locking and flipping are
/// infallible once a phaser exists.
///
/// 设置 `WriterReaderPhaser` 时报告的错误。
/// 只有初始化可能失败。phaser 存在后，进入、退出、加锁与翻转均不会失败。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhaserError {
    /// The caller supplied nothing to initialize.
    /// 调用者没有提供可初始化的对象。
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was missing or wrong.
        reason: &'static str,
    },
}
