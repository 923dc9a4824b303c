/// 边界情况测试模块
/// 测试空翻转、休眠退避、奇数阶段的符号编码与大量未退出写入者
use crate::epoch::ODD_PHASE_START;
use crate::{Phase, WriterReaderPhaser};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// 测试1: 从未有写入者时连续翻转
#[test]
fn test_many_flips_without_writers() {
    let phaser = WriterReaderPhaser::new();
    let reader = phaser.reader_lock();

    for i in 0..1_000 {
        reader.flip_phase();
        let expected = if i % 2 == 0 { Phase::Odd } else { Phase::Even };
        assert_eq!(phaser.current_phase(), expected);
    }
    assert_eq!(phaser.in_flight_writers(), 0);
}

/// 测试2: 使用休眠退避的翻转在写入者退出后返回
#[test]
fn test_flip_with_sleep_backoff() {
    let phaser = Arc::new(WriterReaderPhaser::new());
    let token = phaser.writer_enter();

    // the writer's 20ms sleep starts after this instant
    let started = Instant::now();
    let writer = {
        let phaser = phaser.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            phaser.writer_exit(token);
        })
    };

    phaser
        .reader_lock()
        .flip_with_backoff(Duration::from_millis(1));
    assert!(started.elapsed() >= Duration::from_millis(20));

    writer.join().unwrap();
    assert_eq!(phaser.current_phase(), Phase::Odd);
}

/// 测试3: 奇数阶段的令牌从 i64::MIN 开始递增
#[test]
fn test_odd_phase_tokens_start_at_min() {
    let phaser = WriterReaderPhaser::new();
    phaser.reader_lock().flip_phase();

    let tokens: Vec<_> = (0..5).map(|_| phaser.writer_enter()).collect();
    for (i, token) in tokens.iter().enumerate() {
        assert_eq!(token.epoch(), ODD_PHASE_START + i as i64);
        assert_eq!(token.phase(), Phase::Odd);
    }
    assert_eq!(phaser.in_flight_writers(), 5);

    for token in tokens {
        phaser.writer_exit(token);
    }
    assert_eq!(phaser.in_flight_writers(), 0);

    // the odd phase drains back to even
    phaser.reader_lock().flip_phase();
    assert_eq!(phaser.writer_enter().epoch(), 0);
}

/// 测试4: 大量写入者同时在临界区内，翻转等待所有写入者
#[test]
fn test_flip_waits_for_many_writers() {
    let phaser = Arc::new(WriterReaderPhaser::new());
    let tokens: Vec<_> = (0..1_000).map(|_| phaser.writer_enter()).collect();
    assert_eq!(phaser.in_flight_writers(), 1_000);

    let writer = {
        let phaser = phaser.clone();
        thread::spawn(move || {
            for token in tokens {
                phaser.writer_exit(token);
            }
        })
    };

    phaser.reader_lock().flip_phase();
    writer.join().unwrap();

    assert_eq!(phaser.state.even_end_epoch.get(), 1_000);
    assert_eq!(phaser.current_phase(), Phase::Odd);
}

/// 测试5: 令牌是 Copy 的，退出只计数一次
#[test]
fn test_copied_token_exits_once() {
    let phaser = WriterReaderPhaser::new();

    let token = phaser.writer_enter();
    let copy = token;
    assert_eq!(copy, token);
    phaser.writer_exit(copy);

    assert_eq!(phaser.in_flight_writers(), 0);
    assert_eq!(phaser.state.even_end_epoch.get(), 1);
}

/// 测试6: 翻转之后进入的写入者不会被等待
#[test]
fn test_writers_of_new_phase_are_not_waited_for() {
    let phaser = Arc::new(WriterReaderPhaser::new());
    let old = phaser.writer_enter();

    let reader_thread = {
        let phaser = phaser.clone();
        thread::spawn(move || phaser.reader_lock().flip_phase())
    };

    while phaser.current_phase() != Phase::Odd {
        thread::yield_now();
    }

    // enters the new phase and stays inside while the flip drains
    let new = phaser.writer_enter();
    assert_eq!(new.phase(), Phase::Odd);

    phaser.writer_exit(old);
    reader_thread.join().unwrap();

    assert_eq!(phaser.in_flight_writers(), 1);
    phaser.writer_exit(new);
    assert_eq!(phaser.in_flight_writers(), 0);
}
