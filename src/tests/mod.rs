mod edge_case_tests;

/// Route `log` output through the test harness (`RUST_LOG=wr_phaser=trace`).
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
