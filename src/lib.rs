//! # Writer-Reader Phaser
//!
//! This crate provides a writer-reader phaser: a synchronization primitive that lets
//! any number of writers record into a shared structure without blocking, while a
//! single reader periodically flips which half of that structure is being written
//! and waits until nobody is still writing into the half it took over.
//!
//! It is the piece that makes interval snapshots of a concurrently updated,
//! double-buffered structure (a histogram, a set of counters) safe: the reader
//! swaps the buffers, flips the phase, and then owns a stable snapshot.
//!
//! ## Core Concepts
//!
//! - **Epoch**: a signed 64-bit counter. Its value identifies a writer's entry and its
//!   sign identifies the active phase.
//! - **Phase**: `Even` or `Odd`. Each writer is classified into the phase that was
//!   active when it entered, and stays there even if a flip happens while it is inside.
//! - **Flip**: retires the active phase, starts the other one, and waits until every
//!   writer of the retired phase has exited.
//!
//! ## Typical Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::thread;
//! use wr_phaser::WriterReaderPhaser;
//!
//! // Two counters, one being written while the other is read.
//! let buffers = Arc::new([AtomicU64::new(0), AtomicU64::new(0)]);
//! let active = Arc::new(AtomicU64::new(0));
//! let phaser = Arc::new(WriterReaderPhaser::new());
//!
//! // 1. Writers bracket every update with a critical section
//! let writer = {
//!     let (buffers, active, phaser) = (buffers.clone(), active.clone(), phaser.clone());
//!     thread::spawn(move || {
//!         for _ in 0..1000 {
//!             let _section = phaser.writer_critical_section();
//!             let index = active.load(Ordering::Acquire) as usize;
//!             buffers[index].fetch_add(1, Ordering::Relaxed);
//!         }
//!     })
//! };
//!
//! // 2. The reader takes the reader lock, swaps buffers, then flips
//! let reader = phaser.reader_lock();
//! let retired = active.fetch_xor(1, Ordering::AcqRel) as usize;
//! reader.flip_phase();
//!
//! // 3. The retired buffer is now stable
//! let snapshot = buffers[retired].swap(0, Ordering::Relaxed);
//! reader.unlock();
//!
//! writer.join().unwrap();
//! assert!(snapshot <= 1000);
//! ```
//!
//! ## Contract
//!
//! - Every `writer_enter` must be followed by exactly one `writer_exit` with its token.
//!   `WriterSection` does this automatically.
//! - Only the holder of a `ReaderGuard` can flip, so flips never run concurrently.
//! - A writer that never exits makes the next flip wait forever.

mod epoch;
mod error;
mod phaser;
mod reader;
mod state;
mod sync;
mod writer;

pub use epoch::{Phase, WriterToken};
pub use error::PhaserError;
pub use phaser::{PhaserBuilder, WriterReaderPhaser};
pub use reader::ReaderGuard;
pub use writer::WriterSection;

#[cfg(test)]
mod tests;
