//! # normboard-board
//!
//! The normative board: a thread-safe handle that keeps a fact base and a
//! set of dynamic fact providers synchronized with a normative program, and
//! re-verifies obligations after every mutation.
//!
//! ```
//! use std::sync::Arc;
//! use normboard_board::{NormativeBoard, NullBridge};
//! use normboard_core::NormBoardConfig;
//!
//! let board = NormativeBoard::init(NormBoardConfig::default(), Arc::new(NullBridge)).unwrap();
//! board
//!     .load("norm n1: busy(X) -> obligation(X, n1, finish(X), `1 second`).")
//!     .unwrap();
//! let report = board.add_fact("busy(bob)").unwrap();
//! assert_eq!(report.created.len(), 1);
//! ```

pub mod board;
pub mod bridge;
pub mod export;

pub use board::{BoardStatus, NormativeBoard};
pub use bridge::{NullBridge, RecordingBridge, TracingBridge};
pub use export::{MarkupDocument, MarkupNode};
