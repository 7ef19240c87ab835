#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod applier;
pub mod buffer;
pub mod operation;
pub mod parse;

pub mod commands;
pub mod dialog;
pub mod document;
pub mod hexdump;

pub mod config;

pub use applier::{OperatorApplier, apply};
pub use operation::{ByteRange, Endianness, OpError, Operand, OperandWidth, OperatorKind};
