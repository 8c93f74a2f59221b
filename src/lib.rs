//! elytron-ops: idempotent security subsystem configuration
//!
//! A library for describing security subsystem resources as commands and
//! applying them, create-or-replace, to a running server over its
//! management API or to an offline configuration document.

pub mod address;
pub mod command;
pub mod config;
pub mod document;
pub mod elytron;
pub mod session;
pub mod time;
pub mod values;

pub use address::{Address, ParseAddressError, Segment};
pub use command::{Backend, Command, CommandError, Dispatcher};
pub use values::{AttributeValue, Scalar, ValueSet};
