//! Architecture-specific implementations.
//!
//! This module provides platform abstractions for different target architectures.
//! Currently supported: bare-metal x86_64. Hosted builds compile without it and
//! run the core against in-memory stand-ins.

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub mod x86_64;
