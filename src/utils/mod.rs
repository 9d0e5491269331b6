// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Helpers for unit authors.
//!
//! Retry, timeout and sleep are plain functions that compose around any async
//! operation inside a unit body. The engine itself never retries; a unit that wants
//! retries wraps its own work.
//!
//! ```rust
//! use std::time::Duration;
//! use the_switchyard::traits::{Record, TransformFn};
//! use the_switchyard::utils::{retry, with_timeout, RetryPolicy};
//!
//! let fetch = TransformFn::new(|inputs: Record| async move {
//!     let policy = RetryPolicy::fixed(3, Duration::from_millis(10));
//!     retry(&policy, || async {
//!         with_timeout(Duration::from_millis(500), async { Ok(inputs.clone()) }).await
//!     })
//!     .await
//! });
//! # let _ = fetch;
//! ```

mod retry;

pub use retry::{retry, sleep_ms, with_timeout, Backoff, RetryPolicy};
