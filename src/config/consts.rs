// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default per-unit timeout (30 seconds)
pub const DEFAULT_UNIT_TIMEOUT_MS: u64 = 30_000;
/// Units run one at a time unless configured otherwise
pub const DEFAULT_MAX_CONCURRENCY: usize = 1;
/// Field under which a router's decision is exposed to downstream units
pub const ROUTER_OUTPUT_FIELD: &str = "routes";
