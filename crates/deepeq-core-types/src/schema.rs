//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison context
pub const FIELD_PATH: &str = "path";
pub const FIELD_ACTUAL_TYPE: &str = "actual_type";
pub const FIELD_EXPECTED_TYPE: &str = "expected_type";
pub const FIELD_STRATEGY: &str = "strategy";
pub const FIELD_EQUAL: &str = "equal";

// Report sizes
pub const FIELD_DIFFERENCE_COUNT: &str = "difference_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_CYCLE_HIT: &str = "cycle_hit";
pub const EVENT_CUSTOM_STRATEGY: &str = "custom_strategy";
