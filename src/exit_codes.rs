//! Exit code constants for the stratlify CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config, unreadable input file)
//! - 2: Validation failure (input does not satisfy the flow's input shape)
//! - 3: Generation failure (backend answered without usable structured output)
//! - 4: Backend failure (transport or HTTP error talking to the backend)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or an invalid flow definition.
pub const USER_ERROR: i32 = 1;

/// Validation failure: input rejected before the backend was contacted.
pub const VALIDATION_FAILURE: i32 = 2;

/// Generation failure: the backend returned nothing usable.
pub const GENERATION_FAILURE: i32 = 3;

/// Backend failure: the generative backend could not be reached or returned an error status.
pub const BACKEND_FAILURE: i32 = 4;
