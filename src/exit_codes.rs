//! Exit code constants for the fruitforge CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid input, uninitialized home)
//! - 2: Request failure (transport or upstream endpoint error)
//! - 3: Extraction failure (no recoverable ability payload in the response)
//! - 4: Storage failure (session, sets or export could not be written)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid prompt, or invalid config.
pub const USER_ERROR: i32 = 1;

/// The generation request could not be completed or the endpoint reported failure.
pub const REQUEST_FAILURE: i32 = 2;

/// The endpoint answered but no ability payload could be recovered.
pub const EXTRACTION_FAILURE: i32 = 3;

/// A file the user asked for could not be written.
pub const STORAGE_FAILURE: i32 = 4;
