//! Exit code constants for the tailpanel binary.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: The wrapped tool is not installed or not on PATH
//! - 3: An invocation timed out, was cancelled, or failed to launch
//! - 4: Terminal I/O failure in the interactive surface
//!
//! `tailpanel run` exits with the wrapped tool's own exit code when the
//! tool ran to completion.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The wrapped tool could not be found.
pub const TOOL_NOT_FOUND: i32 = 2;

/// An invocation did not run to completion.
pub const INVOCATION_FAILURE: i32 = 3;

/// Terminal setup, drawing, or input failed.
pub const TERMINAL_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            TOOL_NOT_FOUND,
            INVOCATION_FAILURE,
            TERMINAL_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_fit_in_a_byte() {
        for code in [
            SUCCESS,
            USER_ERROR,
            TOOL_NOT_FOUND,
            INVOCATION_FAILURE,
            TERMINAL_FAILURE,
        ] {
            assert!(u8::try_from(code).is_ok());
        }
    }
}
