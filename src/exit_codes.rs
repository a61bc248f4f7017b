//! Exit codes shared by the `doccheck` and `neon-run` binaries
//!
//! These let CI distinguish "a documentation sample is broken" from
//! "the checker itself could not do its job".

/// Success - Every snippet passed, or there was nothing to verify
pub const SUCCESS: i32 = 0;

/// A snippet's toolchain invocation exited with a non-zero status
pub const SNIPPET_FAILED: i32 = 1;

/// Tool error - File enumeration failed or the toolchain could not be launched
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{SNIPPET_FAILED, SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with snippet failure code (1)
    pub fn snippet_failed() -> ! {
        std::process::exit(SNIPPET_FAILED);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }

    /// Exit with an arbitrary code propagated from a child process
    pub fn with_code(code: i32) -> ! {
        std::process::exit(code);
    }
}
