//! Control-transfer contract: quit returns to the caller, suspend returns
//! to the top level, and at most one job ever holds the foreground.
