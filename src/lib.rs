//! # ccomp - single-file C++ build helper
//!
//! Point `ccomp` at one `.cpp` file and it works out which other sources that
//! file needs, compiles them all in a single compiler call, and optionally runs
//! the result (directly or under valgrind).
//!
//! ## How companions are found
//!
//! Every line of the entry file of the form `#include "path/name.hpp"` names a
//! header. The implementation file `name.cpp` is looked up anywhere under the
//! project root; if found it joins the compile command, otherwise the header is
//! assumed to be header-only. This is plain line matching, not preprocessing.
//!
//! ## Quick Start
//!
//! ```bash
//! # Build ./out/main from main.cpp and whatever it includes, then run it
//! ccomp main.cpp -r
//!
//! # Pick a compiler and standard, pass extra flags
//! ccomp main.cpp -c clang-20 -- -Wall -O2
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - Command assembly, execution and the build pipeline
//! - [`cli`] - Command-line surface
//! - [`config`] - Settings, defaults files and shared patterns
//! - [`deps`] - Include scanning and companion resolution
//! - [`error`] - Failure taxonomy and exit codes
//! - [`toolchain`] - Compiler detection and normalization

/// Command assembly, execution and the build pipeline.
pub mod build;

/// Command-line surface.
pub mod cli;

/// Settings, defaults files and shared patterns.
pub mod config;

/// Include scanning and companion resolution.
pub mod deps;

/// Failure taxonomy and exit codes.
pub mod error;

/// Filesystem helpers.
pub mod fs_utils;

/// Compiler detection and normalization.
pub mod toolchain;
