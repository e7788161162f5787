//! Compiler detection and normalization.
//!
//! A compiler is either detected from the machine (`clang++`, then `g++`) or
//! requested on the command line as a `gnu-NN` / `clang-NN` token. Anything
//! else the user passes is treated as a literal compiler command and forwarded
//! untouched.

pub mod types;

pub use types::{CompilerFamily, CompilerSpec, parse_cplusplus_macro, standard_from_macro};

use crate::build::Invocation;
use crate::config::{CompilerChoice, Patterns};
use crate::error::BuildError;
use crate::fs_utils;
use std::process::{Command, Stdio};

/// Compilers probed for the ambient toolchain, in order.
pub const AMBIENT_CANDIDATES: [CompilerFamily; 2] =
    [CompilerFamily::Clang, CompilerFamily::GNU];

/// Detect the default toolchain of this machine.
///
/// Each candidate is probed under the same binary name its [`CompilerSpec`]
/// later invokes. Returns `None` when no known compiler runs or its default
/// standard is not one of the recognised `__cplusplus` values.
pub fn detect_ambient_compiler() -> Option<CompilerSpec> {
    for family in AMBIENT_CANDIDATES {
        let Ok(output) = Command::new(family.binary())
            .args(["-x", "c++", "-dM", "-E", "-"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
        else {
            continue;
        };
        if !output.status.success() {
            continue;
        }

        let defines = String::from_utf8_lossy(&output.stdout);
        let standard = parse_cplusplus_macro(&defines).and_then(standard_from_macro);
        return standard.map(|standard| CompilerSpec::new(family, standard));
    }

    None
}

/// Accept only `family-NN` tokens.
pub fn resolve_requested(token: &str, patterns: &Patterns) -> Option<CompilerSpec> {
    if !patterns.compiler_token.is_match(token) {
        return None;
    }
    let (family, version) = token.split_once('-')?;
    Some(CompilerSpec::new(
        CompilerFamily::from_token(family)?,
        version.parse().ok()?,
    ))
}

/// Turn the configured compiler choice into the invocation prefix.
pub fn resolve_compiler(
    choice: &CompilerChoice,
    patterns: &Patterns,
) -> Result<Invocation, BuildError> {
    match choice {
        CompilerChoice::Ambient => detect_ambient_compiler()
            .map(|spec| spec.invocation())
            .ok_or_else(|| BuildError::InvalidCompilerPath {
                message: "no supported C++ compiler with a known default standard was detected"
                    .to_string(),
                compiler: None,
            }),
        CompilerChoice::Requested(token) => {
            if let Some(spec) = resolve_requested(token, patterns) {
                return Ok(spec.invocation());
            }
            passthrough(token)
        }
    }
}

fn passthrough(token: &str) -> Result<Invocation, BuildError> {
    let Some(invocation) = Invocation::from_command_line(token) else {
        return Err(BuildError::InvalidCompilerPath {
            message: "compiler token is empty".to_string(),
            compiler: Some(token.to_string()),
        });
    };

    if fs_utils::find_executable(invocation.program()).is_none() {
        return Err(BuildError::InvalidCompilerPath {
            message: format!("compiler '{}' could not be located", invocation.program()),
            compiler: Some(token.to_string()),
        });
    }

    Ok(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requested_gnu() {
        let patterns = Patterns::new();
        let spec = resolve_requested("gnu-20", &patterns).unwrap();
        assert_eq!(spec, CompilerSpec::new(CompilerFamily::GNU, 20));
        assert_eq!(spec.render(), "g++ -std=c++20");
    }

    #[test]
    fn test_resolve_requested_clang() {
        let patterns = Patterns::new();
        let spec = resolve_requested("clang-17", &patterns).unwrap();
        assert_eq!(spec.render(), "clang++ -std=c++17");
    }

    #[test]
    fn test_resolve_requested_rejects_bogus() {
        let patterns = Patterns::new();
        assert!(resolve_requested("bogus", &patterns).is_none());
        assert!(resolve_requested("gnu-2", &patterns).is_none());
        assert!(resolve_requested("GNU-20", &patterns).is_none());
        assert!(resolve_requested(" gnu-20", &patterns).is_none());
    }

    #[test]
    fn test_resolve_compiler_uses_token() {
        let patterns = Patterns::new();
        let inv =
            resolve_compiler(&CompilerChoice::Requested("clang-20".into()), &patterns).unwrap();
        assert_eq!(inv.program(), "clang++");
        assert_eq!(inv.get_args(), ["-std=c++20"]);
    }

    #[test]
    fn test_passthrough_keeps_command_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let cc = dir.path().join("mycc");
        std::fs::write(&cc, "").unwrap();

        let token = format!("{} -O2 -std=c++23", cc.display());
        let inv = resolve_compiler(&CompilerChoice::Requested(token.clone()), &Patterns::new())
            .unwrap();
        assert_eq!(inv.render(), token);
    }

    #[test]
    fn test_passthrough_rejects_missing_program() {
        let err = resolve_compiler(
            &CompilerChoice::Requested("/definitely/not/here/cc -O2".into()),
            &Patterns::new(),
        )
        .unwrap_err();
        assert_eq!(err.code(), crate::error::codes::INVALID_COMPILER_PATH);
        assert_eq!(err.context().as_deref(), Some("/definitely/not/here/cc -O2"));
    }

    #[test]
    fn test_ambient_probe_matches_invoked_binary() {
        for family in AMBIENT_CANDIDATES {
            let invoked = CompilerSpec::new(family, 17).invocation();
            assert_eq!(invoked.program(), family.binary());
        }
        assert_eq!(AMBIENT_CANDIDATES.map(|f| f.binary()), ["clang++", "g++"]);
    }

    #[test]
    fn test_blank_token_is_invalid() {
        let err = resolve_compiler(&CompilerChoice::Requested("   ".into()), &Patterns::new())
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidCompilerPath { .. }));
    }
}
