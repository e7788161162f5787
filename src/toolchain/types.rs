use crate::build::Invocation;
use std::fmt;

/// Compiler families `ccomp` knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum CompilerFamily {
    /// GNU Compiler Collection (g++)
    GNU,
    /// Clang/LLVM (clang++)
    Clang,
}

impl CompilerFamily {
    /// Parse the family half of a `family-NN` token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "gnu" => Some(CompilerFamily::GNU),
            "clang" => Some(CompilerFamily::Clang),
            _ => None,
        }
    }

    pub fn binary(&self) -> &'static str {
        match self {
            CompilerFamily::GNU => "g++",
            CompilerFamily::Clang => "clang++",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerFamily::GNU => write!(f, "gnu"),
            CompilerFamily::Clang => write!(f, "clang"),
        }
    }
}

/// A compiler family pinned to a C++ standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompilerSpec {
    pub family: CompilerFamily,
    /// Two-digit standard label (98, 11, 14, 17, 20, ...).
    pub standard: u8,
}

impl CompilerSpec {
    pub fn new(family: CompilerFamily, standard: u8) -> Self {
        Self { family, standard }
    }

    pub fn std_flag(&self) -> String {
        format!("-std=c++{:02}", self.standard)
    }

    /// Invocation prefix, e.g. `g++ -std=c++20`.
    pub fn invocation(&self) -> Invocation {
        Invocation::new(self.family.binary()).arg(self.std_flag())
    }

    pub fn render(&self) -> String {
        self.invocation().render()
    }
}

impl fmt::Display for CompilerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.family, self.standard)
    }
}

/// Map a `__cplusplus` value to its two-digit standard label.
pub fn standard_from_macro(value: i64) -> Option<u8> {
    match value {
        199711 => Some(98),
        201103 => Some(11),
        201402 => Some(14),
        201703 => Some(17),
        202002 => Some(20),
        _ => None,
    }
}

/// Pull the `__cplusplus` value out of a `-dM -E` predefined macro dump.
pub fn parse_cplusplus_macro(defines: &str) -> Option<i64> {
    defines.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("#define"), Some("__cplusplus"), Some(value)) => {
                value.trim_end_matches(['L', 'l']).parse().ok()
            }
            _ => None,
        }
    })
}
