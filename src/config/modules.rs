//! Module selection
//!
//! Parses the `-M` / `modules` value: a string of single-letter codes, one
//! per subsystem to activate. Codes are case-insensitive, must belong to the
//! known table and may appear only once. Activation order is the input order.

use std::collections::HashSet;
use thiserror::Error;

/// Independently activatable daemon subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Consensus,
    Explorer,
    Gateway,
    Host,
    Miner,
    Renter,
    TransactionPool,
    Wallet,
}

/// Code -> module lookup table. Extend here to add a module.
static MODULE_TABLE: [(char, Module); 8] = [
    ('c', Module::Consensus),
    ('e', Module::Explorer),
    ('g', Module::Gateway),
    ('h', Module::Host),
    ('m', Module::Miner),
    ('r', Module::Renter),
    ('t', Module::TransactionPool),
    ('w', Module::Wallet),
];

impl Module {
    /// All known modules in table order
    pub fn all() -> impl Iterator<Item = Module> {
        MODULE_TABLE.iter().map(|(_, module)| *module)
    }

    /// Look up a module by its code (case-insensitive)
    pub fn from_code(code: char) -> Option<Module> {
        let code = code.to_ascii_lowercase();
        MODULE_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, module)| *module)
    }

    /// Lowercase single-letter code
    pub fn code(&self) -> char {
        MODULE_TABLE
            .iter()
            .find(|(_, module)| module == self)
            .map(|(c, _)| *c)
            .unwrap_or('?')
    }

    /// Human-readable subsystem name
    pub fn name(&self) -> &'static str {
        match self {
            Module::Consensus => "consensus",
            Module::Explorer => "explorer",
            Module::Gateway => "gateway",
            Module::Host => "host",
            Module::Miner => "miner",
            Module::Renter => "renter",
            Module::TransactionPool => "transaction pool",
            Module::Wallet => "wallet",
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Rejected module selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidModuleError {
    /// Code outside the known module table
    #[error("unrecognized module code {code:?} in {input:?}")]
    Unknown { code: char, input: String },

    /// Code listed more than once (case-insensitively)
    #[error("duplicate module {code:?} in {input:?}")]
    Duplicate { code: char, input: String },
}

/// Ordered, duplicate-free set of modules to activate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSet {
    modules: Vec<Module>,
}

impl ModuleSet {
    /// Parse a module code string.
    ///
    /// An empty string is a valid, empty selection.
    pub fn parse(input: &str) -> Result<Self, InvalidModuleError> {
        let mut seen = HashSet::new();
        let mut modules = Vec::with_capacity(input.len());

        for raw in input.chars() {
            let code = raw.to_ascii_lowercase();
            let module = Module::from_code(code).ok_or_else(|| InvalidModuleError::Unknown {
                code: raw,
                input: input.to_string(),
            })?;
            if !seen.insert(module) {
                return Err(InvalidModuleError::Duplicate {
                    code,
                    input: input.to_string(),
                });
            }
            modules.push(module);
        }

        Ok(Self { modules })
    }

    /// Lowercase code string in activation order
    pub fn as_code_string(&self) -> String {
        self.modules.iter().map(Module::code).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl std::fmt::Display for ModuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_code_string())
    }
}

/// Validate and lowercase a module code string, preserving order.
pub fn process_modules(input: &str) -> Result<String, InvalidModuleError> {
    ModuleSet::parse(input).map(|set| set.as_code_string())
}
