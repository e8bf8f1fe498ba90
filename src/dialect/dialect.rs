use std::{collections::HashMap, str::FromStr};

use thiserror::Error;

use crate::ast::types::ElementaryType;

/// Grammar variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AsmFlavour {
    /// Call/assignment-only statements, no type annotations.
    Strict,
    /// Like `Strict`, but every typed name and literal carries `:type`.
    #[default]
    Typed,
}

/// Descriptor of an operation provided by the dialect.
///
/// Parameter and return slots carry an elementary type under the typed
/// flavour and `None` otherwise; only their count matters to the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinFunction {
    pub name: String,
    pub parameters: Vec<Option<ElementaryType>>,
    pub returns: Vec<Option<ElementaryType>>,
    /// Free of side effects, so calls may be moved or removed.
    pub movable: bool,
    /// Every argument must be a literal.
    pub literal_arguments: bool,
}

impl BuiltinFunction {
    pub fn new(name: &str, parameters: usize, returns: usize) -> Self {
        BuiltinFunction {
            name: name.to_string(),
            parameters: vec![None; parameters],
            returns: vec![None; returns],
            movable: false,
            literal_arguments: false,
        }
    }

    pub fn typed(name: &str, parameters: &[ElementaryType], returns: &[ElementaryType]) -> Self {
        BuiltinFunction {
            name: name.to_string(),
            parameters: parameters.iter().copied().map(Some).collect(),
            returns: returns.iter().copied().map(Some).collect(),
            movable: false,
            literal_arguments: false,
        }
    }

    pub fn movable(mut self) -> Self {
        self.movable = true;
        self
    }

    pub fn with_literal_arguments(mut self) -> Self {
        self.literal_arguments = true;
        self
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn return_count(&self) -> usize {
        self.returns.len()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuiltinSpecError {
    #[error("expected `name:parameters:returns[:flags]`, got {0:?}")]
    Malformed(String),
    #[error("invalid count {0:?}")]
    InvalidCount(String),
    #[error("unknown builtin flag {0:?} (expected `literal` or `movable`)")]
    UnknownFlag(String),
}

/// `name:parameters:returns[:literal][:movable]`, as accepted on the command line.
impl FromStr for BuiltinFunction {
    type Err = BuiltinSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut parts = spec.split(':');
        let (Some(name), Some(parameters), Some(returns)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(BuiltinSpecError::Malformed(spec.to_string()));
        };
        if name.is_empty() {
            return Err(BuiltinSpecError::Malformed(spec.to_string()));
        }

        let count = |text: &str| {
            text.parse::<usize>()
                .map_err(|_| BuiltinSpecError::InvalidCount(text.to_string()))
        };
        let mut builtin = BuiltinFunction::new(name, count(parameters)?, count(returns)?);

        for flag in parts {
            builtin = match flag {
                "literal" => builtin.with_literal_arguments(),
                "movable" => builtin.movable(),
                other => return Err(BuiltinSpecError::UnknownFlag(other.to_string())),
            };
        }

        Ok(builtin)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dialect {
    pub flavour: AsmFlavour,
    builtins: HashMap<String, BuiltinFunction>,
}

impl Dialect {
    pub fn new(flavour: AsmFlavour) -> Self {
        Dialect {
            flavour,
            builtins: HashMap::new(),
        }
    }

    /// The typed dialect without any builtins.
    pub fn typed() -> Self {
        Dialect::new(AsmFlavour::Typed)
    }

    /// The untyped strict dialect without any builtins.
    pub fn strict() -> Self {
        Dialect::new(AsmFlavour::Strict)
    }

    pub fn with_builtin(mut self, builtin: BuiltinFunction) -> Self {
        self.add_builtin(builtin);
        self
    }

    pub fn add_builtin(&mut self, builtin: BuiltinFunction) {
        self.builtins.insert(builtin.name.clone(), builtin);
    }

    pub fn builtin(&self, name: &str) -> Option<&BuiltinFunction> {
        self.builtins.get(name)
    }

    pub fn is_typed(&self) -> bool {
        self.flavour == AsmFlavour::Typed
    }
}
