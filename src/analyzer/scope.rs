use std::collections::HashMap;

use crate::{
    ast::{ast::NodeId, types::TypeName},
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Parameter and return slots of a user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<Option<TypeName>>,
    pub returns: Vec<Option<TypeName>>,
}

impl FunctionSignature {
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn return_count(&self) -> usize {
        self.returns.len()
    }
}

/// What a name declared in a scope refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    Variable { ty: Option<TypeName> },
    Function(FunctionSignature),
}

impl Identifier {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Identifier::Variable { .. } => "Variable",
            Identifier::Function(_) => "Function",
        }
    }
}

/// The names declared directly in one block or function body.
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub identifier_lookup: HashMap<String, Identifier>,
    /// Declaration order, for stable output.
    pub declaration_order: Vec<String>,
}

impl Scope {
    pub fn new(id: NodeId, parent: Option<NodeId>) -> Self {
        Scope {
            id,
            parent,
            identifier_lookup: HashMap::new(),
            declaration_order: vec![],
        }
    }

    fn declare(&mut self, name: &str, identifier: Identifier, current_position: Position) -> Result<(), Error> {
        if self.identifier_lookup.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::NameAlreadyTaken {
                    kind: identifier.kind_name().to_string(),
                    name: name.to_string(),
                },
                current_position,
            ));
        }

        self.identifier_lookup.insert(name.to_string(), identifier);
        self.declaration_order.push(name.to_string());
        Ok(())
    }

    pub fn declare_variable(&mut self, name: &str, ty: Option<TypeName>, current_position: Position) -> Result<(), Error> {
        self.declare(name, Identifier::Variable { ty }, current_position)
    }

    pub fn declare_function(&mut self, signature: FunctionSignature, current_position: Position) -> Result<(), Error> {
        let name = signature.name.clone();
        self.declare(&name, Identifier::Function(signature), current_position)
    }

    pub fn get_identifier(&self, name: &str) -> Option<&Identifier> {
        self.identifier_lookup.get(name)
    }

    /// Declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = (&str, &Identifier)> {
        self.declaration_order
            .iter()
            .filter_map(|x| self.identifier_lookup.get(x).map(|identifier| (x.as_str(), identifier)))
    }
}

/// Read-only result of a successful or failed analysis walk.
///
/// Keyed by the ids the parser assigns to blocks and function definitions.
/// A function body's scope is stored under the id of the body block.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInfo {
    pub scopes: HashMap<NodeId, Scope>,
    pub function_signatures: HashMap<NodeId, FunctionSignature>,
}

impl AnalysisInfo {
    pub fn scope(&self, id: NodeId) -> Option<&Scope> {
        self.scopes.get(&id)
    }

    pub fn function_signature(&self, id: NodeId) -> Option<&FunctionSignature> {
        self.function_signatures.get(&id)
    }
}
