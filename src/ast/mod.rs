/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Statement and expression enums, node identities
/// - expressions: Literal, identifier and call expressions
/// - statements: Block, declaration, assignment and control flow statements
/// - types: Elementary types and type names
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
