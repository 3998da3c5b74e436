/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program root and the statement/expression sum types
/// - expressions: Definitions for the expression nodes and operators
/// - statements: Definitions for the statement nodes
pub mod ast;
pub mod expressions;
pub mod statements;
