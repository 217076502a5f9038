//! The Core IR (spec.md §3.4) and lowering from the marked AST (spec.md
//! §4.4): `lowerProgramToValues(markedProgram, resolvedTypes,
//! recordDefaultExprs) -> list<CoreValueBinding>`.

pub mod core_expr;
pub use core_expr::{
    CoreBinding, CoreExpr, CoreExprNode, CoreLiteral, CoreMatchCase, CoreMatchCoverage, CoreNode,
    CorePattern, CorePatternNode,
};

pub mod core_module;
pub use core_module::{CoreImport, CoreModule, CoreModuleGraph, CoreValueBinding};

pub mod lowering;
pub use lowering::{lower_program_to_values, LoweringContext, LoweringError};
