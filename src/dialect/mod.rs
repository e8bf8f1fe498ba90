//! Dialect description.
//!
//! A dialect is a plain value: the grammar flavour in effect and the table
//! of builtin operations the target machine provides. Test suites and tools
//! build ad hoc dialects with [`dialect::Dialect::with_builtin`].

pub mod dialect;

#[cfg(test)]
mod tests;
