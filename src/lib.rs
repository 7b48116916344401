pub mod error;
pub mod registry;
pub mod schema;
pub mod session;
pub mod traits;
pub mod validation;

pub use error::*;
pub use registry::*;
pub use schema::*;
pub use session::*;
pub use traits::*;
pub use validation::*;

#[cfg(test)]
mod tests;

/// A session wired to the built-in field-type configuration table.
pub fn standard_session() -> anyhow::Result<session::FormSession> {
    let registry = registry::FieldTypeRegistry::builtin()?;
    Ok(session::FormSession::new(registry))
}
