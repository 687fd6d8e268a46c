//! # Libris Repository
//!
//! Data access for authors and users.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn AuthorRepository> / Arc<dyn UserRepository>
//! MySqlAuthorRepository / MySqlUserRepository   (SQLx)
//! InMemoryAuthorRepository / InMemoryUserRepository   (tests, `memory:` URL)
//! ```
//!
//! Every write is committed before the call returns.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
