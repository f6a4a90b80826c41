//! Chain module - blocks, the ledger, validation and star registration

mod block;
mod clock;
mod error;
mod genesis;
mod registry;
mod state;
mod validation;

pub use block::*;
pub use clock::*;
pub use error::*;
pub use genesis::*;
pub use registry::*;
pub use state::*;
pub use validation::*;
