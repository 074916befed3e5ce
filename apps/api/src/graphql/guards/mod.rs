//! GraphQL guards for the Murmur API
//!
//! Operation guards wrap resolvers (see [`chain`]); field guards are applied
//! by a schema extension from a declarative policy (see [`field`]).

mod chain;
mod field;

pub use chain::{
    require_authenticated, require_post_author, require_post_exists, Guard, GuardArgs,
    GuardChain, Resolver,
};
pub use field::{uppercase_value, FieldGuard, FieldGuardExtension, FieldPolicy};
