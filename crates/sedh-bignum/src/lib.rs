#![doc = "Unsigned big-integer arithmetic for fixed-width key agreement."]

mod arith;
mod mont;
mod rand;
mod uint;

pub use mont::MontCtx;
pub use uint::Uint;
