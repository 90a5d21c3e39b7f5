//! King safety rules - check, checkmate, same-side stalemate and pins
//!
//! Every question here is answered with the attack probe from
//! [`crate::move_gen::field_attacked`]: a candidate is tried on a scoped board
//! edit, the king square is probed, and the edit is rolled back.
//!
//! # Module Structure
//!
//! - `king_safety` - Check, king mobility, checkmate and stalemate ("remis")
//! - `pin` - Pin diagnostics along the line between a piece and its king
//!
//! The pin test is not part of the legality pipeline; legality is always
//! established by simulating the move and probing the king.

pub mod king_safety;
pub mod pin;


pub use king_safety::{
    is_checkmate, is_checkmate_player, is_remis, is_remis_player, king_attacked, king_moveable,
};
pub use pin::{direction_deltas, is_pinned, linearly_correlated};

pub(crate) use king_safety::king_attacked_in;
