//! Fixed-length vector view of a belief, for a learned policy's input.

use super::BeliefState;
use crate::config::EmbeddingLayout;

/// Layout (with the default sizes, length 10):
/// - `[0, top_roles)`: role probabilities, descending
/// - next `top_moves`: unrevealed-move probabilities, descending
/// - item-revealed flag (0/1)
/// - observed move count / `move_count_scale`
///
/// Missing entries stay zero.
pub fn belief_embedding(state: &mut BeliefState, layout: &EmbeddingLayout) -> Vec<f32> {
    let mut out = vec![0.0f32; layout.len()];

    let mut roles: Vec<f64> = state.roles().map(|(_, p)| p).collect();
    roles.sort_by(|a, b| b.total_cmp(a));
    for (slot, p) in out[..layout.top_roles].iter_mut().zip(roles) {
        *slot = p as f32;
    }

    let mut moves: Vec<f64> = state.unrevealed_move_probs().values().copied().collect();
    moves.sort_by(|a, b| b.total_cmp(a));
    let move_slots = layout.top_roles..layout.top_roles + layout.top_moves;
    for (slot, p) in out[move_slots].iter_mut().zip(moves) {
        *slot = p as f32;
    }

    let flags = layout.top_roles + layout.top_moves;
    out[flags] = if state.observed_item().is_some() { 1.0 } else { 0.0 };
    out[flags + 1] = state.observed_moves().len() as f32 / layout.move_count_scale;
    out
}
