//! Commitment to an action sequence.

use super::Action;

/// SHA-256 over the bincode encoding of each action, in log order.
///
/// Two logs with equal roots applied to equal worlds produce equal worlds,
/// which is how replay after a rewind is checked.
pub fn compute_actions_root(actions: &[Action]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for action in actions {
        if let Ok(bytes) = bincode::serialize(action) {
            hasher.update(&bytes);
        }
    }
    hasher.finalize().into()
}
