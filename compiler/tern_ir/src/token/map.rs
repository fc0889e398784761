//! Old-token to new-token correspondence across an edit.

use rustc_hash::FxHashMap;

use super::TokenId;

/// Maps tokens of a pre-edit stream to their counterparts in the post-edit
/// stream. Tokens inside the edited region have no image.
#[derive(Clone, Debug, Default)]
pub struct TokenMap {
    map: FxHashMap<TokenId, TokenId>,
    identity: bool,
}

impl TokenMap {
    pub fn new() -> Self {
        TokenMap {
            map: FxHashMap::default(),
            identity: true,
        }
    }

    /// Record that `old` became `new`.
    pub fn insert(&mut self, old: TokenId, new: TokenId) {
        self.identity &= old == new;
        self.map.insert(old, new);
    }

    #[inline]
    pub fn get(&self, old: TokenId) -> Option<TokenId> {
        self.map.get(&old).copied()
    }

    /// True when every mapped token kept its id. Subtrees outside the edit
    /// can then be shared between the old and new tree as they are.
    #[inline]
    pub fn is_identity_preserving(&self) -> bool {
        self.identity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
