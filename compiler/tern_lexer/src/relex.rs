//! Re-scanning after an edit.
//!
//! The new source is scanned in full, then lined up with the old stream.
//! Old tokens entirely before the edit that reappear unchanged at the same
//! offset, and old tokens entirely after it that reappear unchanged shifted
//! by the edit's delta, keep their ids. Everything between gets fresh ids.
//! The old stream is left untouched.

use std::sync::Arc;

use tern_ir::{
    EditDescriptor, OriginalRange, StringInterner, TextChange, Token, TokenId, TokenKind,
    TokenMap, TokenStream,
};
use tracing::debug;

use crate::{scan, Scan, Scanned};

/// Result of re-scanning an edited source.
#[derive(Debug)]
pub struct Relexed {
    pub tokens: Arc<TokenStream>,
    /// Old id to new id for every retained token.
    pub token_map: TokenMap,
    pub edit: EditDescriptor,
}

fn unchanged(old: &Token, new: &Scanned, shift: i64) -> bool {
    old.kind == new.kind
        && old.lexeme == new.lexeme
        && i64::from(old.span.start) + shift == i64::from(new.span.start)
        && old.span.len() == new.span.len()
}

/// Re-scan `new_source`, the result of applying `change` to the source of `old`.
pub fn relex(
    old: &TokenStream,
    new_source: &str,
    change: TextChange,
    interner: &StringInterner,
) -> Relexed {
    let Scan { tokens: scanned, comments } = scan(new_source, interner);
    let old_tokens = old.tokens();
    let limit = old_tokens.len().min(scanned.len());
    let delta = change.delta();

    let mut prefix = 0;
    while prefix < limit {
        let o = &old_tokens[prefix];
        if o.kind == TokenKind::Eof || !change.is_before(o.span) || !unchanged(o, &scanned[prefix], 0)
        {
            break;
        }
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < limit - prefix {
        let o = &old_tokens[old_tokens.len() - 1 - suffix];
        let n = &scanned[scanned.len() - 1 - suffix];
        if o.kind == TokenKind::Bof || !change.is_after(o.span) || !unchanged(o, n, delta) {
            break;
        }
        suffix += 1;
    }

    let new_len = scanned.len();
    let old_len = old_tokens.len();
    let mut token_map = TokenMap::new();
    let tokens: Vec<Token> = scanned
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let id = if i < prefix {
                old_tokens[i].id
            } else if i >= new_len - suffix {
                old_tokens[old_len - (new_len - i)].id
            } else {
                TokenId::fresh()
            };
            s.into_token(id)
        })
        .collect();
    for (i, token) in old_tokens.iter().enumerate() {
        if i < prefix || i >= old_len - suffix {
            token_map.insert(token.id, token.id);
        }
    }

    let left_token = tokens[prefix.saturating_sub(1)].id;
    let right_token = tokens[new_len - suffix.max(1)].id;

    // Widen the edit to the old tokens that did not survive, so that the
    // node around it contains every re-scanned token.
    let removed = &old_tokens[prefix..old_len - suffix];
    let start = removed
        .first()
        .map_or(change.start, |t| t.span.start.min(change.start));
    let end = removed
        .last()
        .map_or(change.old_end, |t| t.span.end.max(change.old_end));
    let original = if end > start {
        OriginalRange::Replaced {
            start,
            end: end - 1,
        }
    } else {
        OriginalRange::Insertion { at: start }
    };

    debug!(
        retained_prefix = prefix,
        retained_suffix = suffix,
        rescanned = new_len - prefix - suffix,
        ?original,
        "relexed edited source"
    );

    Relexed {
        tokens: Arc::new(TokenStream::new(tokens, comments)),
        token_map,
        edit: EditDescriptor::new(left_token, right_token, original),
    }
}
