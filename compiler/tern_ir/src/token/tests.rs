use pretty_assertions::assert_eq;

use super::*;
use crate::{Span, StringInterner};

fn stream(interner: &StringInterner, words: &[(&str, TokenKind, u32)]) -> TokenStream {
    let mut tokens = vec![Token::new(
        TokenId::fresh(),
        TokenKind::Bof,
        Name::EMPTY,
        Span::point(0),
    )];
    let mut end = 0;
    for &(text, kind, start) in words {
        let len = u32::try_from(text.len()).unwrap();
        tokens.push(Token::new(
            TokenId::fresh(),
            kind,
            interner.intern(text),
            Span::new(start, start + len),
        ));
        end = start + len;
    }
    tokens.push(Token::new(
        TokenId::fresh(),
        TokenKind::Eof,
        Name::EMPTY,
        Span::point(end),
    ));
    TokenStream::new(tokens, Vec::new())
}

#[test]
fn test_token_ids_are_unique() {
    let a = TokenId::fresh();
    let b = TokenId::fresh();
    assert_ne!(a, b);
    assert_ne!(a, TokenId::NONE);
}

#[test]
fn test_stream_navigation() {
    let interner = StringInterner::new();
    let s = stream(
        &interner,
        &[("a", TokenKind::Ident, 0), ("+", TokenKind::Plus, 2)],
    );
    let a = s.first().id;
    let plus = s.next(a).unwrap();
    assert_eq!(s.get(plus).unwrap().kind, TokenKind::Plus);
    assert_eq!(s.next(plus), Some(s.eof().id));
    assert_eq!(s.previous(a), Some(s.bof().id));
    assert_eq!(s.previous(s.bof().id), None);
    assert_eq!(s.next(s.eof().id), None);
    assert!(!s.is_empty());
}

#[test]
fn test_comments_hang_off_following_token() {
    let interner = StringInterner::new();
    let comment = Comment {
        kind: CommentKind::Line,
        span: Span::new(0, 4),
        text: interner.intern("// x"),
    };
    let x = Token::new(
        TokenId::fresh(),
        TokenKind::Ident,
        interner.intern("x"),
        Span::new(5, 6),
    )
    .with_comments(0, 1);
    let bof = Token::new(TokenId::fresh(), TokenKind::Bof, Name::EMPTY, Span::point(0));
    let eof = Token::new(TokenId::fresh(), TokenKind::Eof, Name::EMPTY, Span::point(6));
    let s = TokenStream::new(vec![bof, x, eof], vec![comment]);
    assert_eq!(s.comments_before(x.id), &[comment]);
    assert!(s.comments_before(eof.id).is_empty());
}

#[test]
fn test_token_map_tracks_identity() {
    let a = TokenId::fresh();
    let b = TokenId::fresh();
    let mut map = TokenMap::new();
    map.insert(a, a);
    assert!(map.is_identity_preserving());
    assert_eq!(map.get(a), Some(a));
    assert_eq!(map.get(b), None);

    map.insert(b, TokenId::fresh());
    assert!(!map.is_identity_preserving());
    assert_eq!(map.len(), 2);
}

#[test]
fn test_synthetic_merge_drops_orphaned_anchors() {
    let kept = TokenId::fresh();
    let gone = TokenId::fresh();
    let piece = |anchor| SyntheticToken {
        kind: TokenKind::Gt,
        lexeme: Name::EMPTY,
        flavor: SyntheticFlavor::Piece,
        anchor,
        offset: 0,
        len: 1,
    };

    let mut old = SyntheticTokens::new();
    let kept_piece = old.push(piece(kept));
    let gone_piece = old.push(piece(gone));
    let mut fresh = SyntheticTokens::new();
    let new_piece = fresh.push(piece(kept));

    let merged = old.merged_with(&fresh, |id| (id == kept).then_some(id));
    assert!(merged.get(kept_piece).is_some());
    assert!(merged.get(gone_piece).is_none());
    assert!(merged.get(new_piece).is_some());
}

#[test]
fn test_split_leading_gt() {
    assert_eq!(
        TokenKind::GtGt.split_leading_gt(),
        Some((TokenKind::Gt, TokenKind::Gt))
    );
    assert_eq!(
        TokenKind::GtGtEq.split_leading_gt(),
        Some((TokenKind::Gt, TokenKind::GtEq))
    );
    assert_eq!(TokenKind::Gt.split_leading_gt(), None);
}
