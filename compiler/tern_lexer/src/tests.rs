use pretty_assertions::assert_eq;
use tern_ir::{CommentKind, OriginalRange, StringInterner, TextChange, TokenKind, TokenStream};

use super::*;

fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
    stream.tokens().iter().map(|t| t.kind).collect()
}

fn edit(source: &str, at: usize, remove: usize, insert: &str) -> (String, TextChange) {
    let mut edited = source.to_owned();
    edited.replace_range(at..at + remove, insert);
    let change = TextChange::replace(
        u32::try_from(at).unwrap(),
        u32::try_from(remove).unwrap(),
        u32::try_from(insert.len()).unwrap(),
    );
    (edited, change)
}

#[test]
fn test_lex_statement() {
    let interner = StringInterner::new();
    let stream = lex("x = y >> 2;", &interner);
    assert_eq!(
        kinds(&stream),
        vec![
            TokenKind::Bof,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Ident,
            TokenKind::GtGt,
            TokenKind::Int,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
    assert_eq!(stream.eof().span.start, 11);
    assert_eq!(interner.lookup(stream.tokens()[3].lexeme), "y");
}

#[test]
fn test_keywords_and_contextual_words() {
    let interner = StringInterner::new();
    let stream = lex("class show on implements", &interner);
    assert_eq!(
        kinds(&stream)[1..5].to_vec(),
        vec![
            TokenKind::Class,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Implements,
        ]
    );
}

#[test]
fn test_literals() {
    let interner = StringInterner::new();
    let stream = lex(r#"12 0xFF 1.5e3 'a\'b' "c""#, &interner);
    assert_eq!(
        kinds(&stream)[1..6].to_vec(),
        vec![
            TokenKind::Int,
            TokenKind::Int,
            TokenKind::Double,
            TokenKind::String,
            TokenKind::String,
        ]
    );
    assert_eq!(interner.lookup(stream.tokens()[4].lexeme), r"'a\'b'");
}

#[test]
fn test_cascade_operator() {
    let interner = StringInterner::new();
    let stream = lex("a..b = 1..c.d", &interner);
    assert_eq!(
        kinds(&stream)[1..10].to_vec(),
        vec![
            TokenKind::Ident,
            TokenKind::DotDot,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Int,
            TokenKind::DotDot,
            TokenKind::Ident,
            TokenKind::Dot,
            TokenKind::Ident,
        ]
    );
}

#[test]
fn test_unterminated_string_and_bad_char_are_error_tokens() {
    let interner = StringInterner::new();
    let stream = lex("'abc\n#", &interner);
    assert_eq!(
        kinds(&stream),
        vec![TokenKind::Bof, TokenKind::Error, TokenKind::Error, TokenKind::Eof]
    );
}

#[test]
fn test_comments_attach_to_following_token() {
    let interner = StringInterner::new();
    let stream = lex("/// doc\n// line\nx /* block */ y\n// tail", &interner);
    let x = stream.first();
    let attached: Vec<CommentKind> = stream.comments_before(x.id).iter().map(|c| c.kind).collect();
    assert_eq!(attached, vec![CommentKind::Doc, CommentKind::Line]);

    let y = stream.next(x.id).unwrap();
    assert_eq!(stream.comments_before(y)[0].kind, CommentKind::Block);
    assert_eq!(stream.comments_before(stream.eof().id).len(), 1);
}

#[test]
fn test_relex_keeps_ids_outside_edit() {
    let interner = StringInterner::new();
    let source = "x = 1; y = 2;";
    let old = lex(source, &interner);
    let (edited, change) = edit(source, 4, 1, "12");
    let relexed = relex(&old, &edited, change, &interner);

    let old_ids: Vec<_> = old.tokens().iter().map(|t| t.id).collect();
    let new_ids: Vec<_> = relexed.tokens.tokens().iter().map(|t| t.id).collect();
    assert_eq!(new_ids.len(), old_ids.len());
    assert_eq!(new_ids[..3], old_ids[..3]);
    assert_ne!(new_ids[3], old_ids[3]);
    assert_eq!(new_ids[4..], old_ids[4..]);

    assert_eq!(relexed.token_map.get(old_ids[3]), None);
    assert_eq!(relexed.token_map.get(old_ids[5]), Some(old_ids[5]));
    assert!(relexed.token_map.is_identity_preserving());

    assert_eq!(relexed.edit.left_token, old_ids[2]);
    assert_eq!(relexed.edit.right_token, old_ids[4]);
    assert_eq!(relexed.edit.original, OriginalRange::Replaced { start: 4, end: 4 });

    // Offsets after the edit moved by one byte.
    assert_eq!(relexed.tokens.get(old_ids[5]).unwrap().span.start, 8);
}

#[test]
fn test_relex_pure_insertion_between_tokens() {
    let interner = StringInterner::new();
    let source = "a; b;";
    let old = lex(source, &interner);
    let (edited, change) = edit(source, 2, 0, " c;");
    let relexed = relex(&old, &edited, change, &interner);

    assert_eq!(relexed.tokens.len(), old.len() + 2);
    assert_eq!(relexed.edit.original, OriginalRange::Insertion { at: 2 });
    let left = relexed.tokens.get(relexed.edit.left_token).unwrap();
    assert_eq!(left.kind, TokenKind::Semicolon);
    let right = relexed.tokens.get(relexed.edit.right_token).unwrap();
    assert_eq!(interner.lookup(right.lexeme), "b");
}

#[test]
fn test_relex_widens_range_to_merged_tokens() {
    let interner = StringInterner::new();
    let source = "a + b;";
    let old = lex(source, &interner);
    // `a +` becomes `a ++`: the old `+` token is re-scanned even though the
    // insertion happens right after it.
    let (edited, change) = edit(source, 3, 0, "+");
    let relexed = relex(&old, &edited, change, &interner);
    assert_eq!(relexed.edit.original, OriginalRange::Replaced { start: 2, end: 2 });
}

#[test]
fn test_relex_identical_text_rescans_only_the_edit() {
    let interner = StringInterner::new();
    let source = "f(a, b);";
    let old = lex(source, &interner);
    let (edited, change) = edit(source, 5, 1, "b");
    let relexed = relex(&old, &edited, change, &interner);

    let changed: Vec<_> = relexed
        .tokens
        .tokens()
        .iter()
        .filter(|t| !old.contains(t.id))
        .map(|t| interner.lookup(t.lexeme))
        .collect();
    assert_eq!(changed, vec!["b"]);
}
