use alloc::string::{String, ToString};

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use crate::{Fields, Node, parse_str};

/// Rendering any tree and parsing the result must reproduce the tree, so
/// the generator only needs to stay inside what a parse can produce: raw
/// primitive text never holds an unescaped quote and never spells `null`.
const TEXT_ALPHABET: &[char] = &[
    'a', 'b', 'z', 'A', '0', '7', ' ', '_', '-', '.', '{', ':', ',', 'é',
];

#[derive(Debug, Clone)]
struct ArbitraryDocument(Node);

impl Arbitrary for ArbitraryDocument {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbitraryDocument(arbitrary_node(g, 3))
    }
}

fn arbitrary_text(g: &mut Gen) -> String {
    let len = usize::arbitrary(g) % 8;
    (0..len).map(|_| *g.choose(TEXT_ALPHABET).unwrap()).collect()
}

fn arbitrary_node(g: &mut Gen, depth: usize) -> Node {
    let variants: u8 = if depth == 0 { 4 } else { 6 };
    match u8::arbitrary(g) % variants {
        0 => Node::Null,
        1 => Node::primitive(u32::arbitrary(g).to_string()),
        2 => Node::primitive(*g.choose(&["true", "false", "0.5", "12.75"]).unwrap()),
        3 => Node::primitive(arbitrary_text(g)),
        4 => {
            let len = usize::arbitrary(g) % 4;
            Node::Array((0..len).map(|_| arbitrary_node(g, depth - 1)).collect())
        }
        _ => {
            let mut fields = Fields::new();
            for _ in 0..usize::arbitrary(g) % 4 {
                fields.insert(arbitrary_text(g), arbitrary_node(g, depth - 1));
            }
            Node::Object(fields)
        }
    }
}

#[quickcheck]
fn rendering_then_parsing_is_identity(doc: ArbitraryDocument) -> bool {
    let text = doc.0.to_string();
    parse_str(&text).expect("rendered documents reparse") == doc.0
}

#[test]
fn round_trip_is_independent_of_quoting_style() {
    let spellings = [
        r#"{"a":1,"b":"x"}"#,
        "{a:1,b:'x'}",
        r#"{'a':1,'b':"x"}"#,
    ];
    let trees = spellings.map(|text| parse_str(text).unwrap());
    assert_eq!(trees[0], trees[1]);
    assert_eq!(trees[0], trees[2]);
    for first in &trees {
        let second = parse_str(&first.to_string()).unwrap();
        assert_eq!(*first, second);
    }
}

#[test]
fn round_trip_preserves_raw_escapes_and_embedded_quotes() {
    for text in [
        r#"{"r":"x\"yx\""}"#,
        r#"{'q':'x"y'}"#,
        r#"["it's","a\\b"]"#,
        "{'ar{ray':[1.5,null,true]}",
    ] {
        let first = parse_str(text).unwrap();
        let second = parse_str(&first.to_string()).unwrap();
        assert_eq!(first, second, "{text}");
    }
}

#[test]
fn structural_round_trip_of_a_mixed_document() {
    let text = r#"{"xyz":1,"ywf":{"abc":3},"k":null,"ar{ray":[{"abc":10}],"map":{"x":"yo","y":125.8},"i":5,"a":false,"b":true,"r":"x\"yx\""}"#;
    let first = parse_str(text).unwrap();
    let second = parse_str(&first.to_string()).unwrap();
    assert_eq!(first, second);
}
