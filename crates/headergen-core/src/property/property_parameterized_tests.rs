#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("KGN:", "KGN:Reflect", "Reflect" ; "namespace tag")]
#[test_case("KGC:", "KGC:Reflect", "Reflect" ; "class tag")]
#[test_case("KGS:", "KGS:Reflect", "Reflect" ; "struct tag")]
#[test_case("KGF:", "KGF:Get", "Get" ; "field tag")]
#[test_case("KGFu:", "KGFu:Export", "Export" ; "function tag")]
#[test_case("KGEV:", "KGEV:Hidden", "Hidden" ; "enum value tag")]
fn PropertyParser___matching_tag___extracts_single_property(tag: &str, annotation: &str, name: &str) {
    let properties = PropertyParser::default()
        .parse_properties(annotation, tag)
        .unwrap()
        .unwrap();

    assert_eq!(properties, vec![Property::new(name)]);
}

#[test_case("KGE:", "KGEV:Hidden" ; "enum tag is a prefix of the enum value tag")]
#[test_case("KGC:", "KGS:Reflect" ; "struct annotation on class parser")]
#[test_case("KGF:", "unrelated annotation" ; "foreign annotation")]
fn PropertyParser___mismatching_tag___returns_none(tag: &str, annotation: &str) {
    assert_eq!(PropertyParser::default().parse_properties(annotation, tag), Ok(None));
}

#[test_case("KGC:A(" ; "unclosed encloser")]
#[test_case("KGC:A(\"x)" ; "unclosed quote")]
#[test_case("KGC:A(1))" ; "extra closer")]
#[test_case("KGC:,A" ; "leading separator")]
#[test_case("KGC:A,,B" ; "double separator")]
fn PropertyParser___malformed___is_rejected(annotation: &str) {
    assert!(PropertyParser::default().parse_properties(annotation, "KGC:").is_err());
}

#[test_case("KGF:Range(0, x > 1)", &["0", "x > 1"] ; "greater than")]
#[test_case("KGF:Range(x < 1, 2)", &["x < 1", "2"] ; "less than")]
#[test_case("KGF:Range(a->b)", &["a->b"] ; "arrow")]
#[test_case("KGF:Range(<int)", &["<int"] ; "unclosed angle bracket")]
#[test_case("KGF:Range(v[0, 1)", &["v[0", "1"] ; "unclosed square bracket")]
#[test_case("KGF:Range(std::map<int, float>, 3)", &["std::map<int, float>", "3"] ; "balanced template")]
fn PropertyParser___brackets_in_arguments___are_plain_text_unless_balanced(
    annotation: &str,
    arguments: &[&str],
) {
    let properties = PropertyParser::default()
        .parse_properties(annotation, "KGF:")
        .unwrap()
        .unwrap();

    assert_eq!(properties, vec![Property::with_arguments("Range", arguments.iter().copied())]);
}
