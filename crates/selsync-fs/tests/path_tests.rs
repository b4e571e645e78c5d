use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use selsync_fs::{NormalizedPath, escapes_root, normalize_relative};

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("D:\\work\\game");
    assert_eq!(path.as_str(), "D:/work/game");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("/p");
    assert_eq!(base.join("a").as_str(), "/p/a");
}

#[test]
fn test_join_normalizes_segment() {
    let base = NormalizedPath::new("/projects/game");
    assert_eq!(base.join("\\assets\\audio\\").as_str(), "/projects/game/assets/audio");
}

#[rstest]
#[case("assets/audio", "assets/audio")]
#[case("assets\\audio", "assets/audio")]
#[case("/assets/audio/", "assets/audio")]
#[case("\\\\assets\\audio\\\\", "assets/audio")]
#[case("assets//audio", "assets/audio")]
#[case("./assets/audio", "assets/audio")]
#[case("assets/./audio/", "assets/audio")]
#[case(".\\assets\\\\audio", "assets/audio")]
#[case("", "")]
#[case("///", "")]
#[case(".", "")]
#[case("../assets", "../assets")]
fn test_normalize_relative(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_relative(input), expected);
}

#[rstest]
#[case("..", true)]
#[case("../assets", true)]
#[case("assets/../..", true)]
#[case("assets\\..\\..", true)]
#[case("assets/audio", false)]
#[case("assets/..audio", false)]
#[case("", false)]
fn test_escapes_root(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(escapes_root(input), expected);
}

proptest! {
    #[test]
    fn normalized_relative_is_canonical(input in "[a-z./\\\\]{0,24}") {
        let out = normalize_relative(&input);
        prop_assert!(!out.contains('\\'));
        prop_assert!(!out.contains("//"));
        prop_assert!(!out.starts_with('/'));
        prop_assert!(!out.ends_with('/'));
        prop_assert!(out.split('/').all(|segment| segment != "."));
        prop_assert_eq!(normalize_relative(&out), out.clone());
    }
}
