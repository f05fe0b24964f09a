//! Integration tests for filesystem pack/unpack round trips.
//!
//! Builds realistic plugin asset layouts on disk, packs them into trees,
//! unpacks them elsewhere, and verifies byte-identical contents.

use plugpack_tree::{DirTree, Node};
use std::fs;
use tempfile::TempDir;

fn write_fixture(root: &std::path::Path) {
    fs::create_dir_all(root.join("css")).unwrap();
    fs::create_dir_all(root.join("img/icons")).unwrap();
    fs::write(root.join("index.html"), "<html></html>").unwrap();
    fs::write(root.join("css/style.css"), "body { margin: 0; }").unwrap();
    fs::write(root.join("img/logo.png"), [0x89, 0x50, 0x4E, 0x47]).unwrap();
    fs::write(root.join("img/icons/edit.svg"), "<svg/>").unwrap();
}

#[test]
fn test_pack_then_unpack_reproduces_contents() {
    let src = TempDir::new().unwrap();
    write_fixture(src.path());

    let tree = DirTree::from_dir(src.path()).unwrap();
    assert_eq!(tree.file_count(), 4);

    let dst = TempDir::new().unwrap();
    let target = dst.path().join("unpacked");
    tree.write_to(&target).unwrap();

    for relative in [
        "index.html",
        "css/style.css",
        "img/logo.png",
        "img/icons/edit.svg",
    ] {
        let original = fs::read(src.path().join(relative)).unwrap();
        let unpacked = fs::read(target.join(relative)).unwrap();
        assert_eq!(original, unpacked, "contents differ for {relative}");
    }
}

#[test]
fn test_packed_tree_structure_matches_disk() {
    let src = TempDir::new().unwrap();
    write_fixture(src.path());

    let tree = DirTree::from_dir(src.path()).unwrap();

    assert!(matches!(tree.get("index.html"), Some(Node::File(_))));
    let Some(Node::Dir(img)) = tree.get("img") else {
        panic!("img should be a subtree");
    };
    assert!(matches!(img.get("icons"), Some(Node::Dir(_))));
    assert!(matches!(img.get("logo.png"), Some(Node::File(b)) if b == &[0x89, 0x50, 0x4E, 0x47]));
}

#[test]
fn test_repeated_unpack_is_idempotent() {
    let src = TempDir::new().unwrap();
    write_fixture(src.path());
    let tree = DirTree::from_dir(src.path()).unwrap();

    let dst = TempDir::new().unwrap();
    let target = dst.path().join("out");
    tree.write_to(&target).unwrap();
    tree.write_to(&target).unwrap();

    assert_eq!(DirTree::from_dir(&target).unwrap(), tree);
}

#[test]
fn test_empty_directories_survive_roundtrip() {
    let src = TempDir::new().unwrap();
    fs::create_dir_all(src.path().join("empty/also-empty")).unwrap();

    let tree = DirTree::from_dir(src.path()).unwrap();
    assert_eq!(tree.file_count(), 0);

    let dst = TempDir::new().unwrap();
    let target = dst.path().join("out");
    tree.write_to(&target).unwrap();

    assert!(target.join("empty/also-empty").is_dir());
}
