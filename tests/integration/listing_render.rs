use std::fs;
use std::path::Path;

use comments::{CommentStore, Listing, ListingOptions, RenderOptions, Renderer, Target};
use tempfile::TempDir;

use crate::support::touch;

fn render(listing: &Listing, options: RenderOptions) -> String {
    let mut out = Vec::new();
    Renderer::new(options)
        .render(&mut out, &listing.entries, &listing.comments, &listing.directory)
        .unwrap();
    String::from_utf8(out).unwrap()
}

fn no_dots() -> ListingOptions {
    ListingOptions {
        include_dot_entries: false,
        sort: true,
    }
}

#[test]
fn two_commented_files_align_on_one_column() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("d")).unwrap();
    touch(&temp.path().join("d/a.txt"));
    touch(&temp.path().join("d/b.txt"));
    let store = CommentStore::open(temp.path()).unwrap();

    store.set_comment(&Target::new("d/a.txt"), "hello").unwrap();
    store.set_comment(&Target::new("d/b.txt"), "").unwrap();

    let listing = Listing::load(&store, Path::new("d"), no_dots()).unwrap();
    let output = render(&listing, RenderOptions::default());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "a.txt  hello ");
    assert_eq!(lines[1], "b.txt   ");
    assert!(lines.iter().all(|l| !l.contains('\r')));
}

#[test]
fn multi_line_comment_renders_on_one_line() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("notes.md"));
    let store = CommentStore::open(temp.path()).unwrap();
    store
        .set_comment(&Target::new("notes.md"), "first\nsecond\r\nthird")
        .unwrap();

    let listing = Listing::load(&store, Path::new("."), no_dots()).unwrap();
    let output = render(&listing, RenderOptions::default());
    assert_eq!(output, "notes.md  first second third \n");
}

#[test]
fn filtered_listing_shows_only_commented_entries() {
    let temp = TempDir::new().unwrap();
    for name in ["one", "two", "three", "four", "five"] {
        touch(&temp.path().join(name));
    }
    let store = CommentStore::open(temp.path()).unwrap();
    store.set_comment(&Target::new("two"), "2").unwrap();
    store.set_comment(&Target::new("four"), "4").unwrap();

    let listing = Listing::load(&store, Path::new("."), no_dots()).unwrap();
    assert_eq!(listing.entries.len(), 5);

    let output = render(
        &listing,
        RenderOptions {
            filter_uncommented: true,
            ..RenderOptions::default()
        },
    );
    assert_eq!(output.lines().count(), 2);
    assert!(output.starts_with("four"));
}

#[test]
fn full_listing_marks_directories_and_dot_entries() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("proj/src")).unwrap();
    touch(&temp.path().join("proj/Cargo.toml"));
    let store = CommentStore::open(temp.path()).unwrap();
    store.set_comment(&Target::new("proj"), "the project").unwrap();
    store.set_comment(&Target::new("proj/src"), "sources").unwrap();

    let listing = Listing::load(&store, Path::new("proj"), ListingOptions::default()).unwrap();
    let output = render(&listing, RenderOptions::default());

    assert_eq!(
        output,
        "./           [Parent] the project \n\
         ../          \n\
         Cargo.toml  \n\
         src/         sources \n"
    );
}

#[test]
fn longest_directory_name_keeps_a_gap_before_its_comment() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("longdir")).unwrap();
    touch(&temp.path().join("a.txt"));
    let store = CommentStore::open(temp.path()).unwrap();
    store.set_comment(&Target::new("a.txt"), "file").unwrap();
    store.set_comment(&Target::new("longdir"), "note").unwrap();

    let listing = Listing::load(&store, Path::new("."), no_dots()).unwrap();
    for spacing in [1, 2, 3] {
        let output = render(
            &listing,
            RenderOptions {
                spacing,
                ..RenderOptions::default()
            },
        );
        let lines: Vec<&str> = output.lines().collect();
        let gap = " ".repeat(spacing);
        assert_eq!(lines[0], format!("a.txt  {gap}file "));
        assert_eq!(lines[1], format!("longdir/{gap}note "));
    }
}

#[cfg(unix)]
#[test]
fn unreadable_annotation_does_not_hide_the_rest() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("a.txt"));
    touch(&temp.path().join("b.txt"));
    let store = CommentStore::open(temp.path()).unwrap();
    store.set_comment(&Target::new("a.txt"), "still here").unwrap();
    std::os::unix::fs::symlink(
        "/nonexistent/annotation",
        temp.path().join(".comments/b.txt.comment"),
    )
    .unwrap();

    let listing = Listing::load(&store, Path::new("."), no_dots()).unwrap();
    let output = render(&listing, RenderOptions::default());
    assert_eq!(output, "a.txt  still here \nb.txt  \n");
}
