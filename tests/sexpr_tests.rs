use bumpalo::Bump;
use insta::assert_snapshot;
use span_lattice::config::DecodeConfig;
use span_lattice::lattice::{InputPaths, LatticeFormatter};
use span_lattice::phrase::Sentence;

#[test]
fn test_sexpr_basic() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"a b", &arena);
    let paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(2, 1), &arena);

    let mut formatter = LatticeFormatter::new();
    formatter.visit_lattice(&paths);
    let output = formatter.finish();

    assert_eq!(
        output,
        "(lattice len=2 max=2\n  (blank)\n  (path [0,0] \"a\")\n  (path [0,1] \"a b\" prefix=[0,0])\n  (path [1,1] \"b\"))"
    );
}

#[test]
fn test_sexpr_used_marker() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"a b", &arena);
    let paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(2, 1), &arena);
    paths.get(0, 1).unwrap().mark_used();

    let mut formatter = LatticeFormatter::new();
    formatter.visit_path(paths.get(0, 1).unwrap());
    assert_eq!(formatter.finish(), "(path [0,1] \"a b\" prefix=[0,0] used)");
}

#[test]
fn test_sexpr_with_matrix() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"a b c", &arena);
    let paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(2, 1), &arena);

    assert_snapshot!(LatticeFormatter::new().with_matrix().format(&paths), @r#"
    (lattice len=3 max=2
      (blank)
      (path [0,0] "a")
      (path [0,1] "a b" prefix=[0,0])
      (path [1,1] "b")
      (path [1,2] "b c" prefix=[1,1])
      (path [2,2] "c")
      (matrix
        (row 0 [0,0] [0,1])
        (row 1 [1,1] [1,2])
        (row 2 [2,2] -)))
    "#);
}

#[test]
fn test_sexpr_after_pruning() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"the house .", &arena);
    let mut paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(3, 1), &arena);
    paths.get(0, 1).unwrap().mark_used();
    paths.get(2, 0).unwrap().mark_used();
    paths.prune_unused();

    // Pruned paths are gone from the list but still sit in the matrix.
    assert_snapshot!(LatticeFormatter::new().with_matrix().format(&paths), @r#"
    (lattice len=3 max=3
      (blank)
      (path [0,1] "the house" prefix=[0,0] used)
      (path [2,2] "." used)
      (matrix
        (row 0 [0,0] [0,1] [0,2])
        (row 1 [1,1] [1,2] -)
        (row 2 [2,2] - -)))
    "#);
}

#[test]
fn test_sexpr_empty_sentence() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"", &arena);
    let paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::default(), &arena);

    assert_eq!(
        LatticeFormatter::new().with_matrix().format(&paths),
        "(lattice len=0 max=0\n  (blank)\n  (matrix))"
    );
}
