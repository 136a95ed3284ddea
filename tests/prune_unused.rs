use bumpalo::Bump;
use span_lattice::Span;
use span_lattice::config::DecodeConfig;
use span_lattice::lattice::InputPaths;
use span_lattice::phrase::Sentence;

#[test]
fn nothing_used_prunes_everything() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"a b c d", &arena);
    let mut paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(3, 1), &arena);

    let total = paths.len();
    assert_eq!(paths.prune_unused(), total);
    assert!(paths.is_empty());
    assert_eq!(paths.num_used(), 0);
}

#[test]
fn everything_used_keeps_order() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"a b c d", &arena);
    let mut paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(3, 1), &arena);

    let before: Vec<Span> = paths.iter().map(|p| p.span()).collect();
    for path in &paths {
        assert!(path.mark_used());
    }
    assert_eq!(paths.prune_unused(), 0);
    let after: Vec<Span> = paths.iter().map(|p| p.span()).collect();
    assert_eq!(before, after);
}

#[test]
fn keeps_used_paths_in_relative_order() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"a b c", &arena);
    let mut paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(3, 1), &arena);

    paths.get(2, 0).unwrap().mark_used();
    paths.get(0, 2).unwrap().mark_used();
    paths.get(1, 0).unwrap().mark_used();

    assert_eq!(paths.prune_unused(), 3);
    assert_eq!(
        paths.iter().map(|p| p.span()).collect::<Vec<_>>(),
        vec![Span::new(0, 2), Span::new(1, 1), Span::new(2, 2)]
    );
    assert_eq!(paths.num_used(), 3);
}

#[test]
fn index_still_reaches_pruned_paths() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"a b c", &arena);
    let mut paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(2, 1), &arena);

    paths.get(0, 1).unwrap().mark_used();
    paths.prune_unused();
    assert_eq!(paths.len(), 1);

    // Pruned paths stay allocated; their cells and prefix links still resolve.
    let pruned = paths.get(1, 1).unwrap();
    assert!(!pruned.is_used());
    assert_eq!(pruned.span(), Span::new(1, 2));
    assert_eq!(pruned.sub_phrase().to_string(), "b c");

    let kept = paths.paths()[0];
    let prefix = kept.prefix().unwrap();
    assert!(!prefix.is_used());
    assert_eq!(prefix.span(), Span::new(0, 0));
}

#[test]
fn pruning_twice_is_a_no_op() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"a b c d e", &arena);
    let mut paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(2, 1), &arena);

    for path in &paths {
        if path.span().start % 2 == 0 {
            path.mark_used();
        }
    }
    let removed = paths.prune_unused();
    assert!(removed > 0);
    assert_eq!(paths.prune_unused(), 0);
}

#[test]
fn summary_after_pruning() {
    let arena = Bump::new();
    let sentence = Sentence::new(b"a b c", &arena);
    let mut paths: InputPaths = InputPaths::build(&sentence, &DecodeConfig::new(2, 1), &arena);

    paths.get(1, 0).unwrap().mark_used();
    paths.prune_unused();

    let summary = paths.summary();
    assert_eq!(summary.sentence_len, 3);
    assert_eq!(summary.max_span_length, 2);
    assert_eq!(summary.num_paths, 1);
    assert_eq!(summary.used, vec![Span::new(1, 1)]);
}
