use scopemap::{build_cooccurrence_graph, compare, compare_edges, vocabulary, ConceptLabel, DocumentConceptSet};
use std::collections::BTreeSet;

fn set(items: &[&str]) -> BTreeSet<ConceptLabel> {
    items.iter().map(|s| ConceptLabel::from(*s)).collect()
}

fn names(labels: &[ConceptLabel]) -> Vec<&str> {
    labels.iter().map(|l| l.as_str()).collect()
}

fn samples() -> Vec<BTreeSet<ConceptLabel>> {
    vec![
        set(&[]),
        set(&["a"]),
        set(&["a", "b", "c"]),
        set(&["b", "c", "d"]),
        set(&["x", "y"]),
        set(&["a", "b", "c", "d", "e", "f"]),
    ]
}

#[test]
fn test_vocabulary_overlap_scenario() {
    let result = compare(&set(&["a", "b", "c"]), &set(&["b", "c", "d"]));

    assert_eq!(result.jaccard, 0.5);
    assert_eq!(names(&result.common), vec!["b", "c"]);
    assert_eq!(names(&result.exclusive_to_1), vec!["a"]);
    assert_eq!(names(&result.exclusive_to_2), vec!["d"]);
}

#[test]
fn test_jaccard_bounds_and_symmetry() {
    let samples = samples();
    for a in &samples {
        for b in &samples {
            let ab = compare(a, b);
            let ba = compare(b, a);
            assert!((0.0..=1.0).contains(&ab.jaccard));
            assert_eq!(ab.jaccard, ba.jaccard);
            assert_eq!(ab.common, ba.common);
            assert_eq!(ab.exclusive_to_1, ba.exclusive_to_2);
        }
        if !a.is_empty() {
            assert_eq!(compare(a, a).jaccard, 1.0);
        }
    }
}

#[test]
fn test_set_difference_completeness() {
    let samples = samples();
    for a in &samples {
        for b in &samples {
            let result = compare(a, b);
            let common: BTreeSet<_> = result.common.iter().cloned().collect();
            let only_1: BTreeSet<_> = result.exclusive_to_1.iter().cloned().collect();
            let only_2: BTreeSet<_> = result.exclusive_to_2.iter().cloned().collect();

            assert!(common.is_disjoint(&only_1));
            assert!(common.is_disjoint(&only_2));
            assert!(only_1.is_disjoint(&only_2));

            let recovered: BTreeSet<_> = common.union(&only_1).chain(only_2.iter()).cloned().collect();
            let expected: BTreeSet<_> = a.union(b).cloned().collect();
            assert_eq!(recovered, expected);
            assert_eq!((result.size_1, result.size_2), (a.len(), b.len()));
        }
    }
}

#[test]
fn test_output_is_sorted() {
    let result = compare(&set(&["zeta", "alpha", "mu", "beta"]), &set(&["mu", "omega", "alpha"]));
    assert_eq!(names(&result.common), vec!["alpha", "mu"]);
    assert_eq!(names(&result.exclusive_to_1), vec!["beta", "zeta"]);
    assert_eq!(names(&result.exclusive_to_2), vec!["omega"]);
}

#[test]
fn test_snapshot_comparison() {
    let period_1: Vec<DocumentConceptSet> = vec![
        ["Ecology", "Biodiversity"].into_iter().collect(),
        ["Ecology", "Conservation"].into_iter().collect(),
    ];
    let period_2: Vec<DocumentConceptSet> = vec![
        ["Ecology", "Biodiversity", "Remote sensing"].into_iter().collect(),
        ["Remote sensing", "Machine learning"].into_iter().collect(),
    ];

    let vocabularies = compare(&vocabulary(&period_1), &vocabulary(&period_2));
    assert_eq!(names(&vocabularies.common), vec!["Biodiversity", "Ecology"]);
    assert_eq!(names(&vocabularies.exclusive_to_1), vec!["Conservation"]);
    assert_eq!(names(&vocabularies.exclusive_to_2), vec!["Machine learning", "Remote sensing"]);
    assert_eq!(vocabularies.jaccard, 2.0 / 5.0);

    let g1 = build_cooccurrence_graph(&period_1, 1);
    let g2 = build_cooccurrence_graph(&period_2, 1);
    let edges = compare_edges(&g1, &g2);

    // {E-B, E-C} vs {E-B, B-R, E-R, R-M}
    assert_eq!(edges.common.len(), 1);
    assert_eq!(edges.common[0].source.as_str(), "Biodiversity");
    assert_eq!(edges.common[0].target.as_str(), "Ecology");
    assert_eq!(edges.exclusive_to_1.len(), 1);
    assert_eq!(edges.exclusive_to_2.len(), 3);
    assert_eq!((edges.size_1, edges.size_2), (2, 4));
    assert_eq!(edges.jaccard, 1.0 / 5.0);
}
