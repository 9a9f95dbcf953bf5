// Integration tests for revmatch
use revmatch::prelude::*;
use revmatch::{ConstraintContext, SearchObserver, ScoreTable};
use serde_json::json;
use std::path::{Path, PathBuf};

fn write_json(dir: &Path, name: &str, value: serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
    path
}

fn papers_json() -> serde_json::Value {
    json!([
        {
            "title": "Learned sparse retrieval",
            "contact": "Alice Martin",
            "email": "alice@uni-x.org",
            "authors": ["Alice Martin"],
            "institutions": ["Uni X"],
            "countries": ["FR"],
            "abstract": "Sparse lexical representations learned for first-stage retrieval."
        },
        {
            "title": "Graph neural networks for molecules",
            "contact": "Bob Stone",
            "email": "bob@uni-y.org",
            "authors": ["Bob Stone"],
            "institutions": ["Uni Y"],
            "countries": ["DE"],
            "abstract": "Message passing networks predicting molecular properties."
        },
        {
            "title": "Speech recognition at low resource",
            "authors": ["Erin Kay"],
            "institutions": ["Uni Z"],
            "abstract": "Acoustic models for languages with little transcribed speech."
        }
    ])
}

fn reviewers_json() -> serde_json::Value {
    json!([
        { "full_name": "Alice Martin", "institution": "Uni X", "country": "FR",
          "categories": ["information retrieval", "ranking"] },
        { "full_name": "Bob Stone", "institution": "Uni Y", "country": "DE",
          "categories": ["graph learning", "chemistry"] },
        { "full_name": "Carol-Ann Diaz", "institution": "Uni W", "country": "ES",
          "categories": ["retrieval", "search engines"] },
        { "full_name": "Dave Lee", "institution": "Uni V", "country": "US",
          "categories": ["molecules", "graph neural networks"] },
        { "full_name": "Frank Ode", "institution": "Uni U", "country": "NG",
          "categories": ["speech", "acoustic models"] }
    ])
}

#[test]
fn test_match_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let papers = write_json(dir.path(), "papers.json", papers_json());
    let reviewers = write_json(dir.path(), "reviewers.json", reviewers_json());

    let config = RunConfig {
        matcher: MatcherConfig::new(1),
        encoder: EncoderConfig::default(),
    };
    let encoders = EncoderCache::new();
    let matching = match_files(&config, &papers, &reviewers, &encoders).unwrap();

    let map = matching.assignment.to_map();
    assert_eq!(map.len(), 3);
    for reviewers in map.values() {
        assert_eq!(reviewers.len(), 1);
    }
    assert_ne!(map["Learned sparse retrieval"], vec!["Alice Martin"]);
    assert_ne!(map["Graph neural networks for molecules"], vec!["Bob Stone"]);
    assert_eq!(encoders.len(), 1);
}

#[test]
fn test_report_serializes_assignment_as_map() {
    let dir = tempfile::tempdir().unwrap();
    let papers = write_json(dir.path(), "papers.json", papers_json());
    let reviewers = write_json(dir.path(), "reviewers.json", reviewers_json());

    let config = RunConfig {
        matcher: MatcherConfig::new(2).with_max_reviewer_load(2),
        encoder: EncoderConfig::default(),
    };
    let matching = match_files(&config, &papers, &reviewers, &EncoderCache::new()).unwrap();
    let report = serde_json::to_value(&matching).unwrap();

    assert!(report["score"].is_number());
    assert!(report["stats"]["expanded"].as_u64().unwrap() >= 3);
    let assignment = report["assignment"].as_object().unwrap();
    assert_eq!(assignment.len(), 3);
    for reviewers in assignment.values() {
        assert_eq!(reviewers.as_array().unwrap().len(), 2);
    }
}

#[test]
fn test_unknown_constraint_rejected_before_loading() {
    let config = RunConfig {
        matcher: MatcherConfig::new(1).with_constraints(["reviewers_are_friends"]),
        encoder: EncoderConfig::default(),
    };
    // The files do not exist; the name check must fire first
    let err = match_files(
        &config,
        "/nonexistent/papers.json",
        "/nonexistent/reviewers.json",
        &EncoderCache::new(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::UnknownConstraint(ref name) if name == "reviewers_are_friends"));
}

#[test]
fn test_unknown_encoder_model() {
    let dir = tempfile::tempdir().unwrap();
    let papers = write_json(dir.path(), "papers.json", papers_json());
    let reviewers = write_json(dir.path(), "reviewers.json", reviewers_json());

    let config = RunConfig {
        matcher: MatcherConfig::new(1),
        encoder: EncoderConfig {
            model: "no-such-model".to_string(),
            dimension: 16,
        },
    };
    let err = match_files(&config, &papers, &reviewers, &EncoderCache::new()).unwrap_err();
    assert!(matches!(err, Error::Encoder(_)));
}

#[test]
fn test_duplicate_reviewer_after_normalization() {
    let dir = tempfile::tempdir().unwrap();
    let papers = write_json(dir.path(), "papers.json", papers_json());
    let reviewers = write_json(
        dir.path(),
        "reviewers.json",
        json!([
            { "full_name": "Carol-Ann Diaz", "categories": ["retrieval"] },
            { "full_name": "Carol Ann  Diaz", "categories": ["search"] }
        ]),
    );

    let err = match_files(&RunConfig::default(), &papers, &reviewers, &EncoderCache::new())
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateId { kind: "reviewer", .. }));
}

#[test]
fn test_infeasible_run() {
    let dir = tempfile::tempdir().unwrap();
    let papers = write_json(dir.path(), "papers.json", papers_json());
    let reviewers = write_json(dir.path(), "reviewers.json", reviewers_json());

    // Three papers with two reviewers each need six slots; five reviewers at load one cannot fill them
    let config = RunConfig {
        matcher: MatcherConfig::new(2).with_max_reviewer_load(1),
        encoder: EncoderConfig::default(),
    };
    let err = match_files(&config, &papers, &reviewers, &EncoderCache::new()).unwrap_err();
    assert!(err.is_infeasible());
}

#[test]
fn test_run_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(
        dir.path(),
        "config.json",
        json!({
            "reviewers_per_paper": 3,
            "constraints": ["unique_reviewers", "reviewer_not_author"],
            "aggregation": "mean",
            "encoder": { "dimension": 128 }
        }),
    );

    let config = RunConfig::from_file(&path).unwrap();
    assert_eq!(config.matcher.reviewers_per_paper, 3);
    assert_eq!(config.matcher.constraints.len(), 2);
    assert_eq!(config.matcher.aggregation, ProfileAggregation::Mean);
    assert_eq!(config.matcher.max_reviewer_load, None);
    assert_eq!(config.encoder.model, "hashing");
    assert_eq!(config.encoder.dimension, 128);
}

#[test]
fn test_closure_scorer_through_free_function() {
    let papers = build_papers(
        vec![
            PaperRecord {
                title: "P1".to_string(),
                authors: ["Alice".to_string()].into_iter().collect(),
                institutions: ["X".to_string()].into_iter().collect(),
                ..Default::default()
            },
            PaperRecord {
                title: "P2".to_string(),
                authors: ["Bob".to_string()].into_iter().collect(),
                institutions: ["Y".to_string()].into_iter().collect(),
                ..Default::default()
            },
        ],
        &HashingEncoder::new(8),
    )
    .unwrap();
    let reviewers = build_reviewers(
        [("Alice", "X"), ("Bob", "Y"), ("Carol", "Z"), ("Dave", "W")]
            .into_iter()
            .map(|(name, institution)| ReviewerRecord {
                full_name: name.to_string(),
                institution: institution.to_string(),
                ..Default::default()
            })
            .collect(),
        &HashingEncoder::new(8),
    )
    .unwrap();

    let registry = ConstraintRegistry::new();
    let ctx = ConstraintContext::new(&papers, &reviewers, 1);
    let constraints = registry
        .resolve(
            &[
                "reviewer_not_author",
                "reviewers_not_authors_institutions",
                "unique_reviewers",
                "reviewer_underload",
            ],
            ctx,
        )
        .unwrap();

    let scorer = |p: &Paper, r: &Reviewer| -> f64 {
        match (p.title.as_str(), r.full_name.as_str()) {
            ("P1", "Bob") => 0.9,
            ("P1", "Carol") => 0.5,
            ("P1", "Dave") => 0.3,
            ("P2", "Alice") => 0.4,
            ("P2", "Carol") => 0.8,
            ("P2", "Dave") => 0.2,
            _ => 1.0,
        }
    };

    let matching = match_by_branch_and_bound(&papers, &reviewers, &constraints, 1, &scorer).unwrap();
    assert!((matching.score - 1.7).abs() < 1e-9);
    assert_eq!(matching.assignment.reviewers_of("P1"), vec!["Bob"]);
    assert_eq!(matching.assignment.reviewers_of("P2"), vec!["Carol"]);
}

struct CountingObserver {
    popped: usize,
    complete: usize,
    papers: usize,
}

impl SearchObserver for CountingObserver {
    fn node_popped(&mut self, assignment: &Assignment, _score: f64, _priority: f64) {
        self.popped += 1;
        if assignment.len() == self.papers {
            self.complete += 1;
        }
    }
}

#[test]
fn test_search_stops_at_first_complete_node() {
    let encoder = HashingEncoder::new(16);
    let papers = build_papers(
        (0..4)
            .map(|i| PaperRecord {
                title: format!("Paper {}", i),
                ..Default::default()
            })
            .collect(),
        &encoder,
    )
    .unwrap();
    let reviewers = build_reviewers(
        (0..5)
            .map(|i| ReviewerRecord {
                full_name: format!("Reviewer {}", i),
                institution: format!("Inst {}", i),
                ..Default::default()
            })
            .collect(),
        &encoder,
    )
    .unwrap();

    let rows = (0..4)
        .map(|p| (0..5).map(|r| ((p * 7 + r * 3) % 10) as f64 / 10.0).collect())
        .collect();
    let table = ScoreTable::from_rows(rows).unwrap();

    let matcher = Matcher::new(
        MatcherConfig::new(2),
        &papers,
        &reviewers,
        &ConstraintRegistry::new(),
    )
    .unwrap();
    let mut observer = CountingObserver {
        popped: 0,
        complete: 0,
        papers: 4,
    };
    let matching = matcher.solve_table(&table, &mut observer).unwrap();

    assert_eq!(observer.complete, 1);
    assert_eq!(observer.popped as u64, matching.stats.expanded + 1);
    assert!(matching.stats.max_frontier >= 1);
}
