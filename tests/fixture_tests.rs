//! Tests driven by the JSON fixture in tests/data

use std::path::PathBuf;

use ferro_interface::{
    InteractionQuery, InterfaceError, MockProvider, ProteinProvider, QueryScope, Range,
    ResultQuality, StructureSource,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("interaction_fixture.json")
}

fn load() -> MockProvider {
    MockProvider::from_json(&fixture_path()).unwrap()
}

#[test]
fn test_fixture_loads() {
    let provider = load();
    assert_eq!(provider.genes().len(), 1);
    assert_eq!(provider.genes()[0].coding_length(), 30);
    assert_eq!(provider.get_protein("Q00001").unwrap().sequence, "MKVLAWHCDE");
    assert!(provider.has_interaction("Q00001", "Q00002"));
    assert_eq!(provider.get_structure("4abc").unwrap().chains.len(), 2);
}

#[test]
fn test_fixture_query() {
    let provider = load();
    let mut scope = QueryScope::new(&provider, &provider);
    for gene in provider.genes() {
        scope.add_gene(gene.clone());
    }

    let report = scope
        .run(&InteractionQuery::new("chr3", 500, 511, "Q00001", "Q00002"))
        .unwrap();

    let pos = &report.positions_a[0];
    assert_eq!((pos.start(), pos.end()), (1, 4));
    assert_eq!(
        pos.structure_residues("4abc").unwrap().iter().collect::<Vec<_>>(),
        vec!["1:A", "2:A", "3:A", "4:A"]
    );
    assert_eq!(report.quality_a, ResultQuality::HasInterface);
    assert_eq!(report.quality_b, ResultQuality::HasStructure);
    assert_eq!(
        report.interface_ranges.get_ranges("chr3").unwrap().iter().collect::<Vec<_>>(),
        vec![&Range::new(506, 508)]
    );
}

#[test]
fn test_fixture_report_serializes() {
    let provider = load();
    let mut scope = QueryScope::new(&provider, &provider);
    for gene in provider.genes() {
        scope.add_gene(gene.clone());
    }
    let report = scope
        .run(&InteractionQuery::new("chr3", 500, 511, "Q00001", "Q00002"))
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"quality_a\":\"has-interface\""));
}

#[test]
fn test_missing_fixture_file() {
    let err = MockProvider::from_json(&fixture_path().with_file_name("missing.json")).unwrap_err();
    assert!(matches!(err, InterfaceError::Io { .. }));
}
