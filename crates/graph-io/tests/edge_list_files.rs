//! File-level import and export tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use graphkit::{Graph, GraphConfig};
use graphkit_io::{EdgeListFormat, Error, export_graph, import_graph};
use std::fs;
use tempfile::TempDir;

fn sample() -> Graph<String> {
    let mut graph = Graph::new(GraphConfig::undirected().weighted(true));
    for (u, v, w) in [
        ("a", "b", 2.0),
        ("a", "c", 3.0),
        ("b", "c", 1.0),
        ("b", "e", 4.0),
        ("c", "d", 2.5),
    ] {
        graph
            .add_weighted_edge(u.to_string(), v.to_string(), w)
            .unwrap();
    }
    graph
}

#[test]
fn test_export_then_import_preserves_graph() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("graph.txt");
    let format = EdgeListFormat::default();
    let graph = sample();

    export_graph(&graph, &path, &format).unwrap();
    let imported: Graph<String> = import_graph(&path, &format, graph.config()).unwrap();

    assert_eq!(imported, graph);
    assert_eq!(imported.total_weight().unwrap(), 12.5);
}

#[test]
fn test_export_import_export_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let first = tmp.path().join("first.csv");
    let second = tmp.path().join("second.csv");
    let format = EdgeListFormat::new(',');

    export_graph(&sample(), &first, &format).unwrap();
    let imported: Graph<String> =
        import_graph(&first, &format, GraphConfig::undirected().weighted(true)).unwrap();
    export_graph(&imported, &second, &format).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_import_honours_requested_config() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("edges.txt");
    fs::write(&path, "# dependencies\n1 2\n2 3\n3 1\n").unwrap();

    let directed: Graph<u32> =
        import_graph(&path, &EdgeListFormat::default(), GraphConfig::directed()).unwrap();
    assert!(directed.is_directed());
    assert!(directed.is_strongly_connected().unwrap());
    assert!(!directed.has_edge(&2, &1));

    let undirected: Graph<u32> =
        import_graph(&path, &EdgeListFormat::default(), GraphConfig::undirected()).unwrap();
    assert!(undirected.has_edge(&2, &1));
    assert!(undirected.is_connected().unwrap());
}

#[test]
fn test_import_missing_file_reports_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("absent.txt");

    let err = import_graph::<String>(&path, &EdgeListFormat::default(), GraphConfig::default())
        .unwrap_err();
    match err {
        Error::Io {
            path: Some(reported),
            operation,
            ..
        } => {
            assert_eq!(&*reported, path.as_path());
            assert_eq!(operation, "read");
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn test_import_parse_error_reports_line() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.txt");
    fs::write(&path, "a b 1\n\nb c\n").unwrap();

    let err = import_graph::<String>(
        &path,
        &EdgeListFormat::default(),
        GraphConfig::undirected().weighted(true),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Parse { line: 3, .. }));
}

#[test]
fn test_export_overwrites_existing_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("graph.txt");
    fs::write(&path, "stale content that is longer than the export\n").unwrap();

    let mut graph = Graph::directed();
    graph.add_edge("x".to_string(), "y".to_string());
    export_graph(&graph, &path, &EdgeListFormat::default()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "x y\n");
}
