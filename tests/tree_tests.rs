use calltree::{serialize, Arguments, Node, QueryTree, Value};
use std::thread;

fn address(image: &str) -> Arguments {
    Arguments::from([("address".to_string(), Value::from(image))])
}

#[test]
fn test_select_appends_one_node() {
    let root = QueryTree::new();
    let container = root.select("container");
    let from = container.select_with("from", address("alpine"));

    assert_eq!(root.len(), 0);
    assert_eq!(container.len(), 1);
    assert_eq!(from.len(), 2);
    assert_eq!(from.leaf(), Some(&Node::new("from", address("alpine"))));
}

#[test]
fn test_nodes_are_in_call_order() {
    let tree = QueryTree::new()
        .select("container")
        .select_with("from", address("alpine"))
        .select("stdout");

    let operations: Vec<&str> = tree.nodes().iter().map(|n| n.operation.as_str()).collect();
    assert_eq!(operations, vec!["container", "from", "stdout"]);
}

#[test]
fn test_caller_is_not_mutated() {
    let base = QueryTree::new().select("container");
    let before = base.clone();

    let _ = base.select("stdout");
    let _ = base.select_with("from", address("ubuntu"));

    assert_eq!(base, before);
    assert_eq!(base.len(), 1);
    assert_eq!(base.leaf().unwrap().operation, "container");
}

#[test]
fn test_divergent_branches_share_prefix() {
    let base = QueryTree::new().select("container");
    let alpine = base.select_with("from", address("alpine"));
    let ubuntu = base.select_with("from", address("ubuntu"));

    assert_eq!(alpine.nodes()[0], ubuntu.nodes()[0]);
    assert_ne!(alpine, ubuntu);
    assert_eq!(alpine.leaf().unwrap().args["address"], Value::from("alpine"));
    assert_eq!(ubuntu.leaf().unwrap().args["address"], Value::from("ubuntu"));
}

#[test]
fn test_branches_render_on_other_threads() {
    let base = QueryTree::new().select("container").select_with("from", address("alpine"));

    let handles: Vec<_> = ["stdout", "stderr", "exitCode"]
        .into_iter()
        .map(|leaf| {
            let branch = base.clone();
            thread::spawn(move || serialize(&branch.select(leaf)).unwrap())
        })
        .collect();

    let queries: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        queries,
        vec![
            r#"{container{from(address:"alpine"){stdout}}}"#,
            r#"{container{from(address:"alpine"){stderr}}}"#,
            r#"{container{from(address:"alpine"){exitCode}}}"#,
        ]
    );
}

#[test]
fn test_million_call_chain_renders_and_drops() {
    const CALLS: usize = 1_000_000;

    let mut tree = QueryTree::new();
    for _ in 0..CALLS {
        tree = tree.select("withWorkdir");
    }
    assert_eq!(tree.len(), CALLS);

    let query = serialize(&tree).unwrap();
    assert_eq!(query.len(), CALLS * "{withWorkdir}".len());
    assert!(query.starts_with("{withWorkdir{withWorkdir"));

    drop(tree);
}

#[test]
fn test_long_branch_drops_without_touching_base() {
    let base = QueryTree::new().select("container").select_with("from", address("alpine"));

    let mut branch = base.clone();
    for _ in 0..200_000 {
        branch = branch.select("withWorkdir");
    }
    drop(branch);

    assert_eq!(
        serialize(&base.select("stdout")).unwrap(),
        r#"{container{from(address:"alpine"){stdout}}}"#
    );
}
