use calltree::cli::{execute_flatten, execute_render, CliError, FlattenOptions, RenderOptions};
use calltree::QueryError;
use serde_json::json;

fn render(input: &str) -> Result<String, CliError> {
    execute_render(&RenderOptions {
        input: Some(input.to_string()),
    })
}

fn flatten(input: &str, envelope: bool) -> Result<serde_json::Value, CliError> {
    execute_flatten(&FlattenOptions {
        input: Some(input.to_string()),
        envelope,
    })
}

#[test]
fn test_render_chain() {
    let chain = r#"[
        {"operation": "container"},
        {"operation": "from", "args": {"address": "alpine"}},
        {"operation": "exec", "args": {"args": ["apk", "add", "curl"]}},
        {"operation": "stdout", "args": null}
    ]"#;

    assert_eq!(
        render(chain).unwrap(),
        r#"{container{from(address:"alpine"){exec(args:["apk","add","curl"]){stdout}}}}"#
    );
}

#[test]
fn test_render_keeps_argument_order() {
    let chain = r#"[{"operation": "withEnvVariable", "args": {"value": "1", "name": "DEBUG"}}]"#;
    assert_eq!(render(chain).unwrap(), r#"{withEnvVariable(value:"1",name:"DEBUG")}"#);
}

#[test]
fn test_render_rejects_bad_chains() {
    assert!(matches!(render(r#"{"operation": "container"}"#), Err(CliError::InvalidChain(_))));
    assert!(matches!(render(r#"[42]"#), Err(CliError::InvalidChain(_))));
    assert!(matches!(render(r#"[{"args": {}}]"#), Err(CliError::InvalidChain(_))));
    assert!(matches!(
        render(r#"[{"operation": "from", "args": ["alpine"]}]"#),
        Err(CliError::InvalidChain(_))
    ));
    assert!(matches!(render("[not json"), Err(CliError::Json(_))));
    assert!(matches!(
        render("[]"),
        Err(CliError::Query(QueryError::InvalidArgument(_)))
    ));
}

#[test]
fn test_missing_input() {
    assert!(matches!(
        execute_render(&RenderOptions::default()),
        Err(CliError::NoInput)
    ));
    assert!(matches!(
        execute_flatten(&FlattenOptions::default()),
        Err(CliError::NoInput)
    ));
}

#[test]
fn test_flatten_response() {
    let input = r#"{"container": {"from": {"exec": {"stdout": {"contents": "ok"}}}}}"#;
    assert_eq!(flatten(input, false).unwrap(), json!({"contents": "ok"}));
}

#[test]
fn test_flatten_envelope() {
    let ok = r#"{"data": {"container": {"exitCode": 0}}}"#;
    assert_eq!(flatten(ok, true).unwrap(), json!({"exitCode": 0}));

    let failed = r#"{"data": null, "errors": [{"message": "no such image"}]}"#;
    match flatten(failed, true) {
        Err(CliError::Query(QueryError::Engine(messages))) => {
            assert_eq!(messages, vec!["no such image".to_string()])
        }
        other => panic!("expected engine error, got {:?}", other),
    }
}

#[test]
fn test_error_display() {
    let err = render("[]").unwrap_err();
    assert!(err.to_string().starts_with("Invalid argument"));
    assert_eq!(
        CliError::NoInput.to_string(),
        "No input provided. Use --input or pipe JSON to stdin."
    );
}
