use test_matrix::core::env::EnvironmentMap;
use test_matrix::core::models::MatrixError;
use test_matrix::core::substitute::substitute_vars;

fn env() -> EnvironmentMap {
    [
        ("X", "hello world"),
        ("FEATURES", "foo bar"),
        ("CARGO_TARGET_DIR", "target/stable-0"),
        ("EMPTY", ""),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn test_plain_reference() {
    assert_eq!(substitute_vars("echo $X", &env()).unwrap(), "echo hello world");
}

#[test]
fn test_braced_reference() {
    assert_eq!(
        substitute_vars("ls ${CARGO_TARGET_DIR}/debug", &env()).unwrap(),
        "ls target/stable-0/debug"
    );
    assert_eq!(
        substitute_vars("echo ${X} done", &env()).unwrap(),
        "echo hello world done"
    );
}

#[test]
fn test_several_references_and_empty_value() {
    assert_eq!(
        substitute_vars("cargo test --features \"$FEATURES\"$EMPTY", &env()).unwrap(),
        "cargo test --features \"foo bar\""
    );
}

#[test]
fn test_name_extends_as_far_as_possible() {
    let err = substitute_vars("echo $X_SUFFIX", &env()).unwrap_err();
    assert_eq!(
        err,
        MatrixError::UndefinedVariable {
            name: "X_SUFFIX".to_string(),
            step: "echo $X_SUFFIX".to_string(),
        }
    );
}

#[test]
fn test_undefined_variable_is_an_error() {
    let err = substitute_vars("echo $UNSET", &env()).unwrap_err();
    assert!(matches!(err, MatrixError::UndefinedVariable { ref name, .. } if name == "UNSET"));

    assert!(substitute_vars("echo ${UNSET}", &env()).is_err());
}

#[test]
fn test_double_dollar_is_a_literal_dollar() {
    assert_eq!(substitute_vars("echo $$X", &env()).unwrap(), "echo $X");
    assert_eq!(substitute_vars("echo $$$X", &env()).unwrap(), "echo $hello world");
}

#[test]
fn test_lone_dollar_is_kept() {
    assert_eq!(substitute_vars("echo $ cost", &env()).unwrap(), "echo $ cost");
    assert_eq!(substitute_vars("echo 5$", &env()).unwrap(), "echo 5$");
    assert_eq!(substitute_vars("echo ${not-a-name}", &env()).unwrap(), "echo ${not-a-name}");
}

#[test]
fn test_no_references_is_unchanged() {
    assert_eq!(
        substitute_vars("cargo build --verbose", &env()).unwrap(),
        "cargo build --verbose"
    );
}
