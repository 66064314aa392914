//! End-to-end expansion tests.

use std::path::PathBuf;

use stencil::engine::{EnvScope, ExpandError, PlaceholderError, ResolveError};
use stencil::{layers, Expander, MapEnv, VariableLayer};

fn expand_with(template: &str, inline: VariableLayer, env: &MapEnv) -> Result<String, ExpandError> {
    Expander::builder()
        .template(template)
        .inline_layer(inline)
        .env(env)
        .build()
        .expand()
        .map(|expansion| expansion.text)
}

fn expand(template: &str, inline: VariableLayer) -> Result<String, ExpandError> {
    expand_with(template, inline, &MapEnv::new())
}

// =============================================================================
// Basics
// =============================================================================

#[test]
fn literal_only_template_is_identity() {
    let out = expand("no placeholders here", layers! {}).unwrap();
    assert_eq!(out, "no placeholders here");
}

#[test]
fn simple_variable_substitution() {
    let out = expand("Hello {{ var.Name }}!", layers! { "Name" => "ada" }).unwrap();
    assert_eq!(out, "Hello ada!");
}

#[test]
fn filtered_substitution() {
    let out = expand("Hello {{ var.Name | upper }}!", layers! { "Name" => "ada" }).unwrap();
    assert_eq!(out, "Hello ADA!");
}

#[test]
fn multiple_placeholders_left_to_right() {
    let out = expand(
        "{{ var.A }}-{{ var.B }}-{{ var.A }}",
        layers! { "A" => "1", "B" => "2" },
    )
    .unwrap();
    assert_eq!(out, "1-2-1");
}

#[test]
fn filter_names_are_case_insensitive() {
    let out = expand("{{ var.X | UPPER }}", layers! { "X" => "a" }).unwrap();
    assert_eq!(out, "A");
}

#[test]
fn escaped_delimiters_stay_literal() {
    let out = expand(r"a \{{ b \}} c", layers! {}).unwrap();
    assert_eq!(out, "a {{ b }} c");

    let out = expand(r"a {\{ b }\} c", layers! {}).unwrap();
    assert_eq!(out, "a {{ b }} c");
}

// =============================================================================
// Layer precedence
// =============================================================================

#[test]
fn inline_overrides_programmatic_overrides_file() {
    let env = MapEnv::new();
    let out = Expander::builder()
        .template("{{ var.A }} {{ var.B }} {{ var.C }}")
        .file_layer(layers! { "A" => "file", "B" => "file", "C" => "file" })
        .programmatic_layer(layers! { "B" => "prog", "C" => "prog" })
        .inline_layer(layers! { "C" => "inline" })
        .env(&env)
        .build()
        .expand()
        .unwrap();
    assert_eq!(out.text, "file prog inline");
}

// =============================================================================
// Environment heads
// =============================================================================

#[test]
fn env_head_resolves_through_tiers() {
    let mut env = MapEnv::new();
    env.set(EnvScope::Process, "JAVA_HOME", "");
    env.set(EnvScope::Machine, "JAVA_HOME", r"C:\java");

    let out = expand_with("{{ env.JAVA_HOME | pathlinux }}", layers! {}, &env).unwrap();
    assert_eq!(out, "/c/java");
}

#[test]
fn undefined_env_is_fatal_even_with_default() {
    // `default:` rescues defined-but-empty values, never undefined ones.
    let env = MapEnv::new();
    let err = expand_with(r#"{{ env.MISSING_VAR | default:"fb" }}"#, layers! {}, &env).unwrap_err();
    match err {
        ExpandError::Placeholder { source, .. } => {
            assert!(matches!(
                source,
                PlaceholderError::Resolve(ResolveError::UndefinedEnv { .. })
            ));
        }
        ExpandError::Scan(_) => panic!("expected a placeholder error"),
    }
}

#[test]
fn default_rescues_defined_but_empty_variable() {
    let out = expand(r#"{{ var.X | default:"fb" }}"#, layers! { "X" => "" }).unwrap();
    assert_eq!(out, "fb");
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn undefined_variable_aborts_the_run() {
    let err = expand("ok {{ var.Missing }}", layers! {}).unwrap_err();
    match err {
        ExpandError::Placeholder { raw, offset, source } => {
            assert_eq!(raw, " var.Missing ");
            assert_eq!(offset, 3);
            assert!(matches!(
                source,
                PlaceholderError::Resolve(ResolveError::UndefinedVariable { name }) if name == "Missing"
            ));
        }
        ExpandError::Scan(_) => panic!("expected a placeholder error"),
    }
}

#[test]
fn unknown_filter_reports_suggestions() {
    let err = expand("{{ var.X | uper }}", layers! { "X" => "a" }).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("unknown filter 'uper'"));
    assert!(msg.contains("upper"));
}

#[test]
fn parse_error_is_wrapped_with_location() {
    let err = expand("{{ bogus }}", layers! {}).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("at byte offset 0"));
}

#[test]
fn unclosed_placeholder_is_a_scan_error() {
    let err = expand("text {{ var.X", layers! { "X" => "a" }).unwrap_err();
    assert!(matches!(err, ExpandError::Scan(_)));
}

#[test]
fn binary_result_is_rejected() {
    let err = expand("{{ var.X | gzip }}", layers! { "X" => "payload" }).unwrap_err();
    match err {
        ExpandError::Placeholder { source, .. } => {
            assert!(matches!(source, PlaceholderError::BinaryResult));
        }
        ExpandError::Scan(_) => panic!("expected a placeholder error"),
    }
}

#[test]
fn gunzip_of_plain_text_fails_in_the_filter() {
    // The text's UTF-16LE bytes are not a gzip stream.
    let err = expand("{{ var.X | gunzip:utf16 }}", layers! { "X" => "plain" }).unwrap_err();
    match err {
        ExpandError::Placeholder { source, .. } => {
            assert!(matches!(source, PlaceholderError::Filter { name, .. } if name == "gunzip"));
        }
        ExpandError::Scan(_) => panic!("expected a placeholder error"),
    }
}

#[test]
fn failure_produces_no_partial_output() {
    // The Err carries no partially-expanded text by construction; this
    // pins the all-or-nothing contract at the API level.
    let result = expand("{{ var.A }} then {{ var.Missing }}", layers! { "A" => "1" });
    assert!(result.is_err());
}

// =============================================================================
// Binary pipelines that finalize to text
// =============================================================================

#[test]
fn base64_decode_encode_pipeline() {
    let out = expand(
        "{{ var.Name | base64 }}",
        layers! { "Name" => "ada" },
    )
    .unwrap();
    assert_eq!(out, "YQBkAGEA");

    let out = expand(
        "{{ var.B64 | strfrombase64 }}",
        layers! { "B64" => "YQBkAGEA" },
    )
    .unwrap();
    assert_eq!(out, "ada");
}

#[test]
fn gzip_base64_round_trip_through_two_placeholders() {
    let packed = expand("{{ var.X | gzip | base64 }}", layers! { "X" => "hello" }).unwrap();
    let out = expand(
        "{{ var.P | frombase64 | gunzip:utf16 }}",
        layers! { "P" => packed.as_str() },
    )
    .unwrap();
    assert_eq!(out, "hello");
}

// =============================================================================
// Registry-script scenario
// =============================================================================

#[test]
fn registry_value_line() {
    let out = expand(
        r#""Install"="{{ var.Dir | pathwin | pathappend:"\sub" | regesc }}""#,
        layers! { "Dir" => "C:/Users/a" },
    )
    .unwrap();
    assert_eq!(out, r#""Install"="C:\\Users\\a\\sub""#);
}

#[test]
fn working_dir_feeds_absolute_path_filters() {
    let env = MapEnv::new();
    let out = Expander::builder()
        .template("{{ var.Rel | pathlinuxabs }}")
        .inline_layer(layers! { "Rel" => "x/y" })
        .env(&env)
        .working_dir(PathBuf::from("/home/me"))
        .build()
        .expand()
        .unwrap();
    assert_eq!(out.text, "/home/me/x/y");
}
