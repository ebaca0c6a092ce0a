//! Tests for config discovery, validation and merging.

use super::*;
use crate::error::WpackError;
use crate::loaders::{LoaderRef, LoaderSpec};
use crate::test_support::TestTree;
use serde_json::json;
use std::path::PathBuf;

fn registry() -> AliasRegistry {
    AliasRegistry::builtin()
}

fn locate(start: &Path) -> crate::error::Result<Option<DiscoveredConfig>> {
    ConfigLocator::new(&registry()).locate(start)
}

fn validation_error(result: crate::error::Result<Option<DiscoveredConfig>>) -> crate::error::ValidationError {
    match result {
        Err(WpackError::Validation(err)) => err,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// =========================================================================
// Schema
// =========================================================================

#[test]
fn test_schema_normalizes_shorthands() {
    let schemas = ConfigSchemas::new(&registry());
    let value = schemas
        .config
        .validate(&json!({
            "entry": "./index.js",
            "output": "dist",
            "module": {
                "loaders": { "**/*.js": "babel" },
                "globalLoaders": { "**/*.less": ["style", "css", { "loader": "less-loader" }] }
            }
        }))
        .unwrap();

    assert_eq!(value["output"], json!({ "path": "dist" }));
    assert_eq!(
        value["module"]["loaders"]["**/*.js"],
        json!({ "loader": "babel-loader" })
    );
    assert_eq!(
        value["module"]["globalLoaders"]["**/*.less"],
        json!([
            { "loader": "style-loader" },
            { "loader": "css-loader" },
            { "loader": "less-loader" }
        ])
    );
}

#[test]
fn test_schema_merges_alias_query() {
    let schemas = ConfigSchemas::new(&registry());
    let value = schemas
        .config
        .validate(&json!({
            "entry": "./index.js",
            "module": { "globalLoaders": { "**/*.png": { "loader": "image", "query": { "limit": 10 } } } }
        }))
        .unwrap();

    assert_eq!(
        value["module"]["globalLoaders"]["**/*.png"],
        json!({ "loader": "url-loader", "query": { "prefix": "img/", "limit": 10 } })
    );
}

#[test]
fn test_schema_requires_entry() {
    let schemas = ConfigSchemas::new(&registry());
    let err = schemas.config.validate(&json!({ "output": "dist" })).unwrap_err();
    assert_eq!(err.original_message, "Missing key \"entry\"");
}

#[test]
fn test_schema_rejects_unknown_top_level_key() {
    let schemas = ConfigSchemas::new(&registry());
    let err = schemas
        .config
        .validate(&json!({ "entry": "a.js", "entries": ["b.js"] }))
        .unwrap_err();
    assert_eq!(err.original_message, "Unexpected key \"entries\"");
}

#[test]
fn test_schema_accepts_profiles_without_nesting() {
    let schemas = ConfigSchemas::new(&registry());
    assert!(
        schemas
            .config
            .validate(&json!({ "entry": "a.js", "profile": { "prod": { "entry": "b.js" } } }))
            .is_ok()
    );

    let err = schemas
        .config
        .validate(&json!({
            "entry": "a.js",
            "profile": { "prod": { "entry": "b.js", "profile": {} } }
        }))
        .unwrap_err();
    assert_eq!(err.original_message, "Unexpected key \"profile\"");
    assert_eq!(
        err.context_messages,
        vec!["While validating key \"prod\"", "While validating key \"profile\""]
    );
}

#[test]
fn test_schema_plugins_are_opaque() {
    let schemas = ConfigSchemas::new(&registry());
    let value = schemas
        .config
        .validate(&json!({ "entry": "a.js", "plugins": [{ "anything": [1, 2] }, "x", null] }))
        .unwrap();
    assert_eq!(value["plugins"], json!([{ "anything": [1, 2] }, "x", null]));
}

#[test]
fn test_config_from_value() {
    let config = Config::from_value(json!({
        "entry": "a.js",
        "target": "node",
        "output": { "path": "dist" },
        "module": { "loaders": { "**/*.js": { "loader": "babel-loader" } } }
    }))
    .unwrap();

    assert_eq!(config.entry.as_deref(), Some("a.js"));
    assert_eq!(config.target, Some(Target::Node));
    assert_eq!(config.output.path.as_deref(), Some("dist"));
    assert_eq!(config.output.filename, None);
    assert_eq!(
        config.module.loaders["**/*.js"],
        LoaderSpec::Single(LoaderRef::new("babel-loader"))
    );
    assert!(!config.is_finalized());
}

// =========================================================================
// Locator
// =========================================================================

#[test]
fn test_locate_nearest_wpackrc_wins_over_closer_manifest_without_field() {
    let tree = TestTree::new();
    let rc = tree.write("proj/.wpackrc", "{ entry: './main.js' }");
    tree.write("proj/pkg/package.json", r#"{ "name": "pkg" }"#);
    let start = tree.dir("proj/pkg/src");

    let found = locate(&start).unwrap().unwrap();
    assert_eq!(found.source, rc);
    assert_eq!(found.config.entry.as_deref(), Some("./main.js"));
}

#[test]
fn test_locate_starts_at_the_start_directory() {
    let tree = TestTree::new();
    tree.write("proj/.wpackrc", "{ entry: 'outer.js' }");
    let rc = tree.write("proj/app/.wpackrc", "{ entry: 'inner.js' }");
    let start = tree.dir("proj/app");

    let found = locate(&start).unwrap().unwrap();
    assert_eq!(found.source, rc);
    assert_eq!(found.config.entry.as_deref(), Some("inner.js"));
}

#[test]
fn test_locate_wpackrc_beats_manifest_at_same_level() {
    let tree = TestTree::new();
    let rc = tree.write("proj/.wpackrc", "{ entry: 'from-rc.js' }");
    tree.write(
        "proj/package.json",
        r#"{ "name": "proj", "wpack": { "entry": "from-manifest.js" } }"#,
    );
    let start = tree.dir("proj");

    let found = locate(&start).unwrap().unwrap();
    assert_eq!(found.source, rc);
    assert_eq!(found.config.entry.as_deref(), Some("from-rc.js"));
}

#[test]
fn test_locate_manifest_with_field_stops_search() {
    let tree = TestTree::new();
    tree.write("proj/.wpackrc", "{ entry: 'outer.js' }");
    let manifest = tree.write(
        "proj/app/package.json",
        r#"{ "name": "app", "version": "1.0.0", "wpack": { "entry": "app.js" } }"#,
    );
    let start = tree.dir("proj/app/src");

    let found = locate(&start).unwrap().unwrap();
    assert_eq!(found.source, manifest);
    assert_eq!(found.config.entry.as_deref(), Some("app.js"));
}

#[test]
fn test_locate_manifest_without_field_continues() {
    let tree = TestTree::new();
    let outer = tree.write(
        "proj/package.json",
        r#"{ "name": "proj", "wpack": { "entry": "root.js" } }"#,
    );
    tree.write("proj/app/package.json", r#"{ "name": "app" }"#);
    tree.write("proj/app/nested/package.json", r#"{ "name": "nested", "wpack": null }"#);
    let start = tree.dir("proj/app/nested");

    let found = locate(&start).unwrap().unwrap();
    assert_eq!(found.source, outer);
    assert_eq!(found.config.entry.as_deref(), Some("root.js"));
}

#[test]
fn test_locate_invalid_wpackrc_is_fatal() {
    let tree = TestTree::new();
    tree.write("proj/.wpackrc", "{ entry: 'valid.js' }");
    let rc = tree.write("proj/app/.wpackrc", "{ entry: 'a.js', colour: 'blue' }");
    let start = tree.dir("proj/app");

    let err = validation_error(locate(&start));
    assert_eq!(err.original_message, "Unexpected key \"colour\"");
    assert_eq!(
        err.context_messages,
        vec![format!("While validating {}", rc.display())]
    );
}

#[test]
fn test_locate_wpackrc_syntax_error_is_fatal() {
    let tree = TestTree::new();
    let rc = tree.write("proj/.wpackrc", "{ entry: ");
    let start = tree.dir("proj");

    let err = validation_error(locate(&start));
    assert!(err.original_message.starts_with("Invalid JSON5"));
    assert_eq!(
        err.context_messages,
        vec![format!("While validating {}", rc.display())]
    );
}

#[test]
fn test_locate_accepts_relaxed_json_in_wpackrc() {
    let tree = TestTree::new();
    tree.write(
        "proj/.wpackrc",
        r#"
        // project build settings
        {
            entry: "./src/index.js",
            output: { path: "dist", filename: "app.js", },
            target: 'web',
            /* source maps */
            devtool: 'eval',
        }
        "#,
    );
    let start = tree.dir("proj");

    let config = locate(&start).unwrap().unwrap().config;
    assert_eq!(config.output.filename.as_deref(), Some("app.js"));
    assert_eq!(config.target, Some(Target::Web));
    assert_eq!(config.devtool.as_deref(), Some("eval"));
}

#[test]
fn test_locate_manifest_embedded_field_is_strict() {
    let tree = TestTree::new();
    let manifest = tree.write(
        "proj/package.json",
        r#"{ "name": "proj", "scripts": {}, "wpack": { "entry": "a.js", "colour": "blue" } }"#,
    );
    let start = tree.dir("proj");

    let err = validation_error(locate(&start));
    assert_eq!(err.original_message, "Unexpected key \"colour\"");
    assert_eq!(
        err.context_messages,
        vec![
            "While validating key \"wpack\"".to_string(),
            format!("While validating {}", manifest.display()),
        ]
    );
}

#[test]
fn test_locate_manifest_must_be_standard_json() {
    let tree = TestTree::new();
    tree.write("proj/package.json", "{ name: 'proj', }");
    let start = tree.dir("proj");

    let err = validation_error(locate(&start));
    assert!(err.original_message.starts_with("Invalid JSON"));
}

#[test]
fn test_locate_nested_error_keeps_inner_context() {
    let tree = TestTree::new();
    let rc = tree.write(
        "proj/.wpackrc",
        "{ entry: 'a.js', module: { loaders: { '**/*.js': 42 } } }",
    );
    let start = tree.dir("proj");

    let err = validation_error(locate(&start));
    assert!(err.original_message.starts_with("None of the alternatives matched"));
    assert_eq!(
        err.context_messages,
        vec![
            "While validating key \"**/*.js\"".to_string(),
            "While validating key \"loaders\"".to_string(),
            "While validating key \"module\"".to_string(),
            format!("While validating {}", rc.display()),
        ]
    );
}

#[test]
fn test_locate_ignores_directory_named_like_config() {
    let tree = TestTree::new();
    tree.dir("proj/app/.wpackrc");
    let rc = tree.write("proj/.wpackrc", "{ entry: 'a.js' }");
    let start = tree.dir("proj/app");

    assert_eq!(locate(&start).unwrap().unwrap().source, rc);
}

// =========================================================================
// Merge
// =========================================================================

#[test]
fn test_merge_with_empty_keeps_defaults() {
    let defaults = default_config(&registry());
    let merged = merge_config(&defaults, Some(&Config::default()));

    assert_eq!(merged, defaults);
    assert_eq!(merged.module.loaders, defaults.module.loaders);
    assert_eq!(merged.module.global_loaders, defaults.module.global_loaders);
}

#[test]
fn test_merge_with_nothing_discovered() {
    let defaults = default_config(&registry());
    assert_eq!(merge_config(&defaults, None), defaults);
}

#[test]
fn test_merge_adds_pattern_without_dropping_defaults() {
    let defaults = default_config(&registry());
    let ts = LoaderSpec::Single(LoaderRef::new("ts-loader"));
    let mut discovered = Config::default();
    discovered
        .module
        .loaders
        .insert("**/*.ts".to_string(), ts.clone());

    let merged = merge_config(&defaults, Some(&discovered));

    assert_eq!(merged.module.loaders.len(), defaults.module.loaders.len() + 1);
    for (pattern, spec) in &defaults.module.loaders {
        assert_eq!(merged.module.loaders.get(pattern), Some(spec));
    }
    assert_eq!(merged.module.loaders.get("**/*.ts"), Some(&ts));
    assert_eq!(merged.module.global_loaders, defaults.module.global_loaders);
}

#[test]
fn test_merge_override_wins_for_shared_pattern() {
    let defaults = default_config(&registry());
    let css = LoaderSpec::Single(LoaderRef::new("postcss-loader"));
    let mut discovered = Config::default();
    discovered
        .module
        .global_loaders
        .insert("**/*.css".to_string(), css.clone());

    let merged = merge_config(&defaults, Some(&discovered));

    assert_eq!(merged.module.global_loaders.get("**/*.css"), Some(&css));
    assert_eq!(
        merged.module.global_loaders.len(),
        defaults.module.global_loaders.len()
    );
    // An overridden pattern keeps its position.
    assert_eq!(
        merged.module.global_loaders.get_index_of("**/*.css"),
        defaults.module.global_loaders.get_index_of("**/*.css")
    );
}

#[test]
fn test_merge_output_field_by_field() {
    let defaults = default_config(&registry());
    let discovered = Config {
        output: Output {
            path: Some("dist".to_string()),
            filename: None,
        },
        ..Config::default()
    };

    let merged = merge_config(&defaults, Some(&discovered));
    assert_eq!(merged.output.path.as_deref(), Some("dist"));
    assert_eq!(merged.output.filename.as_deref(), Some("bundle.js"));
}

#[test]
fn test_merge_scalars_override_when_present() {
    let defaults = default_config(&registry());
    let discovered = Config {
        entry: Some("a.js".to_string()),
        debug: Some(false),
        target: Some(Target::Node),
        plugins: Some(vec![json!("p")]),
        ..Config::default()
    };

    let merged = merge_config(&defaults, Some(&discovered));
    assert_eq!(merged.entry.as_deref(), Some("a.js"));
    assert_eq!(merged.debug, Some(false));
    assert_eq!(merged.bail, Some(true));
    assert_eq!(merged.target, Some(Target::Node));
    assert_eq!(merged.devtool, defaults.devtool);
    assert_eq!(merged.plugins, Some(vec![json!("p")]));
}

#[test]
fn test_apply_profile_merges_on_top() {
    let mut base = merge_config(
        &default_config(&registry()),
        Some(&Config {
            entry: Some("dev.js".to_string()),
            ..Config::default()
        }),
    );
    base.profile.insert(
        "prod".to_string(),
        Config {
            entry: Some("prod.js".to_string()),
            bail: Some(false),
            ..Config::default()
        },
    );

    let applied = base.clone().apply_profile("prod").unwrap();
    assert_eq!(applied.entry.as_deref(), Some("prod.js"));
    assert_eq!(applied.bail, Some(false));
    assert_eq!(applied.module, base.module);
}

#[test]
fn test_apply_unknown_profile_lists_available() {
    let mut config = Config::default();
    config.profile.insert("prod".to_string(), Config::default());

    let err = config.apply_profile("staging").unwrap_err();
    assert!(err.to_string().contains("available: prod"));
}

// =========================================================================
// Finalization
// =========================================================================

#[test]
fn test_finalize_sets_missing_context() {
    let config = Config::default().finalize(Path::new("/proj/app"));
    assert_eq!(config.context, Some(PathBuf::from("/proj/app")));
    assert!(config.is_finalized());
}

#[test]
fn test_finalize_keeps_absolute_context() {
    let config = Config {
        context: Some(PathBuf::from("/elsewhere")),
        ..Config::default()
    }
    .finalize(Path::new("/proj"));
    assert_eq!(config.context, Some(PathBuf::from("/elsewhere")));
}

#[test]
fn test_finalize_resolves_relative_context() {
    let config = Config {
        context: Some(PathBuf::from("../shared")),
        ..Config::default()
    }
    .finalize(Path::new("/proj/app"));
    assert_eq!(config.context, Some(PathBuf::from("/proj/shared")));
}

#[test]
fn test_find_config_uses_defaults_when_nothing_found() {
    let tree = TestTree::new();
    let start = tree.dir("empty/project");

    let config = find_config(&start, &registry()).unwrap();
    let defaults = default_config(&registry());

    assert_eq!(config.context.as_deref(), Some(start.as_path()));
    assert_eq!(config.module, defaults.module);
    assert!(config.entry.is_none());
}

#[test]
fn test_find_config_merges_discovered_over_defaults() {
    let tree = TestTree::new();
    tree.write(
        "proj/.wpackrc",
        "{ entry: 'a.js', output: 'out', module: { loaders: { '**/*.ts': 'babel' } } }",
    );
    let start = tree.dir("proj");

    let config = find_config(&start, &registry()).unwrap();
    assert_eq!(config.entry.as_deref(), Some("a.js"));
    assert_eq!(config.output.path.as_deref(), Some("out"));
    assert_eq!(config.output.filename.as_deref(), Some("bundle.js"));
    assert!(config.module.loaders.contains_key("**/*.js"));
    assert!(config.module.loaders.contains_key("**/*.ts"));
    assert_eq!(config.context.as_deref(), Some(start.as_path()));
}

// =========================================================================
// Defaults
// =========================================================================

#[test]
fn test_default_config() {
    let config = default_config(&registry());

    assert_eq!(config.debug, Some(true));
    assert_eq!(config.bail, Some(true));
    assert_eq!(config.devtool.as_deref(), Some("cheap-module-eval-source-map"));
    assert_eq!(config.output.path.as_deref(), Some("./build"));
    assert_eq!(config.output.filename.as_deref(), Some("bundle.js"));
    assert!(config.entry.is_none());
    assert!(config.context.is_none());

    assert_eq!(
        config.module.loaders.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["**/*.js"]
    );
    assert_eq!(
        config.module.global_loaders.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "**/*.css",
            "**/*.module.css",
            "**/*.png",
            "**/*.jpg",
            "**/*.gif",
            "**/*.eot",
            "**/*.ttf",
            "**/*.svg",
            "**/*.woff",
            "**/*.woff2",
        ]
    );

    match &config.module.global_loaders["**/*.module.css"] {
        LoaderSpec::Chain(chain) => {
            assert_eq!(chain[0].loader, "style-loader");
            assert_eq!(chain[1].loader, "css-loader");
            assert_eq!(chain[1].query.as_ref().unwrap()["modules"], json!(true));
        }
        other => panic!("expected chain, got {other:?}"),
    }
}

#[test]
fn test_default_devtool_passes_schema() {
    let schemas = ConfigSchemas::new(&registry());
    assert!(
        schemas
            .config
            .validate(&json!({ "entry": "a.js", "devtool": "cheap-module-eval-source-map" }))
            .is_ok()
    );
}
