//! Production loader-conf generator against real component trees.

use std::path::PathBuf;

use bowline_core::config::{DependencyManifest, DirectoryConfig, ToolConfig};
use bowline_core::context::AppContext;
use bowline_core::generate::{ConfGenerator, GENERATED_CONF_FILE, RequireConfGenerator};
use tempfile::TempDir;

fn write_component(root: &std::path::Path, dir: &str, meta_file: &str, meta: &str) {
    let component = root.join("bower_components").join(dir);
    std::fs::create_dir_all(&component).expect("Failed to create component dir");
    std::fs::write(component.join(meta_file), meta).expect("Failed to write component meta");
}

async fn generate(
    temp: &TempDir,
    dir_conf: DirectoryConfig,
    tool_conf: ToolConfig,
) -> anyhow::Result<bowline_core::generate::GeneratedConf> {
    let ctx = AppContext::new(temp.path().to_path_buf());
    RequireConfGenerator
        .generate(&ctx, &DependencyManifest::default(), &dir_conf, &tool_conf)
        .await
}

#[tokio::test]
async fn collects_components_and_writes_conf() {
    let temp = TempDir::new().unwrap();
    write_component(
        temp.path(),
        "jquery",
        ".bower.json",
        r#"{ "name": "jquery", "version": "3.7.1", "main": "dist/jquery.js",
             "_source": "https://github.com/components/jquery.git" }"#,
    );
    write_component(
        temp.path(),
        "my-widget",
        "bower.json",
        r#"{ "name": "my-widget", "main": ["./widget.js", "./widget.css"] }"#,
    );

    let generated = generate(&temp, DirectoryConfig::default(), ToolConfig::default())
        .await
        .unwrap();

    assert_eq!(
        generated.components.get("jquery"),
        Some(&PathBuf::from("bower_components/jquery"))
    );
    assert_eq!(
        generated.components.get("my-widget"),
        Some(&PathBuf::from("bower_components/my-widget"))
    );
    assert_eq!(generated.pkg_meta.len(), 2);

    let conf = std::fs::read_to_string(temp.path().join(GENERATED_CONF_FILE)).unwrap();
    assert!(conf.contains("require.config("));
    assert!(conf.contains("bower_components/jquery/dist/jquery"));
    assert!(conf.contains("bower_components/my-widget/widget"));
}

#[tokio::test]
async fn web_url_prefixes_generated_paths() {
    let temp = TempDir::new().unwrap();
    write_component(
        temp.path(),
        "jquery",
        ".bower.json",
        r#"{ "name": "jquery", "main": "dist/jquery.js" }"#,
    );

    let tool_conf = ToolConfig {
        dependencies_web_url: Some("static/deps".to_string()),
        ..Default::default()
    };
    generate(&temp, DirectoryConfig::default(), tool_conf)
        .await
        .unwrap();

    let conf = std::fs::read_to_string(temp.path().join(GENERATED_CONF_FILE)).unwrap();
    assert!(conf.contains("static/deps/jquery/dist/jquery"));
    assert!(!conf.contains("bower_components/jquery"));
}

#[tokio::test]
async fn existing_loader_configs_are_merged_in_order() {
    let temp = TempDir::new().unwrap();
    write_component(
        temp.path(),
        "jquery",
        ".bower.json",
        r#"{ "name": "jquery" }"#,
    );
    std::fs::create_dir_all(temp.path().join("conf")).unwrap();
    std::fs::write(temp.path().join("conf/a.js"), "// conf a\n").unwrap();
    std::fs::write(temp.path().join("conf/b.js"), "// conf b").unwrap();

    let tool_conf = ToolConfig {
        requirejs_configs: vec!["conf/a.js".to_string(), "conf/b.js".to_string()],
        ..Default::default()
    };
    generate(&temp, DirectoryConfig::default(), tool_conf)
        .await
        .unwrap();

    let conf = std::fs::read_to_string(temp.path().join(GENERATED_CONF_FILE)).unwrap();
    let a = conf.find("// conf a").expect("first config merged");
    let b = conf.find("// conf b").expect("second config merged");
    let generated = conf.find("require.config(").expect("generated block present");
    assert!(a < b && b < generated);
}

#[tokio::test]
async fn missing_listed_loader_config_fails_generation() {
    let temp = TempDir::new().unwrap();
    write_component(
        temp.path(),
        "jquery",
        ".bower.json",
        r#"{ "name": "jquery" }"#,
    );

    let tool_conf = ToolConfig {
        requirejs_configs: vec!["conf/nope.js".to_string()],
        ..Default::default()
    };
    let result = generate(&temp, DirectoryConfig::default(), tool_conf).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn unreadable_component_meta_is_skipped() {
    let temp = TempDir::new().unwrap();
    write_component(
        temp.path(),
        "jquery",
        ".bower.json",
        r#"{ "name": "jquery" }"#,
    );
    write_component(temp.path(), "broken", ".bower.json", "{ not json");
    // A bare directory without any metadata document.
    std::fs::create_dir_all(temp.path().join("bower_components").join("empty")).unwrap();
    // Loose files in the install dir are not components.
    std::fs::write(temp.path().join("bower_components").join("README.md"), "x").unwrap();

    let generated = generate(&temp, DirectoryConfig::default(), ToolConfig::default())
        .await
        .unwrap();

    assert_eq!(generated.components.len(), 1);
    assert!(generated.components.contains_key("jquery"));
}

#[tokio::test]
async fn missing_install_dir_yields_empty_conf() {
    let temp = TempDir::new().unwrap();

    let generated = generate(&temp, DirectoryConfig::default(), ToolConfig::default())
        .await
        .unwrap();

    assert!(generated.components.is_empty());
    let conf = std::fs::read_to_string(temp.path().join(GENERATED_CONF_FILE)).unwrap();
    assert!(conf.contains("require.config("));
}

#[tokio::test]
async fn configured_directory_is_respected() {
    let temp = TempDir::new().unwrap();
    let component = temp.path().join("public/deps/jquery");
    std::fs::create_dir_all(&component).unwrap();
    std::fs::write(component.join(".bower.json"), r#"{ "name": "jquery" }"#).unwrap();

    let dir_conf = DirectoryConfig {
        directory: Some(PathBuf::from("public/deps")),
    };
    let generated = generate(&temp, dir_conf, ToolConfig::default())
        .await
        .unwrap();

    assert_eq!(
        generated.components.get("jquery"),
        Some(&PathBuf::from("public/deps/jquery"))
    );
}
