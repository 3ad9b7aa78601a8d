//! How dependency categories shape a module's classpath and merged content.

use std::path::PathBuf;

use jarsmith_lib::module::ModuleKind;
use jarsmith_lib::sdk::{SdkVersion, Target};
use jarsmith_lib::workspace::WorkspaceError;

use super::common::*;

mod static_libraries {
  use super::*;

  #[test]
  fn static_library_is_compiled_against_and_merged_after_own_classes() {
    let mut app = lib("app", &["App.java"]);
    app.java_static_libs = strings(&["util"]);

    let plan = generate(vec![app, lib("util", &["Util.java"])]).unwrap();

    let util = plan.module("util", Target::Device).unwrap();
    let util_exports = util.exports.as_ref().unwrap();
    let app = plan.module("app", Target::Device).unwrap();

    assert_eq!(javac_flags(app).classpath, vec![util_exports.classpath_file.clone()]);
    assert_eq!(
      merge_inputs(app),
      vec![
        PathBuf::from("/out/device/app/classes"),
        PathBuf::from("/out/device/util/classes"),
      ]
    );
  }

  #[test]
  fn shared_library_is_only_on_the_classpath() {
    let mut app = lib("app", &["App.java"]);
    app.java_libs = strings(&["util"]);

    let plan = generate(vec![app, lib("util", &["Util.java"])]).unwrap();

    let app = plan.module("app", Target::Device).unwrap();
    assert_eq!(
      javac_flags(app).classpath,
      vec![PathBuf::from("/out/device/util/classes-full-debug.jar")]
    );
    assert_eq!(merge_inputs(app), vec![PathBuf::from("/out/device/app/classes")]);
  }

  #[test]
  fn repackaged_library_exports_extracted_classes() {
    let mut util = lib("util", &["Util.java"]);
    util.jarjar_rules = Some("rules.txt".to_string());
    let mut app = lib("app", &["App.java"]);
    app.java_static_libs = strings(&["util"]);

    let plan = generate(vec![util, app]).unwrap();

    let util = plan.module("util", Target::Device).unwrap();
    let exports = util.exports.as_ref().unwrap();
    assert_eq!(exports.classpath_file, PathBuf::from("/out/device/util/classes-jarjar.jar"));
    assert_eq!(
      exports.class_jar_specs.iter().map(container).collect::<Vec<_>>(),
      vec![PathBuf::from("/out/device/util/extracted/classes")]
    );

    let app = plan.module("app", Target::Device).unwrap();
    assert_eq!(javac_flags(app).classpath, vec![exports.classpath_file.clone()]);
    assert_eq!(
      merge_inputs(app),
      vec![
        PathBuf::from("/out/device/app/classes"),
        PathBuf::from("/out/device/util/extracted/classes"),
      ]
    );
  }
}

mod sdk {
  use super::*;

  #[test]
  fn system_sdk_selects_system_stubs_without_defaults() {
    let mut stubs = prebuilt(ModuleKind::PrebuiltSdk, "android_system_stubs_current", &["system/android.jar"]);
    stubs.aidl_preprocessed = Some("system/framework.aidl".to_string());
    let mut app = lib("app", &["App.java", "IService.aidl"]);
    app.no_standard_libraries = false;
    app.sdk_version = SdkVersion::SystemCurrent;

    let plan = generate(vec![stubs, app]).unwrap();

    let app = plan.module("app", Target::Device).unwrap();
    let flags = javac_flags(app);
    assert_eq!(
      flags.boot_classpath,
      Some(PathBuf::from("/src/prebuilts/system/android.jar"))
    );
    assert!(flags.classpath.is_empty());

    let aidl_flags = app
      .actions
      .iter()
      .find_map(|a| match a {
        jarsmith_lib::action::BuildAction::Aidl { flags, .. } => Some(flags),
        _ => None,
      })
      .unwrap();
    assert_eq!(aidl_flags[0], "-p/src/prebuilts/system/framework.aidl");
  }

  #[test]
  fn missing_sdk_module_fails_only_its_dependents() {
    let mut app = lib("app", &["App.java"]);
    app.no_standard_libraries = false;
    app.sdk_version = SdkVersion::Current;

    let plan = generate(vec![app, lib("other", &["Other.java"])]).unwrap();

    assert_eq!(plan.failed.len(), 1);
    assert!(plan.failed[0].error.contains("android_stubs_current"));
    assert!(plan.module("other", Target::Device).is_some());
  }
}

mod errors {
  use super::*;

  #[test]
  fn prebuilt_with_two_archives_is_reported() {
    let broken = prebuilt(ModuleKind::PrebuiltJavaLibrary, "guava", &["a.jar", "b.jar"]);
    let mut app = lib("app", &["App.java"]);
    app.java_libs = strings(&["guava"]);

    let plan = generate(vec![broken, app]).unwrap();

    assert_eq!(plan.failed.len(), 1);
    assert_eq!(plan.failed[0].module.name, "guava");
    assert_eq!(
      plan.failed[0].error,
      "expected exactly one archive in sources, found 2"
    );
    assert_eq!(plan.skipped[0].module.name, "app");
    assert!(!plan.is_success());
  }

  #[test]
  fn edge_outside_every_category_aborts_generation() {
    let mut app = lib("app", &["App.java"]);
    app.generated_srcs = strings(&["util"]);

    let result = generate(vec![lib("util", &["Util.java"]), app]);

    match result {
      Err(WorkspaceError::Classification(err)) => {
        assert_eq!(err.module, "app");
        assert_eq!(err.dependency, "util");
      }
      other => panic!("expected classification error, got {other:?}"),
    }
  }

  #[test]
  fn two_preprocessed_aidl_providers_are_reported() {
    let mut a = prebuilt(ModuleKind::PrebuiltSdk, "sdk_a", &["a.jar"]);
    a.aidl_preprocessed = Some("a.aidl".to_string());
    let mut b = prebuilt(ModuleKind::PrebuiltSdk, "sdk_b", &["b.jar"]);
    b.aidl_preprocessed = Some("b.aidl".to_string());
    let mut app = lib("app", &["App.java"]);
    app.java_libs = strings(&["sdk_a", "sdk_b"]);

    let plan = generate(vec![a, b, app]).unwrap();

    assert_eq!(plan.failed.len(), 1);
    assert_eq!(plan.failed[0].module.name, "app");
    assert!(plan.failed[0].error.contains("multiple dependencies with preprocessed aidls"));
  }
}
