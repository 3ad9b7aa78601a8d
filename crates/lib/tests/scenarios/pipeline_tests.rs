//! Which stages a module runs and what it installs.

use std::path::PathBuf;

use jarsmith_lib::action::BuildAction;
use jarsmith_lib::config::{BuildConfig, GENERATE_DEX_DEBUG_ENV, NO_OPTIMIZE_DX_ENV};
use jarsmith_lib::module::{ModuleDecl, ModuleKind};
use jarsmith_lib::sdk::Target;
use jarsmith_lib::util::hash::Hashable;
use serial_test::serial;
use tempfile::TempDir;

use super::common::*;

mod stages {
  use super::*;

  #[test]
  fn module_without_sources_only_merges() {
    let mut app = lib("app", &[]);
    app.java_static_libs = strings(&["util"]);

    let plan = generate(vec![lib("util", &["Util.java"]), app]).unwrap();

    let app = plan.module("app", Target::Device).unwrap();
    assert_eq!(action_names(app), vec!["merge_jars"]);
    assert_eq!(app.checkbuild, vec![PathBuf::from("/out/device/app/classes-full-debug.jar")]);
  }

  #[test]
  fn host_only_library_is_not_translated() {
    let mut tool = lib("tool", &["Tool.java"]);
    tool.kind = ModuleKind::JavaLibraryHost;
    let mut util = lib("util", &["Util.java"]);
    util.host_supported = true;

    let plan = generate(vec![tool, util]).unwrap();

    assert_eq!(
      action_names(plan.module("tool", Target::Host).unwrap()),
      vec!["javac", "merge_jars"]
    );
    assert_eq!(
      action_names(plan.module("util", Target::Host).unwrap()),
      vec!["javac", "merge_jars", "dex", "javalib"]
    );
  }

  #[test]
  fn resource_bundle_sources_reach_the_compile() {
    let mut res = ModuleDecl::new(ModuleKind::ResourceBundle, "framework-res");
    res.resource_dirs = strings(&["res"]);
    let mut app = lib("app", &["App.java"]);
    app.src_list_libs = strings(&["framework-res"]);

    let plan = generate(vec![res, app]).unwrap();

    let app = plan.module("app", Target::Device).unwrap();
    let src_lists = app
      .actions
      .iter()
      .find_map(|a| match a {
        BuildAction::Javac { src_lists, .. } => Some(src_lists.clone()),
        _ => None,
      })
      .unwrap();
    assert_eq!(
      src_lists,
      vec![PathBuf::from("/out/device/framework-res/gen/aapt/java-files.list")]
    );
    assert!(javac_flags(app).classpath.is_empty());
  }

  #[test]
  fn logtags_of_every_module_are_merged_once() {
    let plan = generate(vec![
      lib("a", &["A.java", "events.logtags"]),
      lib("b", &["B.java", "events.logtags"]),
    ])
    .unwrap();

    assert_eq!(
      plan.global_actions,
      vec![BuildAction::MergeLogtags {
        inputs: vec![
          PathBuf::from("/src/a/events.logtags"),
          PathBuf::from("/src/b/events.logtags"),
        ],
        output: PathBuf::from("/out/all-event-log-tags.txt"),
      }]
    );
  }
}

mod merged_content {
  use super::*;

  #[test]
  fn static_chain_merges_every_level_in_order() {
    let mut a = lib("a", &["A.java"]);
    a.java_static_libs = strings(&["b"]);
    let mut b = lib("b", &["B.java"]);
    b.java_static_libs = strings(&["c"]);

    let plan = generate(vec![a, b, lib("c", &["C.java"])]).unwrap();

    let a = plan.module("a", Target::Device).unwrap();
    assert_eq!(
      merge_inputs(a),
      vec![
        PathBuf::from("/out/device/a/classes"),
        PathBuf::from("/out/device/b/classes"),
        PathBuf::from("/out/device/c/classes"),
      ]
    );
    assert_eq!(
      javac_flags(a).classpath,
      vec![PathBuf::from("/out/device/b/classes-full-debug.jar")]
    );
  }

  #[test]
  fn own_resources_come_before_inherited_ones() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "app/res/app.txt");
    touch(temp.path(), "util/res/util.txt");

    let mut util = lib("util", &["Util.java"]);
    util.java_resource_dirs = strings(&["res"]);
    let mut app = lib("app", &["App.java"]);
    app.java_resource_dirs = strings(&["res"]);
    app.java_static_libs = strings(&["util"]);

    let plan = generate_in(vec![util, app], temp.path()).unwrap();
    let app = plan.module("app", Target::Device).unwrap();

    let own = temp.path().join("app/res");
    let inherited = temp.path().join("util/res");
    assert_eq!(
      merge_inputs(app),
      vec![
        PathBuf::from("/out/device/app/classes"),
        PathBuf::from("/out/device/util/classes"),
        own.clone(),
        inherited.clone(),
      ]
    );

    let javalib_resources = app
      .actions
      .iter()
      .find_map(|a| match a {
        BuildAction::Javalib { resources, .. } => Some(resources.iter().map(container).collect::<Vec<_>>()),
        _ => None,
      })
      .unwrap();
    assert_eq!(javalib_resources, vec![own, inherited]);
  }
}

mod installs {
  use super::*;

  #[test]
  fn library_jar_is_installed_under_framework() {
    let plan = generate(vec![lib("util", &["Util.java"])]).unwrap();

    let util = plan.module("util", Target::Device).unwrap();
    assert_eq!(util.installs.len(), 1);
    assert_eq!(util.installs[0].src, PathBuf::from("/out/device/util/javalib.jar"));
    assert_eq!(util.installs[0].dest, PathBuf::from("/install/device/framework/util.jar"));
  }

  #[test]
  fn binary_wrapper_installs_after_its_jar() {
    let mut tool = lib("tool", &["Main.java"]);
    tool.kind = ModuleKind::JavaBinary;
    tool.wrapper = Some("scripts/tool.sh".to_string());

    let plan = generate(vec![tool]).unwrap();

    let tool = plan.module("tool", Target::Device).unwrap();
    let jar = PathBuf::from("/install/device/framework/tool.jar");
    assert_eq!(tool.installs[0].dest, jar);
    assert_eq!(tool.installs[1].src, PathBuf::from("/src/tool/scripts/tool.sh"));
    assert_eq!(tool.installs[1].dest, PathBuf::from("/install/device/bin/tool.sh"));
    assert_eq!(tool.installs[1].after, Some(jar));
  }

  #[test]
  fn binary_without_wrapper_fails() {
    let mut tool = lib("tool", &["Main.java"]);
    tool.kind = ModuleKind::JavaBinary;

    let plan = generate(vec![tool]).unwrap();

    assert_eq!(plan.failed[0].error, "missing required property `wrapper`");
  }
}

mod translation_switches {
  use super::*;

  fn dex_flags(plan: &jarsmith_lib::workspace::BuildPlan) -> Vec<String> {
    plan
      .module("app", Target::Device)
      .unwrap()
      .actions
      .iter()
      .find_map(|a| match a {
        BuildAction::Dex { flags, .. } => Some(flags.clone()),
        _ => None,
      })
      .unwrap()
  }

  fn without_dex(plan: &jarsmith_lib::workspace::BuildPlan) -> Vec<BuildAction> {
    plan
      .modules
      .iter()
      .flat_map(|m| m.actions.iter())
      .filter(|a| !matches!(a, BuildAction::Dex { .. }))
      .cloned()
      .collect()
  }

  #[test]
  #[serial]
  fn switches_only_change_dex_flags() {
    let decls = || vec![lib("app", &["App.java"])];

    let plain = temp_env::with_vars(
      [(NO_OPTIMIZE_DX_ENV, None::<&str>), (GENERATE_DEX_DEBUG_ENV, None)],
      || generate_with(decls(), &BuildConfig::from_env("/out", "/install")).unwrap(),
    );
    let toggled = temp_env::with_vars(
      [(NO_OPTIMIZE_DX_ENV, Some("1")), (GENERATE_DEX_DEBUG_ENV, Some("1"))],
      || generate_with(decls(), &BuildConfig::from_env("/out", "/install")).unwrap(),
    );

    assert!(!dex_flags(&plain).contains(&"--no-optimize".to_string()));
    let flags = dex_flags(&toggled);
    assert!(flags.contains(&"--no-optimize".to_string()));
    assert!(flags.contains(&"--debug".to_string()));
    assert!(flags.contains(&"--dump-to=/out/device/app/classes.lst".to_string()));
    assert_eq!(without_dex(&plain), without_dex(&toggled));
  }
}

mod determinism {
  use super::*;

  #[test]
  fn identical_inputs_hash_identically() {
    let decls = || {
      let mut app = lib("app", &["App.java", "IFoo.aidl"]);
      app.java_static_libs = strings(&["util"]);
      app.host_supported = true;
      let mut util = lib("util", &["Util.java"]);
      util.host_supported = true;
      vec![app, util]
    };

    let first = generate(decls()).unwrap().compute_hash().unwrap();
    let second = generate(decls()).unwrap().compute_hash().unwrap();

    assert_eq!(first, second);
  }

  #[test]
  fn declaration_changes_change_the_hash() {
    let base = generate(vec![lib("app", &["App.java"])]).unwrap().compute_hash().unwrap();
    let changed = generate(vec![lib("app", &["App.java", "Extra.java"])])
      .unwrap()
      .compute_hash()
      .unwrap();

    assert_ne!(base, changed);
  }
}
