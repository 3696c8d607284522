use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const MESSAGES: &str = r#"{
  "message": {
    "hello": "hello world",
    "hi": "hi"
  }
}"#;

const APP: &str = "<template>\n  <p>hi</p>\n</template>\n\n<script setup>\nconst title = ref('hello world')\n</script>\n";

const APP_MIGRATED: &str = "<template>\n  <p>{{ $t('message.hi') }}</p>\n</template>\n\n<script setup>\nimport { ref, computed } from \"vue\";\nimport { useI18n } from \"vue-i18n\";\nconst { t } = useI18n();\nconst title = ref(t('message.hello'))\n</script>\n";

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", MESSAGES)?;
    test.write_file("src/App.vue", APP)?;
    Ok(test)
}

#[test]
fn test_dry_run_previews_without_writing() -> Result<()> {
    let test = project()?;

    let (code, stdout, _) = run(test.migrate_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("src/App.vue:2:6  template"));
    assert!(stdout.contains("\"hi\" -> {{ $t('message.hi') }}"));
    assert!(stdout.contains("src/App.vue:6:19  script"));
    assert!(stdout.contains("\"hello world\" -> t('message.hello')"));
    assert!(stdout.contains("Would migrate 2 string(s) in 1 file(s)."));
    assert_eq!(test.read_file("src/App.vue")?, APP);

    Ok(())
}

#[test]
fn test_apply_writes_files() -> Result<()> {
    let test = project()?;

    let (code, stdout, _) = run({
        let mut cmd = test.migrate_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Migrated 2 string(s) in 1 file(s)."));
    assert_eq!(test.read_file("src/App.vue")?, APP_MIGRATED);

    // A migrated project has nothing left to do.
    let (code, stdout, _) = run(test.migrate_command())?;
    assert_eq!(code, 0);
    assert!(stdout.contains("Checked 1 component file - nothing to migrate"));

    Ok(())
}

#[test]
fn test_setup_method_component() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", MESSAGES)?;
    test.write_file(
        "src/Legacy.vue",
        "<script>\nexport default {\n  setup() {\n    const a = 'hi'\n    return { a }\n  }\n}\n</script>\n",
    )?;

    let (code, _, _) = run({
        let mut cmd = test.migrate_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(code, 0);
    assert_eq!(
        test.read_file("src/Legacy.vue")?,
        "<script>\nimport { ref, computed } from \"vue\";\nimport { useI18n } from \"vue-i18n\";\nexport default {\n  setup() {\n    const { t } = useI18n();\n    const a = computed(() => t('message.hi'))\n    return { a }\n  }\n}\n</script>\n"
    );

    Ok(())
}

#[test]
fn test_unparseable_file_is_reported_and_others_continue() -> Result<()> {
    let test = project()?;
    test.write_file("src/Broken.vue", "<script setup>\nconst = \n</script>\n")?;

    let (code, stdout, _) = run({
        let mut cmd = test.migrate_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(code, 2);
    assert!(stdout.contains("error: Failed to parse"));
    assert!(stdout.contains("src/Broken.vue"));
    assert!(stdout.contains("1 file could not be migrated"));
    assert_eq!(test.read_file("src/App.vue")?, APP_MIGRATED);

    Ok(())
}

#[test]
fn test_config_and_messages_root_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".i18nifyrc.json",
        r#"{ "includes": ["app"], "messagesRoot": "./missing", "rewriteTemplate": false }"#,
    )?;
    test.write_file("i18n/en.json", MESSAGES)?;
    test.write_file("app/App.vue", APP)?;
    test.write_file("src/Ignored.vue", APP)?;

    let (code, _, stderr) = run(test.migrate_command())?;
    assert_eq!(code, 2);
    assert!(stderr.contains("does not exist"));

    let (code, stdout, _) = run({
        let mut cmd = test.migrate_command();
        cmd.args(["--messages-root", "i18n"]);
        cmd
    })?;

    assert_eq!(code, 1);
    assert!(stdout.contains("app/App.vue:6:19"));
    assert!(!stdout.contains("template"));
    assert!(!stdout.contains("Ignored.vue"));
    assert!(stdout.contains("Would migrate 1 string(s) in 1 file(s)."));

    Ok(())
}

#[test]
fn test_source_root_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("web/locales/en.json", MESSAGES)?;
    test.write_file("web/src/App.vue", APP)?;

    let (code, stdout, _) = run({
        let mut cmd = test.migrate_command();
        cmd.args(["--source-root", "web"]);
        cmd
    })?;

    assert_eq!(code, 1);
    assert!(stdout.contains("web/src/App.vue:6:19"));

    Ok(())
}
