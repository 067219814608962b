use indoc::indoc;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn stringport_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("stringport"))
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_projects(temp_dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let android = temp_dir.path().join("android");
    let ios = temp_dir.path().join("ios");

    write(&android.join("AndroidManifest.xml"), "<manifest/>\n");
    write(
        &android.join("res/values/strings.xml"),
        indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <string name="ok">OK</string>
                <string name="greeting">Hi</string>
                <string name="gender_male">Male</string>
                <string name="items_found">Items: %02d found</string>
            </resources>
        "#},
    );
    write(
        &android.join("res/values-es/strings.xml"),
        indoc! {r#"
            <resources>
                <string name="ok">Vale</string>
                <string name="items_found">Elementos: %02d encontrados</string>
            </resources>
        "#},
    );
    write(
        &android.join("res/values-zh-rCN/strings.xml"),
        indoc! {r#"
            <resources>
                <string name="ok">好</string>
            </resources>
        "#},
    );

    write(
        &ios.join("App/HomeViewController.m"),
        indoc! {r#"
            - (void)viewDidLoad {
                // label.text = @"OK";
                label.text = @"OK";
                NSLog(@"OK");
            }
        "#},
    );
    write(
        &ios.join("App/Gender.m"),
        "static NSString *const DISP_GENDER_MALE = @\"Male\";\n",
    );
    write(&ios.join("external/Vendor.m"), "v.text = @\"OK\";\n");
    write(&ios.join("App/RRSStoryboard.m"), "s.text = @\"OK\";\n");

    (android, ios)
}

#[test]
fn test_full_migration() {
    let temp_dir = TempDir::new().unwrap();
    let (android, ios) = setup_projects(&temp_dir);

    let output = stringport_cmd()
        .args([android.to_str().unwrap(), ios.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Indexing strings..."));
    assert!(stdout.contains("language:en, strings:4"));
    assert!(stdout.contains("language:es, strings:2"));
    assert!(stdout.contains("language:zh-Hans, strings:1"));
    assert!(stdout.contains("Localized 1 strings"));
    assert!(stdout.contains("can't localize static! key: gender_male, file: Gender.m"));

    assert_eq!(
        fs::read_to_string(ios.join("App/HomeViewController.m")).unwrap(),
        indoc! {r#"
            - (void)viewDidLoad {
                // label.text = @"OK";
                label.text = NSLocalizedString(@"ok", @"OK");
                NSLog(@"OK");
            }
        "#}
    );
    assert_eq!(
        fs::read_to_string(ios.join("App/Gender.m")).unwrap(),
        "static NSString *const DISP_GENDER_MALE = @\"Male\";\n"
    );
    assert_eq!(
        fs::read_to_string(ios.join("external/Vendor.m")).unwrap(),
        "v.text = @\"OK\";\n"
    );
    assert_eq!(
        fs::read_to_string(ios.join("App/RRSStoryboard.m")).unwrap(),
        "s.text = @\"OK\";\n"
    );

    let en = fs::read_to_string(ios.join("resources/en.lproj/Localizable.strings")).unwrap();
    assert_eq!(
        en,
        indoc! {r#"
            "ok" = "OK";
            "greeting" = "Hi";
            "gender_male" = "Male";
            "items_found" = "Items: %@ found";
        "#}
    );

    let es = fs::read_to_string(ios.join("resources/es.lproj/Localizable.strings")).unwrap();
    assert_eq!(
        es,
        indoc! {r#"
            "ok" = "Vale";
            "items_found" = "Elementos: %@ encontrados";
            "greeting" = "Hi"; // TRANSLATE TO es
            "gender_male" = "Male"; // TRANSLATE TO es
        "#}
    );

    let zh = fs::read_to_string(ios.join("resources/zh-Hans.lproj/Localizable.strings")).unwrap();
    assert!(zh.starts_with("\"ok\" = \"好\";\n"));
    assert!(zh.contains("\"items_found\" = \"Items: %@ found\"; // TRANSLATE TO zh-Hans\n"));
}

#[test]
fn test_second_run_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let (android, ios) = setup_projects(&temp_dir);
    let args = [android.to_str().unwrap(), ios.to_str().unwrap()];

    let first = stringport_cmd().args(args).output().unwrap();
    assert!(first.status.success());
    let source = fs::read_to_string(ios.join("App/HomeViewController.m")).unwrap();
    let es = fs::read_to_string(ios.join("resources/es.lproj/Localizable.strings")).unwrap();

    let second = stringport_cmd().args(args).output().unwrap();
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stdout).contains("Localized 0 strings"));
    assert_eq!(
        fs::read_to_string(ios.join("App/HomeViewController.m")).unwrap(),
        source
    );
    assert_eq!(
        fs::read_to_string(ios.join("resources/es.lproj/Localizable.strings")).unwrap(),
        es
    );
}

#[test]
fn test_report_json() {
    let temp_dir = TempDir::new().unwrap();
    let (android, ios) = setup_projects(&temp_dir);
    let report = temp_dir.path().join("out/report.json");

    let output = stringport_cmd()
        .args([
            android.to_str().unwrap(),
            ios.to_str().unwrap(),
            "--report-json",
            report.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["localized"], 1);
    assert_eq!(json["files_rewritten"], 1);
    assert_eq!(json["languages"]["en"], 4);
    assert_eq!(json["diagnostics"][0]["kind"], "unrewritable_literal");
    assert_eq!(json["diagnostics"][0]["key"], "gender_male");
}

#[test]
fn test_config_file_overrides_discovery() {
    let temp_dir = TempDir::new().unwrap();
    let (android, ios) = setup_projects(&temp_dir);
    let config = temp_dir.path().join("stringport.toml");
    fs::write(
        &config,
        indoc! {r#"
            [discovery]
            ignored_files = []
            ignored_dirs = []
        "#},
    )
    .unwrap();

    let output = stringport_cmd()
        .args([
            android.to_str().unwrap(),
            ios.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Localized 3 strings"));
    assert_eq!(
        fs::read_to_string(ios.join("external/Vendor.m")).unwrap(),
        "v.text = NSLocalizedString(@\"ok\", @\"OK\");\n"
    );
}

#[test]
fn test_missing_arguments_prints_usage() {
    let output = stringport_cmd().output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_missing_manifest_fails_before_processing() {
    let temp_dir = TempDir::new().unwrap();
    let (android, ios) = setup_projects(&temp_dir);
    fs::remove_file(android.join("AndroidManifest.xml")).unwrap();

    let output = stringport_cmd()
        .args([android.to_str().unwrap(), ios.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AndroidManifest.xml"));
    assert!(stderr.contains("usage: stringport"));
    assert!(!ios.join("resources").exists());
    assert_eq!(
        fs::read_to_string(ios.join("App/HomeViewController.m"))
            .unwrap()
            .contains("NSLocalizedString"),
        false
    );
}

#[test]
fn test_missing_ios_root_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (android, _ios) = setup_projects(&temp_dir);
    let missing = temp_dir.path().join("nope");

    let output = stringport_cmd()
        .args([android.to_str().unwrap(), missing.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("iOS directory"));
}

#[test]
fn test_invalid_default_language_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (android, ios) = setup_projects(&temp_dir);

    let output = stringport_cmd()
        .args([
            android.to_str().unwrap(),
            ios.to_str().unwrap(),
            "--default-language",
            "not a code",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid language code"));
}

#[test]
fn test_diagnostics_are_printed_once() {
    let temp_dir = TempDir::new().unwrap();
    let (android, ios) = setup_projects(&temp_dir);

    let output = stringport_cmd()
        .env_remove("RUST_LOG")
        .args([android.to_str().unwrap(), ios.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout.matches("gender_male").count(), 1);
    assert!(!stderr.contains("gender_male"), "stderr: {}", stderr);
    assert!(!stderr.contains("localize static"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_ignored_pattern_fails_before_processing() {
    let temp_dir = TempDir::new().unwrap();
    let (android, ios) = setup_projects(&temp_dir);
    let config = temp_dir.path().join("stringport.toml");
    fs::write(&config, "[discovery]\nignored_files = [\"[\"]\n").unwrap();

    let output = stringport_cmd()
        .args([
            android.to_str().unwrap(),
            ios.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid ignored file pattern"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Indexing strings..."));
    assert!(!ios.join("resources").exists());
}
