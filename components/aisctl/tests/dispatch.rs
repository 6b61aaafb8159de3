//! End-to-end dispatch tests.
//!
//! aisctl execs the fake apps from `common`, so whatever they print is what the real
//! apps would have received.
#![cfg(unix)]

mod common;

use common::FakeInstall;
use predicates::prelude::*;

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn args_of(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("arg="))
        .collect()
}

#[test]
fn create_execs_manager_with_exact_flags() {
    let install = FakeInstall::new();

    let output = install
        .aisctl()
        .args(["--target-address", "127.0.0.1:50051", "create", "-s", "foo"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("app=manager_app\n"));
    assert_eq!(
        args_of(&stdout),
        [
            "--op_id=0",
            "--ssl_root_cert_path=None",
            "--stream_name=foo",
            "--target_address=127.0.0.1:50051",
            "--use_google_managed_service=false",
            "--use_insecure_channel=false",
        ]
    );
}

#[test]
fn delete_execs_manager_with_op_two() {
    let install = FakeInstall::new();

    install
        .aisctl()
        .args(["-t", "h:1", "delete", "--stream-name", "old"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app=manager_app"))
        .stdout(predicate::str::contains("arg=--op_id=2\n"))
        .stdout(predicate::str::contains("arg=--stream_name=old\n"));
}

#[test]
fn list_streams_execs_manager_without_stream_name() {
    let install = FakeInstall::new();

    install
        .aisctl()
        .args(["-t", "h:1", "--use-insecure-channel", "list_streams"])
        .assert()
        .success()
        .stdout(predicate::str::contains("arg=--op_id=1\n"))
        .stdout(predicate::str::contains("arg=--use_insecure_channel=true\n"))
        .stdout(predicate::str::contains("--stream_name").not());
}

#[test]
fn ingest_execs_ingester_with_exact_flags() {
    let install = FakeInstall::new();

    let output = install
        .aisctl()
        .args(["--target-address", "1.2.3.4:9", "ingest", "-s", "bar", "-u", "file.mp4", "-l"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("app=ingester_app\n"));
    assert_eq!(
        args_of(&stdout),
        [
            "--target_address=1.2.3.4:9",
            "--stream_name=bar",
            "--loop_playback=true",
            "--source_uri=file.mp4",
        ]
    );
}

#[test]
fn playback_execs_playback_app_with_domain() {
    let install = FakeInstall::new();

    install
        .aisctl()
        .args([
            "-t",
            "h:1",
            "--ssl-domain-name",
            "streams.example.com",
            "--ssl-root-cert-path",
            "/certs/root.pem",
            "playback",
            "-s",
            "cam",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("app=playback_app"))
        .stdout(predicate::str::contains("arg=--ssl_domain_name=streams.example.com\n"))
        .stdout(predicate::str::contains("arg=--ssl_root_cert_path=/certs/root.pem\n"));
}

#[test]
fn values_with_spaces_stay_single_arguments() {
    let install = FakeInstall::new();

    install
        .aisctl()
        .args(["-t", "h:1", "ingest", "-s", "front door", "-u", "/media/my clip.mp4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("arg=--stream_name=front door\n"))
        .stdout(predicate::str::contains("arg=--source_uri=/media/my clip.mp4\n"))
        .stdout(predicate::str::contains("arg=--loop_playback=false\n"));
}

#[test]
fn child_inherits_injected_environment() {
    let install = FakeInstall::new();
    let expected_plugins = install.path().join("gst-plugins");

    install
        .aisctl()
        .args(["-t", "h:1", "list_streams"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "GST_PLUGIN_PATH={}\n",
            expected_plugins.display()
        )))
        .stdout(predicate::str::contains("GLOG_alsologtostderr=1\n"));
}

#[test]
fn configured_plugin_path_reaches_child() {
    let install = FakeInstall::new();
    install.write_config("\n[environment]\ngst_plugin_path = '/usr/lib/aistreams/plugins'\n");

    install
        .aisctl()
        .args(["-t", "h:1", "list_streams"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GST_PLUGIN_PATH=/usr/lib/aistreams/plugins\n",
        ));
}

#[test]
fn configured_app_name_is_used() {
    let install = FakeInstall::empty();
    install.add_app("aistreams_manager");
    install.write_config("manager_app = 'aistreams_manager'\n");

    install
        .aisctl()
        .args(["-t", "h:1", "create", "-s", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app=aistreams_manager"));
}

#[test]
fn missing_app_fails_with_its_path() {
    let install = FakeInstall::empty();
    let expected = install.path().join("ingester_app");

    install
        .aisctl()
        .args(["-t", "h:1", "ingest", "-s", "bar", "-u", "file.mp4"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(format!(
            "ingester_app executable not found at {}",
            expected.display()
        )));
}

#[test]
fn dry_run_prints_plan_without_executing() {
    let install = FakeInstall::new();
    let manager = install.path().join("manager_app");

    install
        .aisctl()
        .args(["--dry-run", "-t", "127.0.0.1:50051", "create", "-s", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app=").not())
        .stdout(predicate::str::contains("GLOG_alsologtostderr=1\n"))
        .stdout(predicate::str::contains(format!(
            "{} --op_id=0 --ssl_root_cert_path=None --stream_name=foo \
             --target_address=127.0.0.1:50051 --use_google_managed_service=false \
             --use_insecure_channel=false\n",
            manager.display()
        )));
}

#[test]
fn dry_run_quotes_arguments_that_would_split() {
    let install = FakeInstall::new();

    install
        .aisctl()
        .args(["--dry-run", "-t", "h:1", "create", "-s", "a --op_id=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" --op_id=0 --ssl_root_cert_path=None "))
        .stdout(predicate::str::contains(" '--stream_name=a --op_id=2' --target_address=h:1 "));
}

#[test]
fn verbose_logs_the_command_to_stderr() {
    let install = FakeInstall::new();

    install
        .aisctl()
        .args(["-v", "-t", "h:1", "list_streams"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Executing command"))
        .stderr(predicate::str::contains("Setting GST_PLUGIN_PATH"));
}

#[test]
fn invalid_config_fails_before_dispatch() {
    let install = FakeInstall::new();
    std::fs::write(install.config_path(), "[apps\n").unwrap();

    install
        .aisctl()
        .args(["-t", "h:1", "list_streams"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to parse TOML"));
}
