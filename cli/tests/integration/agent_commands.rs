//! End-to-end tests against fake `ssh-agent` / `ssh-add` scripts.
//!
//! Each test puts shell scripts on `PATH` that log their arguments, the
//! relevant environment, and stdin to files in a temp directory. Exit codes
//! are scripted through `FAKE_*` environment variables.

#![cfg(unix)]
#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

const FAKE_SSH_AGENT: &str = r#"#!/bin/sh
echo "ssh-agent $*" >> "$FAKE_DIR/calls.log"
if [ "$1" = "-k" ]; then
    exit "${FAKE_KILL_CODE:-0}"
fi
echo "SSH_AUTH_SOCK=/tmp/fake-agent.sock; export SSH_AUTH_SOCK;"
echo "SSH_AGENT_PID=4242; export SSH_AGENT_PID;"
echo "echo Agent pid 4242;"
exit "${FAKE_START_CODE:-0}"
"#;

const FAKE_SSH_ADD: &str = r#"#!/bin/sh
echo "ssh-add $*" >> "$FAKE_DIR/calls.log"
case "$1" in
    -l) exit "${FAKE_LIST_CODE:-0}" ;;
    -D) exit "${FAKE_DELETE_CODE:-0}" ;;
esac
printf '%s' "${SSH_AUTH_SOCK:-}" > "$FAKE_DIR/add.sock"
printf '%s' "${SSH_ASKPASS:-}" > "$FAKE_DIR/add.askpass"
cat > "$FAKE_DIR/add.stdin"
if [ -f "$1" ]; then
    cp "$1" "$FAKE_DIR/add.key"
    ls -l "$1" | cut -c1-10 > "$FAKE_DIR/add.mode"
fi
exit "${FAKE_ADD_CODE:-0}"
"#;

/// Temp directory holding the fake binaries and everything they record.
struct FakeOpenSsh {
    dir: TempDir,
}

impl FakeOpenSsh {
    fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        for (name, body) in [("ssh-agent", FAKE_SSH_AGENT), ("ssh-add", FAKE_SSH_ADD)] {
            let path = dir.path().join(name);
            std::fs::write(&path, body).expect("write script");
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("chmod");
        }
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sshkey-agent"));
        cmd.env("NO_COLOR", "1")
            .env("PATH", format!("{}:/usr/bin:/bin", self.path().display()))
            .env("FAKE_DIR", self.path())
            .env_remove("SSH_AUTH_SOCK")
            .env_remove("SSH_AGENT_PID")
            .env_remove("SSHKEY_AGENT_SOCKET")
            .env_remove("SSHKEY_AGENT_VERBOSE");
        cmd
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path().join(name)).unwrap_or_default()
    }

    fn calls(&self) -> Vec<String> {
        self.read("calls.log").lines().map(String::from).collect()
    }
}

// --- start ---

#[test]
#[serial]
fn test_start_prints_agent_output_on_stdout() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("SSH_AUTH_SOCK=/tmp/fake-agent.sock;"))
        .stderr(predicate::str::contains("$ ssh-agent"));
    assert_eq!(fake.calls(), vec!["ssh-agent "]);
}

#[test]
#[serial]
fn test_start_print_env_emits_exports_only() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .args(["start", "--print-env"])
        .assert()
        .success()
        .stdout("export SSH_AUTH_SOCK=/tmp/fake-agent.sock\nexport SSH_AGENT_PID=4242\n");
}

#[test]
#[serial]
fn test_start_failure_exits_non_zero() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .arg("start")
        .env("FAKE_START_CODE", "3")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ssh-agent"));
}

#[test]
#[serial]
fn test_missing_binary_reports_launch_failure() {
    let empty = TempDir::new().expect("tempdir");
    Command::new(assert_cmd::cargo::cargo_bin!("sshkey-agent"))
        .env("NO_COLOR", "1")
        .env("PATH", empty.path())
        .arg("start")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to launch ssh-agent"));
}

// --- list / kill ---

#[test]
#[serial]
fn test_list_exit_code_passes_through() {
    let fake = FakeOpenSsh::new();
    for code in [0, 1, 2] {
        fake.cmd()
            .arg("list")
            .env("FAKE_LIST_CODE", code.to_string())
            .assert()
            .code(code);
    }
    assert!(fake.calls().iter().all(|c| c == "ssh-add -l"));
}

#[test]
#[serial]
fn test_kill_without_agent_returns_code() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .arg("kill")
        .env("FAKE_KILL_CODE", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no ssh-agent was stopped"));
    assert_eq!(fake.calls(), vec!["ssh-agent -k"]);
}

#[test]
#[serial]
fn test_quiet_hides_command_echo() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .args(["-q", "list"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// --- add ---

#[test]
#[serial]
fn test_add_feeds_nopass_through_cat_askpass() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .args(["add", "/nonexistent/id_rsa", "--socket", "/tmp/explicit.sock"])
        .assert()
        .success();

    assert_eq!(fake.calls(), vec!["ssh-add /nonexistent/id_rsa"]);
    assert_eq!(fake.read("add.sock"), "/tmp/explicit.sock");
    assert_eq!(fake.read("add.askpass"), "cat");
    assert_eq!(fake.read("add.stdin"), "nopass");
}

#[test]
#[serial]
fn test_add_without_socket_keeps_inherited_sock() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .args(["add", "/k"])
        .env("SSH_AUTH_SOCK", "/tmp/ambient.sock")
        .assert()
        .success();
    assert_eq!(fake.read("add.sock"), "/tmp/ambient.sock");
}

#[test]
#[serial]
fn test_add_path_with_spaces_is_one_argument() {
    let fake = FakeOpenSsh::new();
    let key_dir = fake.path().join("my keys");
    std::fs::create_dir_all(&key_dir).expect("mkdir");
    let key = key_dir.join("id; rm -rf x");
    std::fs::write(&key, "KEY\n").expect("write key");

    fake.cmd().arg("add").arg(&key).assert().success();
    assert_eq!(fake.read("add.key"), "KEY\n");
}

#[test]
#[serial]
fn test_add_rejected_key_reports_empty_passphrase() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .args(["add", "/k"])
        .env("FAKE_ADD_CODE", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Exit code: 1"))
        .stderr(predicate::str::contains("empty passphrase"));
}

// --- delete ---

#[test]
#[serial]
fn test_delete_runs_ssh_add_d() {
    let fake = FakeOpenSsh::new();
    fake.cmd().arg("delete").assert().success();
    fake.cmd()
        .arg("delete")
        .env("FAKE_DELETE_CODE", "1")
        .assert()
        .code(1);
    assert_eq!(fake.calls(), vec!["ssh-add -D", "ssh-add -D"]);
}

// --- activate ---

#[test]
#[serial]
fn test_activate_reuses_reachable_agent() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .args(["activate", "--key-file", "/k"])
        .env("FAKE_LIST_CODE", "1")
        .env("SSH_AUTH_SOCK", "/tmp/ambient.sock")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fake.calls(), vec!["ssh-add -l", "ssh-add /k"]);
    assert_eq!(fake.read("add.sock"), "/tmp/ambient.sock");
}

#[test]
#[serial]
fn test_activate_starts_agent_and_writes_private_key() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .args(["activate", "--key-env", "DEPLOY_KEY"])
        .env("DEPLOY_KEY", "-----BEGIN KEY-----\nabc\n-----END KEY-----")
        .env("FAKE_LIST_CODE", "2")
        .assert()
        .success()
        .stdout("export SSH_AUTH_SOCK=/tmp/fake-agent.sock\nexport SSH_AGENT_PID=4242\n");

    let calls = fake.calls();
    assert_eq!(calls.len(), 3, "calls: {calls:?}");
    assert_eq!(calls[0], "ssh-add -l");
    assert_eq!(calls[1], "ssh-agent ");
    assert!(calls[2].ends_with("/id_rsa"), "calls: {calls:?}");
    assert_eq!(fake.read("add.sock"), "/tmp/fake-agent.sock");
    assert_eq!(
        fake.read("add.key"),
        "-----BEGIN KEY-----\nabc\n-----END KEY-----\n"
    );
    assert_eq!(fake.read("add.mode").trim(), "-rw-------");
}

#[test]
#[serial]
fn test_activate_remove_other_identities_restarts_agent() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .args(["activate", "--key-file", "/k", "--remove-other-identities"])
        .env("FAKE_KILL_CODE", "1")
        .assert()
        .success();

    assert_eq!(fake.calls(), vec!["ssh-agent -k", "ssh-agent ", "ssh-add /k"]);
}

#[test]
#[serial]
fn test_activate_missing_key_env_fails() {
    let fake = FakeOpenSsh::new();
    fake.cmd()
        .args(["activate", "--key-env", "SSHKEY_AGENT_TEST_UNSET_VAR"])
        .env_remove("SSHKEY_AGENT_TEST_UNSET_VAR")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SSHKEY_AGENT_TEST_UNSET_VAR"));
    assert!(fake.calls().is_empty());
}
