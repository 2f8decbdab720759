use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;

fn addnew() -> Command {
    let mut cmd = Command::cargo_bin("addnew").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn file_with(temp: &TempDir, name: &str, contents: &str) -> assert_fs::fixture::ChildPath {
    let f = temp.child(name);
    f.write_str(contents).unwrap();
    f
}

#[test]
fn without_a_file_new_lines_are_just_echoed() {
    addnew().write_stdin("a\nb\na\n").assert().success().stdout("a\nb\n");
}

#[test]
fn more_than_one_file_is_an_error() {
    addnew().args(["one.txt", "two.txt"]).write_stdin("").assert().failure();
}

#[test]
fn new_lines_are_appended_and_echoed() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "x\ny\n");
    addnew()
        .arg(list.path())
        .write_stdin("x\nz\ny\nw\nz\n")
        .assert()
        .success()
        .stdout("z\nw\n");
    list.assert("x\ny\nz\nw\n");
}

#[test]
fn a_second_identical_run_adds_nothing() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n");
    let input = "b\nc\nb\na\n";
    addnew().arg(list.path()).write_stdin(input).assert().success().stdout("b\nc\n");
    addnew().arg(list.path()).write_stdin(input).assert().success().stdout("");
    list.assert("a\nb\nc\n");
}

#[test]
fn a_missing_file_is_created() {
    let temp = TempDir::new().unwrap();
    let list = temp.child("new.txt");
    addnew().arg(list.path()).write_stdin("one\none\ntwo\n").assert().success();
    list.assert("one\ntwo\n");
}

#[test]
fn quiet_mode_still_appends() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "");
    addnew().arg("-q").arg(list.path()).write_stdin("a\n").assert().success().stdout("");
    list.assert("a\n");
}

#[test]
fn a_dry_run_leaves_the_file_alone() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n");
    addnew()
        .args(["-d", "-c"])
        .arg(list.path())
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout("b\n")
        .stderr(predicate::str::contains("New unique lines (dry run): 1"))
        .stderr(predicate::str::contains("appended").not());
    list.assert("a\n");
}

#[test]
fn a_dry_run_never_creates_the_file() {
    let temp = TempDir::new().unwrap();
    let list = temp.child("never.txt");
    addnew().arg("-d").arg(list.path()).write_stdin("a\n").assert().success();
    list.assert(predicate::path::missing());
}

#[test]
fn the_original_line_is_written_but_keys_are_compared() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "foo\n");
    addnew()
        .args(["-t", "-i"])
        .arg(list.path())
        .write_stdin("  Foo\n  Bar\n")
        .assert()
        .success()
        .stdout("  Bar\n");
    list.assert("foo\n  Bar\n");
}

#[test]
fn trim_and_ignore_case_scenario_with_counts() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "x\ny\n");
    addnew()
        .args(["-t", "-i", "-c", "--color=never"])
        .arg(list.path())
        .write_stdin("x\nz\nz\n  Z\n")
        .assert()
        .success()
        .stdout("z\n")
        .stderr(predicate::str::contains("Lines read from stdin: 4"))
        .stderr(predicate::str::contains("Duplicate lines found: 3"))
        .stderr(predicate::str::contains("New unique lines output: 1"))
        .stderr(predicate::str::contains("Lines appended to file: 1"));
}

#[test]
fn ignored_blank_lines_are_not_duplicates() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n\n");
    addnew()
        .args(["-B", "-c", "--color=never"])
        .arg(list.path())
        .write_stdin("\nb\n\n")
        .assert()
        .success()
        .stdout("b\n")
        .stderr(predicate::str::contains("Blank lines skipped: 2"))
        .stderr(predicate::str::contains("Duplicate lines found: 0"));
    list.assert("a\n\nb\n");
}

#[test]
fn counts_are_only_printed_on_request() {
    addnew()
        .write_stdin("a\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Statistics").not());
}

#[test]
fn backup_copies_the_file_before_appending() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n");
    addnew()
        .arg("--backup")
        .arg(list.path())
        .write_stdin("b\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Backed up"));
    temp.child("list.txt.bak").assert("a\n");
    list.assert("a\nb\n");
}

#[test]
fn backup_takes_an_optional_suffix() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n");
    addnew().arg("--backup=.orig").arg(list.path()).write_stdin("b\n").assert().success();
    temp.child("list.txt.orig").assert("a\n");
    temp.child("list.txt.bak").assert(predicate::path::missing());
}

#[test]
fn backup_is_skipped_when_writing_elsewhere() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n");
    let other = temp.child("other.txt");
    addnew()
        .arg("--backup")
        .arg("-o")
        .arg(other.path())
        .arg(list.path())
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout("b\n");
    temp.child("list.txt.bak").assert(predicate::path::missing());
    temp.child("other.txt.bak").assert(predicate::path::missing());
    list.assert("a\n");
    other.assert("b\n");
}

#[test]
fn backup_of_a_missing_file_is_not_needed() {
    let temp = TempDir::new().unwrap();
    let list = temp.child("list.txt");
    addnew().arg("--backup").arg(list.path()).write_stdin("a\n").assert().success();
    temp.child("list.txt.bak").assert(predicate::path::missing());
    list.assert("a\n");
}

#[test]
fn a_failed_backup_stops_before_appending() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n");
    temp.child("list.txt.bak").create_dir_all().unwrap();
    addnew().arg("--backup").arg(list.path()).write_stdin("b\n").assert().failure();
    list.assert("a\n");
}

#[test]
fn an_unopenable_output_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let nowhere = temp.child("no/such/dir/list.txt");
    addnew()
        .arg("-o")
        .arg(nowhere.path())
        .write_stdin("a\n")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn crlf_files_get_crlf_lines() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\r\nb\r\n");
    addnew().arg(list.path()).write_stdin("b\r\nc\r\n").assert().success().stdout("c\n");
    list.assert("a\r\nb\r\nc\r\n");
}

#[test]
fn an_unterminated_last_line_is_completed() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\nb");
    addnew().arg(list.path()).write_stdin("c\n").assert().success();
    list.assert("a\nb\nc\n");
}

#[test]
fn the_output_file_defaults_to_the_input_file_but_can_be_separate() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n");
    let other = file_with(&temp, "other.txt", "z\n");
    addnew()
        .arg("-o")
        .arg(other.path())
        .arg(list.path())
        .write_stdin("a\nz\nq\n")
        .assert()
        .success()
        .stdout("z\nq\n");
    other.assert("z\nz\nq\n");
}

#[test]
fn a_dry_run_still_takes_the_requested_backup() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n");
    addnew().args(["-d", "--backup"]).arg(list.path()).write_stdin("b\n").assert().success();
    temp.child("list.txt.bak").assert("a\n");
    list.assert("a\n");
}

#[test]
fn utf_16_input_is_read_as_utf8() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "crab\n");
    let mut input = b"\xff\xfe".to_vec();
    for b in "crab\ngopher\n".bytes() {
        input.push(b);
        input.push(0);
    }
    addnew().arg(list.path()).write_stdin(input).assert().success().stdout("gopher\n");
    list.assert("crab\ngopher\n");
}

#[cfg(unix)]
#[test]
fn new_lines_can_be_appended_to_a_fifo() {
    let temp = TempDir::new().unwrap();
    let fifo = temp.child("pipe");
    let made = std::process::Command::new("mkfifo").arg(fifo.path()).status().unwrap();
    assert!(made.success());

    let path = fifo.path().to_path_buf();
    let reader = std::thread::spawn(move || std::fs::read(path).unwrap());
    addnew().arg("-q").arg("-o").arg(fifo.path()).write_stdin("a\nb\n").assert().success();
    assert_eq!(reader.join().unwrap(), b"a\nb\n");
}

#[test]
fn backup_sees_through_a_different_spelling_of_the_file() {
    let temp = TempDir::new().unwrap();
    let list = file_with(&temp, "list.txt", "a\n");
    addnew()
        .current_dir(temp.path())
        .args(["--backup", "-o", "./list.txt", "list.txt"])
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout("b\n");
    temp.child("list.txt.bak").assert("a\n");
    list.assert("a\nb\n");
}
