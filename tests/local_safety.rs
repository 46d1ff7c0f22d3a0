// Tests for todo.txt storage, configuration and the command-line runner.
use chrono::NaiveDate;
use std::fs;
use todotxt::cli::{self, Command};
use todotxt::config::Config;
use todotxt::context::{AppContext, TestContext};
use todotxt::model::{Priority, Sort};
use todotxt::storage::LocalStorage;
use todotxt::store::TaskBag;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn run(ctx: &TestContext, config: &Config, command: Command) -> String {
    let mut out = Vec::new();
    cli::run(ctx, config, &command, date(2024, 6, 15), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_missing_todo_file_loads_empty() {
    let ctx = TestContext::new();
    let bag = TaskBag::load(&ctx.get_todo_file_path().unwrap()).unwrap();
    assert!(bag.is_empty());
}

#[test]
fn test_save_and_load_roundtrip_skips_deleted() {
    let ctx = TestContext::new();
    let path = ctx.get_todo_file_path().unwrap();
    let mut bag = TaskBag::from_lines(["(A) Call mom", "Buy milk", "x Pay rent"]);
    bag.delete(2).unwrap();
    bag.save(&path, date(2024, 6, 15)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "(A) Call mom\nx 2024-06-15 Pay rent\n");

    let loaded = TaskBag::load(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get(2).unwrap().text(), "Pay rent");
}

#[test]
fn test_load_ignores_blank_lines_and_crlf() {
    let ctx = TestContext::new();
    let path = ctx.seed_todo("(B) one\r\n\r\ntwo @home\r\n").unwrap();
    let bag = TaskBag::load(&path).unwrap();
    assert_eq!(bag.len(), 2);
    assert_eq!(bag.get(1).unwrap().priority(), Priority::B);
    assert_eq!(bag.get(2).unwrap().contexts().to_vec(), vec!["@home"]);
}

#[test]
fn test_append_adds_missing_newline() {
    let ctx = TestContext::new();
    let path = ctx.get_done_file_path().unwrap();
    fs::write(&path, "x 2024-01-01 old").unwrap();
    let bag = TaskBag::from_lines(["x 2024-02-02 new"]);
    LocalStorage::append(&path, bag.tasks(), date(2024, 6, 15)).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "x 2024-01-01 old\nx 2024-02-02 new\n"
    );
}

#[test]
fn test_config_missing_then_saved() {
    let ctx = TestContext::new();
    let err = Config::load(&ctx).unwrap_err();
    assert!(Config::is_missing_config_error(&err));
    assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());

    let config = Config {
        sort: Sort::TextAscending,
        prepend_date: false,
        done_file: Some("/tmp/elsewhere/done.txt".to_string()),
        ..Config::default()
    };
    config.save(&ctx).unwrap();
    assert_eq!(Config::load(&ctx).unwrap(), config);
}

#[test]
fn test_config_partial_file_uses_defaults() {
    let ctx = TestContext::new();
    fs::write(ctx.get_config_file_path().unwrap(), "sort = \"id-descending\"\n").unwrap();
    let config = Config::load(&ctx).unwrap();
    assert_eq!(config.sort, Sort::IdDescending);
    assert!(config.prepend_date);
    assert!(config.show_date);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.todo_file, None);
}

#[test]
fn test_config_accepts_short_sort_names() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    for (name, expected) in [
        ("id", Sort::IdAscending),
        ("id-desc", Sort::IdDescending),
        ("text", Sort::TextAscending),
        ("priority", Sort::Priority),
    ] {
        fs::write(&path, format!("sort = \"{}\"\n", name)).unwrap();
        assert_eq!(Config::load(&ctx).unwrap().sort, expected, "sort = {}", name);
        assert_eq!(Config::load_or_default(&ctx).unwrap().sort, expected);
    }
}

#[test]
fn test_config_parse_error_is_not_missing() {
    let ctx = TestContext::new();
    fs::write(ctx.get_config_file_path().unwrap(), "sort = [").unwrap();
    let err = Config::load(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    assert!(Config::load_or_default(&ctx).is_err());
}

#[test]
fn test_parse_args() {
    let inv = cli::parse_args(&args(&["--root", "/tmp/r", "add", "(A)", "Call", "mom"])).unwrap();
    assert_eq!(inv.root.as_deref(), Some(std::path::Path::new("/tmp/r")));
    assert_eq!(inv.command, Command::Add("(A) Call mom".to_string()));

    let inv = cli::parse_args(&[]).unwrap();
    assert_eq!(
        inv.command,
        Command::List {
            sort: None,
            term: String::new()
        }
    );

    let inv = cli::parse_args(&args(&["list", "--sort", "text", "@home"])).unwrap();
    assert_eq!(
        inv.command,
        Command::List {
            sort: Some(Sort::TextAscending),
            term: "@home".to_string()
        }
    );

    let inv = cli::parse_args(&args(&["pri", "3", "b"])).unwrap();
    assert_eq!(inv.command, Command::Pri(3, Priority::B));

    assert!(cli::parse_args(&args(&["do", "abc"])).is_err());
    assert!(cli::parse_args(&args(&["add"])).is_err());
    assert!(cli::parse_args(&args(&["pri", "1", "AB"])).is_err());
    assert!(cli::parse_args(&args(&["frobnicate"])).is_err());
}

#[test]
fn test_cli_add_do_archive_flow() {
    let ctx = TestContext::new();
    let config = Config::default();

    let out = run(&ctx, &config, Command::Add("(A) Call mom @phone".to_string()));
    assert_eq!(out, "1 (A) 2024-06-15 Call mom @phone\n");
    run(&ctx, &config, Command::Add("Buy milk +home".to_string()));

    let listing = run(
        &ctx,
        &config,
        Command::List {
            sort: None,
            term: String::new(),
        },
    );
    assert!(listing.starts_with("  1 (A) Call mom @phone  [today]\n"));
    assert!(listing.ends_with("2 of 2 tasks shown\n"));

    run(&ctx, &config, Command::Do(1));
    let todo = fs::read_to_string(ctx.get_todo_file_path().unwrap()).unwrap();
    assert_eq!(
        todo,
        "x 2024-06-15 2024-06-15 Call mom @phone\n2024-06-15 Buy milk +home\n"
    );

    assert_eq!(run(&ctx, &config, Command::Projects), "+home\n");
    assert_eq!(run(&ctx, &config, Command::Archive), "Archived 1 tasks\n");
    assert_eq!(
        fs::read_to_string(ctx.get_done_file_path().unwrap()).unwrap(),
        "x 2024-06-15 2024-06-15 Call mom @phone\n"
    );
    assert_eq!(
        fs::read_to_string(ctx.get_todo_file_path().unwrap()).unwrap(),
        "2024-06-15 Buy milk +home\n"
    );
}

#[test]
fn test_cli_respects_prepend_date_setting() {
    let ctx = TestContext::new();
    let config = Config {
        prepend_date: false,
        ..Config::default()
    };
    let out = run(&ctx, &config, Command::Add("Call mom".to_string()));
    assert_eq!(out, "1 Call mom\n");
}

#[test]
fn test_cli_unknown_id_fails_without_writing() {
    let ctx = TestContext::new();
    let config = Config::default();
    let mut out = Vec::new();
    let result = cli::run(&ctx, &config, &Command::Del(3), date(2024, 6, 15), &mut out);
    assert!(result.is_err());
    assert!(!ctx.get_todo_file_path().unwrap().exists());
}
