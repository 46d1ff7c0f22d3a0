// File: ./src/cli.rs
//! Command-line parsing and execution for the `todotxt` binary.
use crate::config::Config;
use crate::context::AppContext;
use crate::model::{Priority, Sort, TaskRow};
use crate::store::TaskBag;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { sort: Option<Sort>, term: String },
    Add(String),
    Do(usize),
    Undo(usize),
    Pri(usize, Priority),
    Del(usize),
    Archive,
    Contexts,
    Projects,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: Option<PathBuf>,
    pub command: Command,
}

fn parse_id(arg: Option<&String>) -> Result<usize> {
    let raw = arg.ok_or_else(|| anyhow::anyhow!("Missing task id"))?;
    raw.parse::<usize>()
        .with_context(|| format!("Invalid task id '{}'", raw))
}

/// Parses arguments without the binary name.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut root = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--root" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow::anyhow!("--root requires a path"))?;
                root = Some(PathBuf::from(path));
                i += 2;
            }
            _ => break,
        }
    }

    let rest = &args[i..];
    let command = match rest.first().map(String::as_str) {
        None | Some("list") | Some("ls") => {
            let mut sort = None;
            let mut words = Vec::new();
            let mut j = 1;
            while j < rest.len() {
                if rest[j] == "--sort" || rest[j] == "-s" {
                    let key = rest
                        .get(j + 1)
                        .ok_or_else(|| anyhow::anyhow!("--sort requires a value"))?;
                    sort = Some(key.parse::<Sort>()?);
                    j += 2;
                } else {
                    words.push(rest[j].as_str());
                    j += 1;
                }
            }
            Command::List {
                sort,
                term: words.join(" "),
            }
        }
        Some("add" | "a") => {
            let text = rest[1..].join(" ");
            if text.trim().is_empty() {
                anyhow::bail!("Nothing to add");
            }
            Command::Add(text)
        }
        Some("do") => Command::Do(parse_id(rest.get(1))?),
        Some("undo") => Command::Undo(parse_id(rest.get(1))?),
        Some("pri" | "p") => {
            let id = parse_id(rest.get(1))?;
            let p = rest
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing priority"))?
                .parse::<Priority>()?;
            Command::Pri(id, p)
        }
        Some("del" | "rm") => Command::Del(parse_id(rest.get(1))?),
        Some("archive") => Command::Archive,
        Some("contexts" | "lsc") => Command::Contexts,
        Some("projects" | "lsprj") => Command::Projects,
        Some("-h" | "--help" | "help") => Command::Help,
        Some(other) => anyhow::bail!("Unknown command '{}'. Try --help", other),
    };

    Ok(Invocation { root, command })
}

/// Executes one command against the configured todo file.
pub fn run(
    ctx: &dyn AppContext,
    config: &Config,
    command: &Command,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<()> {
    let todo_path = config.todo_path(ctx)?;

    if let Command::Help = command {
        print_help(out, "todotxt")?;
        return Ok(());
    }

    let mut bag = TaskBag::load(&todo_path)?;

    match command {
        Command::List { sort, term } => {
            let sort = sort.unwrap_or(config.sort);
            let shown = bag.search(sort, term);
            for task in &shown {
                writeln!(out, "{}", TaskRow::new(task, today, config.show_date).to_line())?;
            }
            writeln!(out, "--")?;
            writeln!(out, "{} of {} tasks shown", shown.len(), bag.len())?;
            return Ok(());
        }
        Command::Add(text) => {
            let created = config.prepend_date.then_some(today);
            let task = bag.add(text, created);
            writeln!(out, "{} {}", task.id(), task.in_file_format(today))?;
        }
        Command::Do(id) => {
            bag.complete(*id, today)?;
            writeln!(out, "Task {} marked as done", id)?;
        }
        Command::Undo(id) => {
            bag.uncomplete(*id)?;
            writeln!(out, "Task {} marked as not done", id)?;
        }
        Command::Pri(id, p) => {
            bag.set_priority(*id, *p)?;
            if p.is_set() {
                writeln!(out, "Task {} prioritized ({})", id, p)?;
            } else {
                writeln!(out, "Task {} priority removed", id)?;
            }
        }
        Command::Del(id) => {
            bag.delete(*id)?;
            writeln!(out, "Task {} deleted", id)?;
        }
        Command::Archive => {
            let done_path = config.done_path(ctx)?;
            let moved = bag.archive_to(&todo_path, &done_path, today)?;
            writeln!(out, "Archived {} tasks", moved)?;
            return Ok(());
        }
        Command::Contexts => {
            for c in bag.contexts() {
                writeln!(out, "{}", c)?;
            }
            return Ok(());
        }
        Command::Projects => {
            for p in bag.projects() {
                writeln!(out, "{}", p)?;
            }
            return Ok(());
        }
        Command::Help => return Ok(()),
    }

    bag.save(&todo_path, today)
}

pub fn print_help(out: &mut dyn Write, binary_name: &str) -> Result<()> {
    writeln!(
        out,
        "todotxt v{} - todo.txt task manager",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;
    writeln!(out, "USAGE:")?;
    writeln!(out, "    {} [--root <path>] <command> [args]", binary_name)?;
    writeln!(out)?;
    writeln!(out, "COMMANDS:")?;
    writeln!(out, "    list [--sort <mode>] [term]   List tasks, optionally filtered")?;
    writeln!(out, "    add <text>                    Add a task")?;
    writeln!(out, "    do <id>                       Mark a task as done")?;
    writeln!(out, "    undo <id>                     Mark a task as not done")?;
    writeln!(out, "    pri <id> <A-Z|none>           Set or clear the priority")?;
    writeln!(out, "    del <id>                      Delete a task")?;
    writeln!(out, "    archive                       Move done tasks to done.txt")?;
    writeln!(out, "    contexts | projects           List tags in use")?;
    writeln!(out)?;
    writeln!(out, "OPTIONS:")?;
    writeln!(out, "    -r, --root <path>     Use a different directory for config and data.")?;
    writeln!(out, "    -h, --help            Show this help message.")?;
    writeln!(out)?;
    writeln!(out, "SORT MODES:")?;
    writeln!(out, "    priority, id, id-desc, text")?;
    writeln!(out)?;
    writeln!(out, "LINE FORMAT:")?;
    writeln!(out, "    x 2024-01-02 2024-01-01 Done task +project @context")?;
    writeln!(out, "    (A) 2024-01-01 Open task +project @context")?;
    Ok(())
}
