use anyhow::Result;
use chrono::Local;
use std::env;
use todotxt::cli;
use todotxt::config::Config;
use todotxt::context::StandardContext;
use todotxt::logging;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = cli::parse_args(&args)?;

    let ctx = StandardContext::new(invocation.root.clone());
    let config = Config::load_or_default(&ctx)?;

    // Logging is best-effort; the command still runs without it.
    if let Err(e) = logging::init_logging(&ctx, &config.log_level) {
        eprintln!("Warning: {}", e);
    }

    let today = Local::now().date_naive();
    let mut stdout = std::io::stdout().lock();
    cli::run(&ctx, &config, &invocation.command, today, &mut stdout)
}
