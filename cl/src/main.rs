use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crawlog::cli::{Cli, Command, OutputFormat};
use crawlog::config::Config;
use crawlog::{
    BINDINGS, Crawler, HostSettings, LogSink, LoggerOptions, Render, Severity, SimulationPlan, plugin,
    simulate, stdout_out,
};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > WARN
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => s
            .parse::<log::LevelFilter>()
            .map_err(|_| eyre::eyre!("Unknown log-level '{}'", s))?,
        None => log::LevelFilter::Warn,
    };

    env_logger::Builder::from_default_env().filter_level(level).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load once; a bad file is reported after logging is up
    let loaded = Config::load(cli.config.as_ref());
    let config_log_level = loaded.as_ref().ok().and_then(|c| c.log_level.as_deref());
    setup_logging(cli.log_level.as_deref(), config_log_level).context("Failed to setup logging")?;

    let config = loaded.context("Failed to load configuration")?;
    info!("crawlog starting");

    debug!("main: dispatching {:?}", cli.command);
    match cli.command {
        Command::Simulate {
            name,
            urls,
            max_retries,
            level,
            color,
            no_page_log,
            seed,
        } => {
            let mut flags = LoggerOptions::new();
            flags.level = level;
            flags.color = color;
            if no_page_log {
                flags.page_log = Some(false);
            }
            let options = flags.or(config.logger);

            let settings = HostSettings {
                max_retries: max_retries.or(config.crawler.max_retries),
            };
            let mut crawler =
                Crawler::new(name.unwrap_or(config.crawler.name)).with_settings(settings);
            crawler.use_plugin(plugin(options));

            let plan = SimulationPlan::with_urls(urls.unwrap_or(config.crawler.urls));
            let mut rng = match seed.or(config.crawler.seed) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let summary = simulate(&mut crawler, &plan, &mut rng);
            info!("simulate finished: {:?}", summary);
        }
        Command::Render {
            level,
            message,
            name,
            color,
        } => {
            let severity: Severity = level.parse()?;
            let mut options = LoggerOptions::new();
            options.name = name;
            options.color = color;
            let config = options.or(config.logger).resolve(&Default::default());
            let sink = LogSink::from_config(&config);
            (stdout_out())(&sink.render(severity, &message)).context("Failed to write line")?;
        }
        Command::Events { format } => match format {
            OutputFormat::Json => {
                let rows: Vec<_> = BINDINGS
                    .iter()
                    .map(|b| {
                        serde_json::json!({
                            "event": b.kind,
                            "severity": b.severity,
                            "cardinality": b.cardinality,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            OutputFormat::Text => {
                for binding in BINDINGS {
                    let severity = binding.severity.as_str();
                    println!(
                        "{:<12} {}{} {:?}",
                        binding.kind.as_str().cyan(),
                        severity.color(binding.severity.color()),
                        " ".repeat(crawlog::LEVEL_WIDTH - severity.len()),
                        binding.cardinality
                    );
                }
            }
        },
    }

    Ok(())
}
