//! CLI entrypoint for toolloop
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolloop_application::{
    ConversationLogger, LoopInput, LoopProgressNotifier, NoLoopProgress, RunReactUseCase,
    RunToolCallingUseCase, ToolExecutorPort,
};
use toolloop_domain::{
    ConfigIssue, DefaultToolValidator, LoopMode, LoopOutcome, ToolArguments, ToolValidator,
};
use toolloop_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiCompatibleGateway, ResolvedConfig,
    ToolRegistry, builtin_registry,
};
use toolloop_presentation::{Cli, ConsoleFormatter, ProgressReporter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Conventional exit status for a run stopped by Ctrl-C
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting toolloop");

    // === Configuration ===
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&cli, &mut file_config);

    let resolved = file_config
        .resolve()
        .context("Invalid configuration")?;

    if cli.show_config {
        print_config(&resolved);
        return Ok(ExitCode::SUCCESS);
    }

    // === Dependency Injection ===
    let registry = Arc::new(builtin_registry(&resolved.tools));

    if cli.list_tools {
        print!("{}", ConsoleFormatter::format_tools(registry.list_specs()));
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(tool) = &cli.tool {
        let raw = cli.args.as_deref().unwrap_or_default();
        println!("{}", run_single_tool(&registry, tool, raw).await?);
        return Ok(ExitCode::SUCCESS);
    }

    eprint!("{}", ConsoleFormatter::format_issues(&resolved.issues));
    if ConfigIssue::has_errors(&resolved.issues) {
        bail!("Configuration has errors, see above");
    }

    let Some(question) = cli.question.clone() else {
        bail!("A question is required. Use --list-tools or --tool to work with tools directly.");
    };

    let gateway = Arc::new(OpenAiCompatibleGateway::new(
        &resolved.base_url,
        resolved.api_key.clone(),
        resolved.params.gateway_timeout,
    )?);
    info!(
        provider = %resolved.provider,
        endpoint = gateway.endpoint(),
        model = %resolved.params.model,
        mode = %resolved.mode,
        "Gateway ready"
    );

    let cancellation = CancellationToken::new();
    tokio::spawn({
        let token = cancellation.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling the run");
                token.cancel();
            }
        }
    });

    let logger: Option<Arc<dyn ConversationLogger>> =
        resolved.conversation_log.as_ref().and_then(|path| {
            match JsonlConversationLogger::open(path) {
                Ok(logger) => {
                    info!(path = %path.display(), run = logger.run_id(), "Writing transcript");
                    Some(Arc::new(logger) as Arc<dyn ConversationLogger>)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Transcript disabled");
                    None
                }
            }
        });

    let progress: Box<dyn LoopProgressNotifier> = if cli.quiet {
        Box::new(NoLoopProgress)
    } else if cli.verbose > 0 {
        Box::new(ProgressReporter::verbose())
    } else {
        Box::new(ProgressReporter::new())
    };

    let input = LoopInput::new(question, resolved.params.clone());
    let result = match resolved.mode {
        LoopMode::React => {
            let mut use_case = RunReactUseCase::new(gateway, registry.clone())
                .with_cancellation(cancellation.clone());
            if let Some(logger) = logger {
                use_case = use_case.with_conversation_logger(logger);
            }
            use_case.execute_with_progress(input, progress.as_ref()).await?
        }
        LoopMode::ToolCalling => {
            let mut use_case = RunToolCallingUseCase::new(gateway, registry.clone())
                .with_cancellation(cancellation.clone());
            if let Some(logger) = logger {
                use_case = use_case.with_conversation_logger(logger);
            }
            use_case.execute_with_progress(input, progress.as_ref()).await?
        }
    };

    print!("{}", ConsoleFormatter::render(&result, cli.output.into()));

    Ok(match result.outcome {
        LoopOutcome::Cancelled => ExitCode::from(EXIT_CANCELLED),
        LoopOutcome::Answered | LoopOutcome::BudgetExhausted => ExitCode::SUCCESS,
    })
}

/// Flags take precedence over every config source.
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(provider) = cli.provider {
        config.provider.name = provider.as_str().to_string();
    }
    if let Some(model) = &cli.model {
        config.provider.model = Some(model.clone());
    }
    if let Some(mode) = cli.mode {
        config.agent.mode = mode.as_str().to_string();
    }
    if let Some(n) = cli.max_iterations {
        config.agent.max_iterations = n;
    }
    if cli.no_self_check {
        config.agent.self_check = false;
    }
    if cli.parallel_tools {
        config.agent.parallel_tool_calls = true;
    }
}

/// Execute one tool outside any loop. A JSON object is passed as structured
/// arguments and validated; anything else is passed as free text.
async fn run_single_tool(registry: &ToolRegistry, name: &str, raw: &str) -> Result<String> {
    let Some(spec) = registry.spec(name) else {
        bail!(
            "Unknown tool '{}'. Available: {}",
            name,
            registry.tool_names().join(", ")
        );
    };

    let args = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value @ serde_json::Value::Object(_)) => ToolArguments::Structured(value),
        _ => ToolArguments::text(raw),
    };
    DefaultToolValidator
        .validate(&args, spec)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(registry.execute(name, &args).await)
}

fn print_config(resolved: &ResolvedConfig) {
    for line in ConfigLoader::describe_sources() {
        println!("{}", line);
    }

    println!();
    println!("Resolved settings:");
    println!("  provider:            {}", resolved.provider);
    println!("  base_url:            {}", resolved.base_url);
    println!("  model:               {}", resolved.params.model);
    println!(
        "  api_key:             {}",
        if resolved.api_key.is_some() { "set" } else { "missing" }
    );
    println!("  mode:                {}", resolved.mode);
    println!("  max_iterations:      {}", resolved.params.budget);
    println!("  self_check:          {}", resolved.params.self_check);
    println!(
        "  timeout_seconds:     {}",
        resolved.params.gateway_timeout.as_secs()
    );
    println!(
        "  parallel_tool_calls: {}",
        resolved.params.parallel_tool_calls
    );
    let tools: Vec<String> = resolved.tools.iter().map(|t| t.to_string()).collect();
    println!("  tools:               {}", tools.join(", "));
    if let Some(path) = &resolved.conversation_log {
        println!("  conversation_log:    {}", path.display());
    }

    if !resolved.issues.is_empty() {
        println!();
        print!("{}", ConsoleFormatter::format_issues(&resolved.issues));
    }
}
