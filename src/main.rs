//! augur CLI: certainty-factor expert system engine.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use augur::banding;
use augur::engine::{Engine, EngineConfig};
use augur::evidence::{Assertion, EvidenceStore};
use augur::kb::KnowledgeBase;
use augur::seeds;

#[derive(Parser)]
#[command(name = "augur", version, about = "Certainty-factor expert system engine")]
struct Cli {
    /// Engine configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum inference passes before giving up on convergence.
    #[arg(long, global = true)]
    max_passes: Option<usize>,

    /// Convergence tolerance for the fixpoint check.
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a rules file, reporting the first malformed line.
    Check {
        /// Path to the rules file.
        file: PathBuf,
    },

    /// List the rules, evidence conditions, and hypotheses of a rules file.
    Rules {
        /// Path to the rules file.
        file: PathBuf,

        /// Emit the parsed rules as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run inference over a rules file with asserted evidence.
    Infer {
        /// Path to the rules file.
        file: PathBuf,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Run inference against the bundled weather demo rules.
    Demo {
        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(Args)]
struct SessionArgs {
    /// Evidence assertion, e.g. "today is rain = 1.0". Repeatable.
    #[arg(long = "assert", value_name = "SUBJECT is STATE = CF")]
    assertions: Vec<String>,

    /// JSON evidence file: an array of {"subject", "state", "cf"} entries.
    #[arg(long)]
    evidence: Option<PathBuf>,

    /// Emit the full inference result as JSON.
    #[arg(long)]
    json: bool,

    /// Show which rules fired for each hypothesis.
    #[arg(long)]
    explain: bool,

    /// Append natural-language certainty labels.
    #[arg(long)]
    labels: bool,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Check { file } => {
            let text = std::fs::read_to_string(&file).into_diagnostic()?;
            let kb = KnowledgeBase::parse(&text)?;
            println!(
                "ok: {} rules, {} hypotheses in {}",
                kb.len(),
                kb.hypotheses().len(),
                file.display()
            );
        }

        Commands::Rules { file, json } => {
            let text = std::fs::read_to_string(&file).into_diagnostic()?;
            let kb = KnowledgeBase::parse(&text)?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(kb.rules()).into_diagnostic()?
                );
            } else {
                for (index, rule) in kb.rules().iter().enumerate() {
                    println!("{:>3}  {rule}", index + 1);
                }
                println!();
                println!("evidence conditions:");
                for condition in kb.antecedent_conditions() {
                    println!("  {condition}");
                }
                println!("hypotheses:");
                for hypothesis in kb.hypotheses() {
                    println!("  {hypothesis}");
                }
            }
        }

        Commands::Infer { file, session } => {
            let text = std::fs::read_to_string(&file).into_diagnostic()?;
            let (kb, skipped) = KnowledgeBase::parse_lossy(&text);
            for error in &skipped {
                tracing::warn!("skipping malformed rule line: {error}");
            }
            run_session(kb, config, session)?;
        }

        Commands::Demo { session } => {
            let kb = seeds::weather()?;
            run_session(kb, config, session)?;
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(max_passes) = cli.max_passes {
        config.max_passes = max_passes;
    }
    if let Some(tolerance) = cli.tolerance {
        config.tolerance = tolerance;
    }
    Ok(config)
}

fn run_session(kb: KnowledgeBase, config: EngineConfig, args: SessionArgs) -> Result<()> {
    let mut evidence = EvidenceStore::new();

    if let Some(path) = &args.evidence {
        let text = std::fs::read_to_string(path).into_diagnostic()?;
        let entries: Vec<Assertion> = serde_json::from_str(&text).into_diagnostic()?;
        for entry in &entries {
            evidence.apply(entry)?;
        }
    }

    for raw in &args.assertions {
        let assertion: Assertion = raw.parse()?;
        evidence.apply(&assertion)?;
    }

    let engine = Engine::new(kb, config)?;
    let inference = engine.infer(&evidence);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&inference).into_diagnostic()?
        );
        return Ok(());
    }

    for (hypothesis, cf) in &inference.certainties {
        if args.labels {
            println!("{hypothesis}  {:+.4}  ({})", cf.get(), banding::label(*cf));
        } else {
            println!("{hypothesis}  {:+.4}", cf.get());
        }

        if args.explain {
            for firing in inference.fired().filter(|f| &f.consequent == hypothesis) {
                let rule = &engine.kb().rules()[firing.rule_index];
                println!(
                    "     rule {}: {rule}  [antecedent {:+.4}, fired {:+.4}]",
                    firing.rule_index + 1,
                    firing.antecedent_cf.get(),
                    firing.fired_cf.get()
                );
            }
        }
    }

    if inference.converged {
        println!("(fixpoint after {} passes)", inference.passes);
    } else {
        println!(
            "(no fixpoint after {} passes -- result may be unstable)",
            inference.passes
        );
    }

    Ok(())
}
