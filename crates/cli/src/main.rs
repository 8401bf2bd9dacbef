use clap::{Parser, Subcommand};
use std::sync::Arc;
use symcheck_core::{
    config::log_path_from_env_value,
    constants::{DISCLAIMER, SEVERITY_NOTICE},
    CheckerService, CoreConfig, Symptom, SymptomSet,
};

#[derive(Parser)]
#[command(name = "symcheck")]
#[command(about = "Rule-based symptom checker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the symptoms that can be selected
    Vocabulary,
    /// Show the rule table, match threshold and urgent symptoms
    Rules,
    /// Check a set of symptoms
    Check {
        /// Symptom labels, e.g. 기침 발열 (English names are accepted too)
        symptoms: Vec<String>,
        /// Free-text symptom description (recorded, never matched)
        #[arg(long)]
        other: Option<String>,
        /// Do not append the check to the diagnosis log
        #[arg(long)]
        no_log: bool,
        /// Show how many symptoms matched each condition
        #[arg(long)]
        explain: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every logged check
    History,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symcheck=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = Arc::new(CoreConfig::new(log_path_from_env_value(
        std::env::var("SYMCHECK_LOG_PATH").ok(),
    ))?);
    let service = CheckerService::new(cfg);

    match cli.command {
        Some(Commands::Vocabulary) => {
            let severity = service.matcher().severity();
            for symptom in Symptom::ALL {
                let marker = if severity.contains(symptom) { " (urgent)" } else { "" };
                println!("{} - {}{}", symptom.label(), symptom.english(), marker);
            }
        }
        Some(Commands::Rules) => {
            let matcher = service.matcher();
            for condition in matcher.rules().iter() {
                let symptoms: Vec<&str> =
                    condition.symptoms().iter().map(|s| s.label()).collect();
                println!("{}: {}", condition.name(), symptoms.join(", "));
            }
            println!("Match threshold: {}", matcher.threshold());
            let urgent: Vec<&str> = matcher.severity().iter().map(|s| s.label()).collect();
            println!("Urgent symptoms: {}", urgent.join(", "));
        }
        Some(Commands::Check {
            symptoms,
            other,
            no_log,
            explain,
            json,
        }) => {
            let set = SymptomSet::from_selection(&symptoms, other.as_deref());
            for label in &symptoms {
                if !label.trim().is_empty() && label.parse::<Symptom>().is_err() {
                    eprintln!("Note: '{}' is not a known symptom and will not be matched", label);
                }
            }

            let response = if no_log {
                api_shared::CheckRes::from_result(&service.evaluate(&set))
            } else {
                match service.check(&set) {
                    Ok(report) => api_shared::CheckRes::from(&report),
                    Err(e) => {
                        eprintln!("Error recording check: {}", e);
                        api_shared::CheckRes::from_result(&service.evaluate(&set))
                    }
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.summary);
                if response.is_severe {
                    println!("!! {}", SEVERITY_NOTICE);
                }
                println!("{}", DISCLAIMER);
                if let Some(logged_at) = &response.logged_at {
                    println!("Recorded at {}", logged_at);
                }
            }

            if explain {
                for score in service.matcher().match_counts(&set) {
                    println!(
                        "  {}: {}/{}{}",
                        score.condition,
                        score.matched,
                        score.total,
                        if score.qualifies { " *" } else { "" }
                    );
                }
            }
        }
        Some(Commands::History) => match service.history() {
            Ok(entries) if entries.is_empty() => println!("No checks logged yet."),
            Ok(entries) => {
                for entry in entries {
                    println!(
                        "{} | {} | {}",
                        entry.datetime_string(),
                        entry.symptoms,
                        entry.result
                    );
                }
            }
            Err(e) => eprintln!("Error reading diagnosis log: {}", e),
        },
        None => {
            println!("Use 'symcheck --help' for commands");
        }
    }

    Ok(())
}
