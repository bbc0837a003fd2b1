/*!
 * sigprobe - Main Entry Point
 *
 * Without arguments, runs every default scenario in its own process and
 * prints each decoded signal report. The hidden `--scenario` flag is how the
 * supervisor re-enters this binary inside an isolated child.
 */

use clap::Parser;
use miette::IntoDiagnostic;
use sigprobe::scenarios::ScenarioInfo;
use sigprobe::{init_tracing, run_scenario, HarnessConfig, ScenarioKind, Supervisor};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sigprobe", version, about = "Provoke faults and decode the signals they raise")]
struct Cli {
    /// Scenarios to run (default: all except no-signal)
    #[arg(value_enum)]
    scenarios: Vec<ScenarioKind>,

    /// List available scenarios and exit
    #[arg(long)]
    list: bool,

    /// With --list, print JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// Run a single scenario in this process
    #[arg(long, value_enum, hide = true, conflicts_with_all = ["scenarios", "list"])]
    scenario: Option<ScenarioKind>,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let config = HarnessConfig::from_env()?;
    init_tracing(config.trace_json);

    if let Some(kind) = cli.scenario {
        run_scenario(kind, &config);
    }

    if cli.list {
        return list_scenarios(cli.json);
    }

    let kinds = if cli.scenarios.is_empty() {
        ScenarioKind::DEFAULT.to_vec()
    } else {
        cli.scenarios
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;

    runtime.block_on(async {
        info!(count = kinds.len(), "Running scenarios");
        let supervisor = Supervisor::new(config);
        let mut stdout = std::io::stdout().lock();
        supervisor
            .run_sequence(&kinds, &mut stdout)
            .await
            .into_diagnostic()
    })
}

fn list_scenarios(json: bool) -> miette::Result<()> {
    let infos: Vec<ScenarioInfo> = ScenarioKind::DEFAULT
        .iter()
        .chain(std::iter::once(&ScenarioKind::NoSignal))
        .copied()
        .map(ScenarioInfo::from)
        .collect();

    if json {
        let rendered = serde_json::to_string_pretty(&infos).into_diagnostic()?;
        println!("{}", rendered);
    } else {
        for info in &infos {
            let marker = if info.default { "" } else { " (not run by default)" };
            println!(
                "{:<18} {:<14} {:<26} {}{}",
                info.name,
                info.signal.to_string(),
                info.signal_description,
                info.banner,
                marker
            );
        }
    }
    Ok(())
}
