use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use legalizer::api::{
    draw_instance, solve, BranchRule, Instance, InstanceCfg, InstanceReplay, SearchCfg,
    SearchReport,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Branch-and-bound placement legalizer")]
struct Cmd {
    /// Log at DEBUG level (incumbents, search polls)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Label propagated to provenance sidecars; repeatable
    #[arg(long = "tag", global = true)]
    tags: Vec<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Legalize an instance and print the one-line summary
    Solve {
        #[arg(long)]
        input: PathBuf,
        /// Read the input as JSON (implied by a `.json` extension)
        #[arg(long)]
        json: bool,
        #[arg(long, default_value_t = BranchRule::Area)]
        rule: BranchRule,
        /// Stop after this many milliseconds without improvement
        #[arg(long, default_value_t = 500)]
        stall_ms: u64,
        /// Read the clock once every this many nodes
        #[arg(long, default_value_t = 1000)]
        poll: u64,
        #[arg(long)]
        node_limit: Option<u64>,
        #[arg(long)]
        no_tighten: bool,
        /// Write the JSON result here (plus a provenance sidecar)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Draw a random instance with a legal baseline
    Gen {
        #[arg(long, default_value_t = 6)]
        cells: usize,
        #[arg(long, default_value_t = 4)]
        nets: usize,
        #[arg(long, default_value_t = 1)]
        obstacles: usize,
        #[arg(long, default_value_t = 4)]
        max_side: i64,
        #[arg(long, default_value_t = 2)]
        max_pitch: i64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        /// Output file; stdout when absent
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate an instance's baseline and print its cost
    Check {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Solve {
            input,
            json,
            rule,
            stall_ms,
            poll,
            node_limit,
            no_tighten,
            out,
        } => {
            let cfg = SearchCfg {
                rule,
                stall_budget: Duration::from_millis(stall_ms),
                poll_interval: poll,
                node_limit,
                tighten: !no_tighten,
                baseline_cost: None,
            };
            run_solve(&input, json, cfg, out.as_deref(), &cmd.tags)
        }
        Action::Gen {
            cells,
            nets,
            obstacles,
            max_side,
            max_pitch,
            seed,
            index,
            out,
        } => {
            let cfg = InstanceCfg {
                cells,
                nets,
                obstacles,
                max_side,
                max_pitch,
                ..InstanceCfg::default()
            };
            run_gen(cfg, InstanceReplay::new(seed, index), out.as_deref())
        }
        Action::Check { input, json } => run_check(&input, json),
        Action::Report => report(&cmd.tags),
    }
}

fn load_instance(path: &Path, json: bool) -> Result<Instance> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let is_json = json || path.extension().is_some_and(|e| e == "json");
    if is_json {
        serde_json::from_str(&text).with_context(|| format!("parsing JSON {}", path.display()))
    } else {
        Instance::from_text(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Cost of the instance's baseline, after checking that it is legal.
fn checked_baseline(inst: &Instance) -> Result<Option<i64>> {
    let Some(baseline) = inst.baseline.as_deref() else {
        return Ok(None);
    };
    let root = inst.legalizer().context("building root sub-problem")?;
    if !root.is_solution_correct(baseline) {
        bail!("baseline is not a legal placement");
    }
    Ok(inst.baseline_cost())
}

/// `cells nets obstacles code elapsed_ms evaluated best baseline`.
fn summary_line(inst: &Instance, report: &SearchReport) -> String {
    let cost = |c: Option<i64>| c.map_or_else(|| "-".to_string(), |c| c.to_string());
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        inst.cells.len(),
        inst.nets.len(),
        inst.obstacles.len(),
        report.outcome.code(),
        report.elapsed.as_millis(),
        report.stats.evaluated,
        cost(report.best_known_cost()),
        cost(report.baseline_cost),
    )
}

fn run_solve(
    input: &Path,
    json: bool,
    mut cfg: SearchCfg,
    out: Option<&Path>,
    tags: &[String],
) -> Result<()> {
    let inst = load_instance(input, json)?;
    cfg.baseline_cost = checked_baseline(&inst)?;
    let root = inst.legalizer().context("building root sub-problem")?;
    tracing::info!(
        input = %input.display(),
        cells = inst.cells.len(),
        nets = inst.nets.len(),
        obstacles = inst.obstacles.len(),
        rule = %cfg.rule,
        relaxed = root.cost(),
        "solve"
    );
    let report = solve(&root, &cfg);
    println!("{}", summary_line(&inst, &report));

    if let Some(out) = out {
        write_artifact(out, &json!({
            "input": input.to_string_lossy(),
            "code": report.outcome.code().to_string(),
            "report": report,
        }))?;
        let payload = provenance::Payload::new(json!({
            "input": input.to_string_lossy(),
            "rule": cfg.rule.name(),
            "stall_ms": cfg.stall_budget.as_millis() as u64,
            "poll": cfg.poll_interval,
            "node_limit": cfg.node_limit,
            "tighten": cfg.tighten,
        }))
        .with_tags(tags);
        let sidecar = provenance::write_sidecar(out, payload)?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote result");
    }
    Ok(())
}

fn run_gen(cfg: InstanceCfg, tok: InstanceReplay, out: Option<&Path>) -> Result<()> {
    let inst = draw_instance(cfg, tok);
    let text = inst.to_text();
    match out {
        Some(path) => {
            ensure_parent(path)?;
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(out = %path.display(), seed = tok.seed, index = tok.index, "gen");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn run_check(input: &Path, json: bool) -> Result<()> {
    let inst = load_instance(input, json)?;
    match checked_baseline(&inst)? {
        Some(cost) => println!("legal\t{cost}"),
        None => bail!("{} has no baseline", input.display()),
    }
    Ok(())
}

fn report(tags: &[String]) -> Result<()> {
    let payload = provenance::Payload::new(json!({})).with_tags(tags);
    let doc = provenance::document(&payload, &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn write_artifact(path: &Path, value: &serde_json::Value) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PAIR: &str = "0 0 10 4\n2\n4 4 1 1\n4 4 1 1\n0\n0\n";

    #[test]
    fn loads_text_and_json_instances() {
        let dir = tempdir().unwrap();
        let text_path = dir.path().join("pair.txt");
        std::fs::write(&text_path, PAIR).unwrap();
        let inst = load_instance(&text_path, false).unwrap();
        assert_eq!(inst.cells.len(), 2);

        let json_path = dir.path().join("pair.json");
        std::fs::write(&json_path, serde_json::to_string(&inst).unwrap()).unwrap();
        assert_eq!(load_instance(&json_path, false).unwrap(), inst);
        assert!(load_instance(&dir.path().join("missing.txt"), false).is_err());
    }

    #[test]
    fn illegal_baseline_is_rejected() {
        let mut inst = Instance::from_text(PAIR).unwrap();
        assert_eq!(checked_baseline(&inst).unwrap(), None);
        inst.baseline = Some(vec![[0, 0].into(), [2, 0].into()]);
        assert!(checked_baseline(&inst).is_err());
        inst.baseline = Some(vec![[0, 0].into(), [6, 0].into()]);
        assert_eq!(checked_baseline(&inst).unwrap(), Some(0));
    }

    #[test]
    fn solve_writes_summary_artifact_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pair.txt");
        std::fs::write(&input, PAIR).unwrap();
        let out = dir.path().join("runs").join("pair.json");
        run_solve(&input, false, SearchCfg::default(), Some(&out), &[]).unwrap();

        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["code"], "O");
        assert_eq!(doc["report"]["best_cost"], 0);
        assert!(dir.path().join("runs").join("pair.provenance.json").exists());
    }

    #[test]
    fn summary_line_has_eight_columns() {
        let inst = Instance::from_text(PAIR).unwrap();
        let root = inst.legalizer().unwrap();
        let report = solve(&root, &SearchCfg::default());
        let line = summary_line(&inst, &report);
        let cols: Vec<&str> = line.split('\t').collect();
        assert_eq!(cols.len(), 8);
        assert_eq!(&cols[..4], ["2", "0", "0", "O"]);
        assert_eq!(cols[6], "0");
        assert_eq!(cols[7], "-");
    }

    #[test]
    fn generated_instance_round_trips_through_a_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("gen").join("g.txt");
        run_gen(InstanceCfg::default(), InstanceReplay::new(5, 1), Some(&out)).unwrap();
        let inst = load_instance(&out, false).unwrap();
        assert_eq!(inst, draw_instance(InstanceCfg::default(), InstanceReplay::new(5, 1)));
        assert!(checked_baseline(&inst).unwrap().is_some());
    }
}
