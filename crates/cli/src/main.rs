mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use linfeas::{Constraint, ConstraintRecord, FeasibilityVerdict, Session, SolverCfg, Vec2};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Parse linear inequalities and check whether a system is feasible")]
struct Cmd {
    /// Seed for reproducible constraint ids and hues
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Residual accepted as zero by the solver
    #[arg(long, global = true)]
    eps_feas: Option<f64>,

    /// Relative margin applied on the open side of `<` and `>`
    #[arg(long, global = true)]
    eps_strict: Option<f64>,

    /// Debug-level logs on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Parse each argument and print its canonical form
    Parse {
        #[arg(allow_hyphen_values = true, required = true)]
        texts: Vec<String>,
    },
    /// Check feasibility of the constraints given as arguments and/or in a file
    Check {
        /// One constraint per line; blank lines and `#` comments are skipped
        #[arg(long)]
        input: Option<PathBuf>,
        /// Also write the verdict JSON here (with a provenance sidecar)
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(allow_hyphen_values = true)]
        texts: Vec<String>,
    },
    /// Test whether a point satisfies every constraint
    Point {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(allow_hyphen_values = true, required = true)]
        texts: Vec<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

/// One parsed constraint as printed by the CLI.
#[derive(Serialize)]
struct ConstraintOut {
    id: String,
    hue: u16,
    #[serde(flatten)]
    record: ConstraintRecord,
}

impl From<&Constraint> for ConstraintOut {
    fn from(c: &Constraint) -> Self {
        Self {
            id: c.id().to_string(),
            hue: c.color().degrees(),
            record: c.to_record(),
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let session = new_session(&cmd);
    match cmd.action {
        Action::Parse { texts } => parse(session, &texts),
        Action::Check { input, out, texts } => check(session, input.as_deref(), &texts, out),
        Action::Point { x, y, texts } => point(session, Vec2::new(x, y), &texts),
        Action::Report => report(),
    }
}

fn new_session(cmd: &Cmd) -> Session {
    let defaults = SolverCfg::default();
    let cfg = SolverCfg {
        eps_feas: cmd.eps_feas.unwrap_or(defaults.eps_feas),
        eps_strict: cmd.eps_strict.unwrap_or(defaults.eps_strict),
        ..defaults
    };
    let session = match cmd.seed {
        Some(seed) => Session::with_seed(seed),
        None => Session::new(),
    };
    session.with_cfg(cfg)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse(mut session: Session, texts: &[String]) -> Result<()> {
    let mut out = Vec::with_capacity(texts.len());
    for text in texts {
        let entry = match session.submit(text) {
            Ok(c) => serde_json::to_value(ConstraintOut::from(c))?,
            Err(err) => json!({ "input": text, "error": err.to_string() }),
        };
        out.push(entry);
    }
    print_json(&out)
}

/// Non-empty, non-comment lines of a constraint file, with 1-based line numbers.
fn read_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(body
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim().to_string()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
        .collect())
}

fn load(session: &mut Session, input: Option<&Path>, texts: &[String]) -> Result<Vec<String>> {
    let mut sources = Vec::new();
    if let Some(path) = input {
        for (line, text) in read_lines(path)? {
            session
                .submit(&text)
                .with_context(|| format!("{}:{line}", path.display()))?;
            sources.push(text);
        }
    }
    for (k, text) in texts.iter().enumerate() {
        session
            .submit(text)
            .with_context(|| format!("argument {}", k + 1))?;
        sources.push(text.clone());
    }
    Ok(sources)
}

fn verdict_json(session: &Session, verdict: &FeasibilityVerdict) -> Value {
    let display_of = |id: &linfeas::ConstraintId| {
        session
            .system()
            .get(id)
            .map(|c| c.display().to_string())
            .unwrap_or_default()
    };
    let constraints: Vec<ConstraintOut> = session.system().iter().map(ConstraintOut::from).collect();
    json!({
        "feasible": verdict.feasible,
        "witness": verdict.witness.as_ref().map(|(p, q)| json!({
            "ids": [p.to_string(), q.to_string()],
            "display": [display_of(p), display_of(q)],
        })),
        "point": verdict.point.map(|p| [p.x, p.y]),
        "anomaly": verdict.anomaly.map(|a| a.to_string()),
        "constraints": constraints,
    })
}

fn check(mut session: Session, input: Option<&Path>, texts: &[String], out: Option<PathBuf>) -> Result<()> {
    let sources = load(&mut session, input, texts)?;
    if sources.is_empty() {
        tracing::info!("no constraints given; empty system is feasible");
    }
    let verdict = session.check();
    tracing::info!(
        constraints = sources.len(),
        feasible = verdict.feasible,
        fast_path = verdict.witness.is_some(),
        "check"
    );
    let doc = verdict_json(&session, &verdict);
    if let Some(out) = out {
        write_artifact(&out, &doc)?;
        let cfg = session.cfg();
        let payload = provenance::Payload::new(json!({
            "eps_feas": cfg.eps_feas,
            "eps_strict": cfg.eps_strict,
            "input": input.map(|p| p.to_string_lossy().into_owned()),
        }))
        .with_inputs(sources);
        let prov = provenance::write_sidecar(&out, payload)?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), "verdict written");
    }
    print_json(&doc)
}

fn write_artifact(out: &Path, doc: &Value) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn point(mut session: Session, p: Vec2<f64>, texts: &[String]) -> Result<()> {
    if !p.x.is_finite() || !p.y.is_finite() {
        bail!("point coordinates must be finite");
    }
    load(&mut session, None, texts)?;
    let violated: Vec<String> = session
        .system()
        .violated_by(p, session.cfg().eps_feas)
        .into_iter()
        .map(|c| c.display().to_string())
        .collect();
    tracing::info!(x = p.x, y = p.y, violated = violated.len(), "point");
    print_json(&json!({
        "point": [p.x, p.y],
        "satisfied": violated.is_empty(),
        "violated": violated,
    }))
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "engine_version": linfeas::VERSION,
        "solver": {
            "eps_det": linfeas::feasibility::DET_EPS,
            "eps_feas": linfeas::feasibility::FEAS_EPS,
            "eps_strict": linfeas::feasibility::STRICT_EPS,
            "eps_pivot": linfeas::feasibility::PIVOT_EPS,
        },
    });
    print_json(&obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_lines_skips_blanks_and_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sys.txt");
        fs::write(&path, "# region\nx+y-10<=0\n\n  x-y+2>=0  \n").unwrap();
        let lines = read_lines(&path).unwrap();
        assert_eq!(
            lines,
            vec![(2, "x+y-10<=0".to_string()), (4, "x-y+2>=0".to_string())]
        );
    }

    #[test]
    fn load_reports_the_failing_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sys.txt");
        fs::write(&path, "x<0\n5<0\n").unwrap();
        let mut session = Session::with_seed(1);
        let err = load(&mut session, Some(path.as_path()), &[]).unwrap_err();
        assert!(format!("{err:#}").contains(":2"));
    }

    #[test]
    fn verdict_json_names_the_witness_pair() {
        let mut session = Session::with_seed(3);
        let texts = vec!["x-5>0".to_string(), "x-3<0".to_string()];
        load(&mut session, None, &texts).unwrap();
        let doc = verdict_json(&session, &session.check());
        assert_eq!(doc["feasible"], false);
        assert_eq!(doc["witness"]["display"][0], "x - 5 > 0");
        assert_eq!(doc["witness"]["display"][1], "x - 3 < 0");
        assert_eq!(doc["constraints"][0]["operator"], ">");
    }

    #[test]
    fn check_writes_artifact_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("run").join("verdict.json");
        let texts = vec!["x+y-10<=0".to_string(), "x-y+2>=0".to_string()];
        check(Session::with_seed(5), None, &texts, Some(out.clone())).unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["feasible"], true);
        let prov: Value =
            serde_json::from_slice(&fs::read(out.with_file_name("verdict.provenance.json")).unwrap())
                .unwrap();
        assert_eq!(prov["inputs"][1], "x-y+2>=0");
    }
}
