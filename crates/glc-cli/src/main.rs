use std::process::ExitCode;

use glc_compat::ShimRegistry;
use glc_inspect::{Expectations, InspectionReport, inspect_path, verify};
use glc_symver::{Backend, GlibcVersion, LinkPlan, ShimConfig};

mod logging;

/// How a command ended; maps onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Failure,
    Usage,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::from(1),
            Outcome::Usage => ExitCode::from(2),
        }
    }
}

fn usage() {
    eprintln!("usage: glc-cli [-v] <command>");
    eprintln!("  inspect <file> [--json] [--max GLIBC_x.y] [--baseline GLIBC_x.y] [--no-aliases]");
    eprintln!("  eval <symbol> <args...>");
    eprintln!("  plan [--arch ARCH] [--baseline GLIBC_x.y]");
    eprintln!("  version-script");
}

fn print_report(report: &InspectionReport) {
    println!("class: {:?}", report.class);
    println!("defined_symbols: {}", report.defined.len());
    println!("imports: {}", report.imports.len());
    match report.max_required {
        Some(version) => println!("max_required: {version}"),
        None => println!("max_required: none"),
    }
    for name in ["pow", "log2", "powf"] {
        for sym in report.defined(name) {
            println!(
                "defined: {name} at {:#x} in {}",
                sym.address,
                sym.section.as_deref().unwrap_or("?")
            );
        }
        for import in report.imports_of(name) {
            println!("import: {}", import.symbol);
        }
    }
}

fn inspect(args: &[String]) -> Outcome {
    let Some(path) = args.first() else {
        usage();
        return Outcome::Usage;
    };

    let mut json = false;
    let mut expectations = Expectations::default();
    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--json" => json = true,
            "--no-aliases" => expectations.require_aliases = false,
            "--max" | "--baseline" => {
                let version = match rest.next().map(|raw| GlibcVersion::parse(raw)) {
                    Some(Ok(version)) => version,
                    Some(Err(err)) => {
                        eprintln!("{err}");
                        return Outcome::Usage;
                    }
                    None => {
                        usage();
                        return Outcome::Usage;
                    }
                };
                if flag.as_str() == "--max" {
                    expectations.ceiling = Some(version);
                } else {
                    expectations.baseline = Some(version);
                }
            }
            other => {
                eprintln!("unknown flag: {other}");
                return Outcome::Usage;
            }
        }
    }

    let report = match inspect_path(path) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("inspect error: {err}");
            return Outcome::Failure;
        }
    };
    let findings = verify(&report, &expectations);

    if json {
        let value = serde_json::json!({ "report": report, "findings": findings });
        match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("json error: {err}");
                return Outcome::Failure;
            }
        }
    } else {
        print_report(&report);
        for finding in &findings {
            println!("finding: {finding}");
        }
        println!("verified: {}", findings.is_empty());
    }

    if findings.is_empty() {
        Outcome::Success
    } else {
        Outcome::Failure
    }
}

fn eval(args: &[String]) -> Outcome {
    let Some((symbol, raw_args)) = args.split_first() else {
        usage();
        return Outcome::Usage;
    };
    let mut values = Vec::with_capacity(raw_args.len());
    for raw in raw_args {
        match raw.parse::<f64>() {
            Ok(value) => values.push(value),
            Err(err) => {
                eprintln!("invalid argument {raw}: {err}");
                return Outcome::Usage;
            }
        }
    }

    let registry = ShimRegistry::builtin();
    match registry.call(symbol, &values) {
        Ok(result) => {
            println!("{result}");
            Outcome::Success
        }
        Err(err) => {
            eprintln!("{err}");
            Outcome::Failure
        }
    }
}

fn plan(args: &[String]) -> Outcome {
    let mut config = ShimConfig::host();
    let mut rest = args.iter();
    while let Some(flag) = rest.next() {
        match (flag.as_str(), rest.next()) {
            ("--arch", Some(arch)) => {
                config.target_arch = arch.clone();
                config.target_os = "linux".to_string();
                config.target_env = "gnu".to_string();
            }
            ("--baseline", Some(raw)) => match GlibcVersion::parse(raw) {
                Ok(version) => config.baseline_override = Some(version),
                Err(err) => {
                    eprintln!("{err}");
                    return Outcome::Usage;
                }
            },
            _ => {
                usage();
                return Outcome::Usage;
            }
        }
    }

    let plan = match LinkPlan::resolve(&config) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("plan error: {err}");
            return Outcome::Failure;
        }
    };
    tracing::debug!(arch = %config.target_arch, backend = %plan.backend, "resolved link plan");

    println!("backend: {}", plan.backend);
    match plan.baseline {
        Some(baseline) => println!("baseline: {baseline}"),
        None => println!("baseline: none"),
    }
    println!("export_aliases: {}", plan.export_aliases);
    if plan.backend == Backend::LegacyGlibc {
        match plan.render_forwarding_asm() {
            Ok(asm) => print!("{asm}"),
            Err(err) => {
                eprintln!("plan error: {err}");
                return Outcome::Failure;
            }
        }
    }
    if plan.export_aliases {
        print!("{}", plan.render_alias_asm());
    }
    Outcome::Success
}

fn run(args: &[String]) -> Outcome {
    let Some((command, rest)) = args.split_first() else {
        usage();
        return Outcome::Usage;
    };
    match command.as_str() {
        "inspect" => inspect(rest),
        "eval" => eval(rest),
        "plan" => plan(rest),
        "version-script" => {
            print!("{}", glc_compat::link::VERSION_SCRIPT);
            Outcome::Success
        }
        _ => {
            usage();
            Outcome::Usage
        }
    }
}

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.first().is_some_and(|arg| arg == "-v");
    if verbose {
        args.remove(0);
    }
    logging::init_logging(verbose);
    run(&args).into()
}
