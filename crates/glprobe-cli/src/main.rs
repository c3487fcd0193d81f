use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use glprobe_core::{ContextVersion, ProbeConfig, ProbeFailure, ProbeReport, ShaderSources};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "glprobe",
    about = "Check that the GLES driver can compile and link the probe shader pair",
    version,
    long_about = None
)]
struct Cli {
    /// Requested OpenGL ES context version
    #[arg(long = "gles", default_value = "3.1", value_name = "MAJOR.MINOR")]
    gles: ContextVersion,

    /// EGL device index on platforms that enumerate devices
    #[arg(long, default_value_t = 0)]
    device: usize,

    /// Number of consecutive probe invocations
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// JSON output for machine parsing, one line per invocation
    #[arg(long)]
    json: bool,

    /// Print the built-in shader sources and exit
    #[arg(long)]
    print_sources: bool,
}

/// One invocation's outcome as printed with `--json`.
#[derive(Serialize)]
struct JsonLine<'a> {
    iteration: u32,
    linked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(flatten)]
    report: Option<&'a ProbeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a [glprobe_core::DiagnosticLog]>,
}

impl<'a> JsonLine<'a> {
    fn new(iteration: u32, outcome: &'a Result<ProbeReport, ProbeFailure>) -> Self {
        match outcome {
            Ok(report) => Self {
                iteration,
                linked: true,
                error_kind: None,
                error: None,
                report: Some(report),
                diagnostics: None,
            },
            Err(failure) => Self {
                iteration,
                linked: false,
                error_kind: Some(failure.error.kind()),
                error: Some(failure.error.to_string()),
                report: None,
                diagnostics: Some(&failure.diagnostics),
            },
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.print_sources {
        let sources = ShaderSources::BUILTIN;
        println!("// vertex{}", sources.vertex);
        println!("// fragment{}", sources.fragment);
        return Ok(ExitCode::SUCCESS);
    }

    glprobe_core::logging::init();

    let config = ProbeConfig {
        context_version: cli.gles,
        device_index: cli.device,
        ..ProbeConfig::default()
    };
    info!(
        target: glprobe_egl::LOG_TARGET,
        gles = %config.context_version,
        device = config.device_index,
        iterations = cli.iterations,
        "Starting probe"
    );

    let mut failures = 0;
    for iteration in 1..=cli.iterations {
        let outcome = glprobe_egl::validate_with(&config);

        if cli.json {
            println!("{}", serde_json::to_string(&JsonLine::new(iteration, &outcome))?);
        } else {
            match &outcome {
                Ok(report) => println!(
                    "[{iteration}] linked on {} ({}), {} diagnostic log(s)",
                    report.driver.renderer,
                    report.driver.version,
                    report.diagnostics.len()
                ),
                Err(failure) => println!("[{iteration}] FAILED: {failure}"),
            }
        }

        if outcome.is_err() {
            failures += 1;
        }
    }

    if failures == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
