//! Implementation of the `tailpanel run` command.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::dispatch::{FailureKind, Invocation, InvocationResult};
use crate::error::{PanelError, Result};
use crate::report;
use crate::worker::{Completion, Worker};

/// Run one invocation on a worker, print its report, and return the tool's
/// exit code.
pub fn cmd_run(config: &Config, args: RunArgs) -> Result<i32> {
    let invocation = Invocation::new(
        config.tool.clone(),
        &args.command,
        &args.params.join(" "),
        config.timeout(),
    );

    let mut worker = Worker::new();
    worker
        .submit(invocation)
        .map_err(|e| PanelError::InvocationFailed(e.to_string()))?;
    let completion = worker.wait().ok_or_else(|| {
        PanelError::InvocationFailed("worker finished without a result".to_string())
    })?;

    let rendered = report::render(&completion.invocation, &completion.result);
    print!("{}", rendered.text());
    println!("{}", rendered.status);

    outcome_exit_code(config, completion)
}

fn outcome_exit_code(config: &Config, completion: Completion) -> Result<i32> {
    match completion.result {
        InvocationResult::Completed(run) => Ok(run.exit_code),
        InvocationResult::Failed(f) if f.kind == FailureKind::NotFound => {
            Err(PanelError::ToolNotFound {
                tool: config.tool.clone(),
            })
        }
        InvocationResult::Failed(f) => Err(PanelError::InvocationFailed(f.detail)),
    }
}
