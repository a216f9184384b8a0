#![warn(clippy::all)]

#[macro_use]
extern crate napi_derive;

use napi::Result as NapiResult;
use napi::Status;

// import from the core library
use refactor_wizard_core::{
  compile_pairs, execute_refactor_wizard_flow, parse_input, refactor_string, rewrite_tree,
  style,
  CoreCliArgs,
  FlowOutcome,
  Parser, // clap parser trait for try_parse_from
};

use std::path::Path;

/// full flow, driven by argv the same way the cli binary is
#[napi(ts_args_type = "argv: string[]")]
pub async fn run_refactor_wizard_cli(argv: Vec<String>) -> NapiResult<String> {
  // clap expects the first arg to be the program name.
  let mut full_argv = vec!["refactor-wizard-napi".to_string()]; // dummy program name
  full_argv.extend(argv);

  let core_args = match CoreCliArgs::try_parse_from(&full_argv) {
    Ok(args) => args,
    Err(e) => {
      let err_msg = format!("argument parsing error: {e}\nensure you are passing arguments correctly. for example: refactor-wizard --dir . --pairs \"channel group\" --yes");
      eprintln!("{}", style(&err_msg).red().bold());
      return Err(napi::Error::new(Status::InvalidArg, err_msg));
    }
  };

  match execute_refactor_wizard_flow(core_args).await {
    Ok(FlowOutcome::Selection(text)) => Ok(text),
    Ok(FlowOutcome::Directory(Some(summary))) => serde_json::to_string(&summary).map_err(|e| {
      napi::Error::new(
        Status::GenericFailure,
        format!("failed to serialise walk summary: {e}"),
      )
    }),
    Ok(FlowOutcome::Directory(None)) => Ok(String::new()),
    Err(e) => {
      // the core flow already prints styled diagnostics; hand the host a plain message
      let err_msg = format!("error during refactor wizard execution: {e}");
      eprintln!("{}", style(&err_msg).red().bold());
      Err(napi::Error::new(Status::GenericFailure, err_msg))
    }
  }
}

/// rewrite a host-supplied selection; the editor replaces the span itself
#[napi(ts_args_type = "pairs: string, text: string")]
pub fn run_refactor_on_text(pairs: String, text: String) -> NapiResult<String> {
  let refactor =
    parse_input(&pairs).map_err(|e| napi::Error::new(Status::InvalidArg, e.to_string()))?;
  let compiled =
    compile_pairs(&refactor).map_err(|e| napi::Error::new(Status::InvalidArg, e.to_string()))?;
  Ok(refactor_string(&compiled, &text))
}

/// rewrite a directory tree; returns the walk summary as a json string
#[napi(ts_args_type = "pairs: string, dir: string")]
pub async fn run_refactor_on_directory(pairs: String, dir: String) -> NapiResult<String> {
  let refactor =
    parse_input(&pairs).map_err(|e| napi::Error::new(Status::InvalidArg, e.to_string()))?;
  let compiled =
    compile_pairs(&refactor).map_err(|e| napi::Error::new(Status::InvalidArg, e.to_string()))?;

  let summary = rewrite_tree(Path::new(&dir), &compiled, false)
    .await
    .map_err(|e| napi::Error::new(Status::GenericFailure, e.to_string()))?;

  serde_json::to_string(&summary).map_err(|e| {
    napi::Error::new(
      Status::GenericFailure,
      format!("failed to serialise walk summary: {e}"),
    )
  })
}
