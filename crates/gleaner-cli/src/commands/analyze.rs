//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::loader::load_documents;
use crate::output::Formatter;
use crate::report::ReportAssembler;
use gleaner_llm::OpenAiProvider;
use gleaner_pipeline::{AnalysisConfig, AnalysisOutcome, CancelToken, Pipeline, PipelineError};

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let analysis = analysis_config(&args, &config.analysis)?;
    let mode = args.mode.map(Into::into).unwrap_or(analysis.aggregation);
    let profile = config.get_active_profile()?.clone();
    let credential = profile
        .credential(args.api_key.as_deref())
        .ok_or(PipelineError::MissingCredential)?;

    let (documents, mut diagnostics) = load_documents(&args.files);
    if documents.is_empty() {
        if !diagnostics.is_empty() {
            eprintln!("{}", formatter.format_diagnostics(&diagnostics)?);
        }
        return Err(CliError::InvalidInput(
            "No documents could be extracted".to_string(),
        ));
    }

    tracing::info!(
        documents = documents.len(),
        skipped = diagnostics.len(),
        endpoint = %profile.endpoint,
        model = %profile.model,
        "Analyzing"
    );

    let cancel = CancelToken::new();
    let questions = args.questions.clone();
    let token = cancel.clone();

    // The blocking HTTP client must be built and dropped off the async runtime
    let mut task = tokio::task::spawn_blocking(move || -> Result<AnalysisOutcome> {
        let mut provider =
            OpenAiProvider::new(&profile.endpoint, &profile.model, analysis.request_timeout())?;
        if let Some(temperature) = profile.temperature {
            provider = provider.with_temperature(temperature);
        }

        let pipeline = Pipeline::new(provider, analysis)?;
        Ok(pipeline.run_analysis(&documents, &credential, questions.as_deref(), mode, &token)?)
    });

    let joined = tokio::select! {
        joined = &mut task => joined,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupt received, cancelling analysis");
            cancel.cancel();
            task.await
        }
    };
    let mut outcome = joined.map_err(|e| CliError::Task(e.to_string()))??;

    diagnostics.append(&mut outcome.diagnostics);
    outcome.diagnostics = diagnostics;

    println!("{}", formatter.format_insights(&outcome.insights)?);
    println!();
    println!("{}", formatter.format_report(&outcome.report)?);

    if args.questions.is_some() && !outcome.keyword_hits.is_empty() {
        println!();
        println!("{}", formatter.format_keyword_hits(&outcome.keyword_hits)?);
    }

    if !outcome.diagnostics.is_empty() {
        eprintln!("{}", formatter.format_diagnostics(&outcome.diagnostics)?);
    }

    if let Some(path) = &args.report {
        let format = ReportAssembler::new(&outcome).write(path)?;
        println!(
            "{}",
            formatter.success(&format!("Report written to {} ({:?})", path.display(), format))
        );
    }

    Ok(())
}

/// Apply command-line overrides to the configured analysis defaults.
fn analysis_config(args: &AnalyzeArgs, base: &AnalysisConfig) -> Result<AnalysisConfig> {
    let mut config = base.clone();

    if let Some(target) = args.target_size {
        config.target_segment_chars = target;
    }
    if let Some(ceiling) = args.max_payload {
        config.max_payload_chars = ceiling;
    }
    if let Some(concurrency) = args.concurrency {
        config.max_concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(synthesis) = args.synthesis {
        config.synthesis = synthesis.into();
    }
    if let Some(mode) = args.mode {
        config.aggregation = mode.into();
    }
    if args.no_cache {
        config.cache_enabled = false;
    }

    config.validate().map_err(CliError::Config)?;
    Ok(config)
}
