mod compare;
mod inspect;

use std::sync::Arc;
use std::time::{Duration, Instant};

use ratiolens_core::{
    AggregationPipeline, AggregationResult, LabelOverrides, MetricSource, PipelineConfig,
    ProviderId, Report, ReportMeta, ReqwestHttpClient, RequestPacer, YahooMetricSource,
};
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::StderrProgress;

/// Typed result of one command run, before report assembly.
pub struct CommandOutcome {
    pub result: AggregationResult,
    pub source: ProviderId,
    pub latency_ms: u64,
    pub warnings: Vec<String>,
}

impl CommandOutcome {
    pub fn into_report(self) -> Result<Report<AggregationResult>, CliError> {
        let request_id = format!("req-{}", Uuid::new_v4().hyphenated());
        let mut meta = ReportMeta::new(request_id, self.source, self.latency_ms)?;
        for warning in self.warnings {
            meta.push_warning(warning);
        }
        Ok(Report::new(meta, self.result))
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutcome, CliError> {
    let pipeline = build_pipeline(cli)?;
    let started = Instant::now();

    let result = match &cli.command {
        Command::Compare(args) => compare::run(args, &pipeline).await?,
        Command::Inspect(args) => inspect::run(args, &pipeline).await?,
    };

    let warnings: Vec<String> = result.failed.iter().map(|failed| failed.warning()).collect();
    tracing::debug!(
        rows = result.rows.len(),
        failed = result.failed.len(),
        "aggregation finished in {}ms",
        started.elapsed().as_millis()
    );

    Ok(CommandOutcome {
        result,
        // --mock still goes through the yahoo adapter, in offline mode.
        source: ProviderId::Yahoo,
        latency_ms: started.elapsed().as_millis() as u64,
        warnings,
    })
}

fn build_pipeline(cli: &Cli) -> Result<AggregationPipeline, CliError> {
    let source: Arc<dyn MetricSource> = if cli.mock {
        Arc::new(YahooMetricSource::default())
    } else {
        Arc::new(YahooMetricSource::with_http_client(Arc::new(
            ReqwestHttpClient::new(),
        )))
    };

    let labels = match &cli.labels {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            LabelOverrides::from_json_str(&contents)?
        }
        None => LabelOverrides::new(),
    };

    let config = PipelineConfig {
        unit_scale: cli.unit,
        missing_policy: cli.missing,
        concurrency: cli.concurrency,
        per_call_delay: cli.delay_ms.map(Duration::from_millis),
        labels,
        ..PipelineConfig::default()
    };

    let mut pipeline = AggregationPipeline::new(source, config)
        .with_observer(Arc::new(StderrProgress::default()));

    if let Some(max_rpm) = cli.max_rpm {
        pipeline = pipeline.with_pacer(RequestPacer::per_minute(max_rpm));
    }

    Ok(pipeline)
}
