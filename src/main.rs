use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing_subscriber::FmtSubscriber;

use filingsmith::config::PipelineConfig;
use filingsmith::parsing::LlamaParseClient;
use filingsmith::pipeline::Pipeline;
use filingsmith::types::PipelineError;

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = PipelineConfig::from_env()?;
    let output_path = config.output_path.clone();

    let parser = Arc::new(LlamaParseClient::new(&config.parser)?);
    let pipeline = Pipeline::new(config, parser)?;

    let start = Instant::now();
    let report = pipeline.run().await?;
    let duration = start.elapsed();

    println!("\nProcessing complete. Chunks written to {}", output_path.display());
    println!("  urls requested   : {}", report.urls_requested);
    println!("  documents fetched: {}", report.documents_fetched);
    println!("  documents parsed : {}", report.documents_parsed);
    println!("  segments         : {}", report.segments_parsed);
    println!("  chunks written   : {}", report.chunks_written);
    println!(
        "  bytes downloaded : {:.2} MB",
        report.bytes_downloaded as f64 / (1024.0 * 1024.0)
    );
    println!("  duration         : {}", format_duration(duration));

    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder().with_env_filter("info").finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    let minutes = secs / 60;
    let seconds = secs % 60;
    format!("{}m {}.{:03}s", minutes, seconds, millis)
}
