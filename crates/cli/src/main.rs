use anyhow::Result;
use clap::Parser;
use ffgraph_core::invoke::{build_invocation, FfmpegInvoker, Invoker};
use ffgraph_core::media::{probe_media, FormatContext};
use ffgraph_core::FilterPipeline;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ffgraph")]
#[command(about = "Compose ffmpeg filter graphs from a TOML pipeline", long_about = None)]
#[command(version)]
struct Args {
    /// Path to pipeline configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run ffmpeg on the configured input/output instead of printing the arguments
    #[arg(long)]
    run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    let config = match ffgraph_core::config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    info!("ffmpeg binary: {}", config.ffmpeg_binary);
    info!("Input: {:?}", config.input);
    info!("Output: {:?}", config.output);
    info!("Filters configured: {}", config.filters.len());

    // Any missing asset fails here, before anything is compiled
    let pipeline = FilterPipeline::from_configs(&config.filters).map_err(|e| {
        error!("Failed to build filters: {}", e);
        anyhow::Error::from(e)
    })?;

    let context = match &config.input {
        Some(input) => match probe_media(&config.ffprobe_binary, input).await {
            Ok(media) => FormatContext::from_media(&media, config.container.clone()),
            Err(e) => {
                warn!("Could not probe {}: {}", input.display(), e);
                FormatContext {
                    container: config.container.clone(),
                    ..Default::default()
                }
            }
        },
        None => FormatContext {
            container: config.container.clone(),
            ..Default::default()
        },
    };

    let filter_args = pipeline.compile(&context);

    if !args.run {
        println!("{}", serde_json::to_string_pretty(&filter_args)?);
        return Ok(());
    }

    let (input, output) = match (&config.input, &config.output) {
        (Some(i), Some(o)) => (i, o),
        _ => anyhow::bail!("--run requires both input and output in the configuration"),
    };

    match ffgraph_core::tool::detect_tool_version(&config.ffmpeg_binary) {
        Ok(version) => {
            info!("ffmpeg version: {}", version);
            pipeline.check_tool_version(&version);
        }
        Err(e) => warn!("Could not determine ffmpeg version: {}", e),
    }

    let invoker = FfmpegInvoker::new(config.ffmpeg_binary.clone());
    let result = invoker
        .invoke(&build_invocation(input, &filter_args, output))
        .await?;

    if !result.success {
        error!("ffmpeg failed with exit code {:?}", result.status);
        anyhow::bail!("ffmpeg failed:\n{}", result.stderr);
    }

    info!("Wrote {}", output.display());
    Ok(())
}
