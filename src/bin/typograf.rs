//! typograf: run one piece of text through the typograf webservice.
//!
//! ```text
//! typograf -i "- Это \"Типограф\"?"
//! ```

use clap::Parser;

use typograf_gateway::config::UpstreamConfig;
use typograf_gateway::observability::logging;
use typograf_gateway::{typogrify, TextRequest, TypografClient};

#[derive(Parser)]
#[command(name = "typograf")]
#[command(about = "Prepare a text for the web with the typograf webservice", long_about = None)]
struct Cli {
    /// Input text; quote it in the shell
    #[arg(short, long)]
    input: String,

    /// Encoding declared in the SOAP request
    #[arg(short, long, default_value = "UTF-8")]
    encoding: String,

    /// Webservice endpoint
    #[arg(long, default_value = typograf_gateway::config::schema::DEFAULT_UPSTREAM_URL)]
    url: String,

    /// Round-trip deadline in milliseconds
    #[arg(long, default_value_t = 500)]
    timeout_ms: u64,

    /// Log level for diagnostics on stderr
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(Some(&cli.log_level));

    if cli.input.is_empty() {
        eprintln!("input text required");
        std::process::exit(2);
    }

    let client = TypografClient::new(&UpstreamConfig {
        url: cli.url,
        timeout_ms: cli.timeout_ms,
        ..UpstreamConfig::default()
    })?;

    let request = TextRequest::new(cli.input, Some(&cli.encoding));
    let output = typogrify(&client, &request).await?;
    println!("{}", output.trim_end_matches('\n'));
    Ok(())
}
