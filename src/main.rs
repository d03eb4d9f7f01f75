use tracing::debug;

use envgate::cli::output::format_error;

#[tokio::main]
async fn main() {
    if let Err(e) = envgate::cli::run().await {
        debug!("envgate {} failed: {:?}", envgate::VERSION, e);
        eprintln!("{}", format_error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}
