use ragtail::errors::Error;

/// Endpoint the reader connects to when no URL is given.
const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/stream";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let arg = std::env::args().nth(1);
    let url = arg.as_deref().unwrap_or(DEFAULT_ENDPOINT);

    ragtail::run(url).await
}
