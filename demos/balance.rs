use swrcall::{
    CallDescriptor, CancellationToken, FetchResult, FetcherOptions, JsonRpcFetcher, Result,
    Schema,
};
use tracing_subscriber::EnvFilter;

fn balance_schema(fetcher: JsonRpcFetcher) -> Schema<String> {
    Schema::build(
        || {
            CallDescriptor::new(
                "https://rpc.ankr.com/eth",
                "eth_getBalance",
                ["0xd8da6bf26964af9d7eed9e03e53415d37aa96045", "latest"],
            )
        },
        fetcher,
    )
}

fn print(result: &FetchResult<String>) {
    println!("Data: {}", result.data().map_or("undefined", String::as_str));
    match result.error() {
        Some(e) => println!("Error: {e}"),
        None => println!("Error: undefined"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let schema = balance_schema(JsonRpcFetcher::new(&FetcherOptions::default())?);
    println!("key: {}", schema.key());

    // The second round stands in for a manual refresh.
    for _ in 0..2 {
        match schema.fetch(&CancellationToken::new()).await {
            Ok(result) => print(&result),
            Err(aborted) => println!("{aborted}"),
        }
    }
    Ok(())
}
