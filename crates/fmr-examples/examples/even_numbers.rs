//! Filter, map, and reduce a list of integers, synchronously and on a worker.
//!
//! Usage: RUST_LOG=fmr_chain=trace cargo run --example even_numbers

use std::time::Duration;

use fmr_chain::prelude::*;
use fmr_core::config::EvalConfig;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let numbers = vec![1, 2, 3, 4, 5, 6];
    let chain = FunctionChain::new(numbers)
        .filter(|n| n % 2 == 0)
        .map(|n| n * 2)
        .reduce(|acc, n| acc + n);

    let config = EvalConfig::new().with_name("even_numbers");
    let sum = chain.evaluate_with_config(&config)?;
    println!("sync:  {sum:?}");

    let evens = FunctionChain::new(vec![1, 2, 3, 4, 5, 6])
        .filter(|n| n % 2 == 0)
        .evaluate_async();
    println!("async: {:?}", evens.recv_timeout(Duration::from_secs(5))?);

    let awaited = chain.evaluate_async().recv_async().await?;
    println!("await: {awaited:?}");

    let words = FunctionChain::from_json(json!(["fmr", "chains", "are", "lazy"]))
        .filter(|w| w.as_str().is_some_and(|s| s.len() > 3))
        .map(|w| json!(w.as_str().map(str::to_uppercase)))
        .evaluate()?;
    println!("json:  {}", words.into_json());

    match FunctionChain::from_item(42).map(|n| n + 1).evaluate() {
        Ok(value) => println!("unexpected: {value:?}"),
        Err(err) => println!("error: {err}"),
    }

    Ok(())
}
