use aws_config::BehaviorVersion;
use aws_sdk_lambda::Client;
use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

#[derive(Default)]
struct Stats {
    by_status: BTreeMap<i64, usize>,
    error_count: usize,
}

/// The part of an API Gateway v2 response we care about
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GatewayResponse {
    status_code: i64,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Action {
    /// GET /movies/{movieId}
    Get,
    /// DELETE /movies/{movieId}
    Delete,
}

impl Action {
    fn method(self) -> &'static str {
        match self {
            Action::Get => "GET",
            Action::Delete => "DELETE",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "invoke-test")]
#[command(about = "Invoke a movie function with API Gateway requests for random movie ids")]
struct Args {
    /// Lambda function name
    function: String,

    /// Which movie endpoint the function implements
    #[arg(long, value_enum, default_value = "get")]
    action: Action,

    /// Number of iterations to run
    #[arg(long, default_value = "100")]
    iters: usize,

    /// Number of parallel threads
    #[arg(long, default_value = "1")]
    threads: usize,

    /// Movie ids are drawn from 1 to N
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(i64).range(1..))]
    max_id: i64,

    /// Ask for the cast join (get only)
    #[arg(long)]
    cast: bool,
}

/// Builds an HTTP API (payload format 2.0) event for one movie request.
fn gateway_event(action: Action, movie_id: i64, cast: bool) -> Value {
    let path = format!("/movies/{movie_id}");
    let with_cast = cast && matches!(action, Action::Get);
    let raw_query = if with_cast { "cast=true" } else { "" };
    let query = if with_cast {
        json!({ "cast": "true" })
    } else {
        json!({})
    };
    let route_key = format!("{} /movies/{{movieId}}", action.method());

    json!({
        "version": "2.0",
        "routeKey": route_key,
        "rawPath": path,
        "rawQueryString": raw_query,
        "headers": { "accept": "application/json" },
        "queryStringParameters": query,
        "pathParameters": { "movieId": movie_id.to_string() },
        "requestContext": {
            "accountId": "123456789012",
            "apiId": "invoke-test",
            "domainName": "invoke-test.local",
            "domainPrefix": "invoke-test",
            "http": {
                "method": action.method(),
                "path": path,
                "protocol": "HTTP/1.1",
                "sourceIp": "127.0.0.1",
                "userAgent": "invoke-test"
            },
            "requestId": format!("invoke-test-{movie_id}"),
            "routeKey": route_key,
            "stage": "$default",
            "time": "01/Jan/2026:00:00:00 +0000",
            "timeEpoch": 0
        },
        "isBase64Encoded": false
    })
}

async fn run_invocations(
    client: Arc<Client>,
    args: Arc<Args>,
    thread_id: usize,
    start: usize,
    end: usize,
    stats: Arc<Mutex<Stats>>,
) {
    let mut rng = StdRng::from_entropy();

    for i in start..=end {
        let movie_id = rng.gen_range(1..=args.max_id);
        let payload = gateway_event(args.action, movie_id, args.cast);

        let payload = match serde_json::to_vec(&payload) {
            Ok(payload) => payload,
            Err(e) => {
                eprintln!("[Thread {thread_id}] Failed to encode payload: {e}");
                stats.lock().await.error_count += 1;
                continue;
            }
        };

        let result = client
            .invoke()
            .function_name(&args.function)
            .payload(aws_sdk_lambda::primitives::Blob::new(payload))
            .send()
            .await;

        match result {
            Ok(response) => {
                let response_payload = response
                    .payload()
                    .map(|b| String::from_utf8_lossy(b.as_ref()).to_string())
                    .unwrap_or_else(|| "No response".to_string());

                let parsed = serde_json::from_str::<GatewayResponse>(&response_payload).ok();

                {
                    let mut stats = stats.lock().await;
                    match &parsed {
                        Some(gateway) => *stats.by_status.entry(gateway.status_code).or_default() += 1,
                        None => stats.error_count += 1,
                    }
                }

                let shown = parsed
                    .and_then(|gateway| gateway.body.map(|body| (gateway.status_code, body)))
                    .map(|(status, body)| format!("{status} {body}"))
                    .unwrap_or(response_payload);

                println!(
                    "[Thread {}: {}/{}] {} movie {} => {}",
                    thread_id,
                    i,
                    args.iters,
                    args.action.method(),
                    movie_id,
                    shown
                );
            }
            Err(e) => {
                stats.lock().await.error_count += 1;

                eprintln!(
                    "[Thread {}: {}/{}] Error invoking {} movie {}: {}",
                    thread_id,
                    i,
                    args.iters,
                    args.action.method(),
                    movie_id,
                    e
                );
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let threads = args.threads.max(1);

    println!(
        "Running {} {} invocations across {} thread(s)",
        args.iters,
        args.action.method(),
        threads
    );

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = Arc::new(Client::new(&config));

    let stats = Arc::new(Mutex::new(Stats::default()));

    let iters_per_thread = args.iters / threads;
    let remainder = args.iters % threads;
    let args = Arc::new(args);

    let mut tasks = JoinSet::new();

    let mut start = 1;
    for t in 1..=threads {
        let end = if t == threads {
            start + iters_per_thread - 1 + remainder
        } else {
            start + iters_per_thread - 1
        };

        let client = Arc::clone(&client);
        let args = Arc::clone(&args);
        let stats = Arc::clone(&stats);

        tasks.spawn(async move {
            run_invocations(client, args, t, start, end, stats).await;
        });

        start = end + 1;
    }

    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            eprintln!("Task failed: {}", e);
        }
    }

    let stats = stats.lock().await;
    println!("Completed {} invocations", args.iters);
    println!();
    println!("Results:");
    for (status, count) in &stats.by_status {
        println!("  HTTP {status}: {count}");
    }
    println!("  Errors:  {}", stats.error_count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_event_carries_cast_flag() {
        let event = gateway_event(Action::Get, 42, true);

        assert_eq!(event["pathParameters"]["movieId"], json!("42"));
        assert_eq!(event["queryStringParameters"]["cast"], json!("true"));
        assert_eq!(event["requestContext"]["http"]["method"], json!("GET"));
        assert_eq!(event["rawPath"], json!("/movies/42"));
    }

    #[test]
    fn delete_event_ignores_cast_flag() {
        let event = gateway_event(Action::Delete, 7, true);

        assert_eq!(event["queryStringParameters"], json!({}));
        assert_eq!(event["rawQueryString"], json!(""));
        assert_eq!(event["routeKey"], json!("DELETE /movies/{movieId}"));
    }

    #[test]
    fn parses_gateway_response() {
        let response: GatewayResponse = serde_json::from_str(
            r#"{"statusCode":404,"headers":{"content-type":"application/json"},"body":"{\"message\":\"Movie with ID 7 not found.\"}","isBase64Encoded":false}"#,
        )
        .unwrap();

        assert_eq!(response.status_code, 404);
        assert!(response.body.unwrap().contains("not found"));
    }
}
