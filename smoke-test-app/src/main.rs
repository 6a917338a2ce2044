use std::time::Duration;

use blocksafari::transport::RpcCredentials;
use blocksafari::{ChainService, Client, ClientOptions, ExplorerError, Result};

fn ensure(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ExplorerError::Malformed(message.to_string()))
    }
}

fn with_step(step: &str, err: ExplorerError) -> ExplorerError {
    ExplorerError::Malformed(format!("{step}: {err}"))
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    load_dotenv();

    let node = target_node();
    let extended_checks = env_flag("BLOCKSAFARI_EXTENDED_CHECKS");

    println!("Running blocksafari smoke test against {node}");
    match run(&node, extended_checks).await {
        Ok(()) => {
            println!("Smoke test passed");
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Smoke test failed: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn load_dotenv() {
    let _ = dotenvy::from_filename_override("smoke-test-app/.env");
    let _ = dotenvy::dotenv_override();
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

fn trim_wrapping_quotes(value: &str) -> String {
    let value = value.trim();
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

fn target_node() -> String {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BLOCKSAFARI_NODE").ok())
        .map(|node| trim_wrapping_quotes(&node))
        .filter(|node| !node.is_empty())
        .unwrap_or_else(|| "http://127.0.0.1:8334/".to_string())
}

fn credentials_from_env() -> Option<RpcCredentials> {
    let user = trim_wrapping_quotes(&std::env::var("BLOCKSAFARI_RPC_USER").ok()?);
    let password = trim_wrapping_quotes(&std::env::var("BLOCKSAFARI_RPC_PASS").unwrap_or_default());
    (!user.is_empty()).then_some(RpcCredentials { user, password })
}

async fn run(node: &str, extended_checks: bool) -> Result<()> {
    let options = ClientOptions {
        timeout: Duration::from_secs(15),
        credentials: credentials_from_env(),
        ..ClientOptions::default()
    };
    let client = Client::new(node, options)?;
    let chain = &client.chain;

    let tip = chain
        .get_tip()
        .await
        .map_err(|err| with_step("get_tip", err))?;
    let head = chain
        .get_block(&tip.hash, true)
        .await
        .map_err(|err| with_step("get_block", err))?;

    ensure(head.hash == tip.hash, "tip block hash mismatch")?;
    ensure(head.height == tip.height, "tip block height mismatch")?;

    let by_height = chain
        .get_block_hash(tip.height)
        .await
        .map_err(|err| with_step("get_block_hash", err))?;
    ensure(by_height == tip.hash, "height lookup does not match the tip")?;

    let count = chain
        .get_block_count()
        .await
        .map_err(|err| with_step("get_block_count", err))?;
    let best = chain
        .get_best_block_hash()
        .await
        .map_err(|err| with_step("get_best_block_hash", err))?;
    ensure(count >= tip.height, "block count is behind the tip")?;
    ensure(!best.is_empty(), "best block hash is empty")?;

    println!(
        "tip_height={}, tip_hash={}, transactions={}, total_output={}",
        tip.height,
        tip.hash,
        head.tx.len(),
        head.total_output_value()
    );

    if extended_checks {
        run_extended_checks(&client, &head).await?;
    } else {
        println!("extended_checks=skipped (set BLOCKSAFARI_EXTENDED_CHECKS=1 to enable)");
    }

    Ok(())
}

async fn run_extended_checks(client: &Client, head: &blocksafari::BlockSummary) -> Result<()> {
    let chain = &client.chain;

    let Some(coinbase) = head.tx.full().first() else {
        return ensure(false, "tip block has no transactions");
    };
    let tx = chain
        .get_transaction(&coinbase.txid)
        .await
        .map_err(|err| with_step("get_transaction", err))?;
    ensure(tx.is_coinbase(), "first transaction of the tip is not a coinbase")?;

    let raw: serde_json::Value = chain
        .get_raw_block(&head.hash)
        .await
        .map_err(|err| with_step("get_raw_block", err))?;
    ensure(
        raw.get("hash").and_then(serde_json::Value::as_str) == Some(head.hash.as_str()),
        "raw block hash mismatch",
    )?;

    let walked = blocksafari::walker::recent_blocks(chain, 5)
        .await
        .map_err(|err| with_step("recent_blocks", err))?;
    ensure(!walked.is_empty(), "recent block walk returned nothing")?;
    for pair in walked.windows(2) {
        ensure(
            pair[0].previous_hash() == Some(pair[1].hash.as_str()),
            "recent blocks are not hash-linked",
        )?;
    }

    println!("coinbase={}, walked_blocks={}", tx.txid, walked.len());
    Ok(())
}
