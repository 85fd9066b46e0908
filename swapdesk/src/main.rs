//! # Swapdesk Binary
//!
//! Thin interactive front end over the [`swapdesk`] library: a line-oriented
//! console that drives the session state machine and prints the notices the
//! background tasks emit.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use lib_core::{core_config, init_config, SwapError};
use lib_evm::{Address, AggregatorClient, PriceClient, RpcWallet, TokenCatalog};
use swapdesk::app::{App, Notice, Side, SlippageTolerance};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure tracing subscriber; RUST_LOG overrides the default level.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    init_config().map_err(|e| anyhow::anyhow!(e))?;
    let config = core_config();
    let timeout = Duration::from_secs(config.http_timeout_secs);

    info!("swapdesk starting");
    info!("price api: {}", config.price_api_base);
    info!("aggregator api: {}", config.aggregator_api_base);

    let catalog = TokenCatalog::builtin();
    let price = Arc::new(PriceClient::new(&config.price_api_base, timeout)?);
    let aggregator = Arc::new(AggregatorClient::new(&config.aggregator_api_base, timeout)?);

    let mut wallet = RpcWallet::new(&config.rpc_url, timeout)?;
    if let Some(taker) = &config.taker_address {
        let address = Address::from_str(taker)
            .map_err(|e| SwapError::Config(format!("SWAPDESK_TAKER is not an address: {e}")))?;
        wallet.connect(address);
        info!("wallet connected: {}", address);
    } else {
        info!("no taker configured; execution will be rejected until one is set");
    }

    let app = App::new(&catalog, price, aggregator, Arc::new(wallet));
    app.start();

    println!("commands: pair | sell <SYMBOL> | buy <SYMBOL> | flip | amount <N> | slippage <0.5|2.5|5> | swap | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !dispatch(&app, &catalog, line.trim()) {
                    break;
                }
            }
            event = app.recv_event() => {
                let Some(event) = event else { break };
                if let Some(notice) = app.handle_event(event) {
                    print_notice(&notice);
                }
            }
        }
    }

    Ok(())
}

/// Apply one console command. Returns `false` to quit.
fn dispatch(app: &App, catalog: &TokenCatalog, line: &str) -> bool {
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "pair" => {
            let state = app.state.read();
            println!(
                "{} -> {}  ratio: {}",
                state.pair.sell.symbol,
                state.pair.buy.symbol,
                state
                    .price_quote
                    .as_ref()
                    .map(|q| q.ratio.to_string())
                    .unwrap_or_else(|| "unavailable".to_string())
            );
        }
        "sell" | "buy" => match catalog.by_symbol(rest) {
            Some(token) => {
                let side = if command == "sell" { Side::Sell } else { Side::Buy };
                app.select_token(side, token.clone());
            }
            None => println!("unknown token: {rest}"),
        },
        "flip" => app.swap_sides(),
        "amount" => {
            app.edit_sell_amount(rest);
            let state = app.state.read();
            println!("estimated: {}", state.amounts.buy);
        }
        "slippage" => {
            let chosen = SlippageTolerance::ALL
                .iter()
                .find(|s| rest == s.as_percent().to_string());
            match chosen {
                Some(slippage) => app.set_slippage(*slippage),
                None => println!("slippage must be one of 0.5, 2.5, 5"),
            }
        }
        "swap" => app.request_execution(),
        "quit" | "exit" => return false,
        other => println!("unknown command: {other}"),
    }

    true
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Rejected(reason) => println!("rejected: {reason}"),
        Notice::PriceUnavailable => println!("price unavailable for this pair"),
        Notice::ApprovalConfirmed { tx_hash } => println!("token approved: {tx_hash}"),
        Notice::SwapSubmitted { tx_hash } => println!("swap transaction sent: {tx_hash}"),
        Notice::SwapConfirmed { tx_hash } => println!("swap confirmed: {tx_hash}"),
        Notice::AttemptFailed(error) => println!("swap failed: {}", error.user_message()),
    }
}
