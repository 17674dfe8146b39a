//! Balance report binary
//!
//! Loads the configured ledger file and prints member balances, the
//! settlement plan in both modes, and the ledger summary. Also serves as
//! the top-level failure barrier: any fault surfaces as a printed error,
//! never a damaged data file.

use anyhow::Context;
use divvy_settlement::{Config, PlanMode, SettlementEngine};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    tracing::info!("Starting {} report", config.service_name);

    let engine = SettlementEngine::new(config).context("opening ledger")?;
    let currency = engine.store().currency();

    println!("Balances ({}):", currency.display_name());
    for position in divvy_settlement::positions(engine.snapshot()) {
        println!(
            "  {:<20} {}",
            engine.store().member_name(&position.member_id),
            currency.format_amount(position.net)
        );
    }

    for mode in [PlanMode::Simplified, PlanMode::Direct] {
        let plan = engine.settlement_plan(mode);
        println!("\nSettlement plan ({} mode):", mode);
        if plan.is_settled() {
            println!("  Everyone is settled up.");
            continue;
        }
        for instruction in &plan.instructions {
            println!(
                "  {} pays {} {}",
                engine.store().member_name(&instruction.from),
                engine.store().member_name(&instruction.to),
                currency.format_amount(instruction.amount)
            );
        }
    }

    let summary = engine.summary();
    println!(
        "\n{} members, {} transactions ({} expenses, {} settlements), {} total spent, {} unsettled",
        summary.member_count,
        summary.transaction_count,
        summary.expense_count,
        summary.settlement_count,
        currency.format_amount(summary.total_expenses),
        summary.unsettled_count
    );

    Ok(())
}
