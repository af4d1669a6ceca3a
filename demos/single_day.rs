//! 單日流程示例：報價、訂單、採購、排程

use anyhow::Result;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use scm_agent::scm_core::SupplierOffer;
use scm_agent::scm_factory::{RecordingGateway, SimulatedFactory};
use scm_agent::{
    AgentConfig, CustomerOrder, ProductCatalog, ProductSpec, Rfq, StartInfo, TradingAgent,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== 單日流程示例 ===\n");

    let catalog = ProductCatalog::new()
        .with_product(
            ProductSpec::new(1, Decimal::from(1100), vec![100, 200]).with_assembly_cycles(5),
        )
        .with_supplier(100, "pintel")
        .with_supplier(100, "mec")
        .with_supplier(200, "imd");

    let mut agent = TradingAgent::new(AgentConfig::new().with_rng_seed(42), catalog.clone())?;
    let mut factory = SimulatedFactory::new(catalog, 2000)
        .with_stock(1, 4)
        .with_stock(100, 10)
        .with_stock(200, 10);
    let mut gateway = RecordingGateway::new();

    agent.simulation_started(StartInfo::new(220, 5));
    agent.begin_day(10)?;

    // 1. 客戶詢價
    let rfqs = vec![
        Rfq::new(1, 1, 10, 20, Decimal::from(1900), Decimal::from(200)),
        Rfq::new(2, 1, 5, 13, Decimal::from(1900), Decimal::from(200)),
        Rfq::new(3, 1, 8, 25, Decimal::from(1150), Decimal::from(4000)),
    ];
    let bidding = agent.handle_customer_rfqs(&rfqs, &mut gateway)?;
    println!(
        "詢價 {} 筆，報價 {} 筆，報價總額 {}",
        bidding.evaluated, bidding.offers, bidding.offered_value
    );
    for (rfq_id, reason) in &bidding.rejections {
        println!("  - 詢價 {} 未報價: {:?}", rfq_id, reason);
    }

    // 2. 新成立的客戶訂單
    let orders = vec![CustomerOrder::new(501, 1, 10, 18).with_unit_price(Decimal::from(1700))];
    let intake = agent.handle_customer_orders(&orders, &mut factory, &mut gateway)?;
    println!(
        "\n訂單 {} 張，零件詢價 {} 筆",
        intake.intake.recorded_orders, intake.procurement.rfqs_staged
    );

    // 3. 供應商報價（部分 → 完整）
    let offers = vec![
        SupplierOffer::new(1, "pintel".to_string(), 100, 6, Decimal::from(280), 12),
        SupplierOffer::new(2, "pintel".to_string(), 100, 10, Decimal::from(300), 12),
    ];
    let accepted = agent.handle_supplier_offers(&offers, &mut gateway)?;
    factory.accept_supplier_orders(gateway.last_supplier_orders());
    println!(
        "採購單 {} 張，採購總額 {}",
        accepted.accepted, accepted.committed_cost
    );

    // 4. 當日排程
    let report = agent.handle_simulation_status(&mut factory)?;
    println!("\n第 {} 天排程:", report.date);
    for outcome in &report.outcomes {
        println!("  - 訂單 {}: {:?}", outcome.order_id, outcome.action);
    }
    println!("\n{}", serde_json::to_string_pretty(&report.schedule)?);

    Ok(())
}
