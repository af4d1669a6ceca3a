//! 多日模擬賽局示例
//!
//! 客戶接受前一天的全部報價，供應商對每筆詢價回覆完整報價。

use std::collections::BTreeMap;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use scm_agent::scm_core::{OrderStatus, SupplierOffer};
use scm_agent::scm_factory::{RecordingGateway, SimulatedFactory};
use scm_agent::{
    AgentConfig, CustomerOrder, ProductCatalog, ProductSpec, Rfq, StartInfo, TradingAgent,
};

const NUMBER_OF_DAYS: i32 = 30;

fn catalog() -> ProductCatalog {
    ProductCatalog::new()
        .with_product(
            ProductSpec::new(1, Decimal::from(1000), vec![100, 200]).with_assembly_cycles(5),
        )
        .with_product(
            ProductSpec::new(2, Decimal::from(1400), vec![100, 300]).with_assembly_cycles(6),
        )
        .with_supplier(100, "pintel")
        .with_supplier(100, "mec")
        .with_supplier(200, "imd")
        .with_supplier(300, "basus")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("=== 多日模擬賽局 ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => AgentConfig::from_json_file(path)?,
        None => AgentConfig::new().with_rng_seed(2024),
    };

    let mut agent = TradingAgent::new(config, catalog())?;
    let mut factory = SimulatedFactory::new(catalog(), 2000);
    let mut gateway = RecordingGateway::new();
    let mut market = StdRng::seed_from_u64(7);
    let mut next_rfq_id = 1;
    let mut next_offer_id = 1;

    agent.simulation_started(StartInfo::new(NUMBER_OF_DAYS, 5));

    for date in 0.. {
        agent.begin_day(date)?;
        if agent.clock().map_or(true, |clock| clock.is_finished()) {
            break;
        }

        let rfqs: Vec<Rfq> = (0..10)
            .map(|_| {
                let product_id = market.gen_range(1..=2);
                let base = if product_id == 1 { 1000 } else { 1400 };
                let rfq = Rfq::new(
                    next_rfq_id,
                    product_id,
                    market.gen_range(1..=20),
                    date + market.gen_range(3..=12),
                    Decimal::from(base + market.gen_range(0..=base)),
                    Decimal::from(market.gen_range(0..=500)),
                );
                next_rfq_id += 1;
                rfq
            })
            .collect();

        let new_orders: Vec<CustomerOrder> = gateway
            .customer_offers
            .last()
            .map(|offers| {
                offers
                    .iter()
                    .map(|o| {
                        CustomerOrder::new(o.rfq_id, o.product_id, o.quantity, o.due_date)
                            .with_unit_price(o.unit_price)
                    })
                    .collect()
            })
            .unwrap_or_default();

        agent.handle_customer_rfqs(&rfqs, &mut gateway)?;

        agent.handle_customer_orders(&new_orders, &mut factory, &mut gateway)?;

        let mut by_supplier: BTreeMap<String, Vec<SupplierOffer>> = BTreeMap::new();
        for rfq in gateway.supplier_rfqs.last().cloned().unwrap_or_default() {
            let offer = SupplierOffer::new(
                next_offer_id,
                rfq.supplier.clone(),
                rfq.product_id,
                rfq.quantity,
                Decimal::from(market.gen_range(250..=450)),
                rfq.due_date,
            );
            next_offer_id += 1;
            by_supplier.entry(rfq.supplier).or_default().push(offer);
        }
        for offers in by_supplier.values() {
            agent.handle_supplier_offers(offers, &mut gateway)?;
            let orders = gateway.last_supplier_orders().to_vec();
            factory.accept_supplier_orders(&orders);
        }

        let report = agent.handle_simulation_status(&mut factory)?;
        println!(
            "第 {:>2} 天: 交貨 {:>2} 取消 {:>2} 預留 {:>2} 生產 {:>2} 延後 {:>2}",
            date,
            report.delivered(),
            report.canceled(),
            report.reserved(),
            report.produced(),
            report.deferred()
        );
        factory.end_of_day(date);
    }

    agent.simulation_ended();

    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    for id in 1..next_rfq_id {
        let label = match factory.order_status(id) {
            Some(OrderStatus::Delivered) => "已交貨",
            Some(OrderStatus::Canceled) => "已取消",
            Some(OrderStatus::Active) => "進行中",
            None => continue,
        };
        *totals.entry(label).or_insert(0) += 1;
    }

    println!("\n=== 賽局結果 ===");
    println!("報價 {} 筆，採購單 {} 張", gateway.offers_sent(), gateway.orders_sent());
    for (label, count) in totals {
        println!("  {}: {}", label, count);
    }

    Ok(())
}
