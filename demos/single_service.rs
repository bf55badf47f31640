//! Check slots, reserve the earliest, inspect holds, release it again, for a
//! single named service.
//!
//! Usage:
//!   cargo run --example single_service -- [services.yaml] [service-name]

use reservation_client::{ReservationClient, ServicesConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "services.yaml".to_string());
    let service = args.next().unwrap_or_else(|| "hotel".to_string());

    let services = ServicesConfig::from_path(&config_path)?;
    let client = ReservationClient::new(services.service(&service)?)?;

    let mut available = client.list_available()?;
    available.sort_by(|a, b| a.id.cmp(&b.id));
    println!("{service}: {} slots available", available.len());

    let Some(earliest) = available.first() else {
        println!("{service}: nothing to reserve");
        return Ok(());
    };

    match client.reserve(earliest.id.clone()) {
        Ok(slot) => println!("{service}: reserved slot {}", slot.id),
        Err(err) => println!("{service}: slot {} was NOT reserved: {err}", earliest.id),
    }

    let held = client.list_held()?;
    let ids: Vec<String> = held.iter().map(|s| s.id.to_string()).collect();
    println!("{service}: currently holding [{}]", ids.join(", "));

    // Leave no residue behind.
    for slot in &held {
        match client.release(slot.id.clone()) {
            Ok(_) => println!("{service}: released slot {}", slot.id),
            Err(err) => println!("{service}: slot {} was NOT released: {err}", slot.id),
        }
    }

    Ok(())
}
