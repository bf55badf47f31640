//! Coordinate the "hotel" and "band" services: find the earliest slot both
//! offer, reserve it in both, then release any later slot still held.
//!
//! The two services are independent, so a partial failure is possible: if the
//! second reserve fails, the first is compensated by releasing it, and the
//! outcome of each side is reported explicitly either way.
//!
//! Usage:
//!   cargo run --example coordinate_reservations -- [services.yaml]

use std::collections::HashSet;

use reservation_client::{ReservationClient, ServicesConfig, SlotId};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "services.yaml".to_string());
    let services = ServicesConfig::from_path(&config_path)?;
    let hotel = ReservationClient::new(services.service("hotel")?)?;
    let band = ReservationClient::new(services.service("band")?)?;

    let hotel_available = hotel.list_available()?;
    let band_available = band.list_available()?;
    println!(
        "available: {} hotel slots, {} band slots",
        hotel_available.len(),
        band_available.len()
    );

    let band_ids: HashSet<&SlotId> = band_available.iter().map(|s| &s.id).collect();
    let earliest = hotel_available
        .iter()
        .map(|s| &s.id)
        .filter(|id| band_ids.contains(*id))
        .min()
        .cloned();

    let Some(target) = earliest else {
        println!("no slot is available in both services; nothing reserved");
        return Ok(());
    };
    println!("earliest common slot: {target}");

    if !reserve_in_both(&hotel, &band, &target) {
        return Ok(());
    }

    // Both sides secured; drop any stale later hold.
    for (name, client) in [("hotel", &hotel), ("band", &band)] {
        for slot in client.list_held()? {
            if slot.id > target {
                match client.release(slot.id.clone()) {
                    Ok(_) => println!("{name}: released stale slot {}", slot.id),
                    Err(err) => {
                        println!("{name}: stale slot {} was NOT released: {err}", slot.id)
                    }
                }
            }
        }
    }

    Ok(())
}

/// Reserve `target` in both services, compensating the hotel side if the
/// band side fails. Returns true only when both reservations stand.
fn reserve_in_both(hotel: &ReservationClient, band: &ReservationClient, target: &SlotId) -> bool {
    if let Err(err) = hotel.reserve(target.clone()) {
        println!("hotel: slot {target} was NOT reserved: {err}; band untouched");
        return false;
    }
    println!("hotel: reserved slot {target}");

    match band.reserve(target.clone()) {
        Ok(_) => {
            println!("band: reserved slot {target}");
            true
        }
        Err(err) => {
            println!("band: slot {target} was NOT reserved: {err}");
            match hotel.release(target.clone()) {
                Ok(_) => println!("hotel: compensated by releasing slot {target}"),
                Err(release_err) => println!(
                    "hotel: compensation failed, slot {target} is still held: {release_err}"
                ),
            }
            false
        }
    }
}
