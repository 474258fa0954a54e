//! Synthetic sample-data generation.
//!
//! Produces a plausible 96-block trading day for each day in the window:
//! DAM/RTM clearing results with an evening peak, discom drawal
//! schedules, and generator output schedules shaped by fuel type.

use emi_core::models::{Market, ScheduleKind};
use emi_sqlite::{
    Db, Error,
    types::{NewMarketRecord, NewScheduleRecord},
};
use rand::Rng;
use time::{Duration, OffsetDateTime, Time};

const BLOCKS_PER_DAY: i64 = 96;

// name, capacity (MW), fuel
const GENERATORS: &[(&str, f64, Fuel)] = &[
    ("NTPC Rihand", 3000.0, Fuel::Coal),
    ("Tehri Hydro", 1000.0, Fuel::Hydro),
    ("Alaknanda Hydro", 330.0, Fuel::Hydro),
    ("Ramganga Gas", 450.0, Fuel::Gas),
    ("Koteshwar Hydro", 400.0, Fuel::Hydro),
];

// name, base drawal (MWh per block)
const DISCOMS: &[(&str, f64)] = &[("UPCL", 800.0), ("PTCUL", 300.0)];

#[derive(Clone, Copy, PartialEq)]
enum Fuel {
    Coal,
    Hydro,
    Gas,
}

/// Generate `days` days of sample data ending today.
///
/// Inserts are duplicate-skipping, so re-running over an already seeded
/// window only fills gaps. Returns the number of rows inserted.
pub async fn generate(db: &Db, days: u32) -> Result<u64, Error> {
    let mut rng = rand::rng();

    let end = OffsetDateTime::now_utc().date();
    let start = end - Duration::days(i64::from(days.max(1)) - 1);

    let mut market = Vec::new();
    let mut load = Vec::new();
    let mut generation = Vec::new();

    let mut day = start;
    loop {
        for block in 1..=BLOCKS_PER_DAY {
            let timestamp =
                day.with_time(Time::MIDNIGHT).assume_utc() + Duration::minutes((block - 1) * 15);
            // blocks 72..=95 cover 18:00-24:00
            let evening_peak = (18..=23).contains(&(block / 4));

            for market_kind in [Market::Dam, Market::Rtm] {
                let base_price = match market_kind {
                    Market::Dam => 2500.0,
                    Market::Rtm => 2600.0,
                };
                let variation: f64 = rng.random_range(-500.0..800.0);
                let time_factor = if evening_peak { 1.2 } else { 0.9 };
                let mcp = (base_price + variation * time_factor).max(1000.0);
                let mcv = rng.random_range(500.0..2000.0);

                market.push(NewMarketRecord {
                    market: market_kind,
                    timestamp,
                    block,
                    mcp: round2(mcp),
                    mcv: round2(mcv),
                });
            }

            for (discom, base_load) in DISCOMS {
                let time_factor = if evening_peak { 1.3 } else { 0.8 };
                let scheduled =
                    (base_load + rng.random_range(-100.0..200.0) * time_factor).max(100.0);
                let actual = scheduled * rng.random_range(0.95..1.05);

                load.push(NewScheduleRecord {
                    entity: (*discom).to_owned(),
                    date: day,
                    block,
                    scheduled: round2(scheduled),
                    actual: Some(round2(actual)),
                });
            }

            for (generator, capacity, fuel) in GENERATORS {
                let base = capacity * 0.7;
                let time_factor = match fuel {
                    // hydro and gas follow the load pattern, coal is baseload
                    Fuel::Hydro => {
                        if evening_peak {
                            1.2
                        } else {
                            0.8
                        }
                    }
                    Fuel::Coal => rng.random_range(0.95..1.05),
                    Fuel::Gas => {
                        if evening_peak {
                            1.1
                        } else {
                            0.9
                        }
                    }
                };
                let scheduled = (base * time_factor * rng.random_range(0.8..1.0)).max(0.0);
                let actual = scheduled * rng.random_range(0.95..1.05);

                generation.push(NewScheduleRecord {
                    entity: (*generator).to_owned(),
                    date: day,
                    block,
                    scheduled: round2(scheduled),
                    actual: Some(round2(actual)),
                });
            }
        }

        if day >= end {
            break;
        }
        let Some(next) = day.next_day() else { break };
        day = next;
    }

    let mut inserted = db.insert_market_records(&market).await?;
    inserted += db.insert_schedule_records(ScheduleKind::Load, &load).await?;
    inserted += db
        .insert_schedule_records(ScheduleKind::Generation, &generation)
        .await?;
    Ok(inserted)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
