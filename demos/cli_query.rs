use std::io::{stdout, Write};

use chrono::NaiveTime;
use dev_utils::get_example_scenario;
use stochastic_csa::Planner;

fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}: ");
    stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> std::io::Result<()> {
    let (store, _, start_time, _) = get_example_scenario();
    let planner = Planner::new(&store);

    println!("{} stations loaded, spanning the Station-0..Station-N chain.", store.n_stations());

    let origin = prompt("Origin station (e.g. Station-0)")?;
    let destination = prompt("Destination station (e.g. Station-199)")?;

    let time_str = prompt("Departure time (HH:MM, blank for the fixture default)")?;
    let departure = if time_str.is_empty() {
        start_time
    } else {
        match NaiveTime::parse_from_str(&format!("{time_str}:00"), "%H:%M:%S") {
            Ok(time) => start_time.date().and_time(time),
            Err(e) => {
                println!("Invalid time ({e}), using the fixture default.");
                start_time
            }
        }
    };

    let tolerance_str = prompt("Minimum acceptable probability (0, 1], blank for 0.8")?;
    let tolerance = if tolerance_str.is_empty() { 0.8 } else { tolerance_str.parse().unwrap_or(0.8) };

    match planner.plan(&origin, &destination, departure, tolerance) {
        Ok(route) if route.is_empty() => println!("No journey clears that tolerance within the horizon."),
        Ok(route) => {
            for segment in &route {
                println!(
                    "{} -> {} [{}] {} -> {}",
                    store.name_of(segment.departure_station).unwrap(),
                    store.name_of(segment.arrival_station).unwrap(),
                    segment.trip_id,
                    segment.departure_timestamp,
                    segment.arrival_timestamp,
                );
            }
        }
        Err(e) => println!("Query rejected: {e}"),
    }

    Ok(())
}
