//! Menu handlers, one per business operation.
//!
//! Every handler reads its fields first and only then talks to the
//! database, so a typo never leaves a half-finished insert behind.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::console::Console;
use crate::error::{ConsoleError, DbError, HandlerError};
use crate::executor::SqlParam;
use crate::menu::MenuChoice;
use crate::models::*;
use crate::store::AirlineStore;

/// Seats on the plane assigned to a flight, and how many are still free.
pub const FLIGHT_SEATS_QUERY: &str = "\
SELECT f.fnum, p.seats, f.num_sold, p.seats - f.num_sold AS available_seats \
FROM flight f \
JOIN flightinfo fi ON fi.flight_id = f.fnum \
JOIN plane p ON p.id = fi.plane_id \
WHERE f.fnum = $1";

pub const REPAIRS_PER_PLANE_QUERY: &str = "\
SELECT r.plane_id, COUNT(*) AS total_repairs \
FROM repairs r \
GROUP BY r.plane_id \
ORDER BY total_repairs DESC, r.plane_id";

pub const REPAIRS_PER_YEAR_QUERY: &str = "\
SELECT CAST(EXTRACT(YEAR FROM r.repair_date) AS INTEGER) AS repair_year, \
       COUNT(*) AS total_repairs \
FROM repairs r \
GROUP BY repair_year \
ORDER BY total_repairs ASC, repair_year";

pub const PASSENGERS_WITH_STATUS_QUERY: &str =
    "SELECT COUNT(*) AS passengers FROM reservation WHERE status = $1";

pub const CUSTOMER_EXISTS_QUERY: &str = "SELECT 1 FROM customer WHERE id = $1";

pub const SEAT_SOLD_UPDATE: &str = "UPDATE flight SET num_sold = num_sold + 1 WHERE fnum = $1";

/// A table whose rows are echoed back after an insert.
struct Listing {
    table: &'static str,
    key: &'static str,
    noun: &'static str,
}

const PLANES: Listing = Listing {
    table: "plane",
    key: "id",
    noun: "airplane",
};
const PILOTS: Listing = Listing {
    table: "pilot",
    key: "id",
    noun: "pilot",
};
const FLIGHTS: Listing = Listing {
    table: "flight",
    key: "fnum",
    noun: "flight",
};
const TECHNICIANS: Listing = Listing {
    table: "technician",
    key: "id",
    noun: "technician",
};
const RESERVATIONS: Listing = Listing {
    table: "reservation",
    key: "rnum",
    noun: "reservation",
};

/// Run the handler for `choice`, printing any failure instead of returning it.
pub fn dispatch<S, R, W>(choice: MenuChoice, store: &mut S, console: &mut Console<R, W>)
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let outcome = match choice {
        MenuChoice::AddPlane => add_plane(store, console),
        MenuChoice::AddPilot => add_pilot(store, console),
        MenuChoice::AddFlight => add_flight(store, console),
        MenuChoice::AddTechnician => add_technician(store, console),
        MenuChoice::BookFlight => book_flight(store, console),
        MenuChoice::ListNumberOfAvailableSeats => list_number_of_available_seats(store, console),
        MenuChoice::ListTotalNumberOfRepairsPerPlane => {
            list_total_number_of_repairs_per_plane(store, console)
        }
        MenuChoice::ListTotalNumberOfRepairsPerYear => {
            list_total_number_of_repairs_per_year(store, console)
        }
        MenuChoice::FindPassengersCountWithStatus => {
            find_passengers_count_with_status(store, console)
        }
        MenuChoice::Exit => Ok(()),
    };

    if let Err(err) = outcome {
        tracing::info!("{} failed: {}", choice.label(), err);
        if let Err(io_err) = writeln!(console.output(), "{}", err) {
            tracing::warn!("Could not report handler failure: {}", io_err);
        }
    }
}

/// Print the whole table, then just the row with `key`.
fn show_inserted<S, R, W>(
    store: &mut S,
    console: &mut Console<R, W>,
    listing: &Listing,
    key: i32,
) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let all = format!("SELECT * FROM {} ORDER BY {}", listing.table, listing.key);
    store.execute_query_and_print_result(console.output(), &all, &[])?;

    writeln!(console.output(), "\nNew {} is added as below:\n", listing.noun)?;
    let one = format!("SELECT * FROM {} WHERE {} = $1", listing.table, listing.key);
    store.execute_query_and_print_result(console.output(), &one, &[SqlParam::Int(key)])?;
    writeln!(console.output(), "\n")?;
    Ok(())
}

pub fn add_plane<S, R, W>(store: &mut S, console: &mut Console<R, W>) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let make = console.prompt_required("make", "Please enter the airplane make")?;
    let model = console.prompt_required("model", "Please enter the airplane model")?;
    let age = console.prompt_count("age", "Please enter the airplane age")?;
    let seats = console.prompt_count("seats", "Please enter the number of seats")?;

    let id = store.insert_plane(&NewPlane {
        make,
        model,
        age,
        seats,
    })?;
    tracing::info!("Added plane {}", id);
    show_inserted(store, console, &PLANES, id)
}

pub fn add_pilot<S, R, W>(store: &mut S, console: &mut Console<R, W>) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let fullname = console.prompt_required(
        "fullname",
        "Please enter pilot fullname (Firstname Lastname)",
    )?;
    let nationality = console.prompt_required("nationality", "Please enter nationality")?;

    let id = store.insert_pilot(&NewPilot {
        fullname,
        nationality,
    })?;
    tracing::info!("Added pilot {}", id);
    show_inserted(store, console, &PILOTS, id)
}

pub fn add_flight<S, R, W>(store: &mut S, console: &mut Console<R, W>) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let cost = console.prompt_count("cost", "Please enter the cost")?;
    let num_sold =
        console.prompt_count("num_sold", "Please enter the number of unavailable seats")?;
    let num_stops = console.prompt_count("num_stops", "Please enter the number of stops")?;
    let actual_departure_date = console.prompt_parsed::<NaiveDate>(
        "departure date",
        "Please enter the departure date (YYYY-MM-DD)",
    )?;
    let actual_arrival_date = console.prompt_parsed::<NaiveDate>(
        "arrival date",
        "Please enter the arrival date (YYYY-MM-DD)",
    )?;
    if actual_arrival_date < actual_departure_date {
        return Err(ConsoleError::Invalid {
            field: "arrival date".to_string(),
            reason: format!(
                "{} is before departure {}",
                actual_arrival_date, actual_departure_date
            ),
        }
        .into());
    }
    let arrival_airport =
        console.prompt_required("arrival airport", "Please enter the arrival airport")?;
    let departure_airport =
        console.prompt_required("departure airport", "Please enter the departure airport")?;

    let fnum = store.insert_flight(&NewFlight {
        cost,
        num_sold,
        num_stops,
        actual_departure_date,
        actual_arrival_date,
        arrival_airport,
        departure_airport,
    })?;
    tracing::info!("Added flight {}", fnum);
    show_inserted(store, console, &FLIGHTS, fnum)
}

pub fn add_technician<S, R, W>(
    store: &mut S,
    console: &mut Console<R, W>,
) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let full_name = console.prompt_required(
        "full_name",
        "Please enter Technician fullname (Firstname Lastname)",
    )?;

    let id = store.insert_technician(&NewTechnician { full_name })?;
    tracing::info!("Added technician {}", id);
    show_inserted(store, console, &TECHNICIANS, id)
}

/// Reserve a seat for a customer, or waitlist them when the flight is full.
pub fn book_flight<S, R, W>(store: &mut S, console: &mut Console<R, W>) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let cid = console.prompt_parsed::<i32>("customer id", "Please enter the customer id")?;
    let fnum = console.prompt_parsed::<i32>("flight number", "Please enter the flight number")?;

    if !store.has_rows(CUSTOMER_EXISTS_QUERY, &[SqlParam::Int(cid)])? {
        return Err(HandlerError::NotFound(format!("customer {}", cid)));
    }

    let seats = store.fetch(FLIGHT_SEATS_QUERY, &[SqlParam::Int(fnum)])?;
    let available = match seats.rows.first().and_then(|row| row.get(3)) {
        None => return Err(HandlerError::NotFound(format!("flight {}", fnum))),
        Some(value) => value.parse::<i64>().map_err(|e| {
            DbError::Decode(format!("available seats '{}': {}", value, e))
        })?,
    };

    let status = ReservationStatus::for_available_seats(available);
    let rnum = store.insert_reservation(&NewReservation::new(cid, fnum, status))?;
    if status == ReservationStatus::Reserved {
        store.execute_update(SEAT_SOLD_UPDATE, &[SqlParam::Int(fnum)])?;
    }
    tracing::info!("Booked reservation {} on flight {} as {}", rnum, fnum, status);

    writeln!(
        console.output(),
        "\nReservation {} for customer {} on flight {} is {}.\n",
        rnum,
        cid,
        fnum,
        status
    )?;
    let one = format!("SELECT * FROM {} WHERE {} = $1", RESERVATIONS.table, RESERVATIONS.key);
    store.execute_query_and_print_result(console.output(), &one, &[SqlParam::Int(rnum)])?;
    writeln!(console.output())?;
    Ok(())
}

pub fn list_number_of_available_seats<S, R, W>(
    store: &mut S,
    console: &mut Console<R, W>,
) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let fnum = console.prompt_parsed::<i32>("flight number", "Please enter the flight number")?;
    let date = console.prompt_parsed::<NaiveDate>(
        "departure date",
        "Please enter the departure date (YYYY-MM-DD)",
    )?;

    let query = format!("{} AND f.actual_departure_date = $2", FLIGHT_SEATS_QUERY);
    let shown = store.execute_query_and_print_result(
        console.output(),
        &query,
        &[SqlParam::Int(fnum), SqlParam::Date(date)],
    )?;
    if shown == 0 {
        writeln!(console.output(), "No flight {} departing on {}.", fnum, date)?;
    }
    writeln!(console.output())?;
    Ok(())
}

pub fn list_total_number_of_repairs_per_plane<S, R, W>(
    store: &mut S,
    console: &mut Console<R, W>,
) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let shown =
        store.execute_query_and_print_result(console.output(), REPAIRS_PER_PLANE_QUERY, &[])?;
    if shown == 0 {
        writeln!(console.output(), "No repairs recorded.")?;
    }
    writeln!(console.output())?;
    Ok(())
}

pub fn list_total_number_of_repairs_per_year<S, R, W>(
    store: &mut S,
    console: &mut Console<R, W>,
) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let shown =
        store.execute_query_and_print_result(console.output(), REPAIRS_PER_YEAR_QUERY, &[])?;
    if shown == 0 {
        writeln!(console.output(), "No repairs recorded.")?;
    }
    writeln!(console.output())?;
    Ok(())
}

pub fn find_passengers_count_with_status<S, R, W>(
    store: &mut S,
    console: &mut Console<R, W>,
) -> Result<(), HandlerError>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    let status = console.prompt_parsed::<ReservationStatus>(
        "status",
        "Please enter the reservation status (W, C or R)",
    )?;

    let rows = store.execute_query_and_return_result(
        PASSENGERS_WITH_STATUS_QUERY,
        &[SqlParam::Text(status.code().to_string())],
    )?;
    let count = rows
        .first()
        .and_then(|row| row.first())
        .map_or("0", String::as_str);

    writeln!(
        console.output(),
        "\nNumber of {} passengers ({}): {}\n",
        status,
        status.code(),
        count
    )?;
    Ok(())
}
