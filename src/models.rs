//! Insert models for the airline tables.
//!
//! Generated keys are left out; the database assigns them and hands them
//! back through `RETURNING`.

use chrono::NaiveDate;
use diesel::prelude::*;
use std::fmt;
use std::str::FromStr;

use crate::schema::*;

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = plane)]
pub struct NewPlane {
    pub make: String,
    pub model: String,
    pub age: i32,
    pub seats: i32,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = pilot)]
pub struct NewPilot {
    pub fullname: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = flight)]
pub struct NewFlight {
    pub cost: i32,
    pub num_sold: i32,
    pub num_stops: i32,
    pub actual_departure_date: NaiveDate,
    pub actual_arrival_date: NaiveDate,
    pub arrival_airport: String,
    pub departure_airport: String,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = technician)]
pub struct NewTechnician {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = reservation)]
pub struct NewReservation {
    pub cid: i32,
    pub fid: i32,
    pub status: String,
}

impl NewReservation {
    pub fn new(cid: i32, fid: i32, status: ReservationStatus) -> Self {
        NewReservation {
            cid,
            fid,
            status: status.code().to_string(),
        }
    }
}

/// Reservation state as stored in `reservation.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Waitlisted,
    Confirmed,
    Reserved,
}

impl ReservationStatus {
    pub fn code(self) -> &'static str {
        match self {
            ReservationStatus::Waitlisted => "W",
            ReservationStatus::Confirmed => "C",
            ReservationStatus::Reserved => "R",
        }
    }

    /// Status for a new booking given the seats still free on the flight.
    pub fn for_available_seats(available: i64) -> Self {
        if available > 0 {
            ReservationStatus::Reserved
        } else {
            ReservationStatus::Waitlisted
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReservationStatus::Waitlisted => "waitlisted",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Reserved => "reserved",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" | "WAITLISTED" => Ok(ReservationStatus::Waitlisted),
            "C" | "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "R" | "RESERVED" => Ok(ReservationStatus::Reserved),
            other => Err(format!("'{}' is not one of W, C, R", other)),
        }
    }
}
